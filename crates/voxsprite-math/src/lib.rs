#![warn(missing_docs)]

//! Math types for the voxsprite renderer.
//!
//! Thin wrappers around nalgebra providing the types the sprite pipeline
//! works with: points, vectors, the viewport [`Plane`], axis-aligned boxes
//! and tolerance constants. All coordinates are in voxel units.

use nalgebra::{Vector2, Vector3};

/// A point in 3D volume space.
pub type Point3 = nalgebra::Point3<f64>;

/// A vector in 3D space.
pub type Vec3 = Vector3<f64>;

/// A vector in 2D space, used for viewport sample offsets.
pub type Vec2 = Vector2<f64>;

/// Vector helpers nalgebra does not provide directly.
pub trait VectorExt: Sized {
    /// Unit vector in the same direction.
    ///
    /// The zero vector (and any vector whose length is not a positive finite
    /// number) normalizes to the zero vector instead of producing NaNs.
    fn normalize_or_zero(&self) -> Self;

    /// Squared Euclidean distance to `other`.
    fn distance_squared(&self, other: &Self) -> f64;
}

impl VectorExt for Vec3 {
    fn normalize_or_zero(&self) -> Self {
        let len = self.norm();
        if len > 0.0 && len.is_finite() {
            self / len
        } else {
            Vec3::zeros()
        }
    }

    fn distance_squared(&self, other: &Self) -> f64 {
        (self - other).norm_squared()
    }
}

impl VectorExt for Vec2 {
    fn normalize_or_zero(&self) -> Self {
        let len = self.norm();
        if len > 0.0 && len.is_finite() {
            self / len
        } else {
            Vec2::zeros()
        }
    }

    fn distance_squared(&self, other: &Self) -> f64 {
        (self - other).norm_squared()
    }
}

/// An oriented rectangle in 3D space defined by its four corners.
///
/// Parameterization: `u` runs from the `p00`/`p01` edge to the `p10`/`p11`
/// edge, `v` runs from the `p00`/`p10` edge to the `p01`/`p11` edge. For the
/// sprite viewport `u` is screen right and `v` is screen down.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    /// Corner at (u=0, v=0).
    pub p00: Point3,
    /// Corner at (u=1, v=0).
    pub p10: Point3,
    /// Corner at (u=0, v=1).
    pub p01: Point3,
    /// Corner at (u=1, v=1).
    pub p11: Point3,
}

impl Plane {
    /// Create a plane from an origin corner and two spanning vectors.
    pub fn from_frame(origin: Point3, u_span: Vec3, v_span: Vec3) -> Self {
        Self {
            p00: origin,
            p10: origin + u_span,
            p01: origin + v_span,
            p11: origin + u_span + v_span,
        }
    }

    /// Map unit-square coordinates to a point on the plane.
    ///
    /// Coordinates outside `[0, 1]` extrapolate past the corners.
    pub fn bilerp(&self, u: f64, v: f64) -> Point3 {
        let u1 = 1.0 - u;
        let v1 = 1.0 - v;
        Point3::new(
            u1 * v1 * self.p00.x + u * v1 * self.p10.x + u1 * v * self.p01.x + u * v * self.p11.x,
            u1 * v1 * self.p00.y + u * v1 * self.p10.y + u1 * v * self.p01.y + u * v * self.p11.y,
            u1 * v1 * self.p00.z + u * v1 * self.p10.z + u1 * v * self.p01.z + u * v * self.p11.z,
        )
    }

    /// Mirror the plane through the plane `y = y_mid`.
    pub fn mirrored_y(&self, y_mid: f64) -> Self {
        let m = |p: Point3| Point3::new(p.x, 2.0 * y_mid - p.y, p.z);
        Self {
            p00: m(self.p00),
            p10: m(self.p10),
            p01: m(self.p01),
            p11: m(self.p11),
        }
    }
}

/// Axis-aligned bounding box in 3D.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb3 {
    /// Minimum corner.
    pub min: Point3,
    /// Maximum corner.
    pub max: Point3,
}

impl Aabb3 {
    /// Create an AABB from min and max corners.
    pub fn new(min: Point3, max: Point3) -> Self {
        Self { min, max }
    }

    /// The box spanning `[0, x] x [0, y] x [0, z]`.
    pub fn from_extent(x: f64, y: f64, z: f64) -> Self {
        Self::new(Point3::origin(), Point3::new(x, y, z))
    }

    /// Test if a point lies inside the box (faces count as inside).
    pub fn contains(&self, p: &Point3) -> bool {
        p.x >= self.min.x
            && p.x <= self.max.x
            && p.y >= self.min.y
            && p.y <= self.max.y
            && p.z >= self.min.z
            && p.z <= self.max.z
    }

    /// Copy of the box grown by `tol` in all directions.
    pub fn expanded(&self, tol: f64) -> Self {
        let t = Vec3::repeat(tol);
        Self {
            min: self.min - t,
            max: self.max + t,
        }
    }

    /// Center of the box.
    pub fn center(&self) -> Point3 {
        nalgebra::center(&self.min, &self.max)
    }
}

/// Tolerance used for inclusive bound checks while walking rays.
#[derive(Debug, Clone, Copy)]
pub struct Tolerance {
    /// Linear distance tolerance in voxel units.
    pub linear: f64,
}

impl Tolerance {
    /// Default tolerance (1e-6 voxel units).
    pub const DEFAULT: Self = Self { linear: 1e-6 };
}

/// Extent of a box of size `size` projected onto `axis`.
///
/// `axis` is expected to be a unit vector; the result is the width of the
/// shadow the box casts on a line along it.
pub fn projected_extent(size: &Vec3, axis: &Vec3) -> f64 {
    (size.x * axis.x).abs() + (size.y * axis.y).abs() + (size.z * axis.z).abs()
}

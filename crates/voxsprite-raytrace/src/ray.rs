//! Ray representation and ray-box clipping.

use voxsprite_math::{Aabb3, Point3, Vec3, VectorExt};

/// A ray in volume space defined by origin and direction.
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    /// Origin point of the ray.
    pub origin: Point3,
    /// Unit direction of the ray (zero for a degenerate ray).
    pub direction: Vec3,
    /// Precomputed reciprocal of direction components for fast AABB tests.
    inv_direction: Vec3,
    /// Sign of direction components (0 if positive, 1 if negative).
    sign: [usize; 3],
}

impl Ray {
    /// Create a new ray from origin and direction.
    ///
    /// The direction will be normalized; a zero direction stays zero and
    /// such a ray never intersects anything.
    pub fn new(origin: Point3, direction: Vec3) -> Self {
        let dir = direction.normalize_or_zero();
        let inv = Vec3::new(1.0 / dir.x, 1.0 / dir.y, 1.0 / dir.z);
        let sign = [
            usize::from(inv.x < 0.0),
            usize::from(inv.y < 0.0),
            usize::from(inv.z < 0.0),
        ];
        Self {
            origin,
            direction: dir,
            inv_direction: inv,
            sign,
        }
    }

    /// True if the direction is the zero vector.
    pub fn is_degenerate(&self) -> bool {
        self.direction == Vec3::zeros()
    }

    /// Evaluate the ray at parameter `t`: `origin + t * direction`.
    #[inline]
    pub fn at(&self, t: f64) -> Point3 {
        self.origin + self.direction * t
    }

    /// Clip the ray against an AABB using the slab method.
    ///
    /// Returns `Some((t_min, t_max))` if the ray intersects the box, where
    /// `t_min` (clamped to 0 for origins inside the box) and `t_max` are the
    /// entry and exit parameters. Touching a face counts as intersecting.
    ///
    /// Axis-parallel rays produce infinite slab parameters, and a ray lying
    /// exactly in a face plane produces `0 * inf = NaN`; `f64::max`/`min`
    /// ignore the NaN so that axis does not constrain the interval.
    #[inline]
    pub fn intersect_aabb(&self, aabb: &Aabb3) -> Option<(f64, f64)> {
        if self.is_degenerate() {
            return None;
        }

        let bounds = [aabb.min, aabb.max];

        let tx1 = (bounds[self.sign[0]].x - self.origin.x) * self.inv_direction.x;
        let tx2 = (bounds[1 - self.sign[0]].x - self.origin.x) * self.inv_direction.x;

        let mut t_min = tx1;
        let mut t_max = tx2;

        let ty1 = (bounds[self.sign[1]].y - self.origin.y) * self.inv_direction.y;
        let ty2 = (bounds[1 - self.sign[1]].y - self.origin.y) * self.inv_direction.y;

        t_min = t_min.max(ty1);
        t_max = t_max.min(ty2);

        let tz1 = (bounds[self.sign[2]].z - self.origin.z) * self.inv_direction.z;
        let tz2 = (bounds[1 - self.sign[2]].z - self.origin.z) * self.inv_direction.z;

        t_min = t_min.max(tz1);
        t_max = t_max.min(tz2);

        if t_max >= t_min && t_max >= 0.0 {
            Some((t_min.max(0.0), t_max))
        } else {
            None
        }
    }
}

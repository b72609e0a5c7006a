//! View configuration and the orthographic viewport derived from it.
//!
//! Angles are in degrees. A rotation of 0 looks along +x with screen right
//! pointing at -y; increasing the rotation turns the camera clockwise when
//! seen from above. Elevation tilts the camera down towards the volume.

use serde::{Deserialize, Serialize};
use voxsprite_math::{projected_extent, Aabb3, Plane, Vec3, VectorExt};

use crate::error::{RenderError, Result};
use crate::volume::VolumeSize;

/// Camera and lighting parameters for one sprite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Rotation of the camera around the vertical axis.
    pub angle: f64,
    /// Camera elevation above the horizon.
    pub elevation: f64,
    /// Light rotation relative to the camera rotation.
    pub lighting_angle: f64,
    /// Light elevation above the horizon.
    pub lighting_elevation: f64,
    /// Mirror the sprite horizontally.
    pub flip: bool,
    /// Sprite width in pixels.
    pub width: usize,
    /// Extra viewport height in pixels, normally the rounding error from
    /// [`sprite_height`].
    pub margin: f64,
    /// Bounding size used to frame the viewport; the volume size when `None`.
    pub bounds: Option<[f64; 3]>,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            angle: 0.0,
            elevation: 30.0,
            lighting_angle: 60.0,
            lighting_elevation: 50.0,
            flip: false,
            width: 64,
            margin: 0.0,
            bounds: None,
        }
    }
}

impl ViewConfig {
    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 {
            return Err(RenderError::InvalidView("width must be at least 1".into()));
        }
        let angles = [
            ("angle", self.angle),
            ("elevation", self.elevation),
            ("lighting_angle", self.lighting_angle),
            ("lighting_elevation", self.lighting_elevation),
        ];
        for (name, value) in angles {
            if !value.is_finite() {
                return Err(RenderError::InvalidView(format!("{name} must be finite")));
            }
        }
        if !self.margin.is_finite() || self.margin < 0.0 {
            return Err(RenderError::InvalidView(
                "margin must be a non-negative number".into(),
            ));
        }
        if let Some(bounds) = self.bounds {
            if bounds.iter().any(|b| !b.is_finite() || *b <= 0.0) {
                return Err(RenderError::InvalidView(
                    "bounds must be positive in every axis".into(),
                ));
            }
        }
        Ok(())
    }

    /// Extent used to frame the viewport for a volume of size `size`.
    pub fn framing_bounds(&self, size: VolumeSize) -> Vec3 {
        match self.bounds {
            Some([x, y, z]) => Vec3::new(x, y, z),
            None => size.limits(),
        }
    }

    /// Direction of the primary rays, into the scene.
    pub fn ray_direction(&self) -> Vec3 {
        -view_direction(self.angle, self.elevation)
    }

    /// Direction light travels through the scene.
    ///
    /// The light sits at `angle + lighting_angle`, `lighting_elevation`, so
    /// it turns with the camera. Flipped sprites mirror the light in y.
    pub fn light_direction(&self) -> Vec3 {
        let mut light = -view_direction(self.angle + self.lighting_angle, self.lighting_elevation);
        if self.flip {
            light.y = -light.y;
        }
        light.normalize_or_zero()
    }
}

/// Unit vector from the scene towards a viewer at `angle`, `elevation`.
pub fn view_direction(angle: f64, elevation: f64) -> Vec3 {
    let (sin_a, cos_a) = angle.to_radians().sin_cos();
    let (sin_e, cos_e) = elevation.to_radians().sin_cos();
    Vec3::new(-cos_a * cos_e, sin_a * cos_e, sin_e).normalize_or_zero()
}

/// Screen axes `(forward, right, up)` for a camera at `angle`, `elevation`.
fn screen_axes(angle: f64, elevation: f64) -> (Vec3, Vec3, Vec3) {
    let forward = -view_direction(angle, elevation);
    let (sin_a, cos_a) = angle.to_radians().sin_cos();
    let right = Vec3::new(-sin_a, -cos_a, 0.0);
    let up = right.cross(&forward);
    (forward, right, up)
}

/// Height of the framed area in voxel units.
///
/// The footprint's depth along the view is foreshortened by the elevation,
/// while the volume's height counts in full.
fn framed_height(bounds: &Vec3, angle: f64, elevation: f64) -> f64 {
    let (sin_a, cos_a) = angle.to_radians().sin_cos();
    let depth = (bounds.x * cos_a).abs() + (bounds.y * sin_a).abs();
    depth * elevation.to_radians().sin() + bounds.z
}

/// Pixel height of a sprite `view.width` pixels wide, plus the amount
/// (in pixels, `[0, 1)`) the height was rounded up by.
///
/// The height keeps pixels square: it is the ratio of the framed height to
/// the volume's projected width, times the sprite width. Degenerate views
/// return `(0, 0.0)`.
pub fn sprite_height(view: &ViewConfig, size: VolumeSize) -> (usize, f64) {
    let bounds = view.framing_bounds(size);
    let (_, right, _) = screen_axes(view.angle, view.elevation);
    let horizontal = projected_extent(&bounds, &right);
    let vertical = framed_height(&bounds, view.angle, view.elevation);

    if view.width == 0 || !(horizontal > 0.0) || !(vertical >= 0.0) || !vertical.is_finite() {
        return (0, 0.0);
    }

    let exact = vertical / horizontal * view.width as f64;
    let rounded = exact.ceil();
    (rounded as usize, rounded - exact)
}

/// Per-render geometry: the viewport plane and the ray and light directions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Plane the primary rays start from; `u` is screen right, `v` screen down.
    pub plane: Plane,
    /// Primary ray direction (unit).
    pub ray: Vec3,
    /// Direction light travels (unit).
    pub light: Vec3,
}

impl Viewport {
    /// Frame a volume of size `size` for `view`.
    ///
    /// The plane is perpendicular to the rays, centered on the bounding box
    /// and placed one box diagonal (plus a voxel) towards the viewer, so
    /// every ray starts outside the volume. Its width covers the box's
    /// projection; its height is the framed height used by
    /// [`sprite_height`] plus `view.margin` pixels, split evenly top and
    /// bottom, so pixels come out square.
    ///
    /// Flipped views mirror the plane and ray through the box's middle
    /// y plane, which mirrors the sprite horizontally.
    pub fn new(view: &ViewConfig, size: VolumeSize) -> Self {
        let bounds = view.framing_bounds(size);
        let (forward, right, up) = screen_axes(view.angle, view.elevation);

        let width = projected_extent(&bounds, &right);
        let mut height = framed_height(&bounds, view.angle, view.elevation);
        if view.width > 0 && width > 0.0 {
            height += view.margin * width / view.width as f64;
        }

        let center = Aabb3::from_extent(bounds.x, bounds.y, bounds.z).center();
        let distance = bounds.norm() + 1.0;
        let plane_center = center - forward * distance;
        let top_left = plane_center - right * (width / 2.0) + up * (height / 2.0);

        let mut plane = Plane::from_frame(top_left, right * width, -up * height);
        let mut ray = forward;
        if view.flip {
            plane = plane.mirrored_y(center.y);
            ray.y = -ray.y;
        }

        Self {
            plane,
            ray,
            light: view.light_direction(),
        }
    }

    /// Direction shadow rays travel: back towards the light.
    pub fn shadow_direction(&self) -> Vec3 {
        (-self.light).normalize_or_zero()
    }
}

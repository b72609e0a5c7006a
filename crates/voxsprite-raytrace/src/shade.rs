//! Shadow falloff and lighting terms.

use voxsprite_math::Vec3;

/// Shadow rays blocked closer than this many steps give full shadow.
pub const FULL_SHADOW_DEPTH: usize = 10;

/// Shadow rays blocked this many steps away or further cast no shadow.
pub const SHADOW_FALLOFF_DEPTH: usize = 80;

/// Shadow intensity for a shadow ray blocked after `depth` steps.
///
/// `0` means the ray was not blocked. Blockers nearer than
/// [`FULL_SHADOW_DEPTH`] give 1.0; from there the shadow fades linearly as
/// `(70 - (depth - 10)) / 80` and vanishes at [`SHADOW_FALLOFF_DEPTH`].
pub fn shadow_intensity(depth: usize) -> f64 {
    match depth {
        0 => 0.0,
        d if d < FULL_SHADOW_DEPTH => 1.0,
        d if d < SHADOW_FALLOFF_DEPTH => {
            let span = (SHADOW_FALLOFF_DEPTH - FULL_SHADOW_DEPTH) as f64;
            (span - (d - FULL_SHADOW_DEPTH) as f64) / SHADOW_FALLOFF_DEPTH as f64
        }
        _ => 0.0,
    }
}

/// Lighting term for a surface: `averaged_normal . light`.
///
/// Not clamped; surfaces facing away from the light come out negative.
pub fn light_amount(averaged_normal: &Vec3, light: &Vec3) -> f64 {
    averaged_normal.dot(light)
}

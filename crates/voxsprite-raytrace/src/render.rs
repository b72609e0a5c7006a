//! Sample grid raycasting.

use rayon::prelude::*;
use voxsprite_math::{Vec2, Vec3};
use voxsprite_sampler::{Sample, SampleGrid};

use crate::march::VoxelWalker;
use crate::output::{RenderInfo, RenderOutput, RenderSample};
use crate::shade::{light_amount, shadow_intensity};
use crate::view::{ViewConfig, Viewport};
use crate::volume::VoxelVolume;

/// Casts samples against one volume under one view.
///
/// Holds only shared references and precomputed geometry, so one caster
/// serves every render thread.
pub struct Raycaster<'a, V: VoxelVolume + ?Sized> {
    walker: VoxelWalker<'a, V>,
    viewport: Viewport,
    shadow: Vec3,
}

impl<'a, V: VoxelVolume + ?Sized> Raycaster<'a, V> {
    /// Set up the viewport for `view` over `volume`.
    pub fn new(volume: &'a V, view: &ViewConfig) -> Self {
        let viewport = Viewport::new(view, volume.size());
        Self {
            walker: VoxelWalker::new(volume),
            shadow: viewport.shadow_direction(),
            viewport,
        }
    }

    /// The viewport rays are cast from.
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Cast one sample given in viewport unit coordinates.
    pub fn cast(&self, sample: &Vec2) -> RenderSample {
        let origin = self.viewport.plane.bilerp(sample.x, sample.y);
        let Some(hit) = self.walker.cast(origin, &self.viewport.ray, None) else {
            return RenderSample::default();
        };

        // One step off the surface before walking towards the light; depth
        // counts from there.
        let shadow_origin = hit.position + self.shadow;
        let shadow_depth = self
            .walker
            .cast(shadow_origin, &self.shadow, Some(hit.voxel))
            .map_or(0, |blocker| blocker.depth);

        let element = hit.element;
        RenderSample {
            collision: true,
            index: element.index,
            normal: element.normal,
            averaged_normal: element.averaged_normal,
            depth: hit.depth,
            occlusion: element.occlusion,
            light_amount: light_amount(&element.averaged_normal, &self.viewport.light),
            shadowing: shadow_intensity(shadow_depth),
        }
    }

    /// Cast every sample of one pixel column.
    pub fn render_column(&self, column: &[Sample]) -> Vec<RenderInfo> {
        column
            .iter()
            .map(|pixel| pixel.iter().map(|s| self.cast(s)).collect())
            .collect()
    }
}

/// Raycast every sample of `grid` against `volume`.
///
/// Columns are rendered in parallel; each output cell holds one
/// [`RenderSample`] per grid sample, in the same order.
pub fn render<V: VoxelVolume + ?Sized>(
    volume: &V,
    view: &ViewConfig,
    grid: &SampleGrid,
) -> RenderOutput {
    let caster = Raycaster::new(volume, view);

    let columns: Vec<Vec<RenderInfo>> = (0..grid.width())
        .into_par_iter()
        .map(|x| caster.render_column(grid.column(x)))
        .collect();

    let output = RenderOutput::from_columns(grid.height(), columns);
    log::debug!(
        "rendered {}x{} sprite: {} of {} samples hit",
        output.width(),
        output.height(),
        output.collision_count(),
        grid.sample_count()
    );
    output
}

/// Same as [`render`], one column at a time on the calling thread.
pub fn render_sequential<V: VoxelVolume + ?Sized>(
    volume: &V,
    view: &ViewConfig,
    grid: &SampleGrid,
) -> RenderOutput {
    let caster = Raycaster::new(volume, view);
    let columns = grid.columns().map(|c| caster.render_column(c)).collect();
    RenderOutput::from_columns(grid.height(), columns)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::sprite_height;
    use crate::volume::{DenseVolume, VolumeSize, VoxelElement};
    use approx::assert_abs_diff_eq;
    use voxsprite_sampler::{generate_sample_grid, DiscSampler};

    fn element(index: u8) -> VoxelElement {
        VoxelElement::new(index, Vec3::z(), Vec3::z(), index as i32)
    }

    fn volume_with(size: VolumeSize, occupied: &[[usize; 3]]) -> DenseVolume {
        let mut volume = DenseVolume::new(size);
        for (i, &[x, y, z]) in occupied.iter().enumerate() {
            volume.set(x, y, z, element(i as u8 + 1)).unwrap();
        }
        volume
    }

    fn head_on(width: usize) -> ViewConfig {
        ViewConfig {
            angle: 0.0,
            elevation: 0.0,
            width,
            ..Default::default()
        }
    }

    /// Light straight down from above.
    fn overhead_light(width: usize) -> ViewConfig {
        ViewConfig {
            lighting_angle: 0.0,
            lighting_elevation: 90.0,
            ..head_on(width)
        }
    }

    fn single(u: f64, v: f64) -> SampleGrid {
        SampleGrid::from_fn(1, 1, |_, _| vec![Vec2::new(u, v)])
    }

    #[test]
    fn test_empty_volume_all_miss() {
        let volume = DenseVolume::new(VolumeSize::new(4, 4, 4));
        let grid = generate_sample_grid("square", 8, 8, 2, 0.0);
        let output = render(&volume, &head_on(8), &grid);
        assert_eq!(output.width(), 8);
        assert_eq!(output.height(), 8);
        assert_eq!(output.collision_count(), 0);
        assert!(output
            .columns()
            .flatten()
            .flatten()
            .all(|s| *s == RenderSample::default()));
    }

    #[test]
    fn test_zero_sized_volume_all_miss() {
        let volume = DenseVolume::new(VolumeSize::new(0, 3, 3));
        let grid = generate_sample_grid("square", 2, 2, 1, 0.0);
        let output = render(&volume, &head_on(2), &grid);
        assert_eq!(output.collision_count(), 0);
    }

    #[test]
    fn test_sample_counts_match_grid() {
        let volume = volume_with(VolumeSize::new(3, 3, 3), &[[1, 1, 1]]);
        let grid = DiscSampler::with_seed(3, 0.2, 11).sample_grid(5, 4);
        let output = render(&volume, &head_on(5), &grid);
        assert_eq!(output.width(), grid.width());
        assert_eq!(output.height(), grid.height());
        for x in 0..grid.width() {
            for y in 0..grid.height() {
                assert_eq!(output[(x, y)].len(), grid[(x, y)].len());
            }
        }
    }

    #[test]
    fn test_single_voxel_hit_at_entry() {
        let volume = volume_with(VolumeSize::new(1, 1, 1), &[[0, 0, 0]]);
        let output = render(&volume, &head_on(1), &single(0.5, 0.5));
        let s = output[(0, 0)][0];
        assert!(s.collision);
        assert_eq!(s.depth, 0);
        assert_eq!(s.index, 1);
        assert_eq!(s.occlusion, 1);
        assert_eq!(s.normal, Vec3::z());
    }

    #[test]
    fn test_depth_counts_steps() {
        let volume = volume_with(VolumeSize::new(4, 1, 1), &[[3, 0, 0]]);
        let output = render(&volume, &head_on(1), &single(0.5, 0.5));
        let s = output[(0, 0)][0];
        assert!(s.collision);
        assert_eq!(s.depth, 3);
    }

    #[test]
    fn test_occluder_above_casts_full_shadow() {
        // Column of four; the primary ray hits the bottom voxel and the
        // shadow ray climbs to the top one.
        let volume = volume_with(VolumeSize::new(1, 1, 4), &[[0, 0, 0], [0, 0, 3]]);
        let output = render(&volume, &overhead_light(1), &single(0.5, 0.875));
        let s = output[(0, 0)][0];
        assert!(s.collision);
        assert_eq!(s.index, 1);
        assert_eq!(s.shadowing, 1.0);
        // Normal points up, light travels down.
        assert!(s.light_amount < -0.99);
    }

    #[test]
    fn test_unblocked_surface_is_lit() {
        let volume = volume_with(VolumeSize::new(1, 1, 4), &[[0, 0, 0]]);
        let output = render(&volume, &overhead_light(1), &single(0.5, 0.875));
        let s = output[(0, 0)][0];
        assert!(s.collision);
        assert_eq!(s.shadowing, 0.0);
    }

    /// Shadowing of a sample hitting the floor of a 1x1x40 column with a
    /// second voxel at height `blocker`.
    fn column_shadowing(blocker: usize) -> f64 {
        let volume = volume_with(VolumeSize::new(1, 1, 40), &[[0, 0, 0], [0, 0, blocker]]);
        let output = render(&volume, &overhead_light(1), &single(0.5, 0.9875));
        let s = output[(0, 0)][0];
        assert!(s.collision);
        assert_eq!(s.index, 1);
        s.shadowing
    }

    #[test]
    fn test_distant_occluder_shadow_falls_off() {
        // The walk starts at z = 1.5 and reaches z = 20 after 19 steps.
        assert_abs_diff_eq!(column_shadowing(20), 61.0 / 80.0, epsilon = 1e-12);
    }

    #[test]
    fn test_shadow_depth_counts_from_biased_start() {
        // Cell 10 is 9 steps past the start, still full shadow.
        assert_eq!(column_shadowing(10), 1.0);
        // Cell 11 is the first blocker on the falloff.
        assert_abs_diff_eq!(column_shadowing(11), 0.875, epsilon = 1e-12);
        // The bias step lands in cell 1, so a blocker there is depth 0.
        assert_eq!(column_shadowing(1), 0.0);
        assert_eq!(column_shadowing(2), 1.0);
    }

    #[test]
    fn test_flip_mirrors_collisions() {
        let volume = volume_with(VolumeSize::new(1, 2, 1), &[[0, 0, 0]]);
        let grid = SampleGrid::from_fn(2, 1, |x, _| vec![Vec2::new((x as f64 + 0.5) / 2.0, 0.5)]);

        let plain = render(&volume, &head_on(2), &grid);
        assert!(!plain[(0, 0)][0].collision);
        assert!(plain[(1, 0)][0].collision);

        let view = ViewConfig {
            flip: true,
            ..head_on(2)
        };
        let flipped = render(&volume, &view, &grid);
        assert!(flipped[(0, 0)][0].collision);
        assert!(!flipped[(1, 0)][0].collision);
    }

    #[test]
    fn test_sample_on_face_hits() {
        let volume = volume_with(VolumeSize::new(1, 1, 1), &[[0, 0, 0]]);
        let output = render(&volume, &head_on(1), &single(0.0, 0.0));
        assert!(output[(0, 0)][0].collision);
    }

    #[test]
    fn test_sample_outside_viewport_can_miss() {
        let volume = volume_with(VolumeSize::new(1, 1, 1), &[[0, 0, 0]]);
        let output = render(&volume, &head_on(1), &single(-1.0, 0.5));
        assert!(!output[(0, 0)][0].collision);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let size = VolumeSize::new(6, 6, 6);
        let mut volume = DenseVolume::new(size);
        for x in 0..6 {
            for y in 0..6 {
                for z in 0..6 {
                    if (x + 2 * y + z) % 3 == 0 || z == 0 {
                        let n = Vec3::new(x as f64 - 2.5, y as f64 - 2.5, z as f64 - 2.5)
                            .normalize();
                        volume
                            .set(x, y, z, VoxelElement::new((x + y) as u8, n, n, z as i32))
                            .unwrap();
                    }
                }
            }
        }

        let mut view = ViewConfig {
            angle: 30.0,
            elevation: 30.0,
            width: 12,
            ..Default::default()
        };
        let (height, delta) = sprite_height(&view, size);
        view.margin = delta;
        let grid = generate_sample_grid("square", view.width, height, 2, 0.25);

        let parallel = render(&volume, &view, &grid);
        let sequential = render_sequential(&volume, &view, &grid);
        assert_eq!(parallel, sequential);
        assert!(parallel.collision_count() > 0);
    }

    #[test]
    fn test_raycaster_exposes_viewport() {
        let volume = DenseVolume::new(VolumeSize::new(2, 2, 2));
        let caster = Raycaster::new(&volume, &head_on(4));
        assert_abs_diff_eq!(caster.viewport().ray.x, 1.0, epsilon = 1e-12);
        assert_eq!(caster.cast(&Vec2::new(0.5, 0.5)), RenderSample::default());
    }
}

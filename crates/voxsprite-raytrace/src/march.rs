//! Fixed-step voxel walking.
//!
//! Rays advance one voxel unit at a time from where they enter the volume.
//! The voxel under a position is its per-axis floor, so a position sitting
//! exactly on the far face of the volume still belongs to the last cell.

use voxsprite_math::{Aabb3, Point3, Tolerance, Vec3};

use crate::ray::Ray;
use crate::volume::{VolumeSize, VoxelElement, VoxelVolume};

/// The first occupied voxel along a walk.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VoxelHit {
    /// Cell coordinates of the voxel.
    pub voxel: [usize; 3],
    /// Position of the step that landed in the voxel.
    pub position: Point3,
    /// Number of steps taken from the entry point.
    pub depth: usize,
    /// The voxel's data.
    pub element: VoxelElement,
}

/// Walks rays through a volume.
pub struct VoxelWalker<'a, V: VoxelVolume + ?Sized> {
    volume: &'a V,
    size: VolumeSize,
    bounds: Aabb3,
    padded: Aabb3,
    max_steps: usize,
}

impl<'a, V: VoxelVolume + ?Sized> VoxelWalker<'a, V> {
    /// Create a walker over `volume`.
    pub fn new(volume: &'a V) -> Self {
        let size = volume.size();
        let limits = size.limits();
        let bounds = Aabb3::from_extent(limits.x, limits.y, limits.z);
        Self {
            volume,
            size,
            bounds,
            padded: bounds.expanded(Tolerance::DEFAULT.linear),
            max_steps: (limits.x + limits.y + limits.z).ceil() as usize + 2,
        }
    }

    /// Walk from `origin` along `direction` until an occupied voxel is found
    /// or the walk leaves the volume.
    ///
    /// Rays starting outside the volume are first moved to where they enter
    /// it. Origins within tolerance of the volume count as inside. The voxel
    /// `skip`, if given, is treated as empty.
    pub fn cast(
        &self,
        origin: Point3,
        direction: &Vec3,
        skip: Option<[usize; 3]>,
    ) -> Option<VoxelHit> {
        if self.size.is_empty() {
            return None;
        }

        let ray = Ray::new(origin, *direction);
        let (t_entry, _) = ray
            .intersect_aabb(&self.bounds)
            .or_else(|| ray.intersect_aabb(&self.padded))?;
        let entry = ray.at(t_entry);

        for depth in 0..=self.max_steps {
            let position = entry + ray.direction * depth as f64;
            if !self.padded.contains(&position) {
                return None;
            }

            let voxel = self.voxel_at(&position);
            if skip == Some(voxel) {
                continue;
            }
            if let Some(element) = self.volume.element(voxel[0], voxel[1], voxel[2]) {
                return Some(VoxelHit {
                    voxel,
                    position,
                    depth,
                    element,
                });
            }
        }

        None
    }

    /// Cell containing `p`, which must lie inside the padded bounds.
    fn voxel_at(&self, p: &Point3) -> [usize; 3] {
        [
            axis_cell(p.x, self.size.x),
            axis_cell(p.y, self.size.y),
            axis_cell(p.z, self.size.z),
        ]
    }
}

fn axis_cell(c: f64, n: usize) -> usize {
    (c.floor().max(0.0) as usize).min(n - 1)
}

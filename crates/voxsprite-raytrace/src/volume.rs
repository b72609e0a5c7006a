//! The voxel volume the raycaster reads from.
//!
//! Volumes are produced elsewhere (model loading, normal smoothing and
//! occlusion baking all happen upstream); the raycaster only needs to ask
//! which cells are occupied and what they carry.

use serde::{Deserialize, Serialize};
use voxsprite_math::Vec3;

use crate::error::{RenderError, Result};

/// Integer dimensions of a voxel volume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct VolumeSize {
    /// Cells along x.
    pub x: usize,
    /// Cells along y.
    pub y: usize,
    /// Cells along z.
    pub z: usize,
}

impl VolumeSize {
    /// Create a size.
    pub const fn new(x: usize, y: usize, z: usize) -> Self {
        Self { x, y, z }
    }

    /// Total number of cells.
    pub fn voxel_count(&self) -> usize {
        self.x * self.y * self.z
    }

    /// True if any dimension is zero.
    pub fn is_empty(&self) -> bool {
        self.voxel_count() == 0
    }

    /// True if `(x, y, z)` indexes a cell.
    pub fn contains(&self, x: usize, y: usize, z: usize) -> bool {
        x < self.x && y < self.y && z < self.z
    }

    /// The size as a floating-point extent.
    pub fn limits(&self) -> Vec3 {
        Vec3::new(self.x as f64, self.y as f64, self.z as f64)
    }
}

/// Surface data of an occupied voxel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VoxelElement {
    /// Palette index.
    pub index: u8,
    /// Face normal.
    pub normal: Vec3,
    /// Smoothed normal used for lighting.
    pub averaged_normal: Vec3,
    /// Precomputed ambient occlusion.
    pub occlusion: i32,
}

impl VoxelElement {
    /// Create an element.
    pub fn new(index: u8, normal: Vec3, averaged_normal: Vec3, occlusion: i32) -> Self {
        Self {
            index,
            normal,
            averaged_normal,
            occlusion,
        }
    }
}

/// Read-only access to a voxel volume.
///
/// Shared across render threads, hence `Send + Sync`.
pub trait VoxelVolume: Send + Sync {
    /// Dimensions of the volume.
    fn size(&self) -> VolumeSize;

    /// The element at `(x, y, z)`, or `None` for an empty cell.
    ///
    /// Callers only pass coordinates inside [`VoxelVolume::size`].
    fn element(&self, x: usize, y: usize, z: usize) -> Option<VoxelElement>;
}

/// A volume stored as a flat array of cells.
#[derive(Debug, Clone, PartialEq)]
pub struct DenseVolume {
    size: VolumeSize,
    cells: Vec<Option<VoxelElement>>,
}

impl DenseVolume {
    /// An empty volume of the given size.
    pub fn new(size: VolumeSize) -> Self {
        Self {
            size,
            cells: vec![None; size.voxel_count()],
        }
    }

    /// Build a volume from cells laid out x-major (`z` varies fastest).
    pub fn from_elements(size: VolumeSize, cells: Vec<Option<VoxelElement>>) -> Result<Self> {
        if cells.len() != size.voxel_count() {
            return Err(RenderError::VolumeSizeMismatch {
                size,
                expected: size.voxel_count(),
                actual: cells.len(),
            });
        }
        Ok(Self { size, cells })
    }

    fn offset(&self, x: usize, y: usize, z: usize) -> Result<usize> {
        if !self.size.contains(x, y, z) {
            return Err(RenderError::VoxelOutOfBounds {
                x,
                y,
                z,
                size: self.size,
            });
        }
        Ok((x * self.size.y + y) * self.size.z + z)
    }

    /// Occupy a cell.
    pub fn set(&mut self, x: usize, y: usize, z: usize, element: VoxelElement) -> Result<()> {
        let i = self.offset(x, y, z)?;
        self.cells[i] = Some(element);
        Ok(())
    }

    /// Empty a cell.
    pub fn clear(&mut self, x: usize, y: usize, z: usize) -> Result<()> {
        let i = self.offset(x, y, z)?;
        self.cells[i] = None;
        Ok(())
    }

    /// Number of occupied cells.
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }
}

impl VoxelVolume for DenseVolume {
    fn size(&self) -> VolumeSize {
        self.size
    }

    fn element(&self, x: usize, y: usize, z: usize) -> Option<VoxelElement> {
        self.offset(x, y, z).ok().and_then(|i| self.cells[i])
    }
}

//! Per-sample render results.

use std::ops::Index;

use voxsprite_math::Vec3;

/// Result of casting one sample.
///
/// The default value is a miss; for misses every other field is meaningless.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RenderSample {
    /// Whether the primary ray hit a voxel.
    pub collision: bool,
    /// Palette index of the hit voxel.
    pub index: u8,
    /// Face normal of the hit voxel.
    pub normal: Vec3,
    /// Smoothed normal of the hit voxel.
    pub averaged_normal: Vec3,
    /// Steps walked from the volume entry point to the hit.
    pub depth: usize,
    /// Ambient occlusion of the hit voxel.
    pub occlusion: i32,
    /// `averaged_normal . light`, unclamped.
    pub light_amount: f64,
    /// Shadow intensity in `[0, 1]`.
    pub shadowing: f64,
}

/// Results for one pixel, in the same order as the pixel's samples.
pub type RenderInfo = Vec<RenderSample>;

/// The render results for a whole sprite, stored column-major.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RenderOutput {
    width: usize,
    height: usize,
    columns: Vec<Vec<RenderInfo>>,
}

impl RenderOutput {
    pub(crate) fn from_columns(height: usize, columns: Vec<Vec<RenderInfo>>) -> Self {
        Self {
            width: columns.len(),
            height,
            columns,
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Results for pixel `(x, y)`.
    pub fn get(&self, x: usize, y: usize) -> Option<&[RenderSample]> {
        self.columns
            .get(x)
            .and_then(|column| column.get(y))
            .map(Vec::as_slice)
    }

    /// All pixels of column `x`, top to bottom.
    pub fn column(&self, x: usize) -> &[RenderInfo] {
        &self.columns[x]
    }

    /// Iterate over columns left to right.
    pub fn columns(&self) -> impl Iterator<Item = &[RenderInfo]> {
        self.columns.iter().map(Vec::as_slice)
    }

    /// Number of samples that hit a voxel.
    pub fn collision_count(&self) -> usize {
        self.columns
            .iter()
            .flatten()
            .flatten()
            .filter(|s| s.collision)
            .count()
    }
}

impl Index<(usize, usize)> for RenderOutput {
    type Output = [RenderSample];

    fn index(&self, (x, y): (usize, usize)) -> &Self::Output {
        &self.columns[x][y]
    }
}

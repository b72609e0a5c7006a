//! Per-pixel sample storage.

use std::ops::Index;

use voxsprite_math::Vec2;

/// Sub-sample positions of one output pixel, in viewport unit coordinates.
pub type Sample = Vec<Vec2>;

/// A `width x height` grid of [`Sample`]s, stored column by column.
///
/// Built once per render and not modified afterwards.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SampleGrid {
    width: usize,
    height: usize,
    columns: Vec<Vec<Sample>>,
}

impl SampleGrid {
    /// Build a grid by evaluating `f(x, y)` for every pixel.
    ///
    /// Pixels are visited column by column, top to bottom.
    pub fn from_fn<F>(width: usize, height: usize, mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> Sample,
    {
        let columns = (0..width)
            .map(|x| (0..height).map(|y| f(x, y)).collect())
            .collect();
        Self {
            width,
            height,
            columns,
        }
    }

    /// Number of pixel columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of pixel rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// True if the grid has no pixels.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Samples of pixel `(x, y)`, or `None` outside the grid.
    pub fn get(&self, x: usize, y: usize) -> Option<&[Vec2]> {
        self.columns
            .get(x)
            .and_then(|col| col.get(y))
            .map(Vec::as_slice)
    }

    /// All samples of column `x`, top to bottom.
    ///
    /// # Panics
    ///
    /// Panics if `x >= width`.
    pub fn column(&self, x: usize) -> &[Sample] {
        &self.columns[x]
    }

    /// Iterate over the columns left to right.
    pub fn columns(&self) -> impl Iterator<Item = &[Sample]> {
        self.columns.iter().map(Vec::as_slice)
    }

    /// Total number of sub-samples across all pixels.
    pub fn sample_count(&self) -> usize {
        self.columns.iter().flatten().map(Vec::len).sum()
    }
}

impl Index<(usize, usize)> for SampleGrid {
    type Output = Sample;

    fn index(&self, (x, y): (usize, usize)) -> &Sample {
        &self.columns[x][y]
    }
}

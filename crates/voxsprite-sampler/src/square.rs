//! Regular lattice sampling.

use voxsprite_math::Vec2;

use crate::grid::SampleGrid;

/// Build an `accuracy x accuracy` lattice of samples for every pixel.
///
/// Along each axis the `k`-th sub-sample of pixel `i` sits at
/// `(i * accuracy + k * (1 + overlap)) / (dimension * accuracy)`, so with
/// zero overlap the lattice tiles the pixel cell starting at its top-left
/// corner and larger overlaps spread it into the neighbouring cells.
/// The sub-sample at flat index `l + k * accuracy` uses `k` on x and `l` on y.
pub fn square(width: usize, height: usize, accuracy: usize, overlap: f64) -> SampleGrid {
    let spread = 1.0 + overlap;
    let x_scale = (width * accuracy) as f64;
    let y_scale = (height * accuracy) as f64;

    SampleGrid::from_fn(width, height, |i, j| {
        let mut sample = Vec::with_capacity(accuracy * accuracy);
        for k in 0..accuracy {
            for l in 0..accuracy {
                sample.push(Vec2::new(
                    ((i * accuracy) as f64 + k as f64 * spread) / x_scale,
                    ((j * accuracy) as f64 + l as f64 * spread) / y_scale,
                ));
            }
        }
        sample
    })
}

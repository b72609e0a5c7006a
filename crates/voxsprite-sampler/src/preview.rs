//! Debug rendering of a pixel's sample pattern.

use image::{Rgba, RgbaImage};

use crate::grid::SampleGrid;

/// Side length of the preview image.
pub const PREVIEW_SIZE: u32 = 200;

const CELL_COLOR: Rgba<u8> = Rgba([200, 200, 200, 255]);
const SAMPLE_COLOR: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// Plot the samples of pixel `(0, 0)` onto a white 200x200 image.
///
/// The pixel's unit cell is drawn in grey, occupying the middle half of the
/// image so overlapping samples remain visible.
pub fn preview_image(grid: &SampleGrid) -> RgbaImage {
    let mut img = RgbaImage::from_pixel(PREVIEW_SIZE, PREVIEW_SIZE, Rgba([255, 255, 255, 255]));

    let quarter = PREVIEW_SIZE / 4;
    for i in quarter..=3 * quarter {
        img.put_pixel(i, quarter, CELL_COLOR);
        img.put_pixel(i, 3 * quarter, CELL_COLOR);
        img.put_pixel(quarter, i, CELL_COLOR);
        img.put_pixel(3 * quarter, i, CELL_COLOR);
    }

    let Some(samples) = grid.get(0, 0) else {
        return img;
    };

    let half = f64::from(PREVIEW_SIZE) / 2.0;
    for s in samples {
        // Pixel-local coordinates, cell center at (0, 0).
        let lx = s.x * grid.width() as f64 - 0.5;
        let ly = s.y * grid.height() as f64 - 0.5;
        let px = (half + lx * half).floor();
        let py = (half + ly * half).floor();
        if px >= 0.0 && py >= 0.0 && px < f64::from(PREVIEW_SIZE) && py < f64::from(PREVIEW_SIZE) {
            img.put_pixel(px as u32, py as u32, SAMPLE_COLOR);
        }
    }

    img
}

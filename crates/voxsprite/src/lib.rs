#![warn(missing_docs)]

//! Voxel sprite rendering.
//!
//! Ties the sampler and the raycaster together: [`SpriteRenderer`] takes
//! [`SpriteSettings`], works out the sprite height for a volume, builds the
//! anti-aliasing sample grid and raycasts it.
//!
//! # Example
//!
//! ```
//! use voxsprite::{SpriteRenderer, SpriteSettings};
//! use voxsprite::raytrace::{DenseVolume, VolumeSize, VoxelElement};
//! use voxsprite::math::Vec3;
//!
//! let mut volume = DenseVolume::new(VolumeSize::new(8, 8, 8));
//! volume.set(4, 4, 0, VoxelElement::new(1, Vec3::z(), Vec3::z(), 0)).unwrap();
//!
//! let settings = SpriteSettings::from_toml_str("[view]\nwidth = 24\n").unwrap();
//! let renderer = SpriteRenderer::new(settings).unwrap();
//! let sprite = renderer.render(&volume);
//! assert_eq!(sprite.output.width(), 24);
//! assert_eq!(sprite.output.height(), sprite.height);
//! ```

pub mod error;
pub mod settings;

pub use error::{Result, SpriteError};
pub use settings::SpriteSettings;

pub use voxsprite_math as math;
pub use voxsprite_raytrace as raytrace;
pub use voxsprite_sampler as sampler;

use voxsprite_raytrace::{sprite_height, RenderOutput, ViewConfig, VolumeSize, VoxelVolume};
use voxsprite_sampler::{SampleGrid, Sampler};

/// A rendered sprite.
#[derive(Debug, Clone, PartialEq)]
pub struct SpriteRender {
    /// Sprite height in pixels.
    pub height: usize,
    /// The samples that were cast.
    pub samples: SampleGrid,
    /// One result per sample.
    pub output: RenderOutput,
}

/// Renders volumes with fixed settings.
///
/// The sampler is built once, so disc-sampled sprites rendered by the same
/// renderer share one pool of disc shapes.
#[derive(Debug)]
pub struct SpriteRenderer {
    settings: SpriteSettings,
    sampler: Sampler,
}

impl SpriteRenderer {
    /// Validate `settings` and build the sampler.
    pub fn new(settings: SpriteSettings) -> Result<Self> {
        settings.validate()?;
        let sampler = Sampler::new(settings.sampler.clone())?;
        Ok(Self { settings, sampler })
    }

    /// The renderer's settings.
    pub fn settings(&self) -> &SpriteSettings {
        &self.settings
    }

    /// The view used for a volume of `size`: the configured view with the
    /// height rounding error as its margin, and the sprite height.
    pub fn view_for(&self, size: VolumeSize) -> (ViewConfig, usize) {
        let mut view = self.settings.view.clone();
        let (height, delta) = sprite_height(&view, size);
        view.margin = delta;
        (view, height)
    }

    /// Render `volume`.
    ///
    /// Degenerate volumes produce an empty or all-miss sprite.
    pub fn render<V: VoxelVolume + ?Sized>(&self, volume: &V) -> SpriteRender {
        let size = volume.size();
        let (view, height) = self.view_for(size);
        log::debug!(
            "rendering {}x{}x{} volume to {}x{height} sprite",
            size.x,
            size.y,
            size.z,
            view.width
        );

        let samples = self.sampler.sample_grid(view.width, height);
        let output = voxsprite_raytrace::render(volume, &view, &samples);
        SpriteRender {
            height,
            samples,
            output,
        }
    }
}

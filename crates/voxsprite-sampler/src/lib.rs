#![warn(missing_docs)]

//! Anti-aliasing sample patterns for the voxsprite renderer.
//!
//! For every output pixel the sampler produces a list of sub-sample
//! positions in viewport unit coordinates (`[0, 1)` across the whole
//! sprite, spilling slightly past a pixel's cell when overlap is set).
//! The raycaster casts one ray per position.
//!
//! Two strategies are available:
//!
//! - [`SampleStrategy::Square`] - a regular `accuracy x accuracy` lattice
//! - [`SampleStrategy::Disc`] - Poisson-disc point sets from a shared pool
//!
//! # Example
//!
//! ```
//! use voxsprite_sampler::{Sampler, SamplerSettings, SampleStrategy};
//!
//! let settings = SamplerSettings {
//!     strategy: SampleStrategy::Square,
//!     accuracy: 2,
//!     ..Default::default()
//! };
//! let sampler = Sampler::new(settings).unwrap();
//! let grid = sampler.sample_grid(32, 40);
//! assert_eq!(grid[(0, 0)].len(), 4);
//! ```

pub mod disc;
pub mod error;
pub mod grid;
#[cfg(feature = "preview")]
pub mod preview;
mod square;

pub use disc::{DiscSampler, PoissonDisc};
pub use error::{Result, SamplerError};
pub use grid::{Sample, SampleGrid};
pub use square::square;

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Largest accepted sub-samples-per-axis setting.
pub const MAX_ACCURACY: usize = 64;

/// Sub-sample placement strategy.
///
/// Parsed by name; unknown names fall back to [`SampleStrategy::Square`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SampleStrategy {
    /// Regular lattice (`"square"`).
    #[default]
    Square,
    /// Poisson-disc sets (`"disc"`).
    Disc,
}

impl SampleStrategy {
    /// Look up a strategy by name, falling back to `Square`.
    pub fn from_name(name: &str) -> Self {
        match name {
            "disc" => Self::Disc,
            _ => Self::Square,
        }
    }

    /// Canonical name of the strategy.
    pub fn name(self) -> &'static str {
        match self {
            Self::Square => "square",
            Self::Disc => "disc",
        }
    }
}

impl FromStr for SampleStrategy {
    type Err = Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self::from_name(s))
    }
}

impl From<String> for SampleStrategy {
    fn from(name: String) -> Self {
        Self::from_name(&name)
    }
}

impl From<SampleStrategy> for String {
    fn from(strategy: SampleStrategy) -> Self {
        strategy.name().to_string()
    }
}

impl fmt::Display for SampleStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Sampling parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplerSettings {
    /// Placement strategy.
    pub strategy: SampleStrategy,
    /// Sub-samples per axis (the disc strategy places up to `accuracy²`).
    pub accuracy: usize,
    /// How far sub-samples spread past a pixel's cell, in pixels.
    pub overlap: f64,
    /// Seed for the disc strategy; `None` seeds from the operating system.
    pub seed: Option<u64>,
}

impl Default for SamplerSettings {
    fn default() -> Self {
        Self {
            strategy: SampleStrategy::Square,
            accuracy: 2,
            overlap: 0.0,
            seed: None,
        }
    }
}

impl SamplerSettings {
    /// Validate settings.
    pub fn validate(&self) -> Result<()> {
        if self.accuracy == 0 {
            return Err(SamplerError::InvalidSettings(
                "accuracy must be at least 1".into(),
            ));
        }
        if self.accuracy > MAX_ACCURACY {
            return Err(SamplerError::InvalidSettings(format!(
                "accuracy must be at most {MAX_ACCURACY}"
            )));
        }
        if !self.overlap.is_finite() || self.overlap < 0.0 {
            return Err(SamplerError::InvalidSettings(
                "overlap must be a non-negative number".into(),
            ));
        }
        Ok(())
    }
}

/// A configured sample grid generator.
///
/// Holds the disc pool when the disc strategy is selected, so every grid
/// produced by one sampler draws from the same shapes.
#[derive(Debug)]
pub struct Sampler {
    settings: SamplerSettings,
    disc: Option<DiscSampler>,
}

impl Sampler {
    /// Create a sampler from validated settings.
    pub fn new(settings: SamplerSettings) -> Result<Self> {
        settings.validate()?;

        let disc = match settings.strategy {
            SampleStrategy::Square => None,
            SampleStrategy::Disc => Some(match settings.seed {
                Some(seed) => DiscSampler::with_seed(settings.accuracy, settings.overlap, seed),
                None => DiscSampler::new(settings.accuracy, settings.overlap),
            }),
        };

        Ok(Self { settings, disc })
    }

    /// The settings this sampler was built from.
    pub fn settings(&self) -> &SamplerSettings {
        &self.settings
    }

    /// Generate the sample grid for a `width x height` sprite.
    pub fn sample_grid(&self, width: usize, height: usize) -> SampleGrid {
        log::debug!(
            "sampling {width}x{height} with {} (accuracy {}, overlap {})",
            self.settings.strategy,
            self.settings.accuracy,
            self.settings.overlap
        );
        match &self.disc {
            Some(disc) => disc.sample_grid(width, height),
            None => square(width, height, self.settings.accuracy, self.settings.overlap),
        }
    }
}

/// Generate a sample grid by strategy name.
///
/// `"square"` and `"disc"` are recognized; anything else is treated as
/// `"square"`. The disc strategy uses a fresh, entropy-seeded pool.
pub fn generate_sample_grid(
    strategy_name: &str,
    width: usize,
    height: usize,
    accuracy: usize,
    overlap: f64,
) -> SampleGrid {
    match SampleStrategy::from_name(strategy_name) {
        SampleStrategy::Square => square(width, height, accuracy, overlap),
        SampleStrategy::Disc => DiscSampler::new(accuracy, overlap).sample_grid(width, height),
    }
}

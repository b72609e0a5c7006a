//! Sprite settings, loadable from TOML.

use std::path::Path;

use serde::{Deserialize, Serialize};
use voxsprite_raytrace::ViewConfig;
use voxsprite_sampler::SamplerSettings;

use crate::error::Result;

/// Everything needed to render one sprite view.
///
/// Both tables are optional in TOML; missing keys take their defaults.
///
/// ```toml
/// [sampler]
/// strategy = "disc"
/// accuracy = 3
/// overlap = 0.25
///
/// [view]
/// angle = 45.0
/// elevation = 30.0
/// width = 48
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpriteSettings {
    /// Anti-aliasing sample settings.
    pub sampler: SamplerSettings,
    /// Camera and lighting settings.
    pub view: ViewConfig,
}

impl SpriteSettings {
    /// Parse and validate settings from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let settings: Self = toml::from_str(s)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Read, parse and validate a TOML settings file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&text)
    }

    /// Validate both tables.
    pub fn validate(&self) -> Result<()> {
        self.sampler.validate()?;
        self.view.validate()?;
        Ok(())
    }
}

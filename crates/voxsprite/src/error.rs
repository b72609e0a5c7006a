//! Error types for sprite rendering.

use thiserror::Error;
use voxsprite_raytrace::RenderError;
use voxsprite_sampler::SamplerError;

/// Errors from loading settings or setting up a renderer.
#[derive(Error, Debug)]
pub enum SpriteError {
    /// Reading a settings file failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Settings file is not valid TOML for [`SpriteSettings`](crate::SpriteSettings).
    #[error("invalid settings file: {0}")]
    Toml(#[from] toml::de::Error),

    /// Sampler settings were rejected.
    #[error(transparent)]
    Sampler(#[from] SamplerError),

    /// View settings were rejected.
    #[error(transparent)]
    Render(#[from] RenderError),
}

/// Result type for sprite operations.
pub type Result<T> = std::result::Result<T, SpriteError>;

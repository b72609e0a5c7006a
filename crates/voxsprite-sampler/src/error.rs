//! Error types for the sampler.

use thiserror::Error;

/// Errors that can occur when configuring a sampler.
#[derive(Error, Debug)]
pub enum SamplerError {
    /// Invalid sampler settings.
    #[error("invalid sampler settings: {0}")]
    InvalidSettings(String),
}

/// Result type for sampler operations.
pub type Result<T> = std::result::Result<T, SamplerError>;

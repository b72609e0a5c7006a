//! Error types for the raycaster.

use thiserror::Error;

use crate::volume::VolumeSize;

/// Errors that can occur when configuring a render.
#[derive(Error, Debug)]
pub enum RenderError {
    /// Invalid view configuration.
    #[error("invalid view configuration: {0}")]
    InvalidView(String),

    /// Element buffer does not match the volume size.
    #[error("volume of size {size:?} needs {expected} elements, got {actual}")]
    VolumeSizeMismatch {
        /// Declared volume size.
        size: VolumeSize,
        /// Number of cells the size implies.
        expected: usize,
        /// Number of cells supplied.
        actual: usize,
    },

    /// Voxel coordinate outside the volume.
    #[error("voxel ({x}, {y}, {z}) is outside volume of size {size:?}")]
    VoxelOutOfBounds {
        /// X coordinate.
        x: usize,
        /// Y coordinate.
        y: usize,
        /// Z coordinate.
        z: usize,
        /// Volume size.
        size: VolumeSize,
    },
}

/// Result type for raycaster operations.
pub type Result<T> = std::result::Result<T, RenderError>;

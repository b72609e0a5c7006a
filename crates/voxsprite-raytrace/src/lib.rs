#![warn(missing_docs)]

//! Orthographic voxel raycasting for sprite rendering.
//!
//! A render takes a read-only [`VoxelVolume`], a [`ViewConfig`] and a
//! [`SampleGrid`](voxsprite_sampler::SampleGrid), and produces a
//! [`RenderOutput`] holding one [`RenderSample`] per grid sample. Each
//! sample is cast from a viewport plane placed in front of the volume,
//! walked through the volume one voxel unit at a time, and on a hit walked
//! again towards the light to estimate shadowing.
//!
//! # Example
//!
//! ```
//! use voxsprite_math::Vec3;
//! use voxsprite_raytrace::{
//!     render, sprite_height, DenseVolume, ViewConfig, VolumeSize, VoxelElement,
//! };
//! use voxsprite_sampler::generate_sample_grid;
//!
//! let size = VolumeSize::new(4, 4, 4);
//! let mut volume = DenseVolume::new(size);
//! volume.set(1, 2, 0, VoxelElement::new(3, Vec3::z(), Vec3::z(), 0)).unwrap();
//!
//! let mut view = ViewConfig { width: 16, ..Default::default() };
//! let (height, delta) = sprite_height(&view, size);
//! view.margin = delta;
//!
//! let grid = generate_sample_grid("square", view.width, height, 2, 0.0);
//! let output = render(&volume, &view, &grid);
//! assert_eq!(output.height(), height);
//! ```

pub mod error;
pub mod march;
pub mod output;
pub mod ray;
pub mod render;
pub mod shade;
pub mod view;
pub mod volume;

pub use error::{RenderError, Result};
pub use march::{VoxelHit, VoxelWalker};
pub use output::{RenderInfo, RenderOutput, RenderSample};
pub use ray::Ray;
pub use render::{render, render_sequential, Raycaster};
pub use shade::{light_amount, shadow_intensity, FULL_SHADOW_DEPTH, SHADOW_FALLOFF_DEPTH};
pub use view::{sprite_height, view_direction, ViewConfig, Viewport};
pub use volume::{DenseVolume, VolumeSize, VoxelElement, VoxelVolume};

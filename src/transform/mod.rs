//! The N-dimensional distance-transform engine.
//!
//! The squared Euclidean generalized distance transform is additively
//! separable, so the N-dimensional problem decomposes into one 1-D pass per
//! axis; each pass runs the lower envelope of [`crate::envelope`] over every
//! scanline parallel to its axis.
//!
//! Modules
//! - `pipeline` – the [`DistanceTransform`] front end.
//! - `params` – configuration knobs.
//! - `sweep` – a single separable pass over one axis.
//! - `error` – synchronous validation errors.

pub mod error;
pub mod params;
pub mod pipeline;
mod sweep;

pub use error::TransformError;
pub use params::TransformParams;
pub use pipeline::{DistanceOutput, DistanceTransform};

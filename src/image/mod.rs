//! Image module: owned N-dimensional buffers and file I/O.
//!
//! Components
//! - `nd`: [`ImageNd`], a dense generic-pixel buffer with per-axis spacing,
//!   row-major with axis 0 contiguous.
//! - `io`: helpers for grayscale PNGs (2-D), the `.vol` volume format (N-D)
//!   and JSON reports.
//!
//! Design goals
//! - Keep hot loops simple: the engine works on the flat `data()` slice with
//!   precomputed strides, never through per-index accessors.
//! - Pixels are opaque `Copy` data; only the transform's distance pixels
//!   carry arithmetic obligations.

pub mod io;
pub mod nd;

pub use self::nd::{ImageNd, IndexIter};

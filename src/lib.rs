#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod diagnostics;
pub mod filters;
pub mod image;
pub mod transform;

// The 1-D machinery is public for callers that want to run single scanlines
// themselves, but its API is considered lower-level than `transform`.
pub mod envelope;

// --- High-level re-exports -------------------------------------------------

// Main entry points: the transform front end and its configuration.
pub use crate::transform::{DistanceOutput, DistanceTransform, TransformError, TransformParams};

// The arithmetic contract every caller needs: the sentinel "infinity".
pub use crate::envelope::{max_apex_height, DistancePixel};

// Diagnostics returned by the `*_with_report` entry points.
pub use crate::diagnostics::{PassTiming, TransformReport};

pub use crate::image::ImageNd;

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```
/// use distmap::prelude::*;
///
/// let inf: f32 = max_apex_height::<f32>();
/// let mut f = ImageNd::filled(&[3, 3], inf);
/// f.set(&[1, 1], 0.0);
/// let d = DistanceTransform::new(TransformParams::default())
///     .distance(&f)
///     .unwrap();
/// assert_eq!(d.get(&[0, 0]), 2.0);
/// ```
pub mod prelude {
    pub use crate::envelope::max_apex_height;
    pub use crate::image::ImageNd;
    pub use crate::{DistanceOutput, DistanceTransform, TransformParams};
}

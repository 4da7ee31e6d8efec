//! Parameter types configuring the distance transform.

use crate::envelope::minimal_spacing;
use serde::Deserialize;

/// Transform-wide parameters.
///
/// Whether a Voronoi map is produced is decided by the entry point
/// ([`crate::DistanceTransform::distance`] vs
/// [`crate::DistanceTransform::distance_with_voronoi`]), not by a flag, so a
/// label image can never be missing when one is needed.
#[derive(Clone, Copy, Debug, Deserialize)]
pub struct TransformParams {
    /// Use the function image's per-axis spacing. When false the transform
    /// runs in index space with unit spacing throughout.
    pub use_spacing: bool,
    /// Decimal precision m of the smallest admissible spacing `10^-m`.
    /// Precision 0 admits integer spacings only.
    pub spacing_precision: u8,
}

impl Default for TransformParams {
    fn default() -> Self {
        Self {
            use_spacing: true,
            spacing_precision: 3,
        }
    }
}

impl TransformParams {
    /// Smallest spacing accepted under the configured precision.
    pub fn minimal_spacing(&self) -> f64 {
        minimal_spacing(self.spacing_precision)
    }
}

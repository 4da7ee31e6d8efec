//! Overflow and precision bounds for the parabola arithmetic.
//!
//! The intersection formula adds an apex-height difference to a spacing-scaled
//! difference of squared abscissae; the value evaluation adds an apex height
//! to a squared physical offset. Both have to stay inside the finite range of
//! the distance pixel. With `M` the exactly-representable maximum of the pixel
//! type, the bounds below guarantee
//!
//! - `max_apex_height = M/4`, so heights in `[-M/4, M/4]` are legal apexes;
//! - `max_abscissa = ⌊√(3M/16)/s⌋`, so `(2·A·s)² + max_apex_height ≤ M` and
//!   the intersection numerator `|Δy| + s²·A² ≤ M/2 + 3M/16 < M`.
//!
//! `max_apex_height` doubles as the sentinel "infinity": callers mark voxels
//! that must not act as sites with it, and it is the saturation cap applied
//! when the envelope is sampled.

use super::pixel::DistancePixel;

/// Largest legal apex height for the pixel type, and the sentinel value that
/// marks "this voxel is not a site".
pub fn max_apex_height<D: DistancePixel>() -> D {
    D::from_wide(D::MAX_FINITE / 4.0)
}

/// Smallest spacing for which distance computations are guaranteed correct,
/// `10^-precision`. Precision 0 admits integer spacings.
pub fn minimal_spacing(precision: u8) -> f64 {
    10f64.powi(-(precision as i32))
}

/// Construction-time bounds for one envelope, derived from the pixel type
/// and the axis spacing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnvelopeBounds {
    /// Largest abscissa magnitude the intersection arithmetic may see.
    pub max_abscissa: i64,
    /// Largest legal apex height, in the wide arithmetic domain.
    pub max_apex_height: f64,
}

impl EnvelopeBounds {
    /// Compute the bounds for envelopes with abscissa spacing `spacing`.
    pub fn for_spacing<D: DistancePixel>(spacing: f64) -> Self {
        let max_apex_height = max_apex_height::<D>().to_wide();
        let limit = (3.0 * D::MAX_FINITE / 16.0).sqrt() / spacing;
        let max_abscissa = if limit >= i64::MAX as f64 {
            i64::MAX
        } else {
            limit.floor() as i64
        };
        Self {
            max_abscissa,
            max_apex_height,
        }
    }
}

//! Arithmetic pixel types accepted for function values and squared distances.
//!
//! The envelope performs its intersection and evaluation arithmetic in a wide
//! `f64` domain and converts back at the edges. A pixel type therefore has to
//! state the largest finite value that the wide domain represents exactly;
//! the overflow bounds in [`crate::envelope::bounds`] are derived from it.

use std::fmt::Debug;

/// Signed arithmetic pixel usable as a function value or squared distance.
///
/// Implemented for `i16`, `i32`, `i64`, `f32` and `f64`. Conversions from
/// the wide domain truncate toward zero for integer pixels, matching the
/// plain numeric casts of typical image pipelines.
pub trait DistancePixel: Copy + PartialOrd + Debug + Send + Sync + 'static {
    /// Largest finite value of the type that `f64` arithmetic covers exactly.
    const MAX_FINITE: f64;

    fn to_wide(self) -> f64;

    fn from_wide(wide: f64) -> Self;
}

impl DistancePixel for i16 {
    const MAX_FINITE: f64 = i16::MAX as f64;

    #[inline]
    fn to_wide(self) -> f64 {
        self as f64
    }

    #[inline]
    fn from_wide(wide: f64) -> Self {
        wide as i16
    }
}

impl DistancePixel for i32 {
    const MAX_FINITE: f64 = i32::MAX as f64;

    #[inline]
    fn to_wide(self) -> f64 {
        self as f64
    }

    #[inline]
    fn from_wide(wide: f64) -> Self {
        wide as i32
    }
}

impl DistancePixel for i64 {
    // Capped at 2^50 so that apex heights, squared offsets and the
    // intersection numerator all stay exactly representable in f64.
    const MAX_FINITE: f64 = (1i64 << 50) as f64;

    #[inline]
    fn to_wide(self) -> f64 {
        self as f64
    }

    #[inline]
    fn from_wide(wide: f64) -> Self {
        wide as i64
    }
}

impl DistancePixel for f32 {
    const MAX_FINITE: f64 = f32::MAX as f64;

    #[inline]
    fn to_wide(self) -> f64 {
        self as f64
    }

    #[inline]
    fn from_wide(wide: f64) -> Self {
        wide as f32
    }
}

impl DistancePixel for f64 {
    const MAX_FINITE: f64 = f64::MAX;

    #[inline]
    fn to_wide(self) -> f64 {
        self
    }

    #[inline]
    fn from_wide(wide: f64) -> Self {
        wide
    }
}

//! Synchronous validation errors of the transform front end.

use thiserror::Error;

/// Configuration problems detected before any pass runs. The engine produces
/// no output when one of these is returned.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TransformError {
    #[error("function image must have at least one axis")]
    ZeroDimensional,

    #[error("label image shape {label:?} does not match function image shape {function:?}")]
    ShapeMismatch {
        function: Vec<usize>,
        label: Vec<usize>,
    },

    #[error("axis {axis} spacing {spacing} is not a positive finite number")]
    InvalidSpacing { axis: usize, spacing: f64 },

    #[error("axis {axis} spacing {spacing} is below the minimal spacing {minimal}")]
    SpacingTooSmall {
        axis: usize,
        spacing: f64,
        minimal: f64,
    },

    #[error("axis {axis} extent {extent} exceeds the maximum abscissa {max_abscissa} for its spacing")]
    ExtentTooLarge {
        axis: usize,
        extent: usize,
        max_abscissa: i64,
    },
}

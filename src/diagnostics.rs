//! Serializable diagnostics for a transform run.
//!
//! A [`TransformReport`] describes the input and the per-pass timings of one
//! invocation. The CLI front end pretty-prints it as JSON; library users can
//! feed it to whatever telemetry they have.

use serde::Serialize;

/// Timing of one separable pass.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PassTiming {
    /// Axis the pass swept.
    pub axis: usize,
    /// Number of scanlines the pass processed.
    pub scanlines: usize,
    pub elapsed_ms: f64,
}

/// Summary of one distance-transform invocation.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformReport {
    pub shape: Vec<usize>,
    pub spacing: Vec<f64>,
    pub voxels: usize,
    /// Whether physical spacing was applied (false = index space).
    pub use_spacing: bool,
    /// Whether a Voronoi map was carried through the passes.
    pub voronoi: bool,
    pub passes: Vec<PassTiming>,
    pub total_ms: f64,
}

//! Front end of the N-dimensional distance transform.
//!
//! [`DistanceTransform`] validates the inputs, allocates whole-region output
//! buffers and runs one separable pass per axis, in ascending axis order so
//! that Voronoi tie labels are reproducible. The distance buffer starts as a
//! copy of the function image and is rewritten in place by every pass; the
//! Voronoi buffer mirrors it, starting from the caller's label image.
//!
//! Partial-region requests are not honored: the separable transform is
//! non-local along every axis, so the whole image is always produced.
//!
//! Typical usage:
//! ```
//! use distmap::{max_apex_height, DistanceTransform, ImageNd, TransformParams};
//!
//! let inf: f32 = max_apex_height::<f32>();
//! let mut f = ImageNd::filled(&[5], inf);
//! f.set(&[2], 0.0);
//!
//! let engine = DistanceTransform::new(TransformParams::default());
//! let d = engine.distance(&f).unwrap();
//! assert_eq!(d.data(), &[4.0, 1.0, 0.0, 1.0, 4.0]);
//! ```

use super::error::TransformError;
use super::params::TransformParams;
use super::sweep::{sweep_axis, sweep_axis_with_labels};
use crate::diagnostics::{PassTiming, TransformReport};
use crate::envelope::{DistancePixel, EnvelopeBounds, Spacing};
use crate::image::ImageNd;
use log::debug;
use std::time::Instant;

/// Distance image plus the Voronoi map that was carried alongside it.
#[derive(Clone, Debug)]
pub struct DistanceOutput<D, L> {
    /// Squared distances `min_p [ Σ_k (s_k·(x_k − p_k))² + f(p) ]`.
    pub distance: ImageNd<D>,
    /// For every voxel, the label of a site attaining that minimum.
    pub voronoi: ImageNd<L>,
}

/// Generalized distance transform with a squared Euclidean metric.
pub struct DistanceTransform {
    params: TransformParams,
}

impl DistanceTransform {
    /// Create a transform with the supplied parameters.
    pub fn new(params: TransformParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &TransformParams {
        &self.params
    }

    /// Compute the distance image of `function`.
    pub fn distance<D: DistancePixel>(
        &self,
        function: &ImageNd<D>,
    ) -> Result<ImageNd<D>, TransformError> {
        self.validate::<D>(function)?;
        let mut distance = function.clone();
        self.run::<D, ()>(&mut distance, None);
        Ok(distance)
    }

    /// Like [`Self::distance`], also returning per-pass diagnostics.
    pub fn distance_with_report<D: DistancePixel>(
        &self,
        function: &ImageNd<D>,
    ) -> Result<(ImageNd<D>, TransformReport), TransformError> {
        self.validate::<D>(function)?;
        let total = Instant::now();
        let mut distance = function.clone();
        let passes = self.run::<D, ()>(&mut distance, None);
        let report = self.report(function, false, passes, total);
        Ok((distance, report))
    }

    /// Compute the distance image and the Voronoi map seeded by `labels`.
    /// The label image must share the function image's shape; its pixels are
    /// opaque and only ever copied.
    pub fn distance_with_voronoi<D, L>(
        &self,
        function: &ImageNd<D>,
        labels: &ImageNd<L>,
    ) -> Result<DistanceOutput<D, L>, TransformError>
    where
        D: DistancePixel,
        L: Copy + Send + Sync,
    {
        self.validate::<D>(function)?;
        validate_labels(function, labels)?;
        let mut distance = function.clone();
        let mut voronoi = labels.clone();
        self.run(&mut distance, Some(&mut voronoi));
        Ok(DistanceOutput { distance, voronoi })
    }

    /// Like [`Self::distance_with_voronoi`], also returning diagnostics.
    pub fn distance_with_voronoi_report<D, L>(
        &self,
        function: &ImageNd<D>,
        labels: &ImageNd<L>,
    ) -> Result<(DistanceOutput<D, L>, TransformReport), TransformError>
    where
        D: DistancePixel,
        L: Copy + Send + Sync,
    {
        self.validate::<D>(function)?;
        validate_labels(function, labels)?;
        let total = Instant::now();
        let mut distance = function.clone();
        let mut voronoi = labels.clone();
        let passes = self.run(&mut distance, Some(&mut voronoi));
        let report = self.report(function, true, passes, total);
        Ok((DistanceOutput { distance, voronoi }, report))
    }

    /// Run passes 0..N-1 in place. Each pass completes before the next one
    /// starts, which is the barrier the scanline parallelism relies on.
    fn run<D, L>(
        &self,
        distance: &mut ImageNd<D>,
        mut voronoi: Option<&mut ImageNd<L>>,
    ) -> Vec<PassTiming>
    where
        D: DistancePixel,
        L: Copy + Send + Sync,
    {
        let spacings = distance.spacing().to_vec();
        let mut passes = Vec::with_capacity(distance.ndim());
        for axis in 0..distance.ndim() {
            let start = Instant::now();
            let spacing = self.axis_spacing(&spacings, axis);
            match voronoi.as_deref_mut() {
                None => sweep_axis(distance, axis, spacing),
                Some(labels) => sweep_axis_with_labels(distance, labels, axis, spacing),
            }
            let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;
            let extent = distance.shape()[axis];
            let scanlines = if extent == 0 {
                0
            } else {
                distance.len() / extent
            };
            debug!("distance pass axis={axis} scanlines={scanlines} elapsed_ms={elapsed_ms:.3}");
            passes.push(PassTiming {
                axis,
                scanlines,
                elapsed_ms,
            });
        }
        passes
    }

    fn axis_spacing(&self, spacings: &[f64], axis: usize) -> Spacing {
        if !self.params.use_spacing {
            return Spacing::Unit;
        }
        let s = spacings[axis];
        if s == 1.0 {
            Spacing::Unit
        } else {
            Spacing::scaled(s)
        }
    }

    fn validate<D: DistancePixel>(&self, function: &ImageNd<D>) -> Result<(), TransformError> {
        if function.ndim() == 0 {
            return Err(TransformError::ZeroDimensional);
        }
        let minimal = self.params.minimal_spacing();
        for (axis, (&extent, &s)) in function
            .shape()
            .iter()
            .zip(function.spacing())
            .enumerate()
        {
            if self.params.use_spacing {
                if !s.is_finite() || s <= 0.0 {
                    return Err(TransformError::InvalidSpacing { axis, spacing: s });
                }
                if s < minimal {
                    return Err(TransformError::SpacingTooSmall {
                        axis,
                        spacing: s,
                        minimal,
                    });
                }
            }
            let effective = if self.params.use_spacing { s } else { 1.0 };
            let bounds = EnvelopeBounds::for_spacing::<D>(effective);
            if extent.saturating_sub(1) as u64 > bounds.max_abscissa as u64 {
                return Err(TransformError::ExtentTooLarge {
                    axis,
                    extent,
                    max_abscissa: bounds.max_abscissa,
                });
            }
        }
        Ok(())
    }

    fn report<D: Copy>(
        &self,
        function: &ImageNd<D>,
        voronoi: bool,
        passes: Vec<PassTiming>,
        total: Instant,
    ) -> TransformReport {
        TransformReport {
            shape: function.shape().to_vec(),
            spacing: function.spacing().to_vec(),
            voxels: function.len(),
            use_spacing: self.params.use_spacing,
            voronoi,
            passes,
            total_ms: total.elapsed().as_secs_f64() * 1000.0,
        }
    }
}

fn validate_labels<D: Copy, L: Copy>(
    function: &ImageNd<D>,
    labels: &ImageNd<L>,
) -> Result<(), TransformError> {
    if labels.shape() != function.shape() {
        return Err(TransformError::ShapeMismatch {
            function: function.shape().to_vec(),
            label: labels.shape().to_vec(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::envelope::max_apex_height;

    fn engine() -> DistanceTransform {
        DistanceTransform::new(TransformParams::default())
    }

    #[test]
    fn rejects_zero_dimensional_images() {
        let f = ImageNd::filled(&[], 0.0f32);
        assert_eq!(
            engine().distance(&f).unwrap_err(),
            TransformError::ZeroDimensional
        );
    }

    #[test]
    fn rejects_mismatched_label_shapes() {
        let f = ImageNd::filled(&[4, 4], 0.0f32);
        let l = ImageNd::filled(&[4, 5], 0u8);
        let err = engine().distance_with_voronoi(&f, &l).unwrap_err();
        assert!(matches!(err, TransformError::ShapeMismatch { .. }));
    }

    #[test]
    fn rejects_non_positive_spacing() {
        let f = ImageNd::filled(&[4], 0.0f32).with_spacing(&[0.0]);
        let err = engine().distance(&f).unwrap_err();
        assert!(matches!(err, TransformError::InvalidSpacing { .. }));
    }

    #[test]
    fn rejects_spacing_below_the_configured_precision() {
        let f = ImageNd::filled(&[4], 0.0f32).with_spacing(&[1e-5]);
        let err = engine().distance(&f).unwrap_err();
        assert!(matches!(err, TransformError::SpacingTooSmall { .. }));
    }

    #[test]
    fn ignores_declared_spacing_when_disabled() {
        let params = TransformParams {
            use_spacing: false,
            ..Default::default()
        };
        let inf = max_apex_height::<f32>();
        let mut f = ImageNd::filled(&[3], inf).with_spacing(&[2.0]);
        f.set(&[1], 0.0);
        let d = DistanceTransform::new(params).distance(&f).unwrap();
        assert_eq!(d.data(), &[1.0, 0.0, 1.0]);
    }

    #[test]
    fn rejects_extents_beyond_the_abscissa_range() {
        // i16 distances keep the representable extent small.
        let f = ImageNd::filled(&[200], 0i16);
        let err = engine().distance(&f).unwrap_err();
        assert!(matches!(err, TransformError::ExtentTooLarge { .. }));
    }

    #[test]
    fn all_sentinel_input_propagates_the_sentinel() {
        let inf = max_apex_height::<f32>();
        let f = ImageNd::filled(&[4, 3], inf);
        let d = engine().distance(&f).unwrap();
        assert!(d.data().iter().all(|&v| v == inf));
    }
}

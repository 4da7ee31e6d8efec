//! One separable pass of the distance transform along a single axis.
//!
//! A pass along axis k decomposes the linear buffer into contiguous blocks of
//! `stride_k · size_k` elements; each block holds `stride_k` complete
//! scanlines, interleaved with stride `stride_k`. Blocks touch disjoint parts
//! of the buffer, so they are processed in parallel with rayon; the scanlines
//! inside a block run sequentially and share one envelope and one staging
//! line, reusing the allocations.
//!
//! Every scanline is gathered into contiguous scratch before it is fed to the
//! envelope and scattered back afterwards. For axis 0 the gather degenerates
//! to a copy of an already-contiguous line; for higher axes it is what keeps
//! the envelope loops cache-friendly on strided data.

use crate::envelope::{DistancePixel, LowerEnvelope, Spacing};
use crate::image::ImageNd;
use rayon::prelude::*;

/// Replace every scanline of `image` along `axis` with the sampled lower
/// envelope of its values.
pub(crate) fn sweep_axis<D: DistancePixel>(image: &mut ImageNd<D>, axis: usize, spacing: Spacing) {
    let extent = image.shape()[axis];
    if image.len() == 0 || extent == 0 {
        return;
    }
    let lanes = image.strides()[axis];
    let block = lanes * extent;

    image.data_mut().par_chunks_mut(block).for_each(|chunk| {
        let mut envelope: LowerEnvelope<D> = LowerEnvelope::new(extent, spacing);
        let mut line = vec![D::from_wide(0.0); extent];
        for lane in 0..lanes {
            gather(chunk, lane, lanes, &mut line);
            envelope.clear();
            for (i, &height) in line.iter().enumerate() {
                envelope.add_parabola(i as i64, height);
            }
            // The inputs are all inside the envelope now; reuse the staging
            // line for the sampled output.
            envelope.sample_into(0, &mut line);
            scatter(&line, chunk, lane, lanes);
        }
    });
}

/// Like [`sweep_axis`], additionally carrying the Voronoi labels alongside
/// the distances. `voronoi` must have the same shape as `distance`.
pub(crate) fn sweep_axis_with_labels<D, L>(
    distance: &mut ImageNd<D>,
    voronoi: &mut ImageNd<L>,
    axis: usize,
    spacing: Spacing,
) where
    D: DistancePixel,
    L: Copy + Send + Sync,
{
    debug_assert_eq!(distance.shape(), voronoi.shape());
    let extent = distance.shape()[axis];
    if distance.len() == 0 || extent == 0 {
        return;
    }
    let lanes = distance.strides()[axis];
    let block = lanes * extent;

    distance
        .data_mut()
        .par_chunks_mut(block)
        .zip(voronoi.data_mut().par_chunks_mut(block))
        .for_each(|(dist_chunk, label_chunk)| {
            let mut envelope: LowerEnvelope<D, L> = LowerEnvelope::new(extent, spacing);
            let mut line = vec![D::from_wide(0.0); extent];
            let mut labels = vec![label_chunk[0]; extent];
            for lane in 0..lanes {
                gather(dist_chunk, lane, lanes, &mut line);
                gather(label_chunk, lane, lanes, &mut labels);
                envelope.clear();
                for (i, (&height, &label)) in line.iter().zip(&labels).enumerate() {
                    envelope.add_labeled_parabola(i as i64, height, label);
                }
                envelope.sample_with_labels_into(0, &mut line, &mut labels);
                scatter(&line, dist_chunk, lane, lanes);
                scatter(&labels, label_chunk, lane, lanes);
            }
        });
}

/// Stage one strided scanline into a contiguous line.
#[inline]
fn gather<T: Copy>(chunk: &[T], lane: usize, lanes: usize, line: &mut [T]) {
    for (i, slot) in line.iter_mut().enumerate() {
        *slot = chunk[lane + i * lanes];
    }
}

/// Write a contiguous line back to its strided scanline.
#[inline]
fn scatter<T: Copy>(line: &[T], chunk: &mut [T], lane: usize, lanes: usize) {
    for (i, &value) in line.iter().enumerate() {
        chunk[lane + i * lanes] = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::envelope::max_apex_height;

    #[test]
    fn pass_along_axis_zero_transforms_rows_independently() {
        let inf = max_apex_height::<f32>();
        let mut img = ImageNd::from_raw(&[3, 2], vec![inf, 0.0, inf, 0.0, inf, inf]);
        sweep_axis(&mut img, 0, Spacing::Unit);
        assert_eq!(img.data(), &[1.0, 0.0, 1.0, 0.0, 1.0, 4.0]);
    }

    #[test]
    fn pass_along_axis_one_transforms_columns() {
        let inf = max_apex_height::<f32>();
        let mut img = ImageNd::filled(&[2, 3], inf);
        img.set(&[0, 1], 0.0);
        sweep_axis(&mut img, 1, Spacing::Unit);
        assert_eq!(img.get(&[0, 0]), 1.0);
        assert_eq!(img.get(&[0, 1]), 0.0);
        assert_eq!(img.get(&[0, 2]), 1.0);
        // The second column has no site and stays saturated.
        assert_eq!(img.get(&[1, 0]), inf);
    }

    #[test]
    fn labels_follow_the_winning_site() {
        let inf = max_apex_height::<f32>();
        let mut dist = ImageNd::from_raw(&[4], vec![0.0, inf, inf, 0.0]);
        let mut labels = ImageNd::from_raw(&[4], vec![7u32, 0, 0, 9]);
        sweep_axis_with_labels(&mut dist, &mut labels, 0, Spacing::Unit);
        assert_eq!(dist.data(), &[0.0, 1.0, 1.0, 0.0]);
        assert_eq!(labels.data(), &[7, 7, 9, 9]);
    }
}

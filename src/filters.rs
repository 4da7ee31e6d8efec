//! Pointwise helpers the drivers compose around the engine.
//!
//! The engine itself only ever sees a function image and an opaque label
//! image. Everything a driver does before and after is a pointwise filter
//! collected here: marking background voxels with the sentinel, turning
//! radii into `−r²` apex heights, taking the square root of squared
//! distances, signing, thresholding, building position images for vector
//! distance maps.
//!
//! None of these functions are used by the engine; they exist so the driver
//! binaries and tests stay thin.

use crate::envelope::{max_apex_height, DistancePixel};
use crate::image::ImageNd;
use nalgebra::SVector;

/// Indicator image for a mask: sentinel where `mask == background`, zero on
/// every site voxel. Its distance transform is the squared Euclidean
/// distance to the nearest site.
pub fn indicator_from_mask<D, T>(mask: &ImageNd<T>, background: T) -> ImageNd<D>
where
    D: DistancePixel,
    T: Copy + PartialEq,
{
    let inf = max_apex_height::<D>();
    let zero = D::from_wide(0.0);
    mask.map(|v| if v == background { inf } else { zero })
}

/// Replace exact zeros with the sentinel, keeping every other value.
/// Used when the function image already carries apex heights (e.g. `−r²`)
/// and zero marks "no site here".
pub fn zeros_to_sentinel<D: DistancePixel>(function: &ImageNd<D>) -> ImageNd<D> {
    let inf = max_apex_height::<D>();
    let zero = D::from_wide(0.0);
    function.map(|v| if v == zero { inf } else { v })
}

/// Convert a radius image to apex heights `−r²`. The ≤0 level set of the
/// resulting distance transform is the union of the spheres the radii imply.
pub fn minus_sqr<D: DistancePixel>(radius: &ImageNd<D>) -> ImageNd<D> {
    radius.map(|v| {
        let r = v.to_wide();
        D::from_wide(-(r * r))
    })
}

/// Pointwise square root, converting squared distances to distances.
/// Integer pixels truncate like a plain numeric cast.
pub fn sqrt_in_place<D: DistancePixel>(image: &mut ImageNd<D>) {
    for v in image.data_mut() {
        *v = D::from_wide(v.to_wide().sqrt());
    }
}

/// Negate every value whose mask voxel is not `background`. Turns a plain
/// distance field into a signed one.
pub fn negate_in_mask<D, M>(image: &mut ImageNd<D>, mask: &ImageNd<M>, background: M)
where
    D: DistancePixel,
    M: Copy + PartialEq,
{
    assert_eq!(
        image.shape(),
        mask.shape(),
        "mask shape does not match image shape"
    );
    for (v, &m) in image.data_mut().iter_mut().zip(mask.data()) {
        if m != background {
            *v = D::from_wide(-v.to_wide());
        }
    }
}

/// Binary image of the ≤0 region, 1 inside and 0 outside.
pub fn threshold_le_zero<D: DistancePixel>(image: &ImageNd<D>) -> ImageNd<u8> {
    let zero = D::from_wide(0.0);
    image.map(|v| u8::from(v <= zero))
}

/// Image whose pixel at index x is the physical position `x_k·s_k` of that
/// voxel. Subtracting it from a position-valued Voronoi map yields the
/// offset-to-nearest-site vector field.
pub fn position_image<const N: usize>(shape: &[usize], spacing: &[f64]) -> ImageNd<SVector<f32, N>> {
    assert_eq!(shape.len(), N, "shape dimensionality must equal N");
    assert_eq!(spacing.len(), N, "spacing dimensionality must equal N");
    ImageNd::from_fn(shape, |index| {
        SVector::from_fn(|k, _| (index[k] as f64 * spacing[k]) as f32)
    })
    .with_spacing(spacing)
}

/// Pointwise difference `voronoi − positions`: the vector from each voxel to
/// the site that claimed it.
pub fn offsets_from_positions<const N: usize>(
    voronoi: &ImageNd<SVector<f32, N>>,
    positions: &ImageNd<SVector<f32, N>>,
) -> ImageNd<SVector<f32, N>> {
    assert_eq!(
        voronoi.shape(),
        positions.shape(),
        "position image shape does not match the Voronoi map"
    );
    let data = voronoi
        .data()
        .iter()
        .zip(positions.data())
        .map(|(v, p)| v - p)
        .collect();
    ImageNd::from_raw(voronoi.shape(), data).with_spacing(voronoi.spacing())
}

/// Binary erosion with the axis cross of radius 1. A foreground voxel
/// survives iff all of its 2N axis neighbours are foreground; voxels outside
/// the image count as background.
pub fn erode_cross(mask: &ImageNd<u8>) -> ImageNd<u8> {
    let shape = mask.shape().to_vec();
    ImageNd::from_fn(&shape, |index| {
        if mask.get(index) == 0 {
            return 0;
        }
        let mut probe = index.to_vec();
        for (axis, &extent) in shape.iter().enumerate() {
            let i = index[axis];
            if i == 0 || i + 1 == extent {
                return 0;
            }
            probe[axis] = i - 1;
            let below = mask.get(&probe);
            probe[axis] = i + 1;
            let above = mask.get(&probe);
            probe[axis] = i;
            if below == 0 || above == 0 {
                return 0;
            }
        }
        1
    })
    .with_spacing(mask.spacing())
}

/// Border voxels of a binary mask: foreground minus its erosion. The signed
/// distance transform measures distances to this ring.
pub fn border_from_mask(mask: &ImageNd<u8>) -> ImageNd<u8> {
    let eroded = erode_cross(mask);
    let data = mask
        .data()
        .iter()
        .zip(eroded.data())
        .map(|(&m, &e)| m - e)
        .collect();
    ImageNd::from_raw(mask.shape(), data).with_spacing(mask.spacing())
}

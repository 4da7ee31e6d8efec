//! Shared test helpers: synthetic inputs and a brute-force reference
//! implementation of the generalized distance transform.

use distmap::{max_apex_height, ImageNd};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// O(voxels²) reference: evaluate the transform definition directly,
/// saturating at the sentinel like the engine does.
pub fn brute_force_gdt(function: &ImageNd<f32>, spacing: &[f64]) -> ImageNd<f32> {
    let inf = max_apex_height::<f32>() as f64;
    let indices: Vec<Vec<usize>> = function.indices().collect();
    let mut out = Vec::with_capacity(function.len());
    for x in &indices {
        let mut best = f64::INFINITY;
        for p in &indices {
            let mut d = function.get(p) as f64;
            for (k, s) in spacing.iter().enumerate() {
                let dx = (x[k] as f64 - p[k] as f64) * s;
                d += dx * dx;
            }
            best = best.min(d);
        }
        out.push(best.min(inf) as f32);
    }
    ImageNd::from_raw(function.shape(), out).with_spacing(function.spacing())
}

/// Random function image mixing integer-valued finite heights with sentinel
/// voxels. Integer heights keep the f64 arithmetic exact, so results can be
/// compared for equality under unit spacing.
pub fn random_function(shape: &[usize], site_fraction: f64, seed: u64) -> ImageNd<f32> {
    let inf = max_apex_height::<f32>();
    let mut rng = StdRng::seed_from_u64(seed);
    ImageNd::from_fn(shape, |_| {
        if rng.gen_bool(site_fraction) {
            rng.gen_range(-9..10) as f32
        } else {
            inf
        }
    })
}

/// Random indicator image: 0 on sites, sentinel elsewhere.
pub fn random_indicator(shape: &[usize], site_fraction: f64, seed: u64) -> ImageNd<f32> {
    let inf = max_apex_height::<f32>();
    let mut rng = StdRng::seed_from_u64(seed);
    ImageNd::from_fn(shape, |_| {
        if rng.gen_bool(site_fraction) {
            0.0
        } else {
            inf
        }
    })
}

/// Indicator image with sites at the given indices.
pub fn indicator_with_sites(shape: &[usize], sites: &[&[usize]]) -> ImageNd<f32> {
    let inf = max_apex_height::<f32>();
    let mut f = ImageNd::filled(shape, inf);
    for site in sites {
        f.set(site, 0.0);
    }
    f
}

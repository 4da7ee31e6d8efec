mod common;

use common::{brute_force_gdt, indicator_with_sites, random_function, random_indicator};
use distmap::filters::{
    border_from_mask, indicator_from_mask, minus_sqr, negate_in_mask, sqrt_in_place,
    threshold_le_zero, zeros_to_sentinel,
};
use distmap::{max_apex_height, DistanceTransform, ImageNd, TransformParams};

fn engine() -> DistanceTransform {
    DistanceTransform::new(TransformParams::default())
}

#[test]
fn matches_brute_force_on_random_2d_functions() {
    let _ = env_logger::builder().is_test(true).try_init();
    for seed in 0..8 {
        let f = random_function(&[7, 5], 0.3, seed);
        let expected = brute_force_gdt(&f, &[1.0, 1.0]);
        let d = engine().distance(&f).unwrap();
        assert_eq!(
            d.data(),
            expected.data(),
            "mismatch against brute force for seed {seed}"
        );
    }
}

#[test]
fn matches_brute_force_on_random_3d_functions() {
    for seed in 0..4 {
        let f = random_function(&[5, 4, 3], 0.25, seed);
        let expected = brute_force_gdt(&f, &[1.0, 1.0, 1.0]);
        let d = engine().distance(&f).unwrap();
        assert_eq!(
            d.data(),
            expected.data(),
            "mismatch against brute force for seed {seed}"
        );
    }
}

#[test]
fn separable_sweeps_match_the_direct_definition_for_indicators() {
    for seed in 0..4 {
        let f = random_indicator(&[6, 6, 2], 0.2, seed);
        let expected = brute_force_gdt(&f, &[1.0, 1.0, 1.0]);
        let d = engine().distance(&f).unwrap();
        assert_eq!(d.data(), expected.data());
    }
}

#[test]
fn matches_brute_force_under_anisotropic_spacing() {
    let f = random_indicator(&[6, 5], 0.3, 11).with_spacing(&[0.7, 1.9]);
    let expected = brute_force_gdt(&f, &[0.7, 1.9]);
    let d = engine().distance(&f).unwrap();
    for (&got, &want) in d.data().iter().zip(expected.data()) {
        assert!(
            (got - want).abs() <= 1e-4 * want.abs().max(1.0),
            "got {got}, want {want}"
        );
    }
}

#[test]
fn voronoi_labels_point_at_a_minimizing_site() {
    let shape = [7, 6];
    let f = random_indicator(&shape, 0.25, 3);
    // Unique label per voxel: its own linear index.
    let labels = ImageNd::from_fn(&shape, |idx| (idx[0] + shape[0] * idx[1]) as u32);
    let output = engine().distance_with_voronoi(&f, &labels).unwrap();

    let inf = max_apex_height::<f32>();
    for idx in f.indices() {
        let d = output.distance.get(&idx);
        if d == inf {
            continue;
        }
        let label = output.voronoi.get(&idx) as usize;
        let site = [label % shape[0], label / shape[0]];
        assert_eq!(f.get(&site), 0.0, "label {label} is not a site");
        let dx = idx[0] as f32 - site[0] as f32;
        let dy = idx[1] as f32 - site[1] as f32;
        assert_eq!(d, dx * dx + dy * dy, "label {label} does not attain D at {idx:?}");
    }
}

#[test]
fn exact_ties_are_labeled_by_the_earlier_site() {
    let f = indicator_with_sites(&[5], &[&[0], &[4]]);
    let labels = ImageNd::from_raw(&[5], vec![10u8, 0, 0, 0, 40]);
    let output = engine().distance_with_voronoi(&f, &labels).unwrap();
    assert_eq!(output.distance.data(), &[0.0, 1.0, 4.0, 1.0, 0.0]);
    // Abscissa 2 is equidistant from both sites; the earlier one wins it.
    assert_eq!(output.voronoi.data(), &[10, 10, 10, 40, 40]);
}

#[test]
fn scaling_every_spacing_scales_squared_distances_quadratically() {
    let shape = [6, 4];
    let mut base = random_indicator(&shape, 0.3, 21);
    base.set(&[0, 0], 0.0);
    let scaled = base.clone().with_spacing(&[3.0, 3.0]);

    let d_base = engine().distance(&base).unwrap();
    let d_scaled = engine().distance(&scaled).unwrap();
    for (&a, &b) in d_base.data().iter().zip(d_scaled.data()) {
        assert_eq!(b, 9.0 * a);
    }
}

#[test]
fn all_sentinel_volume_stays_saturated_with_voronoi() {
    let inf = max_apex_height::<f32>();
    let f = ImageNd::filled(&[4, 3, 2], inf);
    let labels = ImageNd::filled(&[4, 3, 2], 0u8);
    let output = engine().distance_with_voronoi(&f, &labels).unwrap();
    assert!(output.distance.data().iter().all(|&v| v == inf));
}

#[test]
fn reindicatorized_output_keeps_the_zero_set() {
    let f = random_indicator(&[6, 5], 0.15, 7);
    let d = engine().distance(&f).unwrap();

    // Threshold the squared distances at 0 to recover the sites, rebuild the
    // indicator and transform again.
    let sites = threshold_le_zero(&d);
    let f2: ImageNd<f32> = indicator_from_mask(&sites, 0);
    let d2 = engine().distance(&f2).unwrap();

    assert_eq!(d.data(), d2.data());
}

#[test]
fn single_site_3x3_scenario() {
    let f = indicator_with_sites(&[3, 3], &[&[1, 1]]);
    let d = engine().distance(&f).unwrap();
    assert_eq!(d.data(), &[2.0, 1.0, 2.0, 1.0, 0.0, 1.0, 2.0, 1.0, 2.0]);
}

#[test]
fn single_site_3x3_scenario_with_spacing() {
    let f = indicator_with_sites(&[3, 3], &[&[1, 1]]).with_spacing(&[1.0, 2.0]);
    let d = engine().distance(&f).unwrap();
    assert_eq!(d.data(), &[5.0, 4.0, 5.0, 1.0, 0.0, 1.0, 5.0, 4.0, 5.0]);
}

#[test]
fn union_of_spheres_recovers_a_euclidean_ball() {
    let side = 31usize;
    let centre = [15usize, 15, 15];
    let mut radius: ImageNd<f32> = ImageNd::filled(&[side, side, side], 0.0);
    radius.set(&centre, 5.0);

    let function = zeros_to_sentinel(&minus_sqr(&radius));
    let d = engine().distance(&function).unwrap();
    let union = threshold_le_zero(&d);

    for idx in union.indices() {
        let dist_sq: i64 = idx
            .iter()
            .zip(&centre)
            .map(|(&i, &c)| (i as i64 - c as i64).pow(2))
            .sum();
        let inside = dist_sq <= 25;
        assert_eq!(
            union.get(&idx) == 1,
            inside,
            "voxel {idx:?} at squared distance {dist_sq}"
        );
    }
}

#[test]
fn signed_transform_of_a_disk_changes_sign_at_the_boundary() {
    let shape = [16usize, 16];
    let centre = [8f64, 8.0];
    let mask = ImageNd::from_fn(&shape, |idx| {
        let dx = idx[0] as f64 - centre[0];
        let dy = idx[1] as f64 - centre[1];
        u8::from(dx * dx + dy * dy <= 16.0)
    });

    let border = border_from_mask(&mask);
    let function: ImageNd<f32> = indicator_from_mask(&border, 0);
    let mut signed = engine().distance(&function).unwrap();
    sqrt_in_place(&mut signed);
    negate_in_mask(&mut signed, &mask, 0);

    for idx in mask.indices() {
        let v = signed.get(&idx);
        if border.get(&idx) == 1 {
            assert_eq!(v, 0.0, "border voxel {idx:?} must be zero");
        } else if mask.get(&idx) == 1 {
            assert!(v < 0.0, "interior voxel {idx:?} must be negative, got {v}");
        } else {
            assert!(v > 0.0, "outside voxel {idx:?} must be positive, got {v}");
        }
    }
}

#[test]
fn report_covers_every_axis() {
    let f = random_indicator(&[5, 4, 3], 0.4, 2);
    let (_, report) = engine().distance_with_report(&f).unwrap();
    assert_eq!(report.shape, vec![5, 4, 3]);
    assert_eq!(report.voxels, 60);
    assert!(!report.voronoi);
    let axes: Vec<usize> = report.passes.iter().map(|p| p.axis).collect();
    assert_eq!(axes, vec![0, 1, 2]);
    assert_eq!(report.passes[0].scanlines, 12);
    assert_eq!(report.passes[1].scanlines, 15);
    assert_eq!(report.passes[2].scanlines, 20);
}

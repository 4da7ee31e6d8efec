use distmap::image::io::{load_vol, save_vol};
use distmap::image::ImageNd;
use nalgebra::Vector2;
use std::path::PathBuf;
use std::{env, fs};

fn temp_path(name: &str) -> PathBuf {
    let mut path = env::temp_dir();
    path.push(format!("distmap-test-{}-{name}", std::process::id()));
    path
}

fn remove(path: &PathBuf) {
    let _ = fs::remove_file(path);
    let mut raw = path.as_os_str().to_os_string();
    raw.push(".raw");
    let _ = fs::remove_file(raw);
}

#[test]
fn scalar_volume_round_trips() {
    let path = temp_path("scalar.vol");
    let img = ImageNd::from_fn(&[3, 2, 2], |idx| (idx[0] + 10 * idx[1] + 100 * idx[2]) as f32)
        .with_spacing(&[1.0, 2.0, 0.5]);
    save_vol(&img, &path).unwrap();
    let back: ImageNd<f32> = load_vol(&path).unwrap();
    remove(&path);

    assert_eq!(back.shape(), img.shape());
    assert_eq!(back.spacing(), img.spacing());
    assert_eq!(back.data(), img.data());
}

#[test]
fn vector_volume_round_trips() {
    let path = temp_path("vector.vol");
    let img = ImageNd::from_fn(&[2, 3], |idx| {
        Vector2::new(idx[0] as f32, -(idx[1] as f32))
    });
    save_vol(&img, &path).unwrap();
    let back: ImageNd<Vector2<f32>> = load_vol(&path).unwrap();
    remove(&path);

    assert_eq!(back.shape(), img.shape());
    assert_eq!(back.data(), img.data());
}

#[test]
fn element_type_mismatch_is_reported() {
    let path = temp_path("mismatch.vol");
    let img = ImageNd::filled(&[2, 2], 1.5f32);
    save_vol(&img, &path).unwrap();
    let result: Result<ImageNd<i32>, String> = load_vol(&path);
    remove(&path);

    let err = result.unwrap_err();
    assert!(err.contains("does not match"), "unexpected error: {err}");
}

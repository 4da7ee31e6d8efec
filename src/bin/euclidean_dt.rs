use distmap::filters::{indicator_from_mask, sqrt_in_place};
use distmap::image::io::{load_gray_png, save_gray16_png};
use distmap::image::ImageNd;
use distmap::{DistanceTransform, TransformParams};
use std::env;
use std::path::Path;

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let args: Vec<String> = env::args().collect();
    if args.len() != 3 {
        return Err(usage(&args[0]));
    }

    let mask = load_gray_png(Path::new(&args[1]))?;

    // Background pixels (value 0) must not act as sites, so they carry the
    // sentinel apex height; every other pixel is a site at height 0.
    let function: ImageNd<f32> = indicator_from_mask(&mask, 0);

    let engine = DistanceTransform::new(TransformParams::default());
    let mut distance = engine.distance(&function).map_err(|e| e.to_string())?;

    // Squared euclidean distance to plain euclidean distance.
    sqrt_in_place(&mut distance);

    save_gray16_png(&distance, Path::new(&args[2]))
}

fn usage(program: &str) -> String {
    format!(
        "Compute the euclidean distance transform of an image.\n\n\
USAGE: {program} <input image> <output image>\n\
  <input image>: An image where background pixels have value 0.\n\
  <output image>: An image that denotes the euclidean distance to the\n\
                  closest foreground pixel."
    )
}

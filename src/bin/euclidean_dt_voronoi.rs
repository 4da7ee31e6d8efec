use distmap::filters::{indicator_from_mask, sqrt_in_place};
use distmap::image::io::{load_gray_png, save_gray16_png, save_gray8_png};
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
    if args.len() != 4 {
        return Err(usage(&args[0]));
    }

    let labels = load_gray_png(Path::new(&args[1]))?;
    let function: ImageNd<f32> = indicator_from_mask(&labels, 0);

    // The label image doubles as the Voronoi seed: every site pixel carries
    // its own gray value, which the transform copies to the pixels it wins.
    let engine = DistanceTransform::new(TransformParams::default());
    let output = engine
        .distance_with_voronoi(&function, &labels)
        .map_err(|e| e.to_string())?;

    let mut distance = output.distance;
    sqrt_in_place(&mut distance);

    save_gray16_png(&distance, Path::new(&args[2]))?;
    save_gray8_png(&output.voronoi, Path::new(&args[3]))
}

fn usage(program: &str) -> String {
    format!(
        "Compute the euclidean distance transform and voronoi map of an image.\n\n\
USAGE: {program} <label image> <distance output> <voronoi output>\n\
  <label image>: An image where background pixels have label 0.\n\
  <distance output>: The euclidean distance to the closest labeled pixel.\n\
  <voronoi output>: The label of the closest labeled pixel."
    )
}

use distmap::filters::{indicator_from_mask, offsets_from_positions, position_image, sqrt_in_place};
use distmap::image::io::{load_gray_png, save_gray16_png, save_vol};
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

    let mask = load_gray_png(Path::new(&args[1]))?;
    let function: ImageNd<f32> = indicator_from_mask(&mask, 0);

    // Seed the Voronoi map with each pixel's own physical position. After
    // the transform, every pixel holds the position of its closest site;
    // subtracting the identity positions turns that into offsets.
    let positions = position_image::<2>(mask.shape(), mask.spacing());

    let engine = DistanceTransform::new(TransformParams::default());
    let output = engine
        .distance_with_voronoi(&function, &positions)
        .map_err(|e| e.to_string())?;

    let mut distance = output.distance;
    sqrt_in_place(&mut distance);
    let offsets = offsets_from_positions(&output.voronoi, &positions);

    save_gray16_png(&distance, Path::new(&args[2]))?;
    save_vol(&offsets, Path::new(&args[3]))
}

fn usage(program: &str) -> String {
    format!(
        "Compute the euclidean distance transform and vector distance map of\n\
an image.\n\n\
USAGE: {program} <label image> <distance output> <vector output>\n\
  <label image>: An image where background pixels have label 0.\n\
  <distance output>: The euclidean distance to the closest foreground pixel.\n\
  <vector output>: A .vol volume with the offset to the closest foreground\n\
                   pixel."
    )
}

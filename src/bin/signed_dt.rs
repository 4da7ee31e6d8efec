use distmap::filters::{border_from_mask, indicator_from_mask, negate_in_mask, sqrt_in_place};
use distmap::image::io::{load_gray_png, save_vol};
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

    let input = load_gray_png(Path::new(&args[1]))?;
    let binary = input.map(|v| u8::from(v != 0));

    // The boundary ring of the segmented structure, by erosion and
    // subtraction. The transform measures distances to this ring so that
    // both sides of the boundary get a meaningful distance.
    let border = border_from_mask(&binary);
    let function: ImageNd<f32> = indicator_from_mask(&border, 0);

    let engine = DistanceTransform::new(TransformParams::default());
    let mut distance = engine.distance(&function).map_err(|e| e.to_string())?;

    sqrt_in_place(&mut distance);
    negate_in_mask(&mut distance, &binary, 0);

    save_vol(&distance, Path::new(&args[2]))
}

fn usage(program: &str) -> String {
    format!(
        "Compute the signed euclidean distance transform of an image.\n\n\
USAGE: {program} <input image> <output volume>\n\
  <input image>: An image where background pixels have value 0.\n\
  <output volume>: A .vol volume with the signed euclidean distance,\n\
                   negative inside the foreground."
    )
}

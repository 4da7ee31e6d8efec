use distmap::filters::{minus_sqr, threshold_le_zero, zeros_to_sentinel};
use distmap::image::io::{load_vol, save_vol};
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
    if args.len() != 5 {
        return Err(usage(&args[0]));
    }

    let radius: ImageNd<f32> = load_vol(Path::new(&args[1]))?;
    let labels: ImageNd<i32> = load_vol(Path::new(&args[2]))?;

    // For a radius r, the ≤0 level set of (p−x)² − r² is a sphere of radius
    // r around x. Radius 0 means "no sphere here" and becomes the sentinel.
    let function = zeros_to_sentinel(&minus_sqr(&radius));

    let engine = DistanceTransform::new(TransformParams::default());
    let output = engine
        .distance_with_voronoi(&function, &labels)
        .map_err(|e| e.to_string())?;

    let union = threshold_le_zero(&output.distance);

    save_vol(&union, Path::new(&args[3]))?;
    save_vol(&output.voronoi, Path::new(&args[4]))
}

fn usage(program: &str) -> String {
    format!(
        "Compute the union of spheres when sphere radii are given with a\n\
radius volume.\n\n\
USAGE: {program} <radius volume> <label volume> \\\n\
                 <union output> <voronoi output>\n\
  <radius volume>: Each position x holds the radius of a sphere\n\
    centered at x.\n\
  <label volume>: A volume where background voxels have label 0.\n\
  <union output>: A binary volume that is 1 for points inside a sphere.\n\
  <voronoi output>: Contains the label of the closest sphere center."
    )
}

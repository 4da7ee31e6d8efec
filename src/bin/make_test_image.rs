// Small program to create the radius and label volumes used by the
// union-of-spheres and timing drivers.
use distmap::image::io::save_vol;
use distmap::image::ImageNd;
use std::env;
use std::path::Path;

const SIDE: usize = 101;

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

    let mut radius: ImageNd<f32> = ImageNd::filled(&[SIDE, SIDE, SIDE], 0.0);
    let mut labels: ImageNd<i32> = ImageNd::filled(&[SIDE, SIDE, SIDE], 0);

    // Three spheres of different sizes.
    let spheres: [([usize; 3], f32, i32); 3] = [
        ([50, 50, 50], 20.0, 1),
        ([20, 20, 50], 15.0, 2),
        ([80, 50, 50], 27.0, 3),
    ];
    for (centre, r, label) in spheres {
        radius.set(&centre, r);
        labels.set(&centre, label);
    }

    save_vol(&radius, Path::new(&args[1]))?;
    save_vol(&labels, Path::new(&args[2]))
}

fn usage(program: &str) -> String {
    format!(
        "Create a {SIDE}^3 test volume with three sphere seeds.\n\n\
USAGE: {program} <radius output> <label output>\n\
  <radius output>: .vol volume with per-voxel sphere radii.\n\
  <label output>: .vol volume with per-voxel sphere labels."
    )
}

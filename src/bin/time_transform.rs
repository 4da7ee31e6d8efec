// Timing harness: run the transform over a label volume in its different
// configurations and print per-pass timings. Produces no image output.
use distmap::filters::indicator_from_mask;
use distmap::image::io::load_vol;
use distmap::image::ImageNd;
use distmap::{DistanceTransform, TransformParams, TransformReport};
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
    if args.len() != 2 {
        return Err(usage(&args[0]));
    }

    let labels: ImageNd<i32> = load_vol(Path::new(&args[1]))?;
    println!("Image size: {:?}", labels.shape());
    let function: ImageNd<f32> = indicator_from_mask(&labels, 0);

    let with_spacing = DistanceTransform::new(TransformParams::default());
    let without_spacing = DistanceTransform::new(TransformParams {
        use_spacing: false,
        ..Default::default()
    });

    let (_, report) = with_spacing
        .distance_with_report(&function)
        .map_err(|e| e.to_string())?;
    print_report("distance with spacing", &report);

    let (_, report) = without_spacing
        .distance_with_report(&function)
        .map_err(|e| e.to_string())?;
    print_report("distance without spacing", &report);

    let (_, report) = with_spacing
        .distance_with_voronoi_report(&function, &labels)
        .map_err(|e| e.to_string())?;
    print_report("distance and voronoi map", &report);

    Ok(())
}

fn print_report(what: &str, report: &TransformReport) {
    println!("{what}: {:.3} ms", report.total_ms);
    for pass in &report.passes {
        println!(
            "  axis {}: {} scanlines in {:.3} ms",
            pass.axis, pass.scanlines, pass.elapsed_ms
        );
    }
}

fn usage(program: &str) -> String {
    format!(
        "Time the distance transform in its different configurations.\n\
Produces no output volumes.\n\n\
USAGE: {program} <label volume>\n\
  <label volume>: A .vol volume where background voxels have label 0."
    )
}

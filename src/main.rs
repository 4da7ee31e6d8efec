use distmap::filters::{indicator_from_mask, sqrt_in_place};
use distmap::image::io::{load_gray_png, save_gray16_png, save_gray8_png, write_json_file};
use distmap::{DistanceTransform, ImageNd, TransformParams, TransformReport};
use std::env;
use std::path::PathBuf;

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let program = env::args().next().unwrap_or_else(|| "distmap".to_string());
    let config = parse_args(&program)?;

    let mask = load_gray_png(&config.input_path)?;
    let mut function: ImageNd<f32> = indicator_from_mask(&mask, 0);
    if let Some(spacing) = &config.spacing {
        function = function.with_spacing(spacing);
    }

    let params = TransformParams {
        use_spacing: config.spacing.is_some(),
        ..Default::default()
    };
    let engine = DistanceTransform::new(params);

    let report: TransformReport;
    let mut distance: ImageNd<f32>;
    if let Some(voronoi_path) = &config.voronoi_out {
        let (output, rep) = engine
            .distance_with_voronoi_report(&function, &mask)
            .map_err(|e| e.to_string())?;
        distance = output.distance;
        report = rep;
        save_gray8_png(&output.voronoi, voronoi_path)?;
    } else {
        let (d, rep) = engine
            .distance_with_report(&function)
            .map_err(|e| e.to_string())?;
        distance = d;
        report = rep;
    }

    if !config.squared {
        sqrt_in_place(&mut distance);
    }
    save_gray16_png(&distance, &config.output_path)?;

    if let Some(path) = &config.json_out {
        write_json_file(path, &report)?;
        println!("JSON report written to {}", path.display());
    } else {
        print_text_summary(&report);
    }

    Ok(())
}

struct CliConfig {
    input_path: PathBuf,
    output_path: PathBuf,
    voronoi_out: Option<PathBuf>,
    json_out: Option<PathBuf>,
    spacing: Option<Vec<f64>>,
    squared: bool,
}

fn parse_args(program: &str) -> Result<CliConfig, String> {
    let mut args = env::args().skip(1);
    let mut positional: Vec<PathBuf> = Vec::new();
    let mut voronoi_out = None;
    let mut json_out = None;
    let mut spacing = None;
    let mut squared = false;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--help" | "-h" => {
                println!("{}", usage(program));
                std::process::exit(0);
            }
            "--voronoi" => {
                let value = args
                    .next()
                    .ok_or_else(|| format!("--voronoi expects a path\n{}", usage(program)))?;
                voronoi_out = Some(PathBuf::from(value));
            }
            "--json-out" => {
                let value = args
                    .next()
                    .ok_or_else(|| format!("--json-out expects a path\n{}", usage(program)))?;
                json_out = Some(PathBuf::from(value));
            }
            "--spacing" => {
                let value = args
                    .next()
                    .ok_or_else(|| format!("--spacing expects sx,sy\n{}", usage(program)))?;
                spacing = Some(parse_spacing(&value)?);
            }
            "--squared" => squared = true,
            _ if arg.starts_with('-') => {
                return Err(format!("Unknown option '{arg}'\n{}", usage(program)));
            }
            _ => positional.push(PathBuf::from(arg)),
        }
    }

    let [input_path, output_path]: [PathBuf; 2] = positional
        .try_into()
        .map_err(|_| usage(program))?;
    Ok(CliConfig {
        input_path,
        output_path,
        voronoi_out,
        json_out,
        spacing,
        squared,
    })
}

fn parse_spacing(value: &str) -> Result<Vec<f64>, String> {
    let parts: Vec<&str> = value.split(',').collect();
    if parts.len() != 2 {
        return Err(format!("Expected sx,sy but got '{value}'"));
    }
    parts
        .iter()
        .map(|p| {
            p.trim()
                .parse::<f64>()
                .map_err(|_| format!("Invalid spacing component '{p}'"))
        })
        .collect()
}

fn usage(program: &str) -> String {
    format!(
        "Usage: {program} <mask.png> <distance.png> [--voronoi voronoi.png] \\\n         [--spacing sx,sy] [--squared] [--json-out report.json]\n\n\
Computes the euclidean distance transform of a grayscale mask (non-zero\n\
pixels are sites) and writes it as a 16-bit PNG. With --voronoi, also\n\
writes the label of the nearest site per pixel.\n\
Examples:\n  {program} mask.png dist.png --voronoi nearest.png\n  {program} mask.png dist.png --spacing 1.0,2.5 --json-out report.json\n"
    )
}

fn print_text_summary(report: &TransformReport) {
    println!("Distance transform summary");
    println!("  shape: {:?}", report.shape);
    println!("  voxels: {}", report.voxels);
    println!("  use_spacing: {}", report.use_spacing);
    println!("  voronoi: {}", report.voronoi);
    for pass in &report.passes {
        println!(
            "  pass axis={} scanlines={} elapsed_ms={:.3}",
            pass.axis, pass.scanlines, pass.elapsed_ms
        );
    }
    println!("  total_ms: {:.3}", report.total_ms);
}

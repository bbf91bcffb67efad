//! Noh Boundary CLI - Apply the analytic boundary to a patch described in JSON.

use std::path::PathBuf;
use std::time::Instant;

use noh_boundary::{
    compute::{Field, MeshPatch, NohBoundary},
    schema::{BoundaryConfig, HydroMethod, PatchGeometry, RunConfig},
};

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <run.json>", args[0]);
        eprintln!();
        eprintln!("Apply the analytic Noh boundary to a single mesh patch.");
        eprintln!();
        eprintln!("Arguments:");
        eprintln!("  run.json  Path to run configuration (geometry + boundary)");
        eprintln!();
        eprintln!("An example configuration is printed with the --example flag.");
        std::process::exit(1);
    }

    if args[1] == "--example" {
        print_example_config();
        return;
    }

    let config_path = PathBuf::from(&args[1]);
    let run = RunConfig::load(&config_path).unwrap_or_else(|e| {
        eprintln!("Error loading config: {}", e);
        std::process::exit(1);
    });

    let geometry = &run.geometry;
    println!("Noh Boundary");
    println!("============");
    println!(
        "Patch: {}D, {:?} cells (active {:?}..={:?})",
        geometry.rank, geometry.dimension, geometry.start_index, geometry.end_index
    );
    println!("Time: {}", run.boundary.time);
    println!("Hydro method: {:?}", run.boundary.hydro_method);
    println!("Full box: {}", run.boundary.full_box);
    println!();

    let mut patch = MeshPatch::new(run.geometry.clone(), run.owner).unwrap_or_else(|e| {
        eprintln!("Error creating patch: {}", e);
        std::process::exit(1);
    });

    let boundary = NohBoundary::new(run.boundary.clone()).unwrap_or_else(|e| {
        eprintln!("Invalid boundary configuration: {}", e);
        std::process::exit(1);
    });

    let start = Instant::now();
    let outcome = boundary.apply(&mut patch).unwrap_or_else(|e| {
        eprintln!("Boundary update failed: {}", e);
        std::process::exit(1);
    });
    let elapsed = start.elapsed();

    match outcome.report() {
        Some(report) => {
            println!("Updated faces:");
            for (face, cells) in &report.faces {
                println!("  {:>6}: {} cells", face.to_string(), cells);
            }
            println!("Total: {} cells", report.cells);

            if let Some(density) = patch.field(Field::Density) {
                let max = density.iter().copied().fold(f64::MIN, f64::max);
                println!("Peak boundary density: {:.6}", max);
            }
        }
        None => println!("Nothing to do: {:?}", outcome),
    }
    println!("Time: {:.3}ms", elapsed.as_secs_f64() * 1e3);
}

fn print_example_config() {
    let run = RunConfig {
        geometry: PatchGeometry::uniform_3d(32, 32, 32, 3),
        boundary: BoundaryConfig {
            time: 0.6,
            hydro_method: HydroMethod::PpmDirectEuler,
            full_box: true,
            ..Default::default()
        },
        owner: 0,
    };
    match serde_json::to_string_pretty(&run) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Error serializing example: {}", e),
    }
}

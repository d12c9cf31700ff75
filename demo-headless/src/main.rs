use std::path::PathBuf;

use clap::Parser;
use forest_fire_core::{
    collect_statistics, replicate_seed, run_model, ForestGrid, SimulationParameters,
};
use tracing_subscriber::EnvFilter;

/// Forest-fire statistics demo with configurable parameters
#[derive(Parser, Debug)]
#[command(name = "forest-fire-demo")]
#[command(about = "Forest-fire lattice model statistics runner", long_about = None)]
struct Args {
    /// Lattice edge length in cells
    #[arg(short = 'l', long, default_value_t = 200)]
    grid_size: usize,

    /// Probability an interior cell starts as a tree
    #[arg(short = 'd', long, default_value_t = 0.4)]
    density: f64,

    /// Probability an empty cell regrows a tree per step
    #[arg(short = 'g', long, default_value_t = 0.0001)]
    regrowth: f64,

    /// Warm-up fire episodes discarded before measurement
    #[arg(short = 't', long, default_value_t = 0)]
    transient: usize,

    /// Measured fire episodes per replicate
    #[arg(short = 'f', long, default_value_t = 100)]
    fires: usize,

    /// Independent model replicates
    #[arg(short = 'm', long, default_value_t = 8)]
    models: usize,

    /// Worker threads for the replicate pool
    #[arg(short = 'w', long, default_value_t = 1)]
    workers: usize,

    /// Base seed; replicate seeds derive deterministically from it
    #[arg(short = 's', long, default_value_t = 42)]
    seed: u64,

    /// Load parameters from a JSON file instead of the flags above
    #[arg(long)]
    params: Option<PathBuf>,

    /// Write the aggregated (size, duration) table to this file
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Print the final grid of the first replicate as ASCII
    #[arg(long)]
    render: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    if let Err(error) = run(&args) {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let params = match &args.params {
        Some(path) => SimulationParameters::from_json_file(path)?,
        None => SimulationParameters {
            grid_size: args.grid_size,
            tree_density: args.density,
            regrowth_probability: args.regrowth,
            warmup_fires: args.transient,
            measured_fires: args.fires,
            replicates: args.models,
            workers: args.workers,
        },
    };

    println!("=== Forest-Fire Statistics Demo ===\n");
    println!(
        "Lattice {}x{}, density {}, regrowth {}",
        params.grid_size, params.grid_size, params.tree_density, params.regrowth_probability
    );
    println!(
        "{} replicates x {} fires ({} warm-up) on {} workers, seed {}",
        params.replicates, params.measured_fires, params.warmup_fires, params.workers, args.seed
    );

    let stats = collect_statistics(&params, args.seed)?;

    println!("\nEpisodes recorded:  {}", stats.len());
    println!("Mean fire size:     {:.2} cells", stats.mean_size());
    println!("Mean fire duration: {:.2} steps", stats.mean_duration());
    if let Some(largest) = stats.records().iter().map(|r| r.total_burned).max() {
        println!("Largest fire:       {largest} cells");
    }

    if let Some(path) = &args.output {
        stats.save_table(path)?;
        println!("\nWrote table to {}", path.display());
    }

    if args.render {
        let model = run_model(&params, replicate_seed(args.seed, 0))?;
        println!("\nFinal grid of replicate 0:");
        print!("{}", render_ascii(&model.grid));
    }

    Ok(())
}

/// One character per cell: `.` empty, `T` tree, `*` burning.
fn render_ascii(grid: &ForestGrid) -> String {
    let size = grid.size();
    let codes = grid.cell_codes();
    let mut out = String::with_capacity(size * (size + 1));
    for y in 0..size {
        for x in 0..size {
            out.push(match codes[y * size + x] {
                1 => 'T',
                2 => '*',
                _ => '.',
            });
        }
        out.push('\n');
    }
    out
}

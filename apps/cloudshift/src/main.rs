//! cloudshift
//!
//! Generates a seeded pair of sample clouds, compares them and writes the
//! three panel figure as SVG. The statistics report goes to stdout, logs go
//! to stderr.

use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use cloudshift_core::backend::SvgSurface;
use cloudshift_core::{CompareConfig, ComparisonReport, PointCloud};
use cloudshift_sample::SampleConfig;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "cloudshift")]
#[command(version, about = "Visualize how far each point of a cloud moved", long_about = None)]
struct Cli {
    /// Number of point pairs to generate
    #[arg(short = 'n', long, value_name = "N", default_value_t = 100)]
    points: usize,

    /// Random seed
    #[arg(long, value_name = "SEED", default_value_t = 42)]
    seed: u64,

    /// Standard deviation of the per-axis jitter
    #[arg(long, value_name = "SIGMA", default_value_t = 0.5)]
    noise: f64,

    /// Edge length of the cube holding the original points
    #[arg(long, value_name = "LENGTH", default_value_t = 10.0)]
    extent: f64,

    /// Rigid displacement added to every point
    #[arg(long, value_name = "X,Y,Z", value_parser = parse_drift, default_value = "0,0,0")]
    drift: [f64; 3],

    /// Comparison configuration file (TOML)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Output SVG file
    #[arg(short, long, value_name = "FILE", default_value = "point_cloud_delta.svg")]
    output: PathBuf,

    /// Print the statistics as JSON after the report
    #[arg(long)]
    json: bool,
}

fn parse_drift(value: &str) -> Result<[f64; 3], String> {
    let parts: Vec<&str> = value.split(',').map(str::trim).collect();
    let [x, y, z] = parts.as_slice() else {
        return Err(format!("expected three comma separated numbers, got '{value}'"));
    };
    let parse = |s: &str| {
        s.parse::<f64>()
            .map_err(|e| format!("invalid drift component '{s}': {e}"))
    };
    Ok([parse(*x)?, parse(*y)?, parse(*z)?])
}

fn load_config(path: Option<&PathBuf>) -> Result<CompareConfig, Box<dyn Error>> {
    match path {
        Some(path) => {
            info!(path = %path.display(), "Loading configuration");
            let text = std::fs::read_to_string(path)?;
            Ok(CompareConfig::from_toml(&text)?)
        }
        None => Ok(CompareConfig::default()),
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let config = load_config(cli.config.as_ref())?;
    let runner = ComparisonReport::new(config)?;

    let samples = cloudshift_sample::generate(&SampleConfig {
        points: cli.points,
        extent: cli.extent,
        noise: cli.noise,
        drift: cli.drift,
        seed: cli.seed,
    })?;
    let before: PointCloud = samples.before.into_iter().collect();
    let after: PointCloud = samples.after.into_iter().collect();

    let mut surface = SvgSurface::to_file(&cli.output);
    let figure = runner.run(&before, &after, &mut surface)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&figure.stats)?);
    }

    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

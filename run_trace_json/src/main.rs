use std::{error::Error, fs::File, io, path::PathBuf};

use clap::{Parser, ValueEnum};
use facette::{RayTracer, DEFAULT_MAX_BOUNCES};
use facette_json::{deserialize_scene, serde_json, serialize_trace};
use facette_shapes::Facet;
use facette_telescope::{observe, Observation, TelescopeConfig};
use log::LevelFilter;

#[derive(Debug, Clone, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Traces the rays of a JSON scene, or of a telescope, and writes every path as JSON
#[derive(Parser)]
#[command(name = "run_trace_json")]
struct Args {
    /// A scene, or a telescope configuration with `--telescope`
    input: PathBuf,

    /// Read the input as a telescope configuration
    #[arg(long)]
    telescope: bool,

    /// Overrides the bounce cap of telescope configurations
    #[arg(long)]
    max_bounces: Option<usize>,

    /// Length scale of the scene, rays that escape are extended proportionally
    #[arg(long, default_value = "1.0")]
    scale: f64,

    /// Sample every path at this distance from its origin. For telescopes, in
    /// multiples of the mirror's radius
    #[arg(long)]
    wavefront: Option<f64>,

    /// Defaults to stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    #[arg(long, default_value = "info")]
    log_level: LogLevel,
}

fn init_logger(level: LevelFilter) {
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();
}

fn run_scene(args: &Args, json: &serde_json::Value) -> Result<serde_json::Value, Box<dyn Error>> {
    let (geometry, rays) = deserialize_scene::<Facet>(json)?;
    log::info!(
        "loaded {} facets and {} rays",
        geometry.leaf_count(),
        rays.len()
    );

    let tracer = RayTracer::new(args.max_bounces.unwrap_or(DEFAULT_MAX_BOUNCES), args.scale);
    let observation = Observation::trace(&geometry, &rays, &tracer, args.wavefront.unwrap_or(0.));

    Ok(serialize_trace(
        &observation.paths,
        args.wavefront.map(|_| observation.wavefront.as_slice()),
    ))
}

fn run_telescope(args: &Args, json: serde_json::Value) -> Result<serde_json::Value, Box<dyn Error>> {
    let mut config: TelescopeConfig = serde_json::from_value(json)?;
    if let Some(max_bounces) = args.max_bounces {
        config.rays.max_bounces = max_bounces;
    }
    if let Some(distance) = args.wavefront {
        config.rays.wavefront_distance = distance;
    }

    let observation = observe(&config)?;
    log::info!(
        "{} rays traced, {} lost",
        observation.paths.len(),
        observation.lost_rays()
    );

    Ok(serialize_trace(
        &observation.paths,
        Some(observation.wavefront.as_slice()),
    ))
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    init_logger(args.log_level.clone().into());

    let json: serde_json::Value = serde_json::from_reader(File::open(&args.input)?)?;

    let output = if args.telescope {
        run_telescope(&args, json)?
    } else {
        run_scene(&args, &json)?
    };

    match &args.output {
        Some(path) => serde_json::to_writer_pretty(File::create(path)?, &output)?,
        None => serde_json::to_writer_pretty(io::stdout().lock(), &output)?,
    }

    Ok(())
}

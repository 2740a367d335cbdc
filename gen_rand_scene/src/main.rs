use std::{error::Error, fs::File, path::PathBuf};

use clap::Parser;
use facette_json::serde_json;
use facette_random::{
    rand::{rngs::StdRng, SeedableRng},
    random_scene,
};

/// Writes a random scene (a facet tree and rays) as JSON
#[derive(Parser)]
#[command(name = "gen_rand_scene")]
struct Args {
    /// Where to write the scene
    output: PathBuf,

    /// Number of top-level facets
    #[arg(long, default_value = "12")]
    facets: usize,

    #[arg(long, default_value = "4")]
    rays: usize,

    /// Seed of the random generator, for reproducible scenes
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args = Args::parse();

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let (geometry, rays) = random_scene(args.facets, args.rays, &mut rng);
    log::info!(
        "generated {} facets and {} rays",
        geometry.leaf_count(),
        rays.len()
    );

    let json = facette_json::serialize_scene(&geometry, rays);
    serde_json::to_writer_pretty(File::create(&args.output)?, &json)?;

    log::info!("scene written to {}", args.output.display());

    Ok(())
}

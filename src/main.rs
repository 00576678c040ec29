//! GaliMap simulated mission
//!
//! Runs the corridor explorer against the mock devices in a simulated
//! corridor world and logs the map it builds.
//!
//! ```bash
//! gali-map --config configs/gali-map.toml --seed 7 --max-ticks 2000
//! RUST_LOG=debug gali-map
//! ```

use clap::Parser;
use gali_map::config::AppConfig;
use gali_map::error::Result;
use gali_map::sim::Simulation;
use std::path::Path;

/// Simulated corridor exploration
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file path (defaults are used if missing)
    #[arg(short, long, default_value = "configs/gali-map.toml")]
    config: String,

    /// Noise seed (0 = random); overrides the config
    #[arg(long)]
    seed: Option<u64>,

    /// Ticks to simulate; overrides the config
    #[arg(long)]
    max_ticks: Option<u64>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config_path = Path::new(&args.config);
    let mut config = if config_path.exists() {
        AppConfig::from_file(config_path)?
    } else {
        AppConfig::default()
    };

    if let Some(seed) = args.seed {
        config.simulation.seed = seed;
    }

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.logging.level.as_str()),
    )
    .init();

    if config_path.exists() {
        log::info!("Using config: {}", config_path.display());
    } else {
        log::warn!("Config {} not found, using defaults", config_path.display());
    }

    let mut sim = Simulation::new(&config)?;
    if let Some(max_ticks) = args.max_ticks {
        sim = sim.with_max_ticks(max_ticks);
    }
    let summary = sim.run()?;

    log::info!(
        "Simulation finished: {} ticks, {:.1}s simulated, {} pivot(s)",
        summary.ticks,
        summary.sim_time_ms as f32 / 1000.0,
        summary.pivots
    );
    log::info!("{}", sim.map());

    Ok(())
}

//! Eagle City - headless session runner
//!
//! Generates a city, lets the autopilot hunt prey for a number of ticks,
//! and prints the resulting score.

use std::path::PathBuf;

use clap::Parser;
use eagle_city::core::error::Result;
use eagle_city::core::GameConfig;
use eagle_city::session::run_session;

/// Headless Eagle City session
#[derive(Parser, Debug)]
#[command(name = "eagle-city")]
#[command(about = "Generate a city and run an autopilot prey hunt")]
struct Args {
    /// TOML config file overriding the defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Random seed (overrides the config's seed)
    #[arg(long)]
    seed: Option<u64>,

    /// Number of ticks to simulate
    #[arg(long, default_value_t = 3600)]
    ticks: u64,

    /// Write the session summary as JSON to this path
    #[arg(long)]
    output: Option<PathBuf>,

    /// Print the occupancy grid as ASCII before running
    #[arg(long)]
    show_map: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("eagle_city=info")),
        )
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }

    tracing::info!(seed = config.seed, ticks = args.ticks, "Eagle City starting...");

    if args.show_map {
        let mut rng = eagle_city::core::SeededRandom::new(config.seed);
        let layout = eagle_city::city::generate_city(&config, &mut rng);
        print!("{}", layout.grid.to_ascii());
    }

    let summary = run_session(&config, args.ticks);

    println!("{}", summary.summary());
    println!("Actual time: {:.2}ms", summary.elapsed.as_secs_f64() * 1000.0);

    if let Some(path) = &args.output {
        std::fs::write(path, summary.to_json()?)?;
        println!("Summary written to {}", path.display());
    }

    Ok(())
}

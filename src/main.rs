//! GolfStats - Golf Round, Club Distance and Practice Tracker
//!
//! Main entry point for the command-line front end.

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use golfstats::storage::config::{get_config_path, get_data_dir, load_config_from};

mod cli;

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = cli::Cli::parse();

    tracing::debug!("Starting GolfStats v{}", env!("CARGO_PKG_VERSION"));

    let (config_path, data_dir) = match &cli.data_dir {
        Some(dir) => (dir.join("config.toml"), dir.clone()),
        None => (get_config_path(), get_data_dir()),
    };
    let config = load_config_from(&config_path, data_dir)
        .with_context(|| format!("Failed to load {}", config_path.display()))?;

    cli::run(cli, config)
}

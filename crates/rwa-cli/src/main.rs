//! RWA CLI - validate exposure files and calculate risk-weighted assets.
//!
//! # Usage
//!
//! ```bash
//! # Check an upload against the schema
//! rwa validate exposures.csv
//!
//! # Calculate with the standard parameters
//! rwa calculate exposures.csv
//!
//! # Portfolio totals only, as JSON, with overrides
//! rwa --format json --config bank.toml calculate exposures.csv --summary-only
//!
//! # Show the credit institution rules
//! rwa rules --segment etablissement_credit
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use rwa_config::RwaConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod commands;
mod error;
mod output;

use cli::{Cli, Commands};

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| default.into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = match &cli.config {
        Some(path) => RwaConfig::from_path(path)
            .with_context(|| format!("loading configuration from {}", path.display()))?,
        None => RwaConfig::standard(),
    };
    tracing::debug!(config = %config.name, "configuration loaded");

    let format = cli.format;

    match cli.command {
        Commands::Validate(args) => commands::validate::execute(&args, &config, format)?,
        Commands::Calculate(args) => commands::calculate::execute(&args, &config, format)?,
        Commands::Rules(args) => commands::rules::execute(&args, &config, format)?,
    }

    Ok(())
}

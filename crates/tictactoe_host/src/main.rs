//! Tictactoe - terminal host
//!
//! Plays the engine's opponent interactively or in automated matches.

#![warn(missing_docs)]

mod cli;
mod config;
mod play;
mod simulate;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use config::HostConfig;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.log_level.as_deref());

    let config = HostConfig::load_or_default(&cli.config)
        .with_context(|| format!("Failed to load config {}", cli.config.display()))?;

    match cli.command {
        Command::Play { mode, seed } => play::run(config.with_overrides(mode, seed)).await,
        Command::Simulate {
            games,
            human,
            mode,
            seed,
        } => {
            let config = config.with_overrides(mode, seed);
            info!(games, ?human, mode = %config.mode(), "Starting simulation");
            let tally = simulate::run(&config, human, games)?;
            println!("{}", serde_json::to_string(&tally)?);
            Ok(())
        }
    }
}

/// Logs go to stderr so the board on stdout stays readable.
fn init_tracing(level: Option<&str>) {
    let filter = match level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

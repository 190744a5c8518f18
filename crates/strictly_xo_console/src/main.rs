//! Strictly XO - terminal driver
//!
//! Interactive play, watched computer matches and outcome benchmarks on top
//! of the `strictly_xo` engine.

#![warn(missing_docs)]

mod cli;
mod config;
mod observer;
mod play;
mod watch;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use config::ConsoleConfig;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Logs go to stderr so the board on stdout stays readable.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = ConsoleConfig::load(cli.config.as_deref())?;
    info!(?config, "Configuration ready");

    match cli.command {
        Command::Play {
            mode,
            difficulty,
            skip_intro,
        } => {
            let config = config.with_overrides(mode, difficulty, skip_intro);
            play::run_play(&config).await
        }
        Command::Watch {
            difficulty,
            seed,
            realtime,
        } => {
            let difficulty = difficulty.unwrap_or(*config.difficulty());
            watch::run_watch(&config, difficulty, seed, realtime).await
        }
        Command::Bench {
            matches,
            difficulty,
            seed,
        } => {
            let difficulty = difficulty.unwrap_or(*config.difficulty());
            watch::run_bench(&config, difficulty, matches, seed)
        }
    }
}

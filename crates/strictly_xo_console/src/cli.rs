//! Command-line interface for strictly_xo.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use strictly_xo::{Difficulty, MatchMode};

/// Strictly XO - tic-tac-toe in the terminal
#[derive(Parser, Debug)]
#[command(name = "strictly_xo")]
#[command(about = "Tic-tac-toe against a friend or the computer", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play an interactive match
    Play {
        /// Seat assignment: local, vs-computer or cpu
        #[arg(short, long)]
        mode: Option<MatchMode>,

        /// Computer strength: easy, medium, hard or unbeatable
        #[arg(short, long)]
        difficulty: Option<Difficulty>,

        /// Start without the intro announcement
        #[arg(long)]
        skip_intro: bool,
    },

    /// Watch the computer play itself
    Watch {
        /// Computer strength
        #[arg(short, long)]
        difficulty: Option<Difficulty>,

        /// Seed for a reproducible match
        #[arg(long)]
        seed: Option<u64>,

        /// Wait for real time between frames instead of simulating them
        #[arg(long)]
        realtime: bool,
    },

    /// Play many computer matches and tally the outcomes
    Bench {
        /// Number of matches to play
        #[arg(short = 'n', long, default_value = "100")]
        matches: u32,

        /// Computer strength
        #[arg(short, long)]
        difficulty: Option<Difficulty>,

        /// Seed for reproducible results
        #[arg(long)]
        seed: Option<u64>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_play_flags() {
        let cli = Cli::parse_from(["strictly_xo", "play", "--mode", "vs-computer", "-d", "Hard"]);
        match cli.command {
            Command::Play {
                mode, difficulty, ..
            } => {
                assert_eq!(mode, Some(MatchMode::HumanVsComputer));
                assert_eq!(difficulty, Some(Difficulty::Hard));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parse_bench_defaults() {
        let cli = Cli::parse_from(["strictly_xo", "bench", "--config", "xo.toml"]);
        assert_eq!(cli.config, Some(PathBuf::from("xo.toml")));
        assert!(matches!(
            cli.command,
            Command::Bench {
                matches: 100,
                seed: None,
                ..
            }
        ));
    }
}

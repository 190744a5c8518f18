//! Computer-vs-computer runs: a single watched match or a bench of many.

use crate::config::ConsoleConfig;
use crate::observer::ConsoleObserver;
use anyhow::{Result, bail};
use derive_more::Display;
use rand::SeedableRng;
use rand::rngs::StdRng;
use strictly_xo::{
    Difficulty, Match, MatchMode, MatchObserver, MatchPhase, MatchSettings, NullObserver, Outcome,
};
use tracing::{info, instrument};

/// Upper bound on simulated frames for one match.
const MAX_FRAMES: u32 = 100_000;

fn rng_from(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Ticks `game` by `delta` until it ends. Returns false if it never did.
fn run_simulated<O: MatchObserver>(game: &mut Match<StdRng, O>, delta: f32) -> bool {
    for _ in 0..MAX_FRAMES {
        if game.phase() == MatchPhase::Ended {
            return true;
        }
        game.tick(delta);
    }
    game.phase() == MatchPhase::Ended
}

/// Watches a single computer-vs-computer match.
#[instrument(skip(config))]
pub async fn run_watch(
    config: &ConsoleConfig,
    difficulty: Difficulty,
    seed: Option<u64>,
    realtime: bool,
) -> Result<()> {
    let mut game = Match::new(*config.match_settings(), rng_from(seed), ConsoleObserver::new());
    game.configure(MatchMode::ComputerVsComputer, difficulty)?;
    game.start_match(*config.randomize_first_player(), *config.skip_intro());
    println!("Computer vs computer at {difficulty}");

    let delta = config.frame_delta();
    if realtime {
        let mut ticker = tokio::time::interval(config.frame_interval());
        let mut frames = 0;
        while game.phase() != MatchPhase::Ended && frames < MAX_FRAMES {
            ticker.tick().await;
            game.tick(delta);
            frames += 1;
        }
    } else {
        run_simulated(&mut game, delta);
    }

    if game.phase() != MatchPhase::Ended {
        bail!("Match did not finish after {} frames", MAX_FRAMES);
    }

    let snapshot = game.snapshot();
    println!("{}", snapshot.board());
    println!("{}", snapshot.status_string());
    Ok(())
}

/// Outcome counts over a series of matches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display)]
#[display(
    "{matches} matches: player 1 won {player_one}, player 2 won {player_two}, {draws} draws ({first_mover} won by the first mover)"
)]
pub struct Tally {
    /// Matches played.
    pub matches: u32,
    /// Wins for player one.
    pub player_one: u32,
    /// Wins for player two.
    pub player_two: u32,
    /// Drawn matches.
    pub draws: u32,
    /// Wins by whoever moved first.
    pub first_mover: u32,
}

impl Tally {
    fn record(&mut self, outcome: Outcome, first: strictly_xo::Player) {
        self.matches += 1;
        match outcome {
            Outcome::PlayerOneWin => self.player_one += 1,
            Outcome::PlayerTwoWin => self.player_two += 1,
            Outcome::Draw | Outcome::None => self.draws += 1,
        }
        if outcome.winner() == Some(first) {
            self.first_mover += 1;
        }
    }
}

/// Plays `matches` computer-vs-computer matches without an intro.
#[instrument(skip(settings))]
pub fn bench(
    settings: MatchSettings,
    difficulty: Difficulty,
    matches: u32,
    seed: Option<u64>,
    delta: f32,
) -> Result<Tally> {
    let mut game = Match::new(settings, rng_from(seed), NullObserver);
    game.configure(MatchMode::ComputerVsComputer, difficulty)?;

    let mut tally = Tally::default();
    for round in 0..matches {
        game.start_match(true, true);
        if !run_simulated(&mut game, delta) {
            bail!("Match {} did not finish", round + 1);
        }
        tally.record(game.outcome(), game.first_player());
    }

    info!(%tally, "Bench finished");
    Ok(tally)
}

/// Runs a bench and prints the tally.
pub fn run_bench(
    config: &ConsoleConfig,
    difficulty: Difficulty,
    matches: u32,
    seed: Option<u64>,
) -> Result<()> {
    let tally = bench(
        *config.match_settings(),
        difficulty,
        matches,
        seed,
        config.frame_delta(),
    )?;
    println!("{difficulty}: {tally}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unbeatable_bench_is_all_draws() {
        let tally = bench(MatchSettings::default(), Difficulty::Unbeatable, 10, Some(4), 0.1).unwrap();
        assert_eq!(tally.matches, 10);
        assert_eq!(tally.draws, 10);
        assert_eq!(tally.first_mover, 0);
    }

    #[test]
    fn test_bench_counts_every_match() {
        let tally = bench(MatchSettings::default(), Difficulty::Easy, 25, Some(9), 0.1).unwrap();
        assert_eq!(tally.player_one + tally.player_two + tally.draws, 25);
        assert!(tally.first_mover <= tally.player_one + tally.player_two);
    }

    #[test]
    fn test_seeded_bench_is_reproducible() {
        let a = bench(MatchSettings::default(), Difficulty::Medium, 15, Some(1), 0.1).unwrap();
        let b = bench(MatchSettings::default(), Difficulty::Medium, 15, Some(1), 0.1).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_tally_display() {
        let tally = Tally {
            matches: 3,
            player_one: 1,
            player_two: 1,
            draws: 1,
            first_mover: 2,
        };
        assert_eq!(
            tally.to_string(),
            "3 matches: player 1 won 1, player 2 won 1, 1 draws (2 won by the first mover)"
        );
    }
}

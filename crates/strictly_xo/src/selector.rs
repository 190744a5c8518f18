//! Move selection for automated players.

use crate::grid::Grid;
use crate::search::best_move;
use crate::types::{Difficulty, Player};
use rand::Rng;
use rand::seq::IteratorRandom;
use tracing::{debug, instrument};

/// Turn number of a match's opening move.
pub const OPENING_TURN: u32 = 1;

/// Picks a uniformly random empty cell, or `None` if the grid is full.
pub fn random_empty_cell(grid: &Grid, rng: &mut impl Rng) -> Option<usize> {
    grid.empty_cells().choose(rng)
}

/// Chooses the automated player's next move.
///
/// The opening move is always random. Later moves roll a percentage in
/// `[0, 100)`; a roll not above the difficulty's random-move probability
/// plays a random empty cell, anything else plays the search's best move.
/// A probability of zero never takes the random branch and draws nothing
/// from `rng`.
///
/// Returns `None` only when no empty cell remains.
#[instrument(skip(grid, rng))]
pub fn choose_automated_move(
    grid: &Grid,
    turn: u32,
    player: Player,
    difficulty: Difficulty,
    rng: &mut impl Rng,
) -> Option<usize> {
    if turn == OPENING_TURN {
        let index = random_empty_cell(grid, rng);
        debug!(?index, "Opening move randomized");
        return index;
    }

    // Zero probability never rolls.
    let probability = difficulty.random_move_probability();
    let play_random = probability > 0.0 && rng.gen_range(0.0f32..100.0) <= probability;

    let searched = if play_random {
        None
    } else {
        best_move(grid, turn, player).map(|found| found.index)
    };

    let index = searched.or_else(|| random_empty_cell(grid, rng));
    debug!(?index, play_random, "Automated move chosen");
    index
}

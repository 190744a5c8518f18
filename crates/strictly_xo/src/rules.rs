//! Outcome evaluation.
//!
//! Only the lines through the last move are inspected: a move can only
//! complete a line it belongs to.

use crate::grid::{CELL_COUNT, Grid, SIDE};
use crate::types::Outcome;

/// Turn counter value once all nine cells have been played.
pub const FULL_BOARD_TURN: u32 = CELL_COUNT as u32 + 1;

const MAIN_DIAGONAL: [usize; 3] = [0, 4, 8];
const ANTI_DIAGONAL: [usize; 3] = [2, 4, 6];

/// Evaluates whether the move at `last_move` ended the game.
///
/// `turn` is the turn counter after that move was recorded. The grid may be
/// the live one or any hypothetical grid produced during search.
///
/// Checks run row, column, main diagonal, anti-diagonal, then draw; the first
/// hit short-circuits the rest.
pub fn evaluate(grid: &Grid, last_move: usize, turn: u32) -> Outcome {
    if last_move >= CELL_COUNT {
        return Outcome::None;
    }

    let row_start = (last_move / SIDE) * SIDE;
    let row = [row_start, row_start + 1, row_start + 2];
    let col_start = last_move % SIDE;
    let column = [col_start, col_start + SIDE, col_start + 2 * SIDE];

    let mut lines = [Some(row), Some(column), None, None];
    if MAIN_DIAGONAL.contains(&last_move) {
        lines[2] = Some(MAIN_DIAGONAL);
    }
    if ANTI_DIAGONAL.contains(&last_move) {
        lines[3] = Some(ANTI_DIAGONAL);
    }

    if let Some(outcome) = lines
        .into_iter()
        .flatten()
        .find_map(|line| line_winner(grid, line))
    {
        return outcome;
    }

    if turn == FULL_BOARD_TURN || grid.is_full() {
        Outcome::Draw
    } else {
        Outcome::None
    }
}

/// Returns the win outcome if the three cells are equal and non-empty.
fn line_winner(grid: &Grid, [a, b, c]: [usize; 3]) -> Option<Outcome> {
    let first = grid.value_at(a);
    if !first.is_empty() && first == grid.value_at(b) && first == grid.value_at(c) {
        Some(Outcome::from_winning_cell(first))
    } else {
        None
    }
}

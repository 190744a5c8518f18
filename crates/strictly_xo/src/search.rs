//! Exhaustive minimax search.
//!
//! The grid has at most nine empty cells, so the full game tree is walked
//! without pruning. Every simulated ply gets its own copy of the grid.

use crate::grid::Grid;
use crate::rules::evaluate;
use crate::types::{Outcome, Player};
use tracing::{debug, instrument};

/// Score of a win found on the first simulated ply. Deeper results are
/// divided by their depth so faster wins and slower losses rank higher.
pub const WIN_SCORE: i32 = 10;

const WORST_SCORE: i32 = i32::MIN;
const BEST_SCORE: i32 = i32::MAX;

/// A move chosen by the search together with its minimax score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoredMove {
    /// Cell index to play.
    pub index: usize,
    /// Minimax score from the mover's point of view.
    pub score: i32,
}

/// Returns the empty cell that maximizes `player`'s outcome.
///
/// `turn` is the live turn counter, i.e. the turn number the returned move
/// would be played on. Ties go to the lowest index. Returns `None` when the
/// grid is full.
#[instrument(skip(grid), fields(empty = grid.empty_cells().count()))]
pub fn best_move(grid: &Grid, turn: u32, player: Player) -> Option<ScoredMove> {
    let mut best: Option<ScoredMove> = None;

    for index in grid.empty_cells() {
        let child = grid.with_mark(index, player);
        let score = minimax_value(&child, turn + 1, 1, false, index, player.opponent(), player);

        if best.is_none_or(|b| score > b.score) {
            best = Some(ScoredMove { index, score });
        }
    }

    debug!(?best, "Search finished");
    best
}

/// Scores `grid` from `original`'s point of view.
///
/// `turn` is the turn counter after `last_move` was recorded, `depth` the
/// number of simulated plies so far (starting at 1), and `to_move` the player
/// whose mark the next level places.
pub fn minimax_value(
    grid: &Grid,
    turn: u32,
    depth: i32,
    maximizing: bool,
    last_move: usize,
    to_move: Player,
    original: Player,
) -> i32 {
    match evaluate(grid, last_move, turn) {
        Outcome::None => {}
        Outcome::Draw => return 0,
        win => {
            let sign = if win.winner() == Some(original) { 1 } else { -1 };
            return sign * WIN_SCORE / depth;
        }
    }

    let mut best = if maximizing { WORST_SCORE } else { BEST_SCORE };
    for index in grid.empty_cells() {
        let child = grid.with_mark(index, to_move);
        let score = minimax_value(
            &child,
            turn + 1,
            depth + 1,
            !maximizing,
            index,
            to_move.opponent(),
            original,
        );
        best = if maximizing { best.max(score) } else { best.min(score) };
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::CELL_COUNT;
    use crate::types::Cell;

    fn grid_of(pattern: &str) -> Grid {
        let mut cells = [Cell::Empty; CELL_COUNT];
        for (cell, ch) in cells.iter_mut().zip(pattern.chars().filter(|c| !c.is_whitespace())) {
            *cell = match ch {
                'X' => Cell::PlayerOne,
                'O' => Cell::PlayerTwo,
                _ => Cell::Empty,
            };
        }
        Grid::from_cells(cells)
    }

    fn turn_of(grid: &Grid) -> u32 {
        grid.occupied_count() as u32 + 1
    }

    #[test]
    fn test_full_grid_has_no_move() {
        let grid = grid_of("XOX XOO OXX");
        assert_eq!(best_move(&grid, 10, Player::PlayerOne), None);
    }

    #[test]
    fn test_takes_immediate_win() {
        let grid = grid_of("XX. OO. ...");
        let found = best_move(&grid, turn_of(&grid), Player::PlayerOne).unwrap();
        assert_eq!(found.index, 2);
        assert_eq!(found.score, WIN_SCORE);
    }

    #[test]
    fn test_win_preferred_over_block() {
        // O can win at 5 or block X at 2; winning scores higher.
        let grid = grid_of("XX. OO. X..");
        let found = best_move(&grid, turn_of(&grid), Player::PlayerTwo).unwrap();
        assert_eq!(found.index, 5);
    }

    #[test]
    fn test_blocks_forced_loss() {
        // X threatens the top row; O has no win of its own.
        let grid = grid_of("XX. .O. ...");
        let found = best_move(&grid, turn_of(&grid), Player::PlayerTwo).unwrap();
        assert_eq!(found.index, 2);
    }

    #[test]
    fn test_last_cell_is_the_only_move() {
        let grid = grid_of("XOX XOO OX.");
        let found = best_move(&grid, turn_of(&grid), Player::PlayerOne).unwrap();
        assert_eq!(found.index, 8);
        assert_eq!(found.score, 0);
    }

    #[test]
    fn test_ties_go_to_lowest_index() {
        // Two winning cells for X: 2 (top row) and 6 (left column).
        let grid = grid_of("XX. X.. .OO");
        let found = best_move(&grid, turn_of(&grid), Player::PlayerOne).unwrap();
        assert_eq!(found.index, 2);
    }

    #[test]
    fn test_minimax_scores_terminal_loss_negative() {
        let grid = grid_of("OOO XX. X..");
        let score = minimax_value(&grid, 7, 2, true, 2, Player::PlayerOne, Player::PlayerOne);
        assert_eq!(score, -WIN_SCORE / 2);
    }

    #[test]
    fn test_search_does_not_mutate_input() {
        let grid = grid_of("X.. .O. ...");
        let before = grid;
        let _ = best_move(&grid, turn_of(&grid), Player::PlayerOne);
        assert_eq!(grid, before);
    }
}

//! Move log and turn bookkeeping.

use crate::grid::Grid;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Moves removed by one undo: the latest move and the one before it.
pub const UNDO_ROUND: usize = 2;

/// Ordered move log plus the turn counter.
///
/// The turn counter starts at 1 and always equals `moves().len() + 1`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveHistory {
    moves: Vec<usize>,
    turn: u32,
}

impl MoveHistory {
    /// Creates an empty history on turn 1.
    pub fn new() -> Self {
        Self {
            moves: Vec::new(),
            turn: 1,
        }
    }

    /// Appends a move and advances the turn counter.
    pub fn record_move(&mut self, index: usize) {
        self.moves.push(index);
        self.turn += 1;
    }

    /// Undoes the last full round.
    ///
    /// Pops the two most recent moves, clears their cells and rewinds the turn
    /// counter by two. Returns the undone indices most recent first. With fewer
    /// than two moves recorded nothing changes and the result is empty.
    #[instrument(skip(grid), fields(recorded = self.moves.len()))]
    pub fn undo_last_round(&mut self, grid: &mut Grid) -> Vec<usize> {
        if self.moves.len() < UNDO_ROUND {
            debug!("Not enough moves to undo a round");
            return Vec::new();
        }

        let split = self.moves.len() - UNDO_ROUND;
        let undone: Vec<usize> = self.moves.drain(split..).rev().collect();
        for &index in &undone {
            grid.clear(index);
        }
        self.turn -= UNDO_ROUND as u32;

        debug!(?undone, turn = self.turn, "Round undone");
        undone
    }

    /// The current turn number.
    pub fn turn(&self) -> u32 {
        self.turn
    }

    /// Recorded moves in chronological order.
    pub fn moves(&self) -> &[usize] {
        &self.moves
    }

    /// The most recent move, if any.
    pub fn last_move(&self) -> Option<usize> {
        self.moves.last().copied()
    }

    /// Number of recorded moves.
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    /// Returns true if no move has been recorded.
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }
}

impl Default for MoveHistory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Player;

    fn play(grid: &mut Grid, history: &mut MoveHistory, moves: &[usize]) {
        let mut player = Player::PlayerOne;
        for &index in moves {
            grid.place(index, player).unwrap();
            history.record_move(index);
            player = player.opponent();
        }
    }

    #[test]
    fn test_record_advances_turn() {
        let mut history = MoveHistory::new();
        assert_eq!(history.turn(), 1);
        history.record_move(4);
        history.record_move(0);
        assert_eq!(history.turn(), 3);
        assert_eq!(history.moves(), &[4, 0]);
        assert_eq!(history.last_move(), Some(0));
    }

    #[test]
    fn test_undo_returns_most_recent_first() {
        let mut grid = Grid::new();
        let mut history = MoveHistory::new();
        play(&mut grid, &mut history, &[0, 1, 2, 3]);

        assert_eq!(history.undo_last_round(&mut grid), vec![3, 2]);
        assert_eq!(grid.occupied_count(), 2);
        assert_eq!(history.turn(), 3);

        assert_eq!(history.undo_last_round(&mut grid), vec![1, 0]);
        assert_eq!(grid, Grid::new());
        assert_eq!(history.turn(), 1);
    }

    #[test]
    fn test_undo_with_single_move_is_noop() {
        let mut grid = Grid::new();
        let mut history = MoveHistory::new();
        play(&mut grid, &mut history, &[4]);
        let before = grid;

        assert!(history.undo_last_round(&mut grid).is_empty());
        assert_eq!(grid, before);
        assert_eq!(history.turn(), 2);
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn test_undo_on_empty_history_is_noop() {
        let mut grid = Grid::new();
        let mut history = MoveHistory::new();
        assert!(history.undo_last_round(&mut grid).is_empty());
        assert_eq!(history.turn(), 1);
        assert!(history.is_empty());
    }

    #[test]
    fn test_undo_everything_with_one_cell_left() {
        let mut grid = Grid::new();
        let mut history = MoveHistory::new();
        play(&mut grid, &mut history, &[0, 6, 3, 5, 7, 1, 4, 8]);

        let rounds: Vec<Vec<usize>> = (0..4).map(|_| history.undo_last_round(&mut grid)).collect();
        assert_eq!(rounds, vec![vec![8, 4], vec![1, 7], vec![5, 3], vec![6, 0]]);
        assert_eq!(grid, Grid::new());
        assert_eq!(history.turn(), 1);
    }
}

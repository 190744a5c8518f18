//! Contract-based validation for moves.
//!
//! Contracts define correctness through preconditions and postconditions:
//! {P} action {Q}. Preconditions always run; the controller checks
//! postconditions in debug builds only.

use crate::error::MatchError;
use crate::grid::CELL_COUNT;
use crate::invariants::{InvariantSet, MatchInvariants, MatchRecord};
use crate::types::Player;
use tracing::{instrument, warn};

/// A contract defines preconditions and postconditions for state transitions.
pub trait Contract<S, A> {
    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), MatchError>;

    /// Checks postconditions after applying the action.
    fn post(before: &S, after: &S) -> Result<(), MatchError>;
}

/// A player placing their mark on a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlayerMove {
    /// The player making the move.
    pub player: Player,
    /// Target cell index.
    pub index: usize,
}

impl PlayerMove {
    /// Creates a new move.
    pub fn new(player: Player, index: usize) -> Self {
        Self { player, index }
    }
}

/// Precondition: the target cell exists and is empty.
pub struct CellIsEmpty;

impl CellIsEmpty {
    /// Rejects out-of-range and occupied cells.
    pub fn check(mov: &PlayerMove, record: &MatchRecord<'_>) -> Result<(), MatchError> {
        if mov.index >= CELL_COUNT {
            return Err(MatchError::out_of_range(mov.index));
        }
        if !record.grid.value_at(mov.index).is_empty() {
            return Err(MatchError::occupied(mov.index));
        }
        Ok(())
    }
}

/// Precondition: it must be the player's turn.
pub struct PlayersTurn;

impl PlayersTurn {
    /// Rejects moves by the player who is not to move.
    pub fn check(mov: &PlayerMove, record: &MatchRecord<'_>) -> Result<(), MatchError> {
        if mov.player != record.to_move {
            return Err(MatchError::InvariantViolation(format!(
                "{} moved while {} was to move",
                mov.player, record.to_move
            )));
        }
        Ok(())
    }
}

/// Contract for placing a mark.
///
/// Preconditions:
/// - Cell exists and is empty
/// - Mover is the player to move
///
/// Postconditions:
/// - Exactly one move was added to the history
/// - All match invariants hold
pub struct MoveContract;

impl<'a> Contract<MatchRecord<'a>, PlayerMove> for MoveContract {
    #[instrument(skip(record))]
    fn pre(record: &MatchRecord<'a>, action: &PlayerMove) -> Result<(), MatchError> {
        CellIsEmpty::check(action, record)?;
        PlayersTurn::check(action, record)?;
        Ok(())
    }

    fn post(before: &MatchRecord<'a>, after: &MatchRecord<'a>) -> Result<(), MatchError> {
        if after.history.len() != before.history.len() + 1 {
            warn!(
                before = before.history.len(),
                after = after.history.len(),
                "Move did not add exactly one history entry"
            );
            return Err(MatchError::InvariantViolation(
                "Postcondition failed: history did not grow by one".to_string(),
            ));
        }
        check_invariants(after)
    }
}

/// Checks every match invariant, folding violations into one error.
pub fn check_invariants(record: &MatchRecord<'_>) -> Result<(), MatchError> {
    MatchInvariants::check_all(record).map_err(|violations| {
        let descriptions = violations
            .iter()
            .map(|v| v.description.as_str())
            .collect::<Vec<_>>()
            .join("; ");
        warn!(%descriptions, "Match invariants violated");
        MatchError::InvariantViolation(format!("Postcondition failed: {}", descriptions))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InvalidMoveReason;
    use crate::invariants::fixtures::played;

    #[test]
    fn test_precondition_empty_cell() {
        let (grid, history, to_move) = played(Player::PlayerOne, &[]);
        let record = MatchRecord {
            grid: &grid,
            history: &history,
            first_player: Player::PlayerOne,
            to_move,
        };
        assert!(MoveContract::pre(&record, &PlayerMove::new(Player::PlayerOne, 4)).is_ok());
    }

    #[test]
    fn test_precondition_occupied_cell() {
        let (grid, history, to_move) = played(Player::PlayerOne, &[4]);
        let record = MatchRecord {
            grid: &grid,
            history: &history,
            first_player: Player::PlayerOne,
            to_move,
        };
        assert!(matches!(
            MoveContract::pre(&record, &PlayerMove::new(Player::PlayerTwo, 4)),
            Err(MatchError::InvalidMove {
                reason: InvalidMoveReason::Occupied,
                ..
            })
        ));
    }

    #[test]
    fn test_precondition_wrong_turn() {
        let (grid, history, to_move) = played(Player::PlayerOne, &[]);
        let record = MatchRecord {
            grid: &grid,
            history: &history,
            first_player: Player::PlayerOne,
            to_move,
        };
        assert!(MoveContract::pre(&record, &PlayerMove::new(Player::PlayerTwo, 0)).is_err());
    }

    #[test]
    fn test_postcondition_holds_after_move() {
        let (grid_a, history_a, to_move_a) = played(Player::PlayerOne, &[0]);
        let (grid_b, history_b, to_move_b) = played(Player::PlayerOne, &[0, 4]);
        let before = MatchRecord {
            grid: &grid_a,
            history: &history_a,
            first_player: Player::PlayerOne,
            to_move: to_move_a,
        };
        let after = MatchRecord {
            grid: &grid_b,
            history: &history_b,
            first_player: Player::PlayerOne,
            to_move: to_move_b,
        };
        assert!(MoveContract::post(&before, &after).is_ok());
    }

    #[test]
    fn test_postcondition_detects_corruption() {
        let (grid_a, history_a, to_move_a) = played(Player::PlayerOne, &[0]);
        let (mut grid_b, history_b, to_move_b) = played(Player::PlayerOne, &[0, 4]);
        grid_b.place(8, Player::PlayerOne).unwrap();
        let before = MatchRecord {
            grid: &grid_a,
            history: &history_a,
            first_player: Player::PlayerOne,
            to_move: to_move_a,
        };
        let after = MatchRecord {
            grid: &grid_b,
            history: &history_b,
            first_player: Player::PlayerOne,
            to_move: to_move_b,
        };
        assert!(MoveContract::post(&before, &after).is_err());
    }
}

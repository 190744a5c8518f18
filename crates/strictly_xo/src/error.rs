//! Error taxonomy for the match engine.

use crate::types::MatchPhase;

/// Why a cell could not take a mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum InvalidMoveReason {
    /// The index is outside `0..9`.
    #[display("index is outside the grid")]
    OutOfRange,
    /// The cell already holds a mark.
    #[display("cell is already occupied")]
    Occupied,
}

/// Errors raised by match operations.
///
/// None of these are fatal. A rejected operation leaves every piece of match
/// state exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum MatchError {
    /// The cell cannot take a mark.
    #[display("Invalid move at {index}: {reason}")]
    InvalidMove {
        /// Requested cell index.
        index: usize,
        /// What was wrong with it.
        reason: InvalidMoveReason,
    },

    /// The operation is not allowed in the current phase.
    #[display("Cannot {operation} while the match is {phase}")]
    InvalidStateTransition {
        /// Name of the rejected operation.
        operation: &'static str,
        /// Phase at the time of the call.
        phase: MatchPhase,
    },

    /// A postcondition failed after a move was applied.
    #[display("Invariant violation: {_0}")]
    InvariantViolation(#[error(not(source))] String),
}

impl MatchError {
    /// Creates an out-of-range move error.
    pub fn out_of_range(index: usize) -> Self {
        Self::InvalidMove {
            index,
            reason: InvalidMoveReason::OutOfRange,
        }
    }

    /// Creates an occupied-cell move error.
    pub fn occupied(index: usize) -> Self {
        Self::InvalidMove {
            index,
            reason: InvalidMoveReason::Occupied,
        }
    }

    /// Returns true for out-of-phase calls, which callers treat as a no-op.
    pub fn is_out_of_phase(&self) -> bool {
        matches!(self, Self::InvalidStateTransition { .. })
    }
}

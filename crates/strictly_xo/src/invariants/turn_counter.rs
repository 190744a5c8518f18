//! Turn counter invariant: the counter tracks the log.

use super::{Invariant, MatchRecord};
use crate::rules::FULL_BOARD_TURN;

/// Invariant: the turn counter is one more than the number of recorded
/// moves and never passes the full-board turn.
pub struct TurnCounterInvariant;

impl<'a> Invariant<MatchRecord<'a>> for TurnCounterInvariant {
    fn holds(record: &MatchRecord<'a>) -> bool {
        let turn = record.history.turn();
        turn as usize == record.history.len() + 1 && turn <= FULL_BOARD_TURN
    }

    fn description() -> &'static str {
        "Turn counter equals recorded moves plus one"
    }
}

//! History consistency invariant: replaying the log reproduces the grid.

use super::{Invariant, MatchRecord};
use crate::grid::Grid;

/// Invariant: the grid is exactly what the move history produces.
///
/// Replaying the history from an empty grid, alternating players from the
/// first player, must never hit an occupied cell and must end on the live
/// grid. This implies every index appears at most once and the history
/// length equals the number of occupied cells.
pub struct HistoryConsistentInvariant;

impl<'a> Invariant<MatchRecord<'a>> for HistoryConsistentInvariant {
    fn holds(record: &MatchRecord<'a>) -> bool {
        let mut replayed = Grid::new();
        let mut player = record.first_player;

        for &index in record.history.moves() {
            if replayed.place(index, player).is_err() {
                return false;
            }
            player = player.opponent();
        }

        replayed == *record.grid
    }

    fn description() -> &'static str {
        "Replaying the move history reproduces the grid"
    }
}

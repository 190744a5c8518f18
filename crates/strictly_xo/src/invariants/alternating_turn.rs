//! Alternating turn invariant: the player to move follows from the log length.

use super::{Invariant, MatchRecord};

/// Invariant: players alternate, starting with the first player.
///
/// With an even number of recorded moves the first player is to move;
/// with an odd number, their opponent.
pub struct AlternatingTurnInvariant;

impl<'a> Invariant<MatchRecord<'a>> for AlternatingTurnInvariant {
    fn holds(record: &MatchRecord<'a>) -> bool {
        let expected = if record.history.len() % 2 == 0 {
            record.first_player
        } else {
            record.first_player.opponent()
        };
        record.to_move == expected
    }

    fn description() -> &'static str {
        "Players alternate turns starting with the first player"
    }
}

#[cfg(test)]
mod tests {
    use super::super::fixtures::played;
    use super::*;
    use crate::types::Player;

    #[test]
    fn test_alternation_holds() {
        let (grid, history, to_move) = played(Player::PlayerTwo, &[0, 1, 2]);
        assert_eq!(to_move, Player::PlayerOne);
        let record = MatchRecord {
            grid: &grid,
            history: &history,
            first_player: Player::PlayerTwo,
            to_move,
        };
        assert!(AlternatingTurnInvariant::holds(&record));
    }

    #[test]
    fn test_stale_active_player_violates() {
        let (grid, history, to_move) = played(Player::PlayerOne, &[0]);
        let record = MatchRecord {
            grid: &grid,
            history: &history,
            first_player: Player::PlayerOne,
            to_move: to_move.opponent(),
        };
        assert!(!AlternatingTurnInvariant::holds(&record));
    }
}

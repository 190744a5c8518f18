//! Serializable read-only view of a match.

use crate::grid::Grid;
use crate::types::{Difficulty, Mark, MatchMode, MatchPhase, Outcome, Player};
use serde::{Deserialize, Serialize};

/// Everything a display collaborator needs to render a match.
///
/// A snapshot is a copy: mutating it has no effect on the match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchSnapshot {
    /// Lifecycle phase.
    pub phase: MatchPhase,
    /// Seat assignment.
    pub mode: MatchMode,
    /// Strength of the automated seats.
    pub difficulty: Difficulty,
    /// Grid contents.
    pub grid: Grid,
    /// Player to move (or who was to move when the match ended).
    pub active_player: Player,
    /// Player who moved first and plays Cross.
    pub first_player: Player,
    /// Current turn number, starting at 1.
    pub turn: u32,
    /// Seconds left on the per-turn timer.
    pub remaining_time: f32,
    /// Result so far.
    pub outcome: Outcome,
    /// Moves played, oldest first.
    pub history: Vec<usize>,
}

impl MatchSnapshot {
    /// The mark drawn by `player`.
    pub fn mark_of(&self, player: Player) -> Mark {
        if player == self.first_player {
            Mark::Cross
        } else {
            Mark::Circle
        }
    }

    /// Returns true if the match has ended.
    pub fn is_over(&self) -> bool {
        self.phase == MatchPhase::Ended
    }

    /// Renders the grid with each player's mark.
    pub fn board(&self) -> String {
        self.grid.display_with(|player| match self.mark_of(player) {
            Mark::Cross => 'X',
            Mark::Circle => 'O',
        })
    }

    /// Returns a status string for display.
    pub fn status_string(&self) -> String {
        match self.phase {
            MatchPhase::NotStarted => "Ready to start".to_string(),
            MatchPhase::Introing => format!("{} starts!", self.active_player),
            MatchPhase::InProgress => format!(
                "Turn {}. {} ({}) to move, {:.1}s left.",
                self.turn,
                self.active_player,
                self.mark_of(self.active_player),
                self.remaining_time
            ),
            MatchPhase::Ended => match self.outcome {
                Outcome::Draw => "Game over. Draw!".to_string(),
                Outcome::None => "Match abandoned.".to_string(),
                win => match (self.mode, win.winner()) {
                    (MatchMode::HumanVsComputer, Some(Player::PlayerOne)) => {
                        "Game over. You win!".to_string()
                    }
                    (MatchMode::HumanVsComputer, Some(Player::PlayerTwo)) => {
                        "Game over. You lose...".to_string()
                    }
                    _ => format!("Game over. {win}!"),
                },
            },
        }
    }
}

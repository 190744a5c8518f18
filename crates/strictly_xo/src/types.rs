//! Core domain types for the match engine.

use serde::{Deserialize, Serialize};

/// Contents of a single grid cell.
///
/// The discriminants are part of the contract: a winning cell's value can be
/// reinterpreted directly as an [`Outcome`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum Cell {
    /// Nobody has played here.
    #[default]
    Empty = 0,
    /// Occupied by player one.
    PlayerOne = 1,
    /// Occupied by player two.
    PlayerTwo = 2,
}

impl Cell {
    /// Returns the player owning this cell, if any.
    pub fn owner(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::PlayerOne => Some(Player::PlayerOne),
            Cell::PlayerTwo => Some(Player::PlayerTwo),
        }
    }

    /// Returns true if nobody has played here.
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }
}

/// One of the two seats in a match.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
pub enum Player {
    /// Seat one. The human seat in [`MatchMode::HumanVsComputer`].
    #[display("Player 1")]
    PlayerOne,
    /// Seat two.
    #[display("Player 2")]
    PlayerTwo,
}

impl Player {
    /// Returns the opponent player.
    pub fn opponent(self) -> Self {
        match self {
            Player::PlayerOne => Player::PlayerTwo,
            Player::PlayerTwo => Player::PlayerOne,
        }
    }

    /// The cell value this player writes into the grid.
    pub fn cell(self) -> Cell {
        match self {
            Player::PlayerOne => Cell::PlayerOne,
            Player::PlayerTwo => Cell::PlayerTwo,
        }
    }

    /// The outcome reported when this player wins.
    pub fn winning_outcome(self) -> Outcome {
        match self {
            Player::PlayerOne => Outcome::PlayerOneWin,
            Player::PlayerTwo => Outcome::PlayerTwoWin,
        }
    }
}

/// The symbol a player draws. The player who moves first always plays Cross.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
pub enum Mark {
    /// X, always the opening mark.
    #[display("X")]
    Cross,
    /// O.
    #[display("O")]
    Circle,
}

/// Result of evaluating a position.
///
/// `None` and the win variants share their numeric values with [`Cell`];
/// `Draw` sits outside that range.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, derive_more::Display,
)]
#[repr(u8)]
pub enum Outcome {
    /// The game goes on.
    #[default]
    #[display("No result")]
    None = 0,
    /// Player one completed a line or won on time.
    #[display("Player 1 wins")]
    PlayerOneWin = 1,
    /// Player two completed a line or won on time.
    #[display("Player 2 wins")]
    PlayerTwoWin = 2,
    /// The grid filled up without a line.
    #[display("Draw")]
    Draw = 3,
}

impl Outcome {
    /// Reinterprets a winning cell as an outcome.
    pub fn from_winning_cell(cell: Cell) -> Self {
        match cell {
            Cell::Empty => Outcome::None,
            Cell::PlayerOne => Outcome::PlayerOneWin,
            Cell::PlayerTwo => Outcome::PlayerTwoWin,
        }
    }

    /// Returns true for any outcome that ends the match.
    pub fn is_terminal(self) -> bool {
        self != Outcome::None
    }

    /// Returns the winner if there is one.
    pub fn winner(self) -> Option<Player> {
        match self {
            Outcome::PlayerOneWin => Some(Player::PlayerOne),
            Outcome::PlayerTwoWin => Some(Player::PlayerTwo),
            Outcome::None | Outcome::Draw => None,
        }
    }
}

/// Lifecycle phase of a match.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, derive_more::Display,
)]
pub enum MatchPhase {
    /// No match has been started yet.
    #[default]
    NotStarted,
    /// The intro sequence is playing; no input is accepted.
    Introing,
    /// Moves, undos and hints are accepted.
    InProgress,
    /// The match is over until the next start.
    Ended,
}

/// Who controls each seat.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum MatchMode {
    /// Two humans sharing one board.
    #[default]
    #[strum(to_string = "local", serialize = "local-two-player")]
    LocalTwoPlayer,
    /// Player one is human, player two is the computer.
    #[strum(to_string = "vs-computer", serialize = "human-vs-computer")]
    HumanVsComputer,
    /// The computer plays both seats.
    #[strum(to_string = "cpu", serialize = "computer-vs-computer")]
    ComputerVsComputer,
}

impl MatchMode {
    /// Returns true if the given seat is played by the computer in this mode.
    pub fn is_automated(self, player: Player) -> bool {
        match self {
            MatchMode::LocalTwoPlayer => false,
            MatchMode::HumanVsComputer => player == Player::PlayerTwo,
            MatchMode::ComputerVsComputer => true,
        }
    }

    /// Returns true if the given seat may pick cells through direct input.
    pub fn accepts_input(self, player: Player) -> bool {
        !self.is_automated(player)
    }
}

/// Strength of the automated player.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum Difficulty {
    /// Always plays a random cell.
    #[default]
    Easy,
    /// Plays a random cell half the time.
    Medium,
    /// Plays a random cell one move in ten.
    Hard,
    /// Never ignores the search result.
    Unbeatable,
}

impl Difficulty {
    /// Percentage chance, in `[0, 100]`, of ignoring the search and playing a random cell.
    pub fn random_move_probability(self) -> f32 {
        match self {
            Difficulty::Easy => 100.0,
            Difficulty::Medium => 50.0,
            Difficulty::Hard => 10.0,
            Difficulty::Unbeatable => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_outcome_aligns_with_cell_values() {
        assert_eq!(Outcome::None as u8, Cell::Empty as u8);
        assert_eq!(Outcome::PlayerOneWin as u8, Cell::PlayerOne as u8);
        assert_eq!(Outcome::PlayerTwoWin as u8, Cell::PlayerTwo as u8);
        assert!(![0, 1, 2].contains(&(Outcome::Draw as u8)));
    }

    #[test]
    fn test_winning_cell_reinterpreted() {
        assert_eq!(Outcome::from_winning_cell(Cell::PlayerTwo), Outcome::PlayerTwoWin);
        assert_eq!(Outcome::from_winning_cell(Cell::Empty), Outcome::None);
    }

    #[test]
    fn test_automation_per_mode() {
        assert!(!MatchMode::LocalTwoPlayer.is_automated(Player::PlayerOne));
        assert!(!MatchMode::LocalTwoPlayer.is_automated(Player::PlayerTwo));
        assert!(!MatchMode::HumanVsComputer.is_automated(Player::PlayerOne));
        assert!(MatchMode::HumanVsComputer.is_automated(Player::PlayerTwo));
        assert!(MatchMode::ComputerVsComputer.is_automated(Player::PlayerOne));
    }

    #[test]
    fn test_mode_and_difficulty_parse() {
        assert_eq!(MatchMode::from_str("vs-computer"), Ok(MatchMode::HumanVsComputer));
        assert_eq!(MatchMode::from_str("cpu"), Ok(MatchMode::ComputerVsComputer));
        assert_eq!(Difficulty::from_str("Unbeatable"), Ok(Difficulty::Unbeatable));
        assert!(Difficulty::from_str("impossible").is_err());
    }
}

//! Strictly XO - a tic-tac-toe match engine
//!
//! The engine owns a 3x3 grid, validates and applies moves, detects wins and
//! draws, runs per-turn and automated-move timers, supports undo and hints,
//! and plays the computer's seat with a minimax search at four strengths.
//! Rendering and input capture stay with the caller.
//!
//! # Architecture
//!
//! - **Grid / Rules**: cell storage and terminal-state evaluation
//! - **Search / Selector**: exhaustive minimax plus difficulty-based randomness
//! - **History**: move log with round-based undo
//! - **Controller**: the [`Match`] lifecycle state machine
//! - **Invariants / Contracts**: first-class correctness checks
//!
//! # Example
//!
//! ```
//! use strictly_xo::{Match, MatchMode, MatchPhase, MatchSettings, Difficulty};
//!
//! let mut game = Match::seeded(MatchSettings::default(), 7);
//! game.configure(MatchMode::ComputerVsComputer, Difficulty::Unbeatable)?;
//! game.start_match(false, true);
//!
//! while game.phase() != MatchPhase::Ended {
//!     game.tick(0.25);
//! }
//! println!("{}", game.snapshot().status_string());
//! # Ok::<(), strictly_xo::MatchError>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod contracts;
mod controller;
mod error;
mod grid;
mod history;
mod invariants;
mod observer;
mod position;
mod rules;
mod search;
mod selector;
mod settings;
mod snapshot;
mod types;

// Crate-level exports - Core types
pub use types::{Cell, Difficulty, Mark, MatchMode, MatchPhase, Outcome, Player};

// Crate-level exports - Errors
pub use error::{InvalidMoveReason, MatchError};

// Crate-level exports - Board
pub use grid::{CELL_COUNT, Grid, SIDE};
pub use position::Position;
pub use rules::{FULL_BOARD_TURN, evaluate};

// Crate-level exports - Move selection
pub use search::{ScoredMove, WIN_SCORE, best_move, minimax_value};
pub use selector::{OPENING_TURN, choose_automated_move, random_empty_cell};

// Crate-level exports - Match state
pub use controller::{Match, StartOptions};
pub use history::{MoveHistory, UNDO_ROUND};
pub use observer::{MatchEvent, MatchObserver, NullObserver, RecordingObserver};
pub use settings::{
    DEFAULT_AUTOMATED_MOVE_DELAY, DEFAULT_INTRO_DURATION, DEFAULT_INTRO_LEAD_IN,
    DEFAULT_TIME_LIMIT, MatchSettings,
};
pub use snapshot::MatchSnapshot;

// Crate-level exports - Correctness checks
pub use contracts::{CellIsEmpty, Contract, MoveContract, PlayerMove, PlayersTurn, check_invariants};
pub use invariants::{
    AlternatingTurnInvariant, HistoryConsistentInvariant, Invariant, InvariantSet,
    InvariantViolation, MatchInvariants, MatchRecord, TurnCounterInvariant,
};

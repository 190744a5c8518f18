//! The match controller: lifecycle, timers and move dispatch.
//!
//! A [`Match`] owns all mutable match state. Collaborators drive it through
//! three entry points ([`Match::tick`], [`Match::cell_chosen`] and the
//! hint/undo requests) and read it back through accessors or a
//! [`MatchSnapshot`].

use crate::contracts::{Contract, MoveContract, PlayerMove, check_invariants};
use crate::error::MatchError;
use crate::grid::Grid;
use crate::history::MoveHistory;
use crate::invariants::MatchRecord;
use crate::observer::{MatchObserver, NullObserver};
use crate::rules::evaluate;
use crate::selector::choose_automated_move;
use crate::settings::MatchSettings;
use crate::snapshot::MatchSnapshot;
use crate::types::{Difficulty, Mark, MatchMode, MatchPhase, Outcome, Player};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Options passed to [`Match::start_match`], remembered for [`Match::restart`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StartOptions {
    /// Pick the first player with a coin flip instead of always player one.
    pub randomize_first_player: bool,
    /// Go straight to `InProgress` without the intro sequence.
    pub skip_intro: bool,
}

/// A single match between two seats.
///
/// `R` is the random source used for first-player selection and automated
/// moves; `O` receives presentation callbacks. Hints draw from a separate
/// generator seeded once from `R`, so asking for one never changes what the
/// computer plays.
pub struct Match<R, O = NullObserver> {
    settings: MatchSettings,
    mode: MatchMode,
    difficulty: Difficulty,
    phase: MatchPhase,
    grid: Grid,
    history: MoveHistory,
    active: Player,
    first_player: Player,
    outcome: Outcome,
    turn_timer: f32,
    automated_delay: f32,
    intro_elapsed: f32,
    intro_announced: bool,
    last_start: StartOptions,
    rng: R,
    hint_rng: StdRng,
    observer: O,
}

impl Match<StdRng, NullObserver> {
    /// Creates a match with a reproducible random source and no observer.
    pub fn seeded(settings: MatchSettings, seed: u64) -> Self {
        Self::new(settings, StdRng::seed_from_u64(seed), NullObserver)
    }
}

impl<R: Rng, O: MatchObserver> Match<R, O> {
    /// Creates a controller in the `NotStarted` phase.
    #[instrument(skip(rng, observer))]
    pub fn new(settings: MatchSettings, mut rng: R, observer: O) -> Self {
        let hint_rng = StdRng::seed_from_u64(rng.next_u64());
        Self {
            settings,
            mode: MatchMode::default(),
            difficulty: Difficulty::default(),
            phase: MatchPhase::NotStarted,
            grid: Grid::new(),
            history: MoveHistory::new(),
            active: Player::PlayerOne,
            first_player: Player::PlayerOne,
            outcome: Outcome::None,
            turn_timer: settings.time_limit,
            automated_delay: settings.automated_move_delay,
            intro_elapsed: 0.0,
            intro_announced: false,
            last_start: StartOptions::default(),
            rng,
            hint_rng,
            observer,
        }
    }

    /// Sets the mode and difficulty used by the next match.
    ///
    /// # Errors
    ///
    /// Returns [`MatchError::InvalidStateTransition`] while a match is
    /// introing or in progress; the mode is fixed for a match's duration.
    #[instrument(skip(self), fields(phase = %self.phase))]
    pub fn configure(&mut self, mode: MatchMode, difficulty: Difficulty) -> Result<(), MatchError> {
        if matches!(self.phase, MatchPhase::Introing | MatchPhase::InProgress) {
            return Err(MatchError::InvalidStateTransition {
                operation: "change the match mode",
                phase: self.phase,
            });
        }
        self.mode = mode;
        self.difficulty = difficulty;
        Ok(())
    }

    /// Starts a fresh match, discarding any previous state.
    ///
    /// The first player always plays Cross. Without `skip_intro` the match
    /// enters `Introing` and reaches `InProgress` through [`Match::tick`].
    #[instrument(skip(self), fields(mode = %self.mode, difficulty = %self.difficulty))]
    pub fn start_match(&mut self, randomize_first_player: bool, skip_intro: bool) {
        self.last_start = StartOptions {
            randomize_first_player,
            skip_intro,
        };

        self.grid = Grid::new();
        self.history = MoveHistory::new();
        self.outcome = Outcome::None;
        self.turn_timer = self.settings.time_limit;
        self.automated_delay = self.settings.automated_move_delay;
        self.intro_elapsed = 0.0;
        self.intro_announced = false;

        self.first_player = if randomize_first_player && self.rng.gen_bool(0.5) {
            Player::PlayerTwo
        } else {
            Player::PlayerOne
        };
        self.active = self.first_player;

        self.phase = if skip_intro {
            MatchPhase::InProgress
        } else {
            MatchPhase::Introing
        };
        info!(first_player = %self.first_player, phase = %self.phase, "Match started");
    }

    /// Starts a new match with the options of the previous start.
    pub fn restart(&mut self) {
        let StartOptions {
            randomize_first_player,
            skip_intro,
        } = self.last_start;
        self.start_match(randomize_first_player, skip_intro);
    }

    /// Ends the match without a result.
    #[instrument(skip(self), fields(phase = %self.phase))]
    pub fn abandon(&mut self) {
        if self.phase != MatchPhase::Ended {
            info!("Match abandoned");
        }
        self.phase = MatchPhase::Ended;
    }

    /// Advances timers by `elapsed` seconds.
    ///
    /// While introing this drives the intro sequence. While in progress it
    /// runs the per-turn timer (expiry forfeits the match to the waiting
    /// player) and, for automated seats, the automated-move delay. Other
    /// phases ignore the call.
    #[instrument(level = "trace", skip(self), fields(phase = %self.phase))]
    pub fn tick(&mut self, elapsed: f32) {
        let elapsed = elapsed.max(0.0);
        match self.phase {
            MatchPhase::Introing => self.advance_intro(elapsed),
            MatchPhase::InProgress => self.advance_play(elapsed),
            MatchPhase::NotStarted | MatchPhase::Ended => {}
        }
    }

    fn advance_intro(&mut self, elapsed: f32) {
        self.intro_elapsed += elapsed;

        if !self.intro_announced && self.intro_elapsed >= self.settings.intro_lead_in {
            self.intro_announced = true;
            self.observer.notify_intro(self.active);
        }

        if self.intro_elapsed >= self.settings.intro_total() {
            self.phase = MatchPhase::InProgress;
            debug!("Intro finished");
        }
    }

    fn advance_play(&mut self, elapsed: f32) {
        self.turn_timer -= elapsed;
        if self.turn_timer <= 0.0 {
            info!(active = %self.active, "Turn timer expired");
            self.end_match(self.active.opponent().winning_outcome());
            return;
        }

        if self.mode.is_automated(self.active) {
            self.automated_delay -= elapsed;
            if self.automated_delay <= 0.0 {
                self.play_automated_move();
            }
        }
    }

    fn play_automated_move(&mut self) {
        let choice = choose_automated_move(
            &self.grid,
            self.history.turn(),
            self.active,
            self.difficulty,
            &mut self.rng,
        );

        match choice {
            Some(index) => {
                if let Err(e) = self.submit_move(index) {
                    warn!(error = %e, index, "Automated move rejected");
                }
            }
            None => debug!("No legal move left for the automated player"),
        }
    }

    /// Places the active player's mark at `index`.
    ///
    /// Returns the outcome of the move: [`Outcome::None`] if play continues.
    ///
    /// # Errors
    ///
    /// - [`MatchError::InvalidStateTransition`] unless the match is in
    ///   progress. Callers treat this as a no-op.
    /// - [`MatchError::InvalidMove`] for an occupied or out-of-range cell.
    ///
    /// Nothing is mutated when an error is returned. In debug builds the
    /// move's postconditions are checked after it is applied; a failure is
    /// logged, not returned, since the move already happened.
    #[instrument(skip(self), fields(phase = %self.phase, player = %self.active))]
    pub fn submit_move(&mut self, index: usize) -> Result<Outcome, MatchError> {
        if self.phase != MatchPhase::InProgress {
            return Err(MatchError::InvalidStateTransition {
                operation: "submit a move",
                phase: self.phase,
            });
        }

        let action = PlayerMove::new(self.active, index);
        MoveContract::pre(&self.record(), &action)?;

        #[cfg(debug_assertions)]
        let (grid_before, history_before) = (self.grid, self.history.clone());

        self.grid.place(index, self.active)?;
        self.history.record_move(index);
        let outcome = evaluate(&self.grid, index, self.history.turn());
        debug!(index, turn = self.history.turn(), %outcome, "Move applied");
        self.observer.move_applied(self.active, index);

        if outcome.is_terminal() {
            self.end_match(outcome);
        } else {
            self.active = self.active.opponent();
            self.turn_timer = self.settings.time_limit;
            if self.mode != MatchMode::LocalTwoPlayer {
                self.automated_delay = self.settings.automated_move_delay;
            }
        }

        #[cfg(debug_assertions)]
        {
            let before = MatchRecord {
                grid: &grid_before,
                history: &history_before,
                first_player: self.first_player,
                to_move: action.player,
            };
            if let Err(e) = MoveContract::post(&before, &self.record_after_move(action.player)) {
                warn!(error = %e, index, "Move postconditions failed");
            }
        }

        Ok(outcome)
    }

    /// Handles a cell picked on the board display.
    ///
    /// Input is accepted only while in progress, only for a seat that takes
    /// direct input in this mode, and only for an empty cell. Anything else is
    /// ignored. Returns true if a mark was placed.
    #[instrument(skip(self), fields(phase = %self.phase, player = %self.active))]
    pub fn cell_chosen(&mut self, index: usize) -> bool {
        if !self.input_permitted() {
            debug!("Input not permitted right now");
            return false;
        }
        match self.submit_move(index) {
            Ok(_) => true,
            Err(e) => {
                debug!(error = %e, "Cell choice ignored");
                false
            }
        }
    }

    /// Undoes the last full round (two moves).
    ///
    /// Allowed only while in progress. Resets the per-turn timer when
    /// anything was undone. Returns the cleared indices, most recent first.
    #[instrument(skip(self), fields(phase = %self.phase))]
    pub fn undo(&mut self) -> Vec<usize> {
        if self.phase != MatchPhase::InProgress {
            debug!("Undo outside of play ignored");
            return Vec::new();
        }

        let undone = self.history.undo_last_round(&mut self.grid);
        if !undone.is_empty() {
            self.turn_timer = self.settings.time_limit;
            self.observer.moves_undone(&undone);
            if cfg!(debug_assertions)
                && let Err(e) = check_invariants(&self.record())
            {
                warn!(error = %e, "Invariants broken after undo");
            }
        }
        undone
    }

    /// Best move for the active player, without touching any match state.
    ///
    /// Uses the selector at [`Difficulty::Unbeatable`], so the opening
    /// suggestion is random like the computer's opening move. That draw comes
    /// from the hint generator, never from the computer's. Returns `None`
    /// outside of play or when no cell is free.
    #[instrument(skip(self), fields(phase = %self.phase))]
    pub fn hint(&mut self) -> Option<usize> {
        if self.phase != MatchPhase::InProgress {
            return None;
        }
        choose_automated_move(
            &self.grid,
            self.history.turn(),
            self.active,
            Difficulty::Unbeatable,
            &mut self.hint_rng,
        )
    }

    /// Hint requested from the HUD.
    ///
    /// Only honoured in [`MatchMode::HumanVsComputer`] on the human's turn
    /// while in progress; otherwise returns `None`.
    pub fn request_hint(&mut self) -> Option<usize> {
        if !self.assists_available() {
            debug!(mode = %self.mode, phase = %self.phase, "Hint request rejected");
            return None;
        }
        self.hint()
    }

    /// Undo requested from the HUD.
    ///
    /// Gated like [`Match::request_hint`]; a rejected request returns an
    /// empty list.
    pub fn request_undo(&mut self) -> Vec<usize> {
        if !self.assists_available() {
            debug!(mode = %self.mode, phase = %self.phase, "Undo request rejected");
            return Vec::new();
        }
        self.undo()
    }

    fn assists_available(&self) -> bool {
        self.phase == MatchPhase::InProgress
            && self.mode == MatchMode::HumanVsComputer
            && !self.mode.is_automated(self.active)
    }

    fn end_match(&mut self, outcome: Outcome) {
        self.phase = MatchPhase::Ended;
        self.outcome = outcome;
        info!(%outcome, turn = self.history.turn(), "Match ended");
        self.observer.notify_outcome(outcome);
    }

    /// Record as seen right after `mover` played, whether or not the match ended.
    #[cfg_attr(not(debug_assertions), allow(dead_code))]
    fn record_after_move(&self, mover: Player) -> MatchRecord<'_> {
        MatchRecord {
            to_move: mover.opponent(),
            ..self.record()
        }
    }

    fn record(&self) -> MatchRecord<'_> {
        MatchRecord {
            grid: &self.grid,
            history: &self.history,
            first_player: self.first_player,
            to_move: self.active,
        }
    }

    /// Returns true if the active seat may pick a cell right now.
    pub fn input_permitted(&self) -> bool {
        self.phase == MatchPhase::InProgress && self.mode.accepts_input(self.active)
    }

    /// Live grid.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Player to move.
    pub fn active_player(&self) -> Player {
        self.active
    }

    /// Player who moved first.
    pub fn first_player(&self) -> Player {
        self.first_player
    }

    /// The mark drawn by `player` in this match.
    pub fn mark_of(&self, player: Player) -> Mark {
        if player == self.first_player {
            Mark::Cross
        } else {
            Mark::Circle
        }
    }

    /// Current turn number, starting at 1.
    pub fn turn(&self) -> u32 {
        self.history.turn()
    }

    /// Moves played so far, oldest first.
    pub fn moves(&self) -> &[usize] {
        self.history.moves()
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> MatchPhase {
        self.phase
    }

    /// Result of the match so far.
    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// Seconds left on the per-turn timer, never negative.
    pub fn remaining_time(&self) -> f32 {
        self.turn_timer.max(0.0)
    }

    /// Seat assignment.
    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    /// Strength of the automated seats.
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Timer configuration.
    pub fn settings(&self) -> &MatchSettings {
        &self.settings
    }

    /// The presentation observer.
    pub fn observer(&self) -> &O {
        &self.observer
    }

    /// Mutable access to the presentation observer.
    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    /// Copies the state collaborators display.
    pub fn snapshot(&self) -> MatchSnapshot {
        MatchSnapshot {
            phase: self.phase,
            mode: self.mode,
            difficulty: self.difficulty,
            grid: self.grid,
            active_player: self.active,
            first_player: self.first_player,
            turn: self.history.turn(),
            remaining_time: self.remaining_time(),
            outcome: self.outcome,
            history: self.history.moves().to_vec(),
        }
    }
}

//! Presentation callbacks.

use crate::types::{Outcome, Player};

/// Receives notifications from the match controller.
///
/// Every method has an empty default, so collaborators only implement what
/// they render.
pub trait MatchObserver {
    /// The intro announcement is due; `starting` moves first.
    fn notify_intro(&mut self, starting: Player) {
        let _ = starting;
    }

    /// The match ended with `outcome`.
    fn notify_outcome(&mut self, outcome: Outcome) {
        let _ = outcome;
    }

    /// A mark was placed.
    fn move_applied(&mut self, player: Player, index: usize) {
        let _ = (player, index);
    }

    /// Cells were cleared by an undo, most recent first.
    fn moves_undone(&mut self, indices: &[usize]) {
        let _ = indices;
    }
}

/// Observer that ignores every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullObserver;

impl MatchObserver for NullObserver {}

/// Observer that records every notification, in order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RecordingObserver {
    /// Notifications received so far.
    pub events: Vec<MatchEvent>,
}

/// One recorded notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchEvent {
    /// See [`MatchObserver::notify_intro`].
    Intro(Player),
    /// See [`MatchObserver::notify_outcome`].
    Outcome(Outcome),
    /// See [`MatchObserver::move_applied`].
    Move {
        /// Mover.
        player: Player,
        /// Cell index.
        index: usize,
    },
    /// See [`MatchObserver::moves_undone`].
    Undo(Vec<usize>),
}

impl MatchObserver for RecordingObserver {
    fn notify_intro(&mut self, starting: Player) {
        self.events.push(MatchEvent::Intro(starting));
    }

    fn notify_outcome(&mut self, outcome: Outcome) {
        self.events.push(MatchEvent::Outcome(outcome));
    }

    fn move_applied(&mut self, player: Player, index: usize) {
        self.events.push(MatchEvent::Move { player, index });
    }

    fn moves_undone(&mut self, indices: &[usize]) {
        self.events.push(MatchEvent::Undo(indices.to_vec()));
    }
}

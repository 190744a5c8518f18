//! Prints match notifications to the terminal.

use strictly_xo::{MatchObserver, Outcome, Player, Position};
use tracing::debug;

/// Observer that writes one line per notification to stdout.
///
/// A capturing observer keeps the lines instead of printing them.
#[derive(Debug, Default)]
pub struct ConsoleObserver {
    captured: Option<Vec<String>>,
}

impl ConsoleObserver {
    /// Creates an observer that prints as it goes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an observer that keeps its lines instead of printing them.
    #[cfg(test)]
    pub fn capturing() -> Self {
        Self {
            captured: Some(Vec::new()),
        }
    }

    /// Lines kept so far; always empty for a printing observer.
    #[cfg(test)]
    pub fn lines(&self) -> &[String] {
        self.captured.as_deref().unwrap_or_default()
    }

    fn emit(&mut self, line: String) {
        debug!(%line, "Match notification");
        match &mut self.captured {
            Some(lines) => lines.push(line),
            None => println!("{line}"),
        }
    }
}

fn cell_name(index: usize) -> String {
    Position::from_index(index)
        .map(|pos| pos.label().to_string())
        .unwrap_or_else(|| format!("cell {index}"))
}

impl MatchObserver for ConsoleObserver {
    fn notify_intro(&mut self, starting: Player) {
        self.emit(format!("{starting} starts!"));
    }

    fn notify_outcome(&mut self, outcome: Outcome) {
        let line = match outcome.winner() {
            Some(player) => format!("{player} wins!"),
            None => "It's a draw!".to_string(),
        };
        self.emit(line);
    }

    fn move_applied(&mut self, player: Player, index: usize) {
        self.emit(format!("{player} plays {}", cell_name(index)));
    }

    fn moves_undone(&mut self, indices: &[usize]) {
        let cells: Vec<String> = indices.iter().map(|&i| cell_name(i)).collect();
        self.emit(format!("Undid {}", cells.join(", ")));
    }
}

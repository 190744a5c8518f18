//! Match timing settings.

use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Seconds a player has to move before forfeiting.
pub const DEFAULT_TIME_LIMIT: f32 = 5.0;
/// Seconds the computer waits before playing its move.
pub const DEFAULT_AUTOMATED_MOVE_DELAY: f32 = 0.75;
/// Seconds between match start and the intro announcement.
pub const DEFAULT_INTRO_LEAD_IN: f32 = 0.2;
/// Seconds the intro announcement stays up before play begins.
pub const DEFAULT_INTRO_DURATION: f32 = 2.0;

/// Timer configuration for a match.
///
/// Every field has a default, so a partial TOML table deserializes fine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchSettings {
    /// Per-turn time limit in seconds.
    pub time_limit: f32,
    /// Delay before an automated player moves, in seconds.
    pub automated_move_delay: f32,
    /// Delay before the intro is announced, in seconds.
    pub intro_lead_in: f32,
    /// How long the intro runs after being announced, in seconds.
    pub intro_duration: f32,
}

impl MatchSettings {
    /// Creates settings with the default timings.
    #[instrument]
    pub fn new() -> Self {
        Self::default()
    }

    /// Total time from match start to the first accepted move.
    pub fn intro_total(&self) -> f32 {
        self.intro_lead_in + self.intro_duration
    }
}

impl Default for MatchSettings {
    fn default() -> Self {
        Self {
            time_limit: DEFAULT_TIME_LIMIT,
            automated_move_delay: DEFAULT_AUTOMATED_MOVE_DELAY,
            intro_lead_in: DEFAULT_INTRO_LEAD_IN,
            intro_duration: DEFAULT_INTRO_DURATION,
        }
    }
}

//! Console configuration.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use strictly_xo::{Difficulty, MatchMode, MatchSettings};
use tracing::{debug, info, instrument};

/// Frames per second used when the file does not say otherwise.
pub const DEFAULT_FRAME_RATE: u32 = 30;

/// Settings for the terminal driver, loaded from an optional TOML file.
///
/// ```toml
/// mode = "human-vs-computer"
/// difficulty = "hard"
/// randomize_first_player = true
///
/// [match]
/// time_limit = 10.0
/// ```
#[derive(Debug, Clone, PartialEq, Getters, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    /// Timer configuration handed to the engine.
    #[serde(rename = "match")]
    match_settings: MatchSettings,

    /// Seat assignment for `play`.
    mode: MatchMode,

    /// Strength of the computer.
    difficulty: Difficulty,

    /// Flip a coin for the first player instead of always starting with player one.
    randomize_first_player: bool,

    /// Skip the intro announcement.
    skip_intro: bool,

    /// Ticks per second fed into the engine.
    frame_rate: u32,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            match_settings: MatchSettings::default(),
            mode: MatchMode::HumanVsComputer,
            difficulty: Difficulty::Hard,
            randomize_first_player: true,
            skip_intro: false,
            frame_rate: DEFAULT_FRAME_RATE,
        }
    }
}

impl ConsoleConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_toml(&content)?;
        info!(mode = %config.mode, difficulty = %config.difficulty, "Config loaded successfully");
        Ok(config)
    }

    /// Parses and validates TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads `path` if given, otherwise returns the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Applies command-line overrides on top of the file values.
    pub fn with_overrides(
        mut self,
        mode: Option<MatchMode>,
        difficulty: Option<Difficulty>,
        skip_intro: bool,
    ) -> Self {
        if let Some(mode) = mode {
            self.mode = mode;
        }
        if let Some(difficulty) = difficulty {
            self.difficulty = difficulty;
        }
        self.skip_intro |= skip_intro;
        self
    }

    /// Wall-clock time between two ticks.
    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs_f32(self.frame_delta())
    }

    /// Simulated seconds per tick.
    pub fn frame_delta(&self) -> f32 {
        1.0 / self.frame_rate.max(1) as f32
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.frame_rate == 0 {
            return Err(ConfigError::new("frame_rate must be at least 1".to_string()));
        }
        let settings = &self.match_settings;
        if settings.time_limit <= 0.0 {
            return Err(ConfigError::new(format!(
                "match.time_limit must be positive, got {}",
                settings.time_limit
            )));
        }
        if settings.automated_move_delay < 0.0
            || settings.intro_lead_in < 0.0
            || settings.intro_duration < 0.0
        {
            return Err(ConfigError::new("match delays cannot be negative".to_string()));
        }
        Ok(())
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

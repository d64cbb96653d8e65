//! Application configuration loaded from TOML.

use crate::manager::SessionLimits;
use derive_getters::Getters;
use derive_more::{Display, Error};
use derive_setters::Setters;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tabletop_core::{Dictionary, GameOptions};
use tracing::{debug, info, instrument};

/// Config file looked up in the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "tabletop.toml";

/// Settings for computer players, sessions and logging.
///
/// Fields without a lower bound get derived `with_*` setters; the bounded
/// ones clamp in hand-written setters.
#[derive(Debug, Clone, PartialEq, Getters, Setters, Serialize, Deserialize)]
#[setters(prefix = "with_")]
pub struct AppConfig {
    /// Search depth for smart players (clamped per game).
    #[serde(default = "default_smart_depth")]
    #[setters(skip)]
    smart_depth: u32,

    /// Pause before a computer player answers, in milliseconds.
    #[serde(default = "default_think_delay_ms")]
    think_delay_ms: u64,

    /// Moves after which an undecided session is called a draw.
    #[serde(default = "default_max_turns")]
    #[setters(skip)]
    max_turns: usize,

    /// Consecutive rejected moves tolerated from a computer player.
    #[serde(default = "default_max_rejections")]
    max_rejections: usize,

    /// Word list for word tic-tac-toe; the built-in list when unset.
    #[serde(default)]
    #[setters(strip_option)]
    dictionary: Option<PathBuf>,

    /// Log file used while the full-screen UI owns the terminal.
    #[serde(default = "default_log_file")]
    log_file: PathBuf,

    /// Seed for computer players and random game events.
    #[serde(default)]
    #[setters(strip_option)]
    seed: Option<u64>,
}

fn default_smart_depth() -> u32 {
    4
}

fn default_think_delay_ms() -> u64 {
    300
}

fn default_max_turns() -> usize {
    200
}

fn default_max_rejections() -> usize {
    3
}

fn default_log_file() -> PathBuf {
    PathBuf::from("tabletop.log")
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            smart_depth: default_smart_depth(),
            think_delay_ms: default_think_delay_ms(),
            max_turns: default_max_turns(),
            max_rejections: default_max_rejections(),
            dictionary: None,
            log_file: default_log_file(),
            seed: None,
        }
    }
}

impl AppConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;
        Self::from_toml(&content)
    }

    /// Parses configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        info!(depth = config.smart_depth, max_turns = config.max_turns, "Config loaded");
        Ok(config)
    }

    /// Loads `path` if given, else [`DEFAULT_CONFIG_FILE`] if it exists,
    /// else the defaults.
    #[instrument]
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => Self::from_file(DEFAULT_CONFIG_FILE),
            None => {
                debug!("No config file, using defaults");
                Ok(Self::default())
            }
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.smart_depth == 0 {
            return Err(ConfigError::new("smart_depth must be at least 1".to_string()));
        }
        if self.max_turns == 0 {
            return Err(ConfigError::new("max_turns must be at least 1".to_string()));
        }
        Ok(())
    }

    /// Overrides the search depth.
    pub fn with_smart_depth(mut self, depth: u32) -> Self {
        self.smart_depth = depth.max(1);
        self
    }

    /// Overrides the turn limit.
    pub fn with_max_turns(mut self, max_turns: usize) -> Self {
        self.max_turns = max_turns.max(1);
        self
    }

    /// Turn-loop limits derived from this config.
    pub fn limits(&self) -> SessionLimits {
        SessionLimits::new(self.max_turns, self.max_rejections)
    }

    /// Game construction options, reading the word list if one is set.
    #[instrument(skip(self))]
    pub fn game_options(&self) -> Result<GameOptions, ConfigError> {
        let dictionary = match &self.dictionary {
            Some(path) => {
                let text = std::fs::read_to_string(path).map_err(|e| {
                    ConfigError::new(format!(
                        "Failed to read word list {}: {}",
                        path.display(),
                        e
                    ))
                })?;
                let dictionary = Dictionary::from_text(&text).map_err(|e| {
                    ConfigError::new(format!("Unusable word list {}: {}", path.display(), e))
                })?;
                info!(words = dictionary.len(), "Word list loaded");
                Some(Arc::new(dictionary))
            }
            None => None,
        };
        Ok(GameOptions {
            dictionary,
            seed: self.seed,
        })
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
    /// Creates a new config error with caller location.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message,
            line: location.line(),
            file: location.file(),
        }
    }
}

//! Configuration loading for the engine.
//!
//! The canonical configuration lives in `moss-config.yaml` next to the
//! binary. Every section and field is optional; anything missing falls
//! back to the defaults below. Generation backends are configured from
//! the environment instead (see `moss_generator::config`).

use std::path::Path;
use std::time::Duration;

use moss_sim::VitalsConfig;
use moss_types::Track;
use serde::Deserialize;

use crate::retry::RetryPolicy;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level engine configuration, mirroring `moss-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MossConfig {
    /// Identity-independent creature settings.
    #[serde(default)]
    pub creature: CreatureConfig,

    /// Decay rates, stage thresholds, cooldowns, personality tuning.
    #[serde(default)]
    pub vitals: VitalsConfig,

    /// Timer periods for the actors.
    #[serde(default)]
    pub timing: TimingConfig,

    /// History bounds after which each actor continues as new.
    #[serde(default)]
    pub continuation: ContinuationConfig,

    /// Retry policies for cross-actor queries and generation calls.
    #[serde(default)]
    pub retry: RetryConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl MossConfig {
    /// Load configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if it is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yml::from_str(yaml)?;
        Ok(config)
    }
}

/// Creature-wide settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CreatureConfig {
    /// Owner's fixed offset from UTC in minutes (default: 0).
    pub utc_offset_minutes: i32,
    /// Catalog track used when a mystery does not name one (default: fun).
    pub default_track: Track,
}

/// Timer periods.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Pet housekeeping tick in seconds (default: 60).
    pub housekeeping_secs: u64,
    /// Need poll period in seconds (default: 30).
    pub need_poll_secs: u64,
    /// Seconds after an action during which need lines are suppressed
    /// (default: 30).
    pub grace_secs: f64,
    /// Periodic pool refresh in seconds (default: 21600, six hours).
    pub pool_refresh_secs: u64,
    /// Minimum seconds between pool regeneration requests (default: 600).
    pub pool_cooldown_secs: f64,
    /// Chat messages sent to the generator as context (default: 20).
    pub chat_context_messages: usize,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            housekeeping_secs: 60,
            need_poll_secs: 30,
            grace_secs: 30.0,
            pool_refresh_secs: 21_600,
            pool_cooldown_secs: 600.0,
            chat_context_messages: 20,
        }
    }
}

impl TimingConfig {
    /// Housekeeping period. Never zero.
    pub fn housekeeping(&self) -> Duration {
        Duration::from_secs(self.housekeeping_secs.max(1))
    }

    /// Need poll period. Never zero.
    pub fn need_poll(&self) -> Duration {
        Duration::from_secs(self.need_poll_secs.max(1))
    }

    /// Pool refresh period. Never zero.
    pub fn pool_refresh(&self) -> Duration {
        Duration::from_secs(self.pool_refresh_secs.max(1))
    }
}

/// Per-actor history bounds.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ContinuationConfig {
    /// Events the pet handles before continuing as new (default: 10000).
    pub pet_events: u64,
    /// Need poll iterations before continuing as new (default: 100).
    pub need_iterations: u64,
    /// Generation requests before the regenerator continues (default: 5000).
    pub pool_events: u64,
    /// Message count that triggers a chat continuation (default: 50).
    pub chat_messages: usize,
    /// Most recent messages kept across a chat continuation (default: 20).
    pub chat_keep: usize,
}

impl Default for ContinuationConfig {
    fn default() -> Self {
        Self {
            pet_events: 10_000,
            need_iterations: 100,
            pool_events: 5_000,
            chat_messages: 50,
            chat_keep: 20,
        }
    }
}

/// Retry policies.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Queries against a sibling actor.
    pub query: RetryPolicy,
    /// Calls to the generation service.
    pub generation: RetryPolicy,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            query: RetryPolicy::query(),
            generation: RetryPolicy::generation(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level used when `RUST_LOG` is unset (default: info).
    pub level: String,
    /// Emit JSON lines instead of human-readable output.
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            json: false,
        }
    }
}

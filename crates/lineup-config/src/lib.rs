//! Configuration system for lineup.
//!
//! Load solver configuration from TOML or YAML files to change the pool
//! length, relay ranking depth and league rules without code changes.
//!
//! # Examples
//!
//! Load configuration from TOML string:
//!
//! ```
//! use lineup_config::LineupConfig;
//! use lineup_core::PoolLength;
//!
//! let config = LineupConfig::from_toml_str(r#"
//!     pool_length = 25
//!
//!     [relay]
//!     top_n = 3
//!
//!     [league]
//!     roster_size = 12
//!     events = ["100m Freestyle", "100Z"]
//! "#).unwrap();
//!
//! assert_eq!(config.pool_length, PoolLength::Short);
//! assert_eq!(config.relay.top_n, 3);
//! assert_eq!(config.league.event_list().unwrap().len(), 2);
//! ```
//!
//! Use default config when file is missing:
//!
//! ```
//! use lineup_config::LineupConfig;
//!
//! let config = LineupConfig::load("lineup.toml").unwrap_or_default();
//! // Proceeds with defaults if file doesn't exist
//! ```

use std::path::Path;

use lineup_core::{parse_event_list, Event, PoolLength, REFERENCE_EVENTS};
use serde::{Deserialize, Serialize};
use thiserror::Error;


/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main lineup configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct LineupConfig {
    /// Pool length in metres (25 or 50) used for FINA points.
    #[serde(default)]
    pub pool_length: PoolLength,

    /// Relay ranking configuration.
    #[serde(default)]
    pub relay: RelayConfig,

    /// League rules and search limits.
    #[serde(default)]
    pub league: LeagueConfig,
}

impl LineupConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a file, choosing YAML for `.yaml` / `.yml`
    /// and TOML otherwise.
    ///
    /// # Errors
    ///
    /// Returns error if the file doesn't exist, does not parse, or fails
    /// [`validate`](Self::validate).
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml" | "yml") => Self::from_yaml_file(path),
            _ => Self::from_toml_file(path),
        }
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that every limit is usable and every league event parses.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.relay.validate()?;
        self.league.validate()
    }

    /// Sets the pool length.
    pub fn with_pool_length(mut self, pool_length: PoolLength) -> Self {
        self.pool_length = pool_length;
        self
    }

    /// Sets how many relay teams are reported.
    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.relay.top_n = top_n;
        self
    }

    /// Replaces the league configuration.
    pub fn with_league(mut self, league: LeagueConfig) -> Self {
        self.league = league;
        self
    }
}

/// Relay ranking configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct RelayConfig {
    /// Number of fastest teams to report.
    #[serde(default = "default_top_n")]
    pub top_n: usize,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            top_n: default_top_n(),
        }
    }
}

impl RelayConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.top_n == 0 {
            return Err(ConfigError::Invalid("relay.top_n must be at least 1".into()));
        }
        Ok(())
    }
}

/// League rules and search limits.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct LeagueConfig {
    /// Maximum swimmers on the roster.
    #[serde(default = "default_roster_size")]
    pub roster_size: usize,

    /// Maximum individual events per swimmer.
    #[serde(default = "default_max_events_per_swimmer")]
    pub max_events_per_swimmer: usize,

    /// Maximum nominated swimmers per event.
    #[serde(default = "default_max_swimmers_per_event")]
    pub max_swimmers_per_event: usize,

    /// Points subtracted for each event nobody swims.
    #[serde(default = "default_uncovered_penalty")]
    pub uncovered_penalty: i64,

    /// Maximum branch-and-bound nodes. `None` (YAML `null`) searches until
    /// optimality is proven.
    #[serde(default = "default_node_limit")]
    pub node_limit: Option<u64>,

    /// Contested events in storage or display form; empty means the
    /// reference programme.
    #[serde(default)]
    pub events: Vec<String>,
}

impl Default for LeagueConfig {
    fn default() -> Self {
        Self {
            roster_size: default_roster_size(),
            max_events_per_swimmer: default_max_events_per_swimmer(),
            max_swimmers_per_event: default_max_swimmers_per_event(),
            uncovered_penalty: default_uncovered_penalty(),
            node_limit: default_node_limit(),
            events: Vec::new(),
        }
    }
}

impl LeagueConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parsed event list, falling back to the reference programme.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first label that does not
    /// parse.
    pub fn event_list(&self) -> Result<Vec<Event>, ConfigError> {
        if self.events.is_empty() {
            return Ok(REFERENCE_EVENTS.to_vec());
        }
        parse_event_list(self.events.as_slice())
            .map_err(|e| ConfigError::Invalid(format!("league.events: {e}")))
    }

    pub fn with_roster_size(mut self, roster_size: usize) -> Self {
        self.roster_size = roster_size;
        self
    }

    pub fn with_max_events_per_swimmer(mut self, max: usize) -> Self {
        self.max_events_per_swimmer = max;
        self
    }

    pub fn with_max_swimmers_per_event(mut self, max: usize) -> Self {
        self.max_swimmers_per_event = max;
        self
    }

    pub fn with_uncovered_penalty(mut self, penalty: i64) -> Self {
        self.uncovered_penalty = penalty;
        self
    }

    pub fn with_node_limit(mut self, node_limit: Option<u64>) -> Self {
        self.node_limit = node_limit;
        self
    }

    pub fn with_events<S: Into<String>>(mut self, events: impl IntoIterator<Item = S>) -> Self {
        self.events = events.into_iter().map(Into::into).collect();
        self
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("league.roster_size", self.roster_size),
            ("league.max_events_per_swimmer", self.max_events_per_swimmer),
            ("league.max_swimmers_per_event", self.max_swimmers_per_event),
        ];
        for (name, value) in positive {
            if value == 0 {
                return Err(ConfigError::Invalid(format!("{name} must be at least 1")));
            }
        }
        if self.uncovered_penalty < 0 {
            return Err(ConfigError::Invalid(
                "league.uncovered_penalty must not be negative".into(),
            ));
        }
        if self.node_limit == Some(0) {
            return Err(ConfigError::Invalid("league.node_limit must be at least 1".into()));
        }
        self.event_list().map(|_| ())
    }
}

fn default_top_n() -> usize {
    6
}

fn default_roster_size() -> usize {
    16
}

fn default_max_events_per_swimmer() -> usize {
    4
}

fn default_max_swimmers_per_event() -> usize {
    2
}

fn default_uncovered_penalty() -> i64 {
    10_000
}

fn default_node_limit() -> Option<u64> {
    Some(200_000)
}

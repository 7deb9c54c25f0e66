//! CLI command implementations for lineup.

pub(crate) mod league;
pub(crate) mod points;
pub(crate) mod relay;

mod output;

use std::error::Error;
use std::fmt;
use std::path::Path;

use lineup::{build_pool, ConfigError, LineupConfig, LineupError, Swimmer, SwimmerRecord};

/// CLI error type.
#[derive(Debug)]
pub(crate) struct CliError {
    message: String,
}

impl CliError {
    /// Create a new CLI error.
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for CliError {}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        Self::new(e.to_string())
    }
}

impl From<LineupError> for CliError {
    fn from(e: LineupError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::new(format!("JSON error: {e}"))
    }
}

pub(crate) type CliResult<T> = Result<T, CliError>;

/// Settings shared by every command.
#[derive(Debug)]
pub(crate) struct Context {
    pub(crate) config: LineupConfig,
    pub(crate) json: bool,
}

impl Context {
    /// Loads the configuration file, if any, and installs console output
    /// unless `quiet` is set.
    pub(crate) fn load(config: Option<&Path>, json: bool, quiet: bool) -> CliResult<Self> {
        let config = match config {
            Some(path) => LineupConfig::load(path)
                .map_err(|e| CliError::new(format!("{}: {e}", path.display())))?,
            None => LineupConfig::new(),
        };
        if !quiet {
            lineup::console::init();
        }
        Ok(Self { config, json })
    }
}

/// Reads a JSON array of swimmer records and builds the pool.
///
/// Data-quality warnings are logged by [`build_pool`]; only unreadable
/// files and malformed JSON are errors.
pub(crate) fn load_swimmers(path: &Path) -> CliResult<Vec<Swimmer>> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| CliError::new(format!("{}: {e}", path.display())))?;
    let records: Vec<SwimmerRecord> = serde_json::from_str(&contents)?;
    let (pool, _warnings) = build_pool(records);
    Ok(pool)
}

/// Prints any serializable value as pretty JSON on stdout.
pub(crate) fn print_json<T: serde::Serialize>(value: &T) -> CliResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

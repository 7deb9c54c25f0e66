//! Error types for lineup

use std::fmt;

use thiserror::Error;

/// Main error type for lineup operations
#[derive(Debug, Error)]
pub enum LineupError {
    /// The swimmer pool handed to a solver was empty
    #[error("No swimmers selected: the swimmer pool is empty")]
    EmptyPool,

    /// The league was asked to fill an empty event list
    #[error("No events defined: the league event list is empty")]
    EmptyEventList,

    /// A relay rule identifier outside the known set
    #[error("Unknown relay rule '{0}' (expected one of 4x50VZ, 4x100VZ, 4x200VZ, 4x50PZ, 4x100PZ)")]
    UnknownRelayRule(String),

    /// A relay rule whose legs cannot form a relay
    #[error("Invalid relay rule: {0}")]
    InvalidRelayRule(String),

    /// An event label that matches no distance and stroke
    #[error("Unrecognised event '{0}' (expected e.g. '100K' or '100m Freestyle')")]
    UnknownEvent(String),

    /// A gender code other than M or F
    #[error("Unknown gender '{0}' (expected M or F)")]
    UnknownGender(String),

    /// A relay gender policy other than men, women or mixed
    #[error("Unknown gender policy '{0}' (expected men, women or mixed)")]
    UnknownGenderPolicy(String),

    /// A pool length other than 25 or 50 metres
    #[error("Unsupported pool length {0}m (expected 25 or 50)")]
    UnsupportedPoolLength(u16),

    /// League caps or penalty outside their allowed range
    #[error("Invalid league rules: {0}")]
    InvalidRules(String),

    /// A swim time that cannot be parsed
    #[error("Invalid time '{0}' (expected m:ss.cc or s.cc)")]
    InvalidTime(String),

    /// The league model admits no solution, or the extracted one breaks a rule
    #[error("League model is infeasible: {0}")]
    Infeasible(InfeasibilityReport),
}

/// Result type alias for lineup operations
pub type Result<T> = std::result::Result<T, LineupError>;

/// Diagnostic payload attached to [`LineupError::Infeasible`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InfeasibilityReport {
    /// Swimmers in the pool that hold at least one personal best.
    pub swimmers_with_times: usize,
    /// Per contested event, how many swimmers hold a scorable time for it.
    pub eligible_per_event: Vec<(String, usize)>,
    /// Names of the constraint rows broken by the extracted solution.
    pub violations: Vec<String>,
}

impl fmt::Display for InfeasibilityReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} swimmers with times", self.swimmers_with_times)?;
        if !self.eligible_per_event.is_empty() {
            let counts: Vec<String> = self
                .eligible_per_event
                .iter()
                .map(|(event, count)| format!("{event}: {count}"))
                .collect();
            write!(f, "; eligible per event [{}]", counts.join(", "))?;
        }
        if !self.violations.is_empty() {
            write!(f, "; violated rows [{}]", self.violations.join(", "))?;
        }
        Ok(())
    }
}

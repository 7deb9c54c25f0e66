//! Upstream swimmer records as they arrive over the data contract.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use super::gender::Gender;
use super::swimmer::SwimmerId;

/// One swimmer as supplied by the data provider (camelCase JSON).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwimmerRecord {
    #[serde(deserialize_with = "id_from_string_or_number")]
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    /// Married name; replaces `last_name` for display when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year_of_birth: Option<u16>,
    pub gender: Gender,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub times: Option<Vec<TimeRecord>>,
}

/// One personal-best line of a [`SwimmerRecord`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeRecord {
    /// Event label in storage (`"100K"`) or display (`"100m Freestyle"`) form.
    pub event: String,
    #[serde(default)]
    pub personal_best_ms: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_time_ms: Option<i64>,
}

impl TimeRecord {
    pub fn new(event: impl Into<String>, personal_best_ms: i64) -> Self {
        Self {
            event: event.into(),
            personal_best_ms: Some(personal_best_ms),
            expected_time_ms: None,
        }
    }
}

/// A data-quality problem found while reading a [`SwimmerRecord`].
///
/// The offending record (or line) is skipped; the solve continues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataWarning {
    /// The record carries no `times` sequence at all.
    MissingTimes { swimmer: SwimmerId },
    /// A time line names an event that does not parse.
    UnparseableEvent { swimmer: SwimmerId, label: String },
    /// A time line has a missing, zero or negative personal best.
    InvalidTime {
        swimmer: SwimmerId,
        event: String,
        value: Option<i64>,
    },
}

impl fmt::Display for DataWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataWarning::MissingTimes { swimmer } => {
                write!(f, "swimmer {swimmer} has no times")
            }
            DataWarning::UnparseableEvent { swimmer, label } => {
                write!(f, "swimmer {swimmer} has a time for unrecognised event '{label}'")
            }
            DataWarning::InvalidTime { swimmer, event, value } => match value {
                Some(v) => write!(f, "swimmer {swimmer} has invalid time {v} for {event}"),
                None => write!(f, "swimmer {swimmer} has no personal best for {event}"),
            },
        }
    }
}

// Upstream ids are database integers in some exports and strings in others.
fn id_from_string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(i64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Number(n) => n.to_string(),
    })
}

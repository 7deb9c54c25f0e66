//! Individual events and their two textual forms.
//!
//! An event is stored upstream as `<distance><strokeCode>` (`"100K"`) and
//! displayed as `"<distance>m <strokeName>"` (`"100m Freestyle"`). Both
//! forms, plus the local stroke names, parse to the same [`Event`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::normalize::normalize_label;
use super::stroke::Stroke;
use crate::error::{LineupError, Result};

/// A distance swum in one stroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Event {
    distance: u16,
    stroke: Stroke,
}

/// Individual events contested at a league meet, in programme order.
pub const REFERENCE_EVENTS: [Event; 16] = [
    Event::new(50, Stroke::Freestyle),
    Event::new(100, Stroke::Freestyle),
    Event::new(200, Stroke::Freestyle),
    Event::new(400, Stroke::Freestyle),
    Event::new(1500, Stroke::Freestyle),
    Event::new(50, Stroke::Butterfly),
    Event::new(100, Stroke::Butterfly),
    Event::new(200, Stroke::Butterfly),
    Event::new(50, Stroke::Backstroke),
    Event::new(100, Stroke::Backstroke),
    Event::new(200, Stroke::Backstroke),
    Event::new(50, Stroke::Breaststroke),
    Event::new(100, Stroke::Breaststroke),
    Event::new(200, Stroke::Breaststroke),
    Event::new(200, Stroke::IndividualMedley),
    Event::new(400, Stroke::IndividualMedley),
];

impl Event {
    pub const fn new(distance: u16, stroke: Stroke) -> Self {
        Self { distance, stroke }
    }

    pub const fn distance(&self) -> u16 {
        self.distance
    }

    pub const fn stroke(&self) -> Stroke {
        self.stroke
    }

    /// Compact storage form, e.g. `"100K"`.
    pub fn storage_code(&self) -> String {
        format!("{}{}", self.distance, self.stroke.code())
    }

    /// Canonical display form, e.g. `"100m Freestyle"`.
    pub fn display_name(&self) -> String {
        format!("{}m {}", self.distance, self.stroke.name())
    }

    /// Parses a label in storage or display form.
    ///
    /// Returns `None` for labels that match no distance and stroke.
    /// A single letter after the distance is always a storage code, so
    /// `"100m"` is 100 m butterfly, not a distance with no stroke.
    pub fn parse(label: &str) -> Option<Self> {
        let key = normalize_label(label);
        let digits = key.chars().take_while(char::is_ascii_digit).count();
        let distance: u16 = key[..digits].parse().ok()?;
        if distance == 0 {
            return None;
        }

        let rest = &key[digits..];
        let mut chars = rest.chars();
        let stroke = match (chars.next(), chars.next()) {
            (Some(code), None) => Stroke::from_code(code)?,
            (Some(_), Some(_)) => Stroke::from_name(rest)
                .or_else(|| rest.strip_prefix('m').and_then(Stroke::from_name))?,
            _ => return None,
        };
        Some(Self::new(distance, stroke))
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}m {}", self.distance, self.stroke)
    }
}

impl FromStr for Event {
    type Err = LineupError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s).ok_or_else(|| LineupError::UnknownEvent(s.to_string()))
    }
}

impl TryFrom<String> for Event {
    type Error = LineupError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Event> for String {
    fn from(event: Event) -> Self {
        event.display_name()
    }
}

/// Canonical display name for any accepted label.
///
/// Idempotent: the output parses back to the same event.
pub fn canonical_event_name(label: &str) -> Option<String> {
    Event::parse(label).map(|e| e.display_name())
}

/// Maps a storage code such as `"100K"` to its display name.
pub fn storage_to_display(code: &str) -> Option<String> {
    canonical_event_name(code)
}

/// Maps a display name such as `"100m Freestyle"` to its storage code.
pub fn display_to_storage(name: &str) -> Option<String> {
    Event::parse(name).map(|e| e.storage_code())
}

/// Parses an event list, dropping repeats while keeping first-seen order.
///
/// # Errors
///
/// Returns [`LineupError::UnknownEvent`] for the first label that does not
/// parse.
pub fn parse_event_list<S: AsRef<str>>(labels: &[S]) -> Result<Vec<Event>> {
    let mut events = Vec::with_capacity(labels.len());
    for label in labels {
        let event: Event = label.as_ref().parse()?;
        if !events.contains(&event) {
            events.push(event);
        }
    }
    Ok(events)
}

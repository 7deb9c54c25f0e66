//! Swimmers and their personal bests.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::event::Event;
use super::gender::Gender;
use super::record::{DataWarning, SwimmerRecord};

/// Stable opaque swimmer identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SwimmerId(String);

impl SwimmerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SwimmerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SwimmerId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for SwimmerId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Best time of one swimmer in one canonical event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalBest {
    pub event: Event,
    pub time_ms: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_time_ms: Option<u32>,
}

impl PersonalBest {
    pub fn new(event: Event, time_ms: u32) -> Self {
        Self {
            event,
            time_ms,
            expected_time_ms: None,
        }
    }

    pub fn with_expected_time(mut self, expected_ms: u32) -> Self {
        self.expected_time_ms = Some(expected_ms);
        self
    }
}

/// A club swimmer with at most one personal best per event.
///
/// # Examples
///
/// ```
/// use lineup_core::{Event, Gender, Stroke, Swimmer};
///
/// let free = Event::new(100, Stroke::Freestyle);
/// let swimmer = Swimmer::new("7", "Jana", "Novak", Gender::Female)
///     .with_time(free, 61_500)
///     .with_time(free, 60_900);
///
/// assert_eq!(swimmer.best_time(free), Some(60_900));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Swimmer {
    id: SwimmerId,
    first_name: String,
    last_name: String,
    gender: Gender,
    year_of_birth: Option<u16>,
    category: Option<String>,
    bests: BTreeMap<Event, PersonalBest>,
}

impl Swimmer {
    pub fn new(
        id: impl Into<SwimmerId>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        gender: Gender,
    ) -> Self {
        Self {
            id: id.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            gender,
            year_of_birth: None,
            category: None,
            bests: BTreeMap::new(),
        }
    }

    pub fn with_year_of_birth(mut self, year: u16) -> Self {
        self.year_of_birth = Some(year);
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Adds a time, keeping it only if it beats the current best.
    pub fn with_time(mut self, event: Event, time_ms: u32) -> Self {
        self.record_best(PersonalBest::new(event, time_ms));
        self
    }

    /// Records a personal best; the faster of the old and new record wins.
    ///
    /// Returns `true` when `best` became the swimmer's record for its event.
    pub fn record_best(&mut self, best: PersonalBest) -> bool {
        match self.bests.get(&best.event) {
            Some(current) if current.time_ms <= best.time_ms => false,
            _ => {
                self.bests.insert(best.event, best);
                true
            }
        }
    }

    /// Builds a swimmer from an upstream record.
    ///
    /// Event labels are canonicalised and duplicate events collapse to the
    /// fastest time. Lines that cannot be used are skipped and reported as
    /// warnings; this never fails.
    pub fn from_record(record: SwimmerRecord) -> (Swimmer, Vec<DataWarning>) {
        let id = SwimmerId::from(record.id);
        let last_name = record.new_last_name.unwrap_or(record.last_name);
        let mut swimmer = Swimmer::new(id.clone(), record.first_name, last_name, record.gender);
        swimmer.year_of_birth = record.year_of_birth;
        swimmer.category = record.category;

        let mut warnings = Vec::new();
        let Some(times) = record.times else {
            warnings.push(DataWarning::MissingTimes { swimmer: id });
            return (swimmer, warnings);
        };

        for line in times {
            let Some(event) = Event::parse(&line.event) else {
                warnings.push(DataWarning::UnparseableEvent {
                    swimmer: id.clone(),
                    label: line.event,
                });
                continue;
            };
            let time_ms = match line.personal_best_ms.map(u32::try_from) {
                Some(Ok(ms)) if ms > 0 => ms,
                _ => {
                    warnings.push(DataWarning::InvalidTime {
                        swimmer: id.clone(),
                        event: event.display_name(),
                        value: line.personal_best_ms,
                    });
                    continue;
                }
            };
            let expected = line
                .expected_time_ms
                .and_then(|ms| u32::try_from(ms).ok())
                .filter(|ms| *ms > 0);

            let mut best = PersonalBest::new(event, time_ms);
            best.expected_time_ms = expected;
            swimmer.record_best(best);
        }

        (swimmer, warnings)
    }

    pub fn id(&self) -> &SwimmerId {
        &self.id
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    /// `"First Last"` for display.
    pub fn full_name(&self) -> String {
        match (self.first_name.is_empty(), self.last_name.is_empty()) {
            (false, false) => format!("{} {}", self.first_name, self.last_name),
            (true, _) => self.last_name.clone(),
            (false, true) => self.first_name.clone(),
        }
    }

    pub fn gender(&self) -> Gender {
        self.gender
    }

    pub fn year_of_birth(&self) -> Option<u16> {
        self.year_of_birth
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn personal_best(&self, event: Event) -> Option<&PersonalBest> {
        self.bests.get(&event)
    }

    /// Best time in milliseconds for `event`, if the swimmer has one.
    pub fn best_time(&self, event: Event) -> Option<u32> {
        self.bests.get(&event).map(|pb| pb.time_ms)
    }

    /// Personal bests ordered by event.
    pub fn personal_bests(&self) -> impl Iterator<Item = &PersonalBest> {
        self.bests.values()
    }

    pub fn has_times(&self) -> bool {
        !self.bests.is_empty()
    }
}

//! Relay rules, rule identifiers and gender policies.

use std::fmt;
use std::str::FromStr;

use lineup_core::{normalize_label, Event, Gender, LineupError, Result, Stroke};
use serde::{Deserialize, Serialize};

/// Leg order of a medley relay.
pub const MEDLEY_ORDER: [Stroke; 4] = [
    Stroke::Backstroke,
    Stroke::Breaststroke,
    Stroke::Butterfly,
    Stroke::Freestyle,
];

const FREESTYLE_LEGS: [Stroke; 4] = [Stroke::Freestyle; 4];

/// A relay event: leg distance and the stroke of each leg in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RelayRule {
    distance: u16,
    legs: [Stroke; 4],
    description: String,
}

impl RelayRule {
    /// Creates a rule after checking it describes a swimmable relay.
    ///
    /// # Errors
    ///
    /// Returns [`LineupError::InvalidRelayRule`] when the leg distance is not
    /// 50, 100 or 200, a leg is Individual Medley, or a non-freestyle relay
    /// repeats a stroke.
    pub fn new(distance: u16, legs: [Stroke; 4], description: impl Into<String>) -> Result<Self> {
        if !matches!(distance, 50 | 100 | 200) {
            return Err(LineupError::InvalidRelayRule(format!(
                "leg distance {distance}m (expected 50, 100 or 200)"
            )));
        }
        if let Some(bad) = legs.iter().find(|s| !s.is_relay_stroke()) {
            return Err(LineupError::InvalidRelayRule(format!("{bad} cannot be a relay leg")));
        }
        if legs != FREESTYLE_LEGS {
            for (i, stroke) in legs.iter().enumerate() {
                if legs[i + 1..].contains(stroke) {
                    return Err(LineupError::InvalidRelayRule(format!(
                        "medley relay swims {stroke} twice"
                    )));
                }
            }
        }
        Ok(Self {
            distance,
            legs,
            description: description.into(),
        })
    }

    pub fn distance(&self) -> u16 {
        self.distance
    }

    pub fn legs(&self) -> [Stroke; 4] {
        self.legs
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// All four legs freestyle.
    pub fn is_freestyle(&self) -> bool {
        self.legs == FREESTYLE_LEGS
    }

    /// The individual event whose best time is used for leg `index`.
    pub fn leg_event(&self, index: usize) -> Event {
        Event::new(self.distance, self.legs[index])
    }
}

impl fmt::Display for RelayRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.description)
    }
}

/// The relay events a club enters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RelayRuleId {
    #[serde(rename = "4x50VZ")]
    Freestyle4x50,
    #[serde(rename = "4x100VZ")]
    Freestyle4x100,
    #[serde(rename = "4x200VZ")]
    Freestyle4x200,
    #[serde(rename = "4x50PZ")]
    Medley4x50,
    #[serde(rename = "4x100PZ")]
    Medley4x100,
}

impl RelayRuleId {
    pub const ALL: [RelayRuleId; 5] = [
        RelayRuleId::Freestyle4x50,
        RelayRuleId::Freestyle4x100,
        RelayRuleId::Freestyle4x200,
        RelayRuleId::Medley4x50,
        RelayRuleId::Medley4x100,
    ];

    /// Identifier as used by the club, e.g. `"4x100PZ"`.
    pub const fn code(self) -> &'static str {
        match self {
            RelayRuleId::Freestyle4x50 => "4x50VZ",
            RelayRuleId::Freestyle4x100 => "4x100VZ",
            RelayRuleId::Freestyle4x200 => "4x200VZ",
            RelayRuleId::Medley4x50 => "4x50PZ",
            RelayRuleId::Medley4x100 => "4x100PZ",
        }
    }

    const fn distance(self) -> u16 {
        match self {
            RelayRuleId::Freestyle4x50 | RelayRuleId::Medley4x50 => 50,
            RelayRuleId::Freestyle4x100 | RelayRuleId::Medley4x100 => 100,
            RelayRuleId::Freestyle4x200 => 200,
        }
    }

    const fn is_medley(self) -> bool {
        matches!(self, RelayRuleId::Medley4x50 | RelayRuleId::Medley4x100)
    }

    /// The rule this identifier stands for.
    pub fn rule(self) -> RelayRule {
        let distance = self.distance();
        let (legs, kind) = if self.is_medley() {
            (MEDLEY_ORDER, "Medley")
        } else {
            (FREESTYLE_LEGS, "Freestyle")
        };
        RelayRule {
            distance,
            legs,
            description: format!("4x{distance}m {kind} Relay"),
        }
    }
}

impl fmt::Display for RelayRuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for RelayRuleId {
    type Err = LineupError;

    fn from_str(s: &str) -> Result<Self> {
        let key = normalize_label(s);
        Self::ALL
            .into_iter()
            .find(|id| normalize_label(id.code()) == key)
            .ok_or_else(|| LineupError::UnknownRelayRule(s.to_string()))
    }
}

/// Which swimmers may make up a relay team.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenderPolicy {
    /// Four men.
    Men,
    /// Four women.
    Women,
    /// Exactly two men and two women.
    Mixed,
}

impl GenderPolicy {
    /// Whether a swimmer of `gender` may be considered at all.
    pub fn admits(self, gender: Gender) -> bool {
        match self {
            GenderPolicy::Men => gender == Gender::Male,
            GenderPolicy::Women => gender == Gender::Female,
            GenderPolicy::Mixed => true,
        }
    }
}

impl fmt::Display for GenderPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            GenderPolicy::Men => "men",
            GenderPolicy::Women => "women",
            GenderPolicy::Mixed => "mixed",
        })
    }
}

impl FromStr for GenderPolicy {
    type Err = LineupError;

    fn from_str(s: &str) -> Result<Self> {
        match normalize_label(s).as_str() {
            "men" | "m" | "male" | "muzi" => Ok(GenderPolicy::Men),
            "women" | "w" | "f" | "female" | "zeny" => Ok(GenderPolicy::Women),
            "mixed" | "mix" | "x" | "smiseny" => Ok(GenderPolicy::Mixed),
            _ => Err(LineupError::UnknownGenderPolicy(s.to_string())),
        }
    }
}

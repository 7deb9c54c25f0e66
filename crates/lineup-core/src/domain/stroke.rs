//! Swimming strokes.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::normalize::normalize_label;

/// One of the five competition strokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stroke {
    Freestyle,
    Backstroke,
    Breaststroke,
    Butterfly,
    IndividualMedley,
}

impl Stroke {
    pub const ALL: [Stroke; 5] = [
        Stroke::Freestyle,
        Stroke::Backstroke,
        Stroke::Breaststroke,
        Stroke::Butterfly,
        Stroke::IndividualMedley,
    ];

    /// Storage code used in compact event labels such as `"100K"`.
    pub const fn code(self) -> char {
        match self {
            Stroke::Freestyle => 'K',
            Stroke::Backstroke => 'Z',
            Stroke::Breaststroke => 'P',
            Stroke::Butterfly => 'M',
            Stroke::IndividualMedley => 'O',
        }
    }

    /// Looks a stroke up by storage code, ignoring case.
    pub fn from_code(code: char) -> Option<Self> {
        let upper = code.to_ascii_uppercase();
        Self::ALL.into_iter().find(|s| s.code() == upper)
    }

    /// English display name, the canonical form.
    pub const fn name(self) -> &'static str {
        match self {
            Stroke::Freestyle => "Freestyle",
            Stroke::Backstroke => "Backstroke",
            Stroke::Breaststroke => "Breaststroke",
            Stroke::Butterfly => "Butterfly",
            Stroke::IndividualMedley => "Individual Medley",
        }
    }

    /// Club-local (Czech) names accepted on input.
    pub const fn local_names(self) -> &'static [&'static str] {
        match self {
            Stroke::Freestyle => &["Volný způsob"],
            Stroke::Backstroke => &["Znak"],
            Stroke::Breaststroke => &["Prsa"],
            Stroke::Butterfly => &["Motýlek", "Motýl"],
            Stroke::IndividualMedley => &["Polohový závod"],
        }
    }

    /// Resolves a stroke from any accepted name.
    ///
    /// Matching goes through [`normalize_label`], so case, diacritics and
    /// spacing do not matter.
    pub fn from_name(name: &str) -> Option<Self> {
        let key = normalize_label(name);
        if key.is_empty() {
            return None;
        }
        Self::ALL.into_iter().find(|stroke| {
            normalize_label(stroke.name()) == key
                || stroke
                    .local_names()
                    .iter()
                    .any(|local| normalize_label(local) == key)
        })
    }

    /// Whether the stroke can be swum as a relay leg.
    pub const fn is_relay_stroke(self) -> bool {
        !matches!(self, Stroke::IndividualMedley)
    }
}

impl fmt::Display for Stroke {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

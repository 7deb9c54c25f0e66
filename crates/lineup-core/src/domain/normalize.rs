//! Matching key for free-text labels.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Reduces a label to the key used when comparing strings from
/// heterogeneous sources.
///
/// The label is decomposed (NFD) and stripped of combining marks, runs of
/// whitespace collapse, everything is lowercased, and only alphanumeric
/// characters survive. `"100m Volný  způsob"` and `"100M volny zpusob"`
/// share the key `"100mvolnyzpusob"`.
pub fn normalize_label(label: &str) -> String {
    let stripped: String = label.nfd().filter(|c| !is_combining_mark(*c)).collect();
    stripped
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric())
        .collect()
}

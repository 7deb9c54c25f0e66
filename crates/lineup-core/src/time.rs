//! Swim-time formatting.

use crate::error::{LineupError, Result};

/// Renders milliseconds as `m:ss.cc`, or `s.cc` under one minute.
///
/// Times are shown to the hundredth, rounding half up.
///
/// ```
/// use lineup_core::format_ms;
///
/// assert_eq!(format_ms(62_350), "1:02.35");
/// assert_eq!(format_ms(22_300), "22.30");
/// ```
pub fn format_ms(ms: u32) -> String {
    let hundredths = (ms as u64 + 5) / 10;
    let minutes = hundredths / 6_000;
    let seconds = (hundredths / 100) % 60;
    let fraction = hundredths % 100;
    if minutes > 0 {
        format!("{minutes}:{seconds:02}.{fraction:02}")
    } else {
        format!("{seconds}.{fraction:02}")
    }
}

/// Parses `m:ss.cc`, `s.cc`, `m:ss` or whole seconds into milliseconds.
///
/// Up to three fractional digits are honoured.
///
/// # Errors
///
/// Returns [`LineupError::InvalidTime`] for anything else, including a
/// seconds field of 60 or more after a minutes field.
pub fn parse_time(text: &str) -> Result<u32> {
    let invalid = || LineupError::InvalidTime(text.to_string());
    let trimmed = text.trim();

    let (minutes, rest) = match trimmed.split_once(':') {
        Some((m, rest)) => (Some(parse_digits(m).ok_or_else(invalid)?), rest),
        None => (None, trimmed),
    };
    let (whole, fraction) = match rest.split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (rest, ""),
    };

    let seconds = parse_digits(whole).ok_or_else(invalid)?;
    if minutes.is_some() && seconds >= 60 {
        return Err(invalid());
    }
    let millis = match fraction.len() {
        0 => 0,
        1..=3 => {
            let digits = parse_digits(fraction).ok_or_else(invalid)?;
            digits * 10u64.pow(3 - fraction.len() as u32)
        }
        _ => return Err(invalid()),
    };

    let total = minutes.unwrap_or(0) * 60_000 + seconds * 1_000 + millis;
    u32::try_from(total).map_err(|_| invalid())
}

fn parse_digits(s: &str) -> Option<u64> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

//! Swimmer builders.
//!
//! Times are given as `(event label, milliseconds)` pairs; labels accept
//! any form [`Event::parse`] does.

use lineup_core::{Event, Gender, Swimmer, SwimmerRecord, TimeRecord};

/// A male swimmer named after their id.
pub fn man(id: &str, times: &[(&str, u32)]) -> Swimmer {
    build(id, Gender::Male, times)
}

/// A female swimmer named after their id.
pub fn woman(id: &str, times: &[(&str, u32)]) -> Swimmer {
    build(id, Gender::Female, times)
}

/// An upstream record as the data provider would send it.
pub fn record(id: &str, gender: Gender, times: &[(&str, i64)]) -> SwimmerRecord {
    SwimmerRecord {
        id: id.to_string(),
        first_name: "Test".to_string(),
        last_name: id.to_string(),
        new_last_name: None,
        year_of_birth: Some(2006),
        gender,
        category: None,
        times: Some(
            times
                .iter()
                .map(|&(event, ms)| TimeRecord::new(event, ms))
                .collect(),
        ),
    }
}

fn build(id: &str, gender: Gender, times: &[(&str, u32)]) -> Swimmer {
    times
        .iter()
        .fold(Swimmer::new(id, "Test", id, gender), |swimmer, &(label, ms)| {
            let event = Event::parse(label).unwrap_or_else(|| panic!("bad event label {label:?}"));
            swimmer.with_time(event, ms)
        })
}

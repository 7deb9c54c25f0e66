//! Tests for FINA scoring.

use super::*;
use crate::domain::{Event, Gender, Stroke};
use proptest::prelude::*;

const FREE_100: Event = Event::new(100, Stroke::Freestyle);

#[test]
fn test_world_record_scores_exactly_1000() {
    assert_eq!(
        fina_points(46_400, FREE_100, PoolLength::Long, Gender::Male),
        FinaScore::Scored(1000)
    );
    for record in WorldRecordTable::standard().iter() {
        let score = fina_points(record.time_ms, record.event, record.pool, record.gender);
        assert_eq!(score, FinaScore::Scored(1000), "{record:?}");
    }
}

#[test]
fn test_double_the_record_scores_500() {
    assert_eq!(
        fina_points(92_800, FREE_100, PoolLength::Long, Gender::Male),
        FinaScore::Scored(500)
    );
}

#[test]
fn test_rounding() {
    assert_eq!(points_from_record(46_400, 49_000), 947);
    assert_eq!(points_from_record(46_400, 50_000), 928);
    assert_eq!(points_from_record(46_400, 51_000), 910);
    // 1000 / 8 = 125 exactly; 1000 / 16 = 62.5 rounds up
    assert_eq!(points_from_record(1_000, 8_000), 125);
    assert_eq!(points_from_record(1_000, 16_000), 63);
}

#[test]
fn test_unscorable_sentinel() {
    // 100m Individual Medley is short-course only
    let im = Event::new(100, Stroke::IndividualMedley);
    let score = fina_points(60_000, im, PoolLength::Long, Gender::Female);
    assert_eq!(score, FinaScore::Unscorable);
    assert_eq!(score.points(), 0);
    assert!(!score.is_scorable());
    assert!(fina_points(60_000, im, PoolLength::Short, Gender::Female).is_scorable());

    let odd = Event::new(300, Stroke::Freestyle);
    assert_eq!(fina_points(200_000, odd, PoolLength::Long, Gender::Male), FinaScore::Unscorable);
    assert_eq!(fina_points(0, FREE_100, PoolLength::Long, Gender::Male), FinaScore::Unscorable);
}

#[test]
fn test_score_by_label() {
    for label in ["100K", "100m Freestyle", "100m Volný způsob"] {
        assert_eq!(
            fina_points_for_label(46_400, label, PoolLength::Long, Gender::Male),
            FinaScore::Scored(1000)
        );
    }
    assert_eq!(
        fina_points_for_label(46_400, "100X", PoolLength::Long, Gender::Male),
        FinaScore::Unscorable
    );
}

#[test]
fn test_table_lookup_by_pool_and_gender() {
    let table = WorldRecordTable::standard();
    assert_eq!(table.len(), 70);
    assert!(!table.is_empty());
    let long_men = table.lookup(FREE_100, Gender::Male, PoolLength::Long).unwrap();
    let short_men = table.lookup(FREE_100, Gender::Male, PoolLength::Short).unwrap();
    let long_women = table.lookup(FREE_100, Gender::Female, PoolLength::Long).unwrap();
    assert!(short_men < long_men);
    assert!(long_men < long_women);
}

#[test]
fn test_every_reference_event_has_records() {
    let table = WorldRecordTable::standard();
    for event in crate::domain::REFERENCE_EVENTS {
        for gender in Gender::ALL {
            for pool in [PoolLength::Short, PoolLength::Long] {
                assert!(table.lookup(event, gender, pool).is_some(), "{event} {gender} {pool}");
            }
        }
    }
}

#[test]
fn test_custom_table() {
    static RECORDS: [WorldRecord; 1] = [WorldRecord {
        event: FREE_100,
        gender: Gender::Female,
        pool: PoolLength::Short,
        time_ms: 50_000,
    }];
    let table = WorldRecordTable::from_static(&RECORDS);
    assert_eq!(
        table.score(100_000, FREE_100, PoolLength::Short, Gender::Female),
        FinaScore::Scored(500)
    );
    assert_eq!(
        table.score(100_000, FREE_100, PoolLength::Long, Gender::Female),
        FinaScore::Unscorable
    );
}

#[test]
fn test_pool_length_conversions() {
    assert_eq!(PoolLength::try_from(25).unwrap(), PoolLength::Short);
    assert_eq!(PoolLength::try_from(50).unwrap(), PoolLength::Long);
    assert!(PoolLength::try_from(33).is_err());
    assert_eq!(u16::from(PoolLength::Short), 25);
    assert_eq!(PoolLength::default(), PoolLength::Long);
    assert_eq!(PoolLength::Long.to_string(), "50m");
}

proptest! {
    #[test]
    fn prop_points_non_increasing_in_time(t in 1u32..2_000_000, dt in 0u32..100_000) {
        let table = WorldRecordTable::standard();
        for record in table.iter() {
            let faster = table.score(t, record.event, record.pool, record.gender).points();
            let slower = table.score(t + dt, record.event, record.pool, record.gender).points();
            prop_assert!(faster >= slower);
        }
    }

    #[test]
    fn prop_points_match_float_formula(wr in 10_000u32..1_000_000, t in 1_000u32..2_000_000) {
        let exact = (wr as f64 / t as f64 * 1000.0).round() as u32;
        let points = points_from_record(wr, t);
        // Float rounding may differ only at an exact half
        prop_assert!(points == exact || points == exact + 1);
    }
}

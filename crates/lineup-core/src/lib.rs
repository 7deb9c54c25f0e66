//! Lineup Core - domain types and scoring for swim-club team composition
//!
//! This crate provides what both solvers stand on:
//! - Swimmers, personal bests and the upstream record contract
//! - Event canonicalisation between storage codes and display names
//! - The world-record table and FINA points
//! - Time formatting and the shared error type

pub mod domain;
pub mod error;
pub mod scoring;
pub mod time;

pub use domain::{
    canonical_event_name, display_to_storage, normalize_label, parse_event_list,
    storage_to_display, DataWarning, Event, Gender, PersonalBest, Stroke, Swimmer, SwimmerId,
    SwimmerRecord, TimeRecord, REFERENCE_EVENTS,
};
pub use error::{InfeasibilityReport, LineupError, Result};
pub use scoring::{
    fina_points, fina_points_for_label, points_from_record, FinaScore, PoolLength, WorldRecord,
    WorldRecordTable,
};
pub use time::{format_ms, parse_time};

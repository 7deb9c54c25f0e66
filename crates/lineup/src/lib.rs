//! Lineup - Team Composition for Swim Clubs
//!
//! Scores swims in FINA points, ranks relay line-ups and picks league
//! rosters from a pool of swimmers.
//!
//! # Example
//!
//! ```rust
//! use lineup::prelude::*;
//!
//! let free = Event::parse("100m Freestyle").unwrap();
//! let pool = vec![
//!     Swimmer::new("a", "Ann", "Able", Gender::Female).with_time(free, 52_000),
//!     Swimmer::new("b", "Bea", "Baker", Gender::Female).with_time(free, 54_000),
//! ];
//!
//! let result = LeagueSolver::new(PoolLength::Long)
//!     .solve(&pool, &[free])
//!     .unwrap();
//! assert_eq!(result.roster.len(), 2);
//! assert!(result.is_optimal());
//! ```

// Domain and scoring
pub use lineup_core::{
    canonical_event_name, display_to_storage, fina_points, fina_points_for_label, format_ms,
    parse_event_list, parse_time, storage_to_display, DataWarning, Event, FinaScore, Gender,
    InfeasibilityReport, LineupError, PersonalBest, PoolLength, Result, Stroke, Swimmer,
    SwimmerId, SwimmerRecord, TimeRecord, WorldRecordTable, REFERENCE_EVENTS,
};

// Configuration
pub use lineup_config::{ConfigError, LeagueConfig, LineupConfig, RelayConfig};

// Solvers
pub use lineup_solver::{build_pool, league, relay, stats};
pub use lineup_solver::{
    GenderPolicy, LeagueResult, LeagueRules, LeagueSolver, RelayRule, RelayRuleId, RelaySolver,
    RelayTeam, SolveStatus,
};

/// Colored console output for solver events.
#[cfg(feature = "console")]
pub use lineup_console as console;

pub mod prelude {
    pub use super::{
        build_pool, Event, FinaScore, Gender, GenderPolicy, LeagueRules, LeagueSolver,
        LineupConfig, PoolLength, RelayRuleId, RelaySolver, Stroke, Swimmer,
    };
}

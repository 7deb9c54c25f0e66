//! Lineup solvers
//!
//! This crate provides the two team-composition solvers:
//! - Relay line-ups (freestyle and medley, any gender policy)
//! - League rosters (exact branch-and-bound over a 0/1 model)
//! - Pool construction from upstream swimmer records
//! - Solve statistics

pub mod league;
pub mod pool;
pub mod relay;
pub mod stats;

pub use league::{
    BackendOutcome, LeagueAssignment, LeagueBackend, LeagueModel, LeagueResult, LeagueRules,
    LeagueSolver, RosterBranchAndBound, SolveStatus,
};
pub use pool::build_pool;
pub use relay::{GenderPolicy, RelayLeg, RelayRule, RelayRuleId, RelaySolver, RelayTeam};
pub use stats::SolveStats;

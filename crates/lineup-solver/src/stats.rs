//! Solve statistics.
//!
//! Plain counters for the league search, carried in the result.

use std::time::{Duration, Instant};

use serde::Serialize;

/// Branch-and-bound statistics for one league solve.
///
/// # Example
///
/// ```
/// use lineup_solver::stats::SolveStats;
///
/// let mut stats = SolveStats::default();
/// stats.start();
/// stats.record_node();
/// stats.record_node();
/// stats.record_prune();
/// stats.record_relaxation();
/// stats.finish();
///
/// assert_eq!(stats.nodes_explored, 2);
/// assert_eq!(stats.nodes_pruned, 1);
/// assert_eq!(stats.relaxations_solved, 1);
/// assert_eq!(stats.elapsed_ms(), stats.elapsed.as_millis() as u64);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SolveStats {
    #[serde(skip)]
    start_time: Option<Instant>,
    /// Search nodes taken off the stack and evaluated.
    pub nodes_explored: u64,
    /// Nodes discarded because their bound could not beat the incumbent.
    pub nodes_pruned: u64,
    /// Min-cost-flow relaxations solved, including repair and priced-roster solves.
    pub relaxations_solved: u64,
    /// Times a strictly better incumbent was found.
    pub incumbent_updates: u64,
    /// Wall time of the solve, fixed by [`finish`](Self::finish).
    #[serde(rename = "elapsed_ms", serialize_with = "serialize_millis")]
    pub elapsed: Duration,
}

impl SolveStats {
    /// Marks the start of solving.
    pub fn start(&mut self) {
        self.start_time = Some(Instant::now());
    }

    /// Freezes the elapsed time.
    pub fn finish(&mut self) {
        self.elapsed = self.start_time.map(|t| t.elapsed()).unwrap_or_default();
    }

    /// Returns the elapsed time in milliseconds, as frozen by
    /// [`finish`](Self::finish).
    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed.as_millis() as u64
    }

    pub fn record_node(&mut self) {
        self.nodes_explored += 1;
    }

    pub fn record_prune(&mut self) {
        self.nodes_pruned += 1;
    }

    pub fn record_relaxation(&mut self) {
        self.relaxations_solved += 1;
    }

    pub fn record_incumbent(&mut self) {
        self.incumbent_updates += 1;
    }
}

fn serialize_millis<S: serde::Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u64(value.as_millis() as u64)
}

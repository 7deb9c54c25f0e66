//! League roster solver.
//!
//! Picks at most `roster_size` swimmers and nominates them to individual
//! events so that the summed FINA points, minus a penalty per event nobody
//! swims, is maximal. The problem is built as an explicit 0/1
//! [`LeagueModel`] and handed to a [`LeagueBackend`]; the default back end
//! is the exact [`RosterBranchAndBound`].
//!
//! Logging levels:
//! - **INFO**: Solve start/end, model size
//! - **WARN**: Search stopped at the node limit
//! - **DEBUG**: Incumbent improvements (back end)

mod bnb;
mod flow;
mod model;

#[cfg(test)]
mod tests;

use std::collections::HashSet;

use lineup_config::{LeagueConfig, LineupConfig};
use lineup_core::{
    Event, InfeasibilityReport, LineupError, PoolLength, Result, Swimmer, SwimmerId,
    WorldRecordTable,
};
use serde::Serialize;
use tracing::{info, warn};

use crate::stats::SolveStats;

pub use bnb::RosterBranchAndBound;
pub use model::{
    AssignmentVar, LeagueModel, LinearConstraint, ModelSolution, Sense, Variable,
};

/// Numeric rules of a league meet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeagueRules {
    pub roster_size: usize,
    pub max_events_per_swimmer: usize,
    pub max_swimmers_per_event: usize,
    /// Points lost for every event left without a swimmer.
    pub uncovered_penalty: i64,
}

impl Default for LeagueRules {
    fn default() -> Self {
        Self {
            roster_size: 16,
            max_events_per_swimmer: 4,
            max_swimmers_per_event: 2,
            uncovered_penalty: 10_000,
        }
    }
}

impl LeagueRules {
    /// Checks that every cap is at least 1 and the penalty is not negative.
    ///
    /// # Errors
    ///
    /// [`LineupError::InvalidRules`] naming the first bad field.
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("roster_size", self.roster_size),
            ("max_events_per_swimmer", self.max_events_per_swimmer),
            ("max_swimmers_per_event", self.max_swimmers_per_event),
        ];
        for (name, value) in positive {
            if value == 0 {
                return Err(LineupError::InvalidRules(format!("{name} must be at least 1")));
            }
        }
        if self.uncovered_penalty < 0 {
            return Err(LineupError::InvalidRules(
                "uncovered_penalty must not be negative".into(),
            ));
        }
        Ok(())
    }
}

impl From<&LeagueConfig> for LeagueRules {
    fn from(config: &LeagueConfig) -> Self {
        Self {
            roster_size: config.roster_size,
            max_events_per_swimmer: config.max_events_per_swimmer,
            max_swimmers_per_event: config.max_swimmers_per_event,
            uncovered_penalty: config.uncovered_penalty,
        }
    }
}

/// How far the back end got.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SolveStatus {
    /// Proven best roster.
    Optimal,
    /// Best roster found before the node limit; not proven optimal.
    Feasible,
    Infeasible,
}

impl std::fmt::Display for SolveStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Optimal => "optimal",
            Self::Feasible => "feasible",
            Self::Infeasible => "infeasible",
        };
        f.write_str(name)
    }
}

/// What a back end hands back for one model.
#[derive(Debug, Clone)]
pub struct BackendOutcome {
    pub status: SolveStatus,
    pub solution: Option<ModelSolution>,
    pub stats: SolveStats,
}

impl BackendOutcome {
    pub fn optimal(solution: ModelSolution, stats: SolveStats) -> Self {
        Self {
            status: SolveStatus::Optimal,
            solution: Some(solution),
            stats,
        }
    }

    pub fn feasible(solution: ModelSolution, stats: SolveStats) -> Self {
        Self {
            status: SolveStatus::Feasible,
            solution: Some(solution),
            stats,
        }
    }

    pub fn infeasible(stats: SolveStats) -> Self {
        Self {
            status: SolveStatus::Infeasible,
            solution: None,
            stats,
        }
    }
}

/// Solves a [`LeagueModel`].
pub trait LeagueBackend: std::fmt::Debug {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    fn solve(&self, model: &LeagueModel<'_>) -> BackendOutcome;
}

/// One swimmer nominated to one event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeagueAssignment {
    pub swimmer_id: SwimmerId,
    pub swimmer_name: String,
    pub event: Event,
    pub points: u32,
    pub time_ms: u32,
}

/// A solved league roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeagueResult {
    /// Swimmers with at least one assignment, in input order.
    pub roster: Vec<SwimmerId>,
    /// Grouped by event in event-list order, then by swimmer input order.
    pub assignments: Vec<LeagueAssignment>,
    /// Objective value: summed points minus penalties.
    pub total_points: i64,
    pub status: SolveStatus,
    pub uncovered_events: Vec<Event>,
    pub stats: SolveStats,
}

impl LeagueResult {
    pub fn assignments_of<'r>(
        &'r self,
        swimmer: &'r SwimmerId,
    ) -> impl Iterator<Item = &'r LeagueAssignment> + 'r {
        self.assignments
            .iter()
            .filter(move |a| &a.swimmer_id == swimmer)
    }

    pub fn assignments_for(&self, event: Event) -> impl Iterator<Item = &LeagueAssignment> {
        self.assignments.iter().filter(move |a| a.event == event)
    }

    pub fn is_optimal(&self) -> bool {
        self.status == SolveStatus::Optimal
    }
}

/// League solver.
///
/// # Examples
///
/// ```
/// use lineup_core::{Event, Gender, PoolLength, Stroke, Swimmer};
/// use lineup_solver::league::{LeagueRules, LeagueSolver};
///
/// let free100 = Event::new(100, Stroke::Freestyle);
/// let pool: Vec<Swimmer> = [("a", 50_000), ("b", 51_000), ("c", 49_000)]
///     .iter()
///     .map(|&(id, ms)| Swimmer::new(id, "", id, Gender::Male).with_time(free100, ms))
///     .collect();
///
/// let rules = LeagueRules { roster_size: 2, ..LeagueRules::default() };
/// let result = LeagueSolver::new(PoolLength::Long)
///     .with_rules(rules)
///     .solve(&pool, &[free100])
///     .unwrap();
///
/// assert_eq!(result.total_points, 947 + 928);
/// assert!(result.is_optimal());
/// ```
#[derive(Debug, Clone)]
pub struct LeagueSolver<B = RosterBranchAndBound> {
    rules: LeagueRules,
    pool_length: PoolLength,
    table: WorldRecordTable,
    backend: B,
}

impl LeagueSolver {
    pub fn new(pool_length: PoolLength) -> Self {
        Self {
            rules: LeagueRules::default(),
            pool_length,
            table: WorldRecordTable::standard(),
            backend: RosterBranchAndBound::new(),
        }
    }

    pub fn from_config(config: &LineupConfig) -> Self {
        Self::new(config.pool_length)
            .with_rules(LeagueRules::from(&config.league))
            .with_backend(RosterBranchAndBound::new().with_node_limit(config.league.node_limit))
    }
}

impl<B: LeagueBackend> LeagueSolver<B> {
    pub fn with_rules(mut self, rules: LeagueRules) -> Self {
        self.rules = rules;
        self
    }

    pub fn with_table(mut self, table: WorldRecordTable) -> Self {
        self.table = table;
        self
    }

    pub fn with_pool_length(mut self, pool_length: PoolLength) -> Self {
        self.pool_length = pool_length;
        self
    }

    pub fn with_backend<C: LeagueBackend>(self, backend: C) -> LeagueSolver<C> {
        LeagueSolver {
            rules: self.rules,
            pool_length: self.pool_length,
            table: self.table,
            backend,
        }
    }

    pub fn rules(&self) -> &LeagueRules {
        &self.rules
    }

    pub fn pool_length(&self) -> PoolLength {
        self.pool_length
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Builds the integer program without solving it.
    ///
    /// # Errors
    ///
    /// [`LineupError::InvalidRules`], [`LineupError::EmptyPool`] or
    /// [`LineupError::EmptyEventList`].
    pub fn build_model<'a>(&self, pool: &'a [Swimmer], events: &[Event]) -> Result<LeagueModel<'a>> {
        self.rules.validate()?;
        if pool.is_empty() {
            return Err(LineupError::EmptyPool);
        }
        if events.is_empty() {
            return Err(LineupError::EmptyEventList);
        }
        Ok(LeagueModel::build(
            pool,
            events,
            self.pool_length,
            &self.table,
            self.rules,
        ))
    }

    /// Finds the best roster and nominations for `events`.
    ///
    /// # Errors
    ///
    /// [`LineupError::InvalidRules`], [`LineupError::EmptyPool`],
    /// [`LineupError::EmptyEventList`], or [`LineupError::Infeasible`] when the back end finds no solution or
    /// returns one that breaks a model row.
    pub fn solve(&self, pool: &[Swimmer], events: &[Event]) -> Result<LeagueResult> {
        info!(
            event = "solve_start",
            swimmer_count = pool.len() as u64,
            event_count = events.len() as u64,
            pool_length = u64::from(self.pool_length.meters()),
            backend = self.backend.name(),
        );

        let model = self.build_model(pool, events)?;
        info!(
            event = "model_built",
            assignment_vars = model.assignments().len() as u64,
            roster_vars = model.swimmers().len() as u64,
            slack_vars = model.events().len() as u64,
            constraints = model.constraint_count() as u64,
        );

        let outcome = self.backend.solve(&model);
        let solution = match outcome.solution {
            Some(solution) if outcome.status != SolveStatus::Infeasible => solution,
            _ => return Err(self.infeasible(&model, Vec::new())),
        };

        let violations = model.violations(&solution);
        if !violations.is_empty() {
            return Err(self.infeasible(&model, violations));
        }

        if outcome.status == SolveStatus::Feasible {
            warn!(
                event = "node_limit",
                nodes = outcome.stats.nodes_explored,
                "league search stopped at the node limit; roster not proven optimal"
            );
        }

        let result = extract(&model, &solution, outcome.status, outcome.stats);
        info!(
            event = "solve_end",
            status = %result.status,
            total_points = result.total_points,
            roster_size = result.roster.len() as u64,
            uncovered = result.uncovered_events.len() as u64,
            nodes = result.stats.nodes_explored,
            relaxations = result.stats.relaxations_solved,
            duration_ms = result.stats.elapsed_ms(),
        );
        Ok(result)
    }

    fn infeasible(&self, model: &LeagueModel<'_>, violations: Vec<String>) -> LineupError {
        LineupError::Infeasible(InfeasibilityReport {
            swimmers_with_times: model.swimmers().iter().filter(|s| s.has_times()).count(),
            eligible_per_event: model.eligible_per_event(),
            violations,
        })
    }
}

fn extract(
    model: &LeagueModel<'_>,
    solution: &ModelSolution,
    status: SolveStatus,
    stats: SolveStats,
) -> LeagueResult {
    let swimmers = model.swimmers();
    let events = model.events();
    let vars = model.assignments();

    let mut assignments = Vec::new();
    let mut on_roster: HashSet<usize> = HashSet::new();
    for e in 0..events.len() {
        for &v in model.assignments_of_event(e) {
            if !solution.assign[v] {
                continue;
            }
            let var = vars[v];
            let swimmer = swimmers[var.swimmer];
            on_roster.insert(var.swimmer);
            assignments.push(LeagueAssignment {
                swimmer_id: swimmer.id().clone(),
                swimmer_name: swimmer.full_name(),
                event: events[var.event],
                points: var.points,
                time_ms: var.time_ms,
            });
        }
    }

    let roster = (0..swimmers.len())
        .filter(|s| on_roster.contains(s))
        .map(|s| swimmers[s].id().clone())
        .collect();
    let uncovered_events = events
        .iter()
        .zip(&solution.uncovered)
        .filter(|(_, &z)| z)
        .map(|(&event, _)| event)
        .collect();

    LeagueResult {
        roster,
        assignments,
        total_points: model.objective(solution),
        status,
        uncovered_events,
        stats,
    }
}

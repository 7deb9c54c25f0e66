//! Relay line-up solver.
//!
//! Enumerates four-swimmer teams for a [`RelayRule`] under a
//! [`GenderPolicy`] and returns the fastest ones.
//!
//! - Freestyle relays rank every four-subset of eligible swimmers. A mixed
//!   freestyle team is the two fastest men plus the two fastest women.
//! - Medley relays try every four-subset in all 24 leg orders and reject
//!   orders in which a swimmer has no time for their leg.
//!
//! Logging levels:
//! - **INFO**: Solve start/end with pool size and best total
//! - **DEBUG**: Candidate counts after filtering

mod permutation;
mod ranking;
mod rule;

#[cfg(test)]
mod tests;

use std::collections::HashSet;
use std::time::Instant;

use itertools::Itertools;
use lineup_config::RelayConfig;
use lineup_core::{Gender, Result, Stroke, Swimmer, SwimmerId};
use serde::Serialize;
use tracing::{debug, info};

pub use permutation::for_each_permutation;
pub use rule::{GenderPolicy, RelayRule, RelayRuleId, MEDLEY_ORDER};

use ranking::{RankedTeam, TopTeams};

/// Number of teams reported when not configured.
pub const DEFAULT_TOP_N: usize = 6;

/// One leg of a relay team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RelayLeg {
    pub swimmer_id: SwimmerId,
    pub swimmer_name: String,
    pub gender: Gender,
    pub stroke: Stroke,
    pub time_ms: u32,
}

/// Four legs in swimming order and their summed time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RelayTeam {
    pub legs: [RelayLeg; 4],
    pub total_time_ms: u64,
}

impl RelayTeam {
    pub fn swimmer_ids(&self) -> impl Iterator<Item = &SwimmerId> {
        self.legs.iter().map(|leg| &leg.swimmer_id)
    }

    pub fn count_gender(&self, gender: Gender) -> usize {
        self.legs.iter().filter(|leg| leg.gender == gender).count()
    }
}

// A swimmer admitted by the gender policy, with their time for each leg.
struct Candidate<'a> {
    swimmer: &'a Swimmer,
    leg_times: [Option<u32>; 4],
}

/// Relay solver.
///
/// # Examples
///
/// ```
/// use lineup_core::{Event, Gender, Stroke, Swimmer};
/// use lineup_solver::relay::{GenderPolicy, RelayRuleId, RelaySolver};
///
/// let free50 = Event::new(50, Stroke::Freestyle);
/// let pool: Vec<Swimmer> = [22_300, 22_800, 23_100, 23_400, 24_000]
///     .iter()
///     .enumerate()
///     .map(|(i, &ms)| {
///         Swimmer::new(i.to_string(), "", format!("Swimmer {i}"), Gender::Male)
///             .with_time(free50, ms)
///     })
///     .collect();
///
/// let rule = RelayRuleId::Freestyle4x50.rule();
/// let teams = RelaySolver::new().solve(&pool, &rule, GenderPolicy::Men);
/// assert_eq!(teams[0].total_time_ms, 91_600);
/// assert_eq!(teams[1].total_time_ms, 92_200);
/// ```
#[derive(Debug, Clone)]
pub struct RelaySolver {
    top_n: usize,
}

impl Default for RelaySolver {
    fn default() -> Self {
        Self::new()
    }
}

impl RelaySolver {
    pub fn new() -> Self {
        Self {
            top_n: DEFAULT_TOP_N,
        }
    }

    pub fn from_config(config: &RelayConfig) -> Self {
        Self::new().with_top_n(config.top_n)
    }

    /// Sets how many teams [`solve`](Self::solve) returns at most.
    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }

    pub fn top_n(&self) -> usize {
        self.top_n
    }

    /// Resolves a relay identifier such as `"4x100PZ"` and solves it.
    ///
    /// # Errors
    ///
    /// Returns [`lineup_core::LineupError::UnknownRelayRule`] for an
    /// identifier outside the known set.
    pub fn solve_by_id(
        &self,
        pool: &[Swimmer],
        rule_id: &str,
        policy: GenderPolicy,
    ) -> Result<Vec<RelayTeam>> {
        let id: RelayRuleId = rule_id.parse()?;
        Ok(self.solve(pool, &id.rule(), policy))
    }

    /// Returns up to `top_n` teams ascending by total time.
    ///
    /// Fewer than four eligible swimmers give an empty result.
    pub fn solve(
        &self,
        pool: &[Swimmer],
        rule: &RelayRule,
        policy: GenderPolicy,
    ) -> Vec<RelayTeam> {
        let started = Instant::now();
        info!(
            event = "relay_start",
            rule = rule.description(),
            policy = %policy,
            pool_size = pool.len() as u64,
        );

        let candidates = collect_candidates(pool, rule, policy);
        debug!(
            event = "relay_candidates",
            candidates = candidates.len() as u64,
            freestyle = rule.is_freestyle(),
        );

        let mut top = TopTeams::new(self.top_n);
        if rule.is_freestyle() {
            rank_freestyle(&candidates, policy, &mut top);
        } else {
            rank_medley(&candidates, policy, &mut top);
        }

        let evaluated = top.offered();
        let teams: Vec<RelayTeam> = top
            .into_ranked()
            .into_iter()
            .map(|ranked| build_team(&candidates, rule, ranked))
            .collect();

        info!(
            event = "relay_end",
            rule = rule.description(),
            teams = teams.len() as u64,
            evaluated = evaluated,
            best_total_ms = teams.first().map_or(0, |t| t.total_time_ms),
            duration_ms = started.elapsed().as_millis() as u64,
        );
        teams
    }
}

fn collect_candidates<'a>(
    pool: &'a [Swimmer],
    rule: &RelayRule,
    policy: GenderPolicy,
) -> Vec<Candidate<'a>> {
    let mut seen: HashSet<&SwimmerId> = HashSet::new();
    pool.iter()
        .filter(|s| policy.admits(s.gender()))
        .filter_map(|swimmer| {
            if !seen.insert(swimmer.id()) {
                return None;
            }
            let leg_times: [Option<u32>; 4] =
                std::array::from_fn(|i| swimmer.best_time(rule.leg_event(i)));
            leg_times
                .iter()
                .any(Option::is_some)
                .then_some(Candidate { swimmer, leg_times })
        })
        .collect()
}

fn rank_freestyle(candidates: &[Candidate<'_>], policy: GenderPolicy, top: &mut TopTeams) {
    // Every leg has the same event, so leg 0 holds the freestyle time.
    let mut order: Vec<(usize, u32)> = candidates
        .iter()
        .enumerate()
        .filter_map(|(i, c)| c.leg_times[0].map(|ms| (i, ms)))
        .collect();
    order.sort_by_key(|&(_, ms)| ms);

    if policy == GenderPolicy::Mixed {
        let fastest_two = |gender: Gender| -> Vec<(usize, u32)> {
            order
                .iter()
                .filter(|(i, _)| candidates[*i].swimmer.gender() == gender)
                .take(2)
                .copied()
                .collect()
        };
        let men = fastest_two(Gender::Male);
        let women = fastest_two(Gender::Female);
        if men.len() == 2 && women.len() == 2 {
            let quartet = [men[0], men[1], women[0], women[1]];
            let total = quartet.iter().map(|&(_, ms)| u64::from(ms)).sum();
            top.offer(quartet.map(|(i, _)| i), total);
        }
        return;
    }

    for (a, b, c, d) in order.iter().tuple_combinations() {
        let total = [a, b, c, d].iter().map(|&&(_, ms)| u64::from(ms)).sum();
        top.offer([a.0, b.0, c.0, d.0], total);
    }
}

fn rank_medley(candidates: &[Candidate<'_>], policy: GenderPolicy, top: &mut TopTeams) {
    for (a, b, c, d) in (0..candidates.len()).tuple_combinations() {
        let subset = [a, b, c, d];
        if policy == GenderPolicy::Mixed {
            let men = subset
                .iter()
                .filter(|&&i| candidates[i].swimmer.gender() == Gender::Male)
                .count();
            if men != 2 {
                continue;
            }
        }

        for_each_permutation(subset, |order| {
            let mut total = 0u64;
            for (leg, &i) in order.iter().enumerate() {
                match candidates[i].leg_times[leg] {
                    Some(ms) => total += u64::from(ms),
                    None => return,
                }
            }
            top.offer(*order, total);
        });
    }
}

fn build_team(candidates: &[Candidate<'_>], rule: &RelayRule, ranked: RankedTeam) -> RelayTeam {
    let legs = std::array::from_fn(|leg| {
        let candidate = &candidates[ranked.members[leg]];
        RelayLeg {
            swimmer_id: candidate.swimmer.id().clone(),
            swimmer_name: candidate.swimmer.full_name(),
            gender: candidate.swimmer.gender(),
            stroke: rule.legs()[leg],
            // Members are only ranked when every leg has a time.
            time_ms: candidate.leg_times[leg].unwrap_or_default(),
        }
    });
    RelayTeam {
        legs,
        total_time_ms: ranked.total_ms,
    }
}

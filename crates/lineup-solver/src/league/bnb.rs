//! Exact branch-and-bound over roster membership.
//!
//! Without the roster cap the league program is a min-cost flow
//! `source -> swimmer -> event -> sink`, so every search node solves that
//! flow over the swimmers it still allows. A node whose flow already fits
//! the roster is solved outright. Otherwise the node is
//!
//! 1. repaired into a feasible roster to tighten the incumbent,
//! 2. bounded by pricing event slots: once every entry into event `e`
//!    costs `price[e]`, swimmers no longer compete for events and the best
//!    roster is simply the swimmers with the highest priced gain. Prices
//!    are tightened by subgradient steps, warm-started from the parent,
//! 3. tightened by fixing swimmers whose inclusion or exclusion alone
//!    would drop the bound below the incumbent,
//! 4. branched on the weakest swimmer of the priced roster, inclusion
//!    first.
//!
//! Logging levels:
//! - **DEBUG**: Incumbent improvements, node limit
//! - **TRACE**: Every branching decision

use std::cmp::Ordering;

use tracing::{debug, trace};

use super::flow::FlowNetwork;
use super::model::LeagueModel;
use super::{BackendOutcome, LeagueBackend};
use crate::stats::SolveStats;

const SOURCE: usize = 0;
const SINK: usize = 1;

/// Subgradient steps at the root, where prices start from zero.
const ROOT_PRICE_STEPS: usize = 150;

/// Subgradient steps below the root, starting from the parent's prices.
const NODE_PRICE_STEPS: usize = 25;

/// Non-improving steps before the step size halves.
const PRICE_PATIENCE: u32 = 3;

/// Slack for comparing a fractional bound with an integer objective.
const BOUND_EPSILON: f64 = 1e-6;

/// Exact roster search. See the module documentation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RosterBranchAndBound {
    node_limit: Option<u64>,
}

impl RosterBranchAndBound {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stops after `limit` nodes with the best roster found so far.
    /// `None` searches to proven optimality.
    pub fn with_node_limit(mut self, limit: Option<u64>) -> Self {
        self.node_limit = limit.map(|n| n.max(1));
        self
    }

    pub fn node_limit(&self) -> Option<u64> {
        self.node_limit
    }
}

impl LeagueBackend for RosterBranchAndBound {
    fn name(&self) -> &'static str {
        "roster-branch-and-bound"
    }

    fn solve(&self, model: &LeagueModel<'_>) -> BackendOutcome {
        Search::new(model, self.node_limit).run()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Decision {
    Free,
    Included,
    Excluded,
}

#[derive(Debug, Clone)]
struct Node {
    decisions: Vec<Decision>,
    included: usize,
    /// Event slot prices the bound starts from.
    prices: Vec<f64>,
}

impl Node {
    fn root(swimmers: usize, events: usize) -> Self {
        Self {
            decisions: vec![Decision::Free; swimmers],
            included: 0,
            prices: vec![0.0; events],
        }
    }

    fn with(&self, swimmer: usize, decision: Decision) -> Self {
        let mut child = self.clone();
        child.set(swimmer, decision);
        child
    }

    fn set(&mut self, swimmer: usize, decision: Decision) {
        self.decisions[swimmer] = decision;
        if decision == Decision::Included {
            self.included += 1;
        }
    }

    fn is_free(&self, swimmer: usize) -> bool {
        self.decisions[swimmer] == Decision::Free
    }

    fn is_full(&self, roster_size: usize) -> bool {
        self.included >= roster_size
    }

    // Once the roster is full only included swimmers may still swim.
    fn allowed(&self, roster_size: usize) -> Vec<bool> {
        let full = self.is_full(roster_size);
        self.decisions
            .iter()
            .map(|&d| match d {
                Decision::Included => true,
                Decision::Free => !full,
                Decision::Excluded => false,
            })
            .collect()
    }
}

/// Upper bound of a node under fixed event slot prices.
#[derive(Debug, Clone)]
struct PriceBound {
    value: f64,
    /// Priced gain of each swimmer that may still swim, zero otherwise.
    gains: Vec<f64>,
    /// Free swimmers that may still swim, highest gain first.
    free: Vec<usize>,
    /// Roster places left for free swimmers.
    slots: usize,
    subgradient: Vec<f64>,
}

impl PriceBound {
    fn gain_at(&self, rank: usize) -> f64 {
        self.free.get(rank).map_or(0.0, |&s| self.gains[s])
    }
}

struct Relaxation {
    value: i64,
    chosen: Vec<usize>,
}

struct Incumbent {
    value: i64,
    chosen: Vec<usize>,
}

struct Search<'m, 'a> {
    model: &'m LeagueModel<'a>,
    node_limit: Option<u64>,
    incumbent: Option<Incumbent>,
    stats: SolveStats,
}

impl<'m, 'a> Search<'m, 'a> {
    fn new(model: &'m LeagueModel<'a>, node_limit: Option<u64>) -> Self {
        Self {
            model,
            node_limit,
            incumbent: None,
            stats: SolveStats::default(),
        }
    }

    fn run(mut self) -> BackendOutcome {
        self.stats.start();
        let swimmers = self.model.swimmers().len();
        let events = self.model.events().len();
        let roster_size = self.model.rules().roster_size;

        let mut stack = vec![Node::root(swimmers, events)];
        let mut stopped_early = false;

        while let Some(node) = stack.pop() {
            if self
                .node_limit
                .is_some_and(|limit| self.stats.nodes_explored >= limit)
            {
                debug!(
                    event = "node_limit",
                    nodes = self.stats.nodes_explored,
                    open = stack.len() as u64 + 1,
                );
                stopped_early = true;
                break;
            }
            self.stats.record_node();

            let allowed = node.allowed(roster_size);
            let relaxed = self.relax(&allowed);
            if self.cannot_beat(relaxed.value) {
                self.stats.record_prune();
                continue;
            }

            let contribution = self.points_by_swimmer(&relaxed.chosen);
            let used = contribution.iter().filter(|c| c.is_some()).count();
            if used <= roster_size {
                self.offer(relaxed.value, relaxed.chosen);
                continue;
            }

            self.repair(&node, &contribution, roster_size);

            let steps = if self.stats.nodes_explored == 1 {
                ROOT_PRICE_STEPS
            } else {
                NODE_PRICE_STEPS
            };
            let (bound, prices) = self.tighten(&node, steps);
            if self.bound_cannot_beat(bound.value) {
                self.stats.record_prune();
                continue;
            }

            self.try_priced_roster(&node, &bound);
            if self.bound_cannot_beat(bound.value) {
                self.stats.record_prune();
                continue;
            }

            let Some(mut node) = self.fix(node, &bound, roster_size) else {
                self.stats.record_prune();
                continue;
            };
            node.prices = prices;

            let priced_roster = bound.free.iter().take(bound.slots);
            let pick = priced_roster
                .copied()
                .filter(|&s| node.is_free(s))
                .min_by(|&a, &b| by_gain(&bound, a, b))
                .or_else(|| {
                    bound
                        .free
                        .iter()
                        .copied()
                        .filter(|&s| node.is_free(s))
                        .max_by(|&a, &b| by_gain(&bound, a, b))
                });
            let Some(pick) = pick.filter(|_| !node.is_full(roster_size)) else {
                // Nothing left to decide: the next visit solves it exactly.
                stack.push(node);
                continue;
            };
            trace!(
                event = "branch",
                swimmer = %self.model.swimmers()[pick].id(),
                included = node.included as u64,
                depth = stack.len() as u64,
            );
            stack.push(node.with(pick, Decision::Excluded));
            stack.push(node.with(pick, Decision::Included));
        }

        self.stats.finish();
        match self.incumbent {
            Some(best) => {
                let solution = self.model.solution_from_assignments(&best.chosen);
                if stopped_early {
                    BackendOutcome::feasible(solution, self.stats)
                } else {
                    BackendOutcome::optimal(solution, self.stats)
                }
            }
            None => BackendOutcome::infeasible(self.stats),
        }
    }

    fn cannot_beat(&self, value: i64) -> bool {
        self.incumbent.as_ref().is_some_and(|best| value <= best.value)
    }

    // Objectives are integers, so a bound below `incumbent + 1` proves
    // nothing better exists.
    fn bound_cannot_beat(&self, bound: f64) -> bool {
        self.incumbent
            .as_ref()
            .is_some_and(|best| bound < best.value as f64 + 1.0 - BOUND_EPSILON)
    }

    fn offer(&mut self, value: i64, chosen: Vec<usize>) {
        if self.cannot_beat(value) {
            return;
        }
        debug!(
            event = "incumbent",
            value = value,
            nodes = self.stats.nodes_explored,
        );
        self.stats.record_incumbent();
        self.incumbent = Some(Incumbent { value, chosen });
    }

    // Points each swimmer collects in `chosen`; `None` for unused swimmers.
    fn points_by_swimmer(&self, chosen: &[usize]) -> Vec<Option<i64>> {
        let vars = self.model.assignments();
        let mut points = vec![None; self.model.swimmers().len()];
        for &v in chosen {
            let var = vars[v];
            let slot: &mut Option<i64> = &mut points[var.swimmer];
            *slot = Some(slot.unwrap_or(0) + i64::from(var.points));
        }
        points
    }

    // Keeps the included swimmers plus the highest scorers of the
    // relaxation, up to the roster size, and solves again over them.
    fn repair(&mut self, node: &Node, contribution: &[Option<i64>], roster_size: usize) {
        let swimmers = contribution.len();
        let mut keep: Vec<usize> = (0..swimmers)
            .filter(|&s| node.decisions[s] == Decision::Included)
            .collect();
        let mut others: Vec<(usize, i64)> = (0..swimmers)
            .filter(|&s| node.is_free(s))
            .filter_map(|s| contribution[s].map(|points| (s, points)))
            .collect();
        others.sort_by(|a, b| b.1.cmp(&a.1));
        keep.extend(others.into_iter().map(|(s, _)| s));
        keep.truncate(roster_size);
        self.solve_roster(&keep);
    }

    // The roster the priced bound would pick, solved exactly.
    fn try_priced_roster(&mut self, node: &Node, bound: &PriceBound) {
        let mut roster: Vec<usize> = (0..node.decisions.len())
            .filter(|&s| node.decisions[s] == Decision::Included)
            .collect();
        roster.extend(bound.free.iter().take(bound.slots));
        self.solve_roster(&roster);
    }

    fn solve_roster(&mut self, roster: &[usize]) {
        let mut allowed = vec![false; self.model.swimmers().len()];
        for &s in roster {
            allowed[s] = true;
        }
        let solved = self.relax(&allowed);
        self.offer(solved.value, solved.chosen);
    }

    // Subgradient descent on the event prices. Returns the lowest bound met
    // and the prices that gave it.
    fn tighten(&self, node: &Node, steps: usize) -> (PriceBound, Vec<f64>) {
        let mut prices = node.prices.clone();
        let mut bound = self.price_bound(node, &prices);
        let mut best = (bound.clone(), prices.clone());
        let mut scale = 1.0;
        let mut stalls = 0;

        for step in 0..steps {
            if step > 0 {
                bound = self.price_bound(node, &prices);
                if bound.value < best.0.value - BOUND_EPSILON {
                    best = (bound.clone(), prices.clone());
                    stalls = 0;
                } else {
                    stalls += 1;
                    if stalls >= PRICE_PATIENCE {
                        scale *= 0.5;
                        stalls = 0;
                    }
                }
            }
            if self.bound_cannot_beat(best.0.value) {
                break;
            }

            let norm: f64 = bound.subgradient.iter().map(|g| g * g).sum();
            if norm == 0.0 {
                break;
            }
            let target = match &self.incumbent {
                Some(incumbent) => incumbent.value as f64 + 1.0,
                None => bound.value - bound.value.abs() * 0.02 - 1.0,
            };
            let length = scale * (bound.value - target).max(1.0) / norm;
            for (price, g) in prices.iter_mut().zip(&bound.subgradient) {
                *price -= length * g;
            }
        }

        best
    }

    // Every entry into event `e` pays `prices[e]` to the event. An event
    // then earns `max(0, P + p) + (cap - 1) · max(0, p)` and a swimmer its
    // best `max_events` priced gains `points - p`; the roster keeps the
    // included swimmers and the best free ones.
    fn price_bound(&self, node: &Node, prices: &[f64]) -> PriceBound {
        let model = self.model;
        let rules = model.rules();
        let penalty = rules.uncovered_penalty as f64;
        let event_cap = rules.max_swimmers_per_event as f64;
        let swimmers = model.swimmers().len();
        let vars = model.assignments();

        let mut value = -penalty * prices.len() as f64;
        let mut subgradient = vec![0.0; prices.len()];
        for (e, &price) in prices.iter().enumerate() {
            if price >= 0.0 {
                value += penalty + event_cap * price;
                subgradient[e] = event_cap;
            } else if price > -penalty {
                value += penalty + price;
                subgradient[e] = 1.0;
            }
        }

        let allowed = node.allowed(rules.roster_size);
        let mut gains = vec![0.0; swimmers];
        let mut picks: Vec<Vec<usize>> = vec![Vec::new(); swimmers];
        let mut priced: Vec<(f64, usize)> = Vec::new();
        for s in (0..swimmers).filter(|&s| allowed[s]) {
            priced.clear();
            priced.extend(
                model
                    .assignments_of_swimmer(s)
                    .iter()
                    .map(|&v| (f64::from(vars[v].points) - prices[vars[v].event], vars[v].event))
                    .filter(|&(gain, _)| gain > 0.0),
            );
            priced.sort_by(|a, b| b.0.total_cmp(&a.0));
            priced.truncate(rules.max_events_per_swimmer);
            gains[s] = priced.iter().map(|&(gain, _)| gain).sum();
            picks[s] = priced.iter().map(|&(_, e)| e).collect();
        }

        let mut free: Vec<usize> = (0..swimmers)
            .filter(|&s| allowed[s] && node.is_free(s))
            .collect();
        free.sort_by(|&a, &b| gains[b].total_cmp(&gains[a]));
        let slots = rules.roster_size.saturating_sub(node.included);

        let included = (0..swimmers).filter(|&s| node.decisions[s] == Decision::Included);
        for s in included.chain(free.iter().copied().take(slots)) {
            value += gains[s];
            for &e in &picks[s] {
                subgradient[e] -= 1.0;
            }
        }

        PriceBound {
            value,
            gains,
            free,
            slots,
            subgradient,
        }
    }

    // Forces in every priced-roster swimmer whose removal alone would sink
    // the bound, and forces out every other swimmer whose entry alone
    // would. `None` when the forced swimmers overflow the roster.
    fn fix(&self, mut node: Node, bound: &PriceBound, roster_size: usize) -> Option<Node> {
        let Some(incumbent) = &self.incumbent else {
            return Some(node);
        };
        let floor = incumbent.value as f64 + 1.0 - BOUND_EPSILON;
        let last_in = if bound.slots > 0 && bound.slots <= bound.free.len() {
            bound.gain_at(bound.slots - 1)
        } else {
            0.0
        };
        let first_out = bound.gain_at(bound.slots);

        for (rank, &s) in bound.free.iter().enumerate() {
            let gain = bound.gains[s];
            if rank < bound.slots {
                if bound.value - gain + first_out < floor {
                    node.set(s, Decision::Included);
                }
            } else if bound.value - last_in + gain < floor {
                node.set(s, Decision::Excluded);
            }
        }

        (node.included <= roster_size).then_some(node)
    }

    // Solves the flow over `allowed` swimmers.
    fn relax(&mut self, allowed: &[bool]) -> Relaxation {
        self.stats.record_relaxation();
        let model = self.model;
        let rules = model.rules();
        let swimmers = model.swimmers().len();
        let events = model.events().len();
        let swimmer_node = |s: usize| 2 + s;
        let event_node = |e: usize| 2 + swimmers + e;

        let mut net = FlowNetwork::new(2 + swimmers + events);

        let cap = rules.max_events_per_swimmer as i64;
        for s in (0..swimmers).filter(|&s| allowed[s]) {
            if !model.assignments_of_swimmer(s).is_empty() {
                net.add_arc(SOURCE, swimmer_node(s), cap, 0);
            }
        }

        let vars = model.assignments();
        let mut var_arcs = vec![None; vars.len()];
        for (v, var) in vars.iter().enumerate() {
            if allowed[var.swimmer] {
                let cost = -i64::from(var.points);
                var_arcs[v] =
                    Some(net.add_arc(swimmer_node(var.swimmer), event_node(var.event), 1, cost));
            }
        }

        for e in 0..events {
            net.add_arc(event_node(e), SINK, 1, -rules.uncovered_penalty);
            if rules.max_swimmers_per_event > 1 {
                let extra = rules.max_swimmers_per_event as i64 - 1;
                net.add_arc(event_node(e), SINK, extra, 0);
            }
        }

        net.min_cost_flow(SOURCE, SINK);
        let chosen: Vec<usize> = (0..vars.len())
            .filter(|&v| var_arcs[v].is_some_and(|arc| net.flow(arc) > 0))
            .collect();
        let value = model.value_of(&chosen);

        Relaxation { value, chosen }
    }
}

fn by_gain(bound: &PriceBound, a: usize, b: usize) -> Ordering {
    bound.gains[a].total_cmp(&bound.gains[b])
}

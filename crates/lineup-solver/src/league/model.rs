//! The league as a 0/1 integer program.
//!
//! Three variable families:
//! - `x[s,e]` swimmer `s` swims event `e`, weighted by their FINA points
//! - `y[s]` swimmer `s` is on the roster
//! - `z[e]` event `e` is left uncovered, weighted by minus the penalty
//!
//! Rows:
//! - cover: `Σ_s x[s,e] + z[e] >= 1`
//! - event cap: `Σ_s x[s,e] <= max_swimmers_per_event`
//! - swimmer cap: `Σ_e x[s,e] <= max_events_per_swimmer`
//! - roster link: `x[s,e] - y[s] <= 0`
//! - roster cap: `Σ_s y[s] <= roster_size`

use std::collections::HashSet;
use std::fmt;

use lineup_core::{Event, PoolLength, Swimmer, SwimmerId, WorldRecordTable};

use super::LeagueRules;

/// One `x[s,e]` variable. Only positive-point pairs get one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssignmentVar {
    /// Index into [`LeagueModel::swimmers`].
    pub swimmer: usize,
    /// Index into [`LeagueModel::events`].
    pub event: usize,
    pub points: u32,
    pub time_ms: u32,
}

/// A model variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variable {
    Assign(usize),
    Roster(usize),
    Uncovered(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sense {
    LessEq,
    GreaterEq,
}

/// One linear row `Σ coef · var (<= | >=) rhs`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinearConstraint {
    pub name: String,
    pub terms: Vec<(Variable, i64)>,
    pub sense: Sense,
    pub rhs: i64,
}

impl LinearConstraint {
    pub fn lhs(&self, solution: &ModelSolution) -> i64 {
        self.terms
            .iter()
            .map(|&(var, coef)| coef * solution.value(var))
            .sum()
    }

    pub fn is_satisfied(&self, solution: &ModelSolution) -> bool {
        let lhs = self.lhs(solution);
        match self.sense {
            Sense::LessEq => lhs <= self.rhs,
            Sense::GreaterEq => lhs >= self.rhs,
        }
    }
}

impl fmt::Display for LinearConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op = match self.sense {
            Sense::LessEq => "<=",
            Sense::GreaterEq => ">=",
        };
        write!(f, "{} ({} terms {op} {})", self.name, self.terms.len(), self.rhs)
    }
}

/// A 0/1 assignment of every model variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelSolution {
    pub assign: Vec<bool>,
    pub roster: Vec<bool>,
    pub uncovered: Vec<bool>,
}

impl ModelSolution {
    pub fn value(&self, var: Variable) -> i64 {
        let set = match var {
            Variable::Assign(i) => self.assign[i],
            Variable::Roster(i) => self.roster[i],
            Variable::Uncovered(i) => self.uncovered[i],
        };
        i64::from(set)
    }
}

/// The league integer program over one pool and event list.
#[derive(Debug, Clone)]
pub struct LeagueModel<'a> {
    swimmers: Vec<&'a Swimmer>,
    events: Vec<Event>,
    vars: Vec<AssignmentVar>,
    by_swimmer: Vec<Vec<usize>>,
    by_event: Vec<Vec<usize>>,
    rules: LeagueRules,
}

impl<'a> LeagueModel<'a> {
    /// Scores every (swimmer, event) pair and keeps the positive ones.
    ///
    /// Swimmers repeating an earlier id and events repeating an earlier
    /// event are dropped.
    pub fn build(
        pool: &'a [Swimmer],
        events: &[Event],
        pool_length: PoolLength,
        table: &WorldRecordTable,
        rules: LeagueRules,
    ) -> Self {
        let mut seen: HashSet<&SwimmerId> = HashSet::new();
        let swimmers: Vec<&Swimmer> = pool.iter().filter(|s| seen.insert(s.id())).collect();

        let mut unique_events: Vec<Event> = Vec::with_capacity(events.len());
        for &event in events {
            if !unique_events.contains(&event) {
                unique_events.push(event);
            }
        }

        let mut vars = Vec::new();
        let mut by_swimmer = vec![Vec::new(); swimmers.len()];
        let mut by_event = vec![Vec::new(); unique_events.len()];
        for (s, swimmer) in swimmers.iter().enumerate() {
            for (e, &event) in unique_events.iter().enumerate() {
                let Some(time_ms) = swimmer.best_time(event) else {
                    continue;
                };
                let points = table.score(time_ms, event, pool_length, swimmer.gender()).points();
                if points == 0 {
                    continue;
                }
                by_swimmer[s].push(vars.len());
                by_event[e].push(vars.len());
                vars.push(AssignmentVar {
                    swimmer: s,
                    event: e,
                    points,
                    time_ms,
                });
            }
        }

        Self {
            swimmers,
            events: unique_events,
            vars,
            by_swimmer,
            by_event,
            rules,
        }
    }

    pub fn swimmers(&self) -> &[&'a Swimmer] {
        &self.swimmers
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn assignments(&self) -> &[AssignmentVar] {
        &self.vars
    }

    pub fn rules(&self) -> &LeagueRules {
        &self.rules
    }

    /// Assignment variable ids of swimmer `s`.
    pub fn assignments_of_swimmer(&self, s: usize) -> &[usize] {
        &self.by_swimmer[s]
    }

    /// Assignment variable ids of event `e`.
    pub fn assignments_of_event(&self, e: usize) -> &[usize] {
        &self.by_event[e]
    }

    /// Number of rows [`constraints`](Self::constraints) produces.
    pub fn constraint_count(&self) -> usize {
        2 * self.events.len() + self.swimmers.len() + self.vars.len() + 1
    }

    /// Enumerates every linear row of the program.
    pub fn constraints(&self) -> Vec<LinearConstraint> {
        let rules = &self.rules;
        let mut rows = Vec::with_capacity(self.constraint_count());

        for (e, event) in self.events.iter().enumerate() {
            let mut terms: Vec<(Variable, i64)> =
                self.by_event[e].iter().map(|&v| (Variable::Assign(v), 1)).collect();
            terms.push((Variable::Uncovered(e), 1));
            rows.push(LinearConstraint {
                name: format!("cover[{event}]"),
                terms,
                sense: Sense::GreaterEq,
                rhs: 1,
            });
            rows.push(LinearConstraint {
                name: format!("event_cap[{event}]"),
                terms: self.by_event[e].iter().map(|&v| (Variable::Assign(v), 1)).collect(),
                sense: Sense::LessEq,
                rhs: rules.max_swimmers_per_event as i64,
            });
        }

        for (s, swimmer) in self.swimmers.iter().enumerate() {
            rows.push(LinearConstraint {
                name: format!("swimmer_cap[{}]", swimmer.id()),
                terms: self.by_swimmer[s].iter().map(|&v| (Variable::Assign(v), 1)).collect(),
                sense: Sense::LessEq,
                rhs: rules.max_events_per_swimmer as i64,
            });
        }

        for (v, var) in self.vars.iter().enumerate() {
            rows.push(LinearConstraint {
                name: format!(
                    "roster_link[{},{}]",
                    self.swimmers[var.swimmer].id(),
                    self.events[var.event]
                ),
                terms: vec![(Variable::Assign(v), 1), (Variable::Roster(var.swimmer), -1)],
                sense: Sense::LessEq,
                rhs: 0,
            });
        }

        rows.push(LinearConstraint {
            name: "roster_cap".to_string(),
            terms: (0..self.swimmers.len()).map(|s| (Variable::Roster(s), 1)).collect(),
            sense: Sense::LessEq,
            rhs: rules.roster_size as i64,
        });

        rows
    }

    /// `Σ points · x − penalty · Σ z`.
    pub fn objective(&self, solution: &ModelSolution) -> i64 {
        let points: i64 = self
            .vars
            .iter()
            .zip(&solution.assign)
            .filter(|(_, &on)| on)
            .map(|(var, _)| i64::from(var.points))
            .sum();
        let uncovered = solution.uncovered.iter().filter(|&&z| z).count() as i64;
        points - self.rules.uncovered_penalty * uncovered
    }

    /// Names of the rows `solution` breaks.
    pub fn violations(&self, solution: &ModelSolution) -> Vec<String> {
        self.constraints()
            .into_iter()
            .filter(|row| !row.is_satisfied(solution))
            .map(|row| row.name)
            .collect()
    }

    /// Completes a set of chosen assignments into a full solution: the
    /// roster is exactly the swimmers used and `z` marks events nobody swims.
    pub fn solution_from_assignments(&self, chosen: &[usize]) -> ModelSolution {
        let mut assign = vec![false; self.vars.len()];
        let mut roster = vec![false; self.swimmers.len()];
        let mut uncovered = vec![true; self.events.len()];
        for &v in chosen {
            let var = self.vars[v];
            assign[v] = true;
            roster[var.swimmer] = true;
            uncovered[var.event] = false;
        }
        ModelSolution {
            assign,
            roster,
            uncovered,
        }
    }

    /// Objective of the completed solution for `chosen`, without building it.
    pub fn value_of(&self, chosen: &[usize]) -> i64 {
        let mut covered = vec![false; self.events.len()];
        let mut points = 0i64;
        for &v in chosen {
            let var = self.vars[v];
            points += i64::from(var.points);
            covered[var.event] = true;
        }
        let uncovered = covered.iter().filter(|&&c| !c).count() as i64;
        points - self.rules.uncovered_penalty * uncovered
    }

    /// Per event, how many swimmers hold a scorable time for it.
    pub fn eligible_per_event(&self) -> Vec<(String, usize)> {
        self.events
            .iter()
            .zip(&self.by_event)
            .map(|(event, vars)| (event.display_name(), vars.len()))
            .collect()
    }
}

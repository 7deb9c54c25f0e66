//! Tests for the league model and solver.

use super::*;
use lineup_core::{Gender, Stroke, WorldRecord, REFERENCE_EVENTS};
use lineup_test::pools::{club, league_single_event};
use lineup_test::random::{random_pool, PoolShape};
use lineup_test::{man, woman};

const FREE_100: Event = Event::new(100, Stroke::Freestyle);

// Four men's long-course events with a 100 s record, so `t` ms scores
// `round(100_000 / t * 1000)`.
const SQUAD_EVENTS: [Event; 4] = [
    Event::new(50, Stroke::Freestyle),
    Event::new(100, Stroke::Freestyle),
    Event::new(100, Stroke::Backstroke),
    Event::new(100, Stroke::Butterfly),
];

static SQUAD_RECORDS: [WorldRecord; 4] = [
    squad_record(SQUAD_EVENTS[0]),
    squad_record(SQUAD_EVENTS[1]),
    squad_record(SQUAD_EVENTS[2]),
    squad_record(SQUAD_EVENTS[3]),
];

const fn squad_record(event: Event) -> WorldRecord {
    WorldRecord {
        event,
        gender: Gender::Male,
        pool: PoolLength::Long,
        time_ms: 100_000,
    }
}

fn squad_table() -> WorldRecordTable {
    WorldRecordTable::from_static(&SQUAD_RECORDS)
}

// Points per event (50 free, 100 free, 100 back, 100 fly):
// a 901 880 - -, b - - 870 860, c 850 800 840 -, d 700 820 - 830,
// e 600 600 600 600.
fn squad() -> Vec<Swimmer> {
    vec![
        man("a", &[("50K", 111_000), ("100K", 113_600)]),
        man("b", &[("100Z", 115_000), ("100M", 116_300)]),
        man("c", &[("50K", 117_600), ("100Z", 119_000), ("100K", 125_000)]),
        man("d", &[("100M", 120_500), ("100K", 122_000), ("50K", 142_900)]),
        man(
            "e",
            &[("50K", 166_700), ("100K", 166_700), ("100Z", 166_700), ("100M", 166_700)],
        ),
    ]
}

fn rules(roster_size: usize) -> LeagueRules {
    LeagueRules {
        roster_size,
        ..LeagueRules::default()
    }
}

fn squad_solver(roster_size: usize) -> LeagueSolver {
    LeagueSolver::new(PoolLength::Long)
        .with_table(squad_table())
        .with_rules(rules(roster_size))
}

fn ids(result: &LeagueResult) -> Vec<&str> {
    result.roster.iter().map(|id| id.as_str()).collect()
}

fn assert_respects_rules(result: &LeagueResult, rules: &LeagueRules) {
    assert!(result.roster.len() <= rules.roster_size);
    for id in &result.roster {
        assert!(result.assignments_of(id).count() <= rules.max_events_per_swimmer);
    }
    for assignment in &result.assignments {
        assert!(result.roster.contains(&assignment.swimmer_id));
        assert!(result.assignments_for(assignment.event).count() <= rules.max_swimmers_per_event);
    }
}

#[test]
fn test_single_event_two_best() {
    let result = LeagueSolver::new(PoolLength::Long)
        .with_rules(rules(2))
        .solve(&league_single_event(), &[FREE_100])
        .unwrap();

    assert_eq!(result.status, SolveStatus::Optimal);
    assert_eq!(result.total_points, 947 + 928);
    assert_eq!(ids(&result), vec!["a", "c"]);
    let points: Vec<(&str, u32)> = result
        .assignments
        .iter()
        .map(|a| (a.swimmer_id.as_str(), a.points))
        .collect();
    assert_eq!(points, vec![("a", 928), ("c", 947)]);
    assert!(result.uncovered_events.is_empty());
}

#[test]
fn test_roster_of_one_takes_fastest() {
    let result = LeagueSolver::new(PoolLength::Long)
        .with_rules(rules(1))
        .solve(&league_single_event(), &[FREE_100])
        .unwrap();
    assert_eq!(result.total_points, 947);
    assert_eq!(ids(&result), vec!["c"]);
    assert_eq!(result.assignments[0].time_ms, 49_000);
}

#[test]
fn test_uncovered_event_costs_penalty() {
    let pool = vec![man("a", &[("50K", 24_000)]), woman("b", &[("50Z", 31_000)])];
    let breast_200 = Event::new(200, Stroke::Breaststroke);

    let result = LeagueSolver::new(PoolLength::Long)
        .solve(&pool, &[breast_200])
        .unwrap();
    assert_eq!(result.status, SolveStatus::Optimal);
    assert_eq!(result.total_points, -10_000);
    assert!(result.roster.is_empty());
    assert!(result.assignments.is_empty());
    assert_eq!(result.uncovered_events, vec![breast_200]);
}

#[test]
fn test_penalty_follows_rules() {
    let pool = vec![man("a", &[("100K", 50_000)])];
    let back_100 = Event::new(100, Stroke::Backstroke);
    let rules = LeagueRules {
        uncovered_penalty: 250,
        ..LeagueRules::default()
    };

    let result = LeagueSolver::new(PoolLength::Long)
        .with_rules(rules)
        .solve(&pool, &[FREE_100, back_100])
        .unwrap();
    assert_eq!(result.total_points, 928 - 250);
    assert_eq!(result.uncovered_events, vec![back_100]);
}

#[test]
fn test_empty_inputs_are_errors() {
    let solver = LeagueSolver::new(PoolLength::Long);
    assert!(matches!(solver.solve(&[], &[FREE_100]), Err(LineupError::EmptyPool)));
    assert!(matches!(
        solver.solve(&league_single_event(), &[]),
        Err(LineupError::EmptyEventList)
    ));
}

#[test]
fn test_zero_caps_are_rule_errors() {
    let closed = LeagueRules {
        max_swimmers_per_event: 0,
        ..LeagueRules::default()
    };
    let err = LeagueSolver::new(PoolLength::Long)
        .with_rules(closed)
        .solve(&league_single_event(), &[FREE_100])
        .unwrap_err();
    assert!(matches!(&err, LineupError::InvalidRules(msg) if msg.contains("max_swimmers_per_event")));

    let no_roster = rules(0);
    assert!(matches!(no_roster.validate(), Err(LineupError::InvalidRules(_))));
    let refund = LeagueRules {
        uncovered_penalty: -1,
        ..LeagueRules::default()
    };
    assert!(matches!(
        LeagueSolver::new(PoolLength::Long)
            .with_rules(refund)
            .build_model(&league_single_event(), &[FREE_100]),
        Err(LineupError::InvalidRules(_))
    ));
    assert!(LeagueRules::default().validate().is_ok());
}

#[test]
fn test_roster_cap_binds() {
    // Brute-forced optima for rosters of one, two and three.
    for (roster_size, expected) in [(1, 2_400), (2, 4_890), (3, 6_570)] {
        let result = squad_solver(roster_size).solve(&squad(), &SQUAD_EVENTS).unwrap();
        assert_eq!(result.total_points, expected, "roster of {roster_size}");
        assert_eq!(result.status, SolveStatus::Optimal);
        assert_respects_rules(&result, &rules(roster_size));
    }
}

#[test]
fn test_roster_of_one_prefers_coverage() {
    // The all-rounder "e" scores least per event but alone avoids penalties.
    let result = squad_solver(1).solve(&squad(), &SQUAD_EVENTS).unwrap();
    assert_eq!(ids(&result), vec!["e"]);
    assert_eq!(result.assignments.len(), 4);
    assert!(result.uncovered_events.is_empty());
}

// Points per event: f 900 - - -, g - 800 - 900, h - - 900 700,
// i - 700 900 -. Two swimmers cover at most three events, and the
// relaxed bound only sees that after branching.
fn coverage_gap() -> Vec<Swimmer> {
    vec![
        man("f", &[("50K", 111_111)]),
        man("g", &[("100K", 125_000), ("100M", 111_111)]),
        man("h", &[("100Z", 111_111), ("100M", 142_857)]),
        man("i", &[("100K", 142_857), ("100Z", 111_111)]),
    ]
}

#[test]
fn test_coverage_gap_needs_branching() {
    let result = squad_solver(2).solve(&coverage_gap(), &SQUAD_EVENTS).unwrap();

    assert_eq!(result.status, SolveStatus::Optimal);
    assert_eq!(result.total_points, 3_300 - 10_000);
    assert_eq!(ids(&result), vec!["g", "h"]);
    assert_eq!(result.uncovered_events, vec![SQUAD_EVENTS[0]]);
    assert!(result.stats.nodes_explored > 1);
}

#[test]
fn test_node_limit_reports_feasible() {
    let backend = RosterBranchAndBound::new().with_node_limit(Some(1));
    let result = squad_solver(2)
        .with_backend(backend)
        .solve(&coverage_gap(), &SQUAD_EVENTS)
        .unwrap();

    assert_eq!(result.status, SolveStatus::Feasible);
    assert!(!result.is_optimal());
    assert_eq!(result.stats.nodes_explored, 1);
    assert!(result.total_points <= 3_300 - 10_000);
    assert_respects_rules(&result, &rules(2));
}

#[test]
fn test_binding_roster_proves_optimal_quickly() {
    let shape = PoolShape {
        swimmers: 30,
        density: 0.5,
        max_ratio: 2.0,
    };
    for seed in 0..4u64 {
        let pool = random_pool(seed, &REFERENCE_EVENTS, shape);
        for roster_size in [6, 8] {
            let result = LeagueSolver::new(PoolLength::Long)
                .with_rules(rules(roster_size))
                .with_backend(RosterBranchAndBound::new().with_node_limit(Some(2_000)))
                .solve(&pool, &REFERENCE_EVENTS)
                .unwrap();

            assert_eq!(result.status, SolveStatus::Optimal, "seed {seed}, roster {roster_size}");
            assert!(result.stats.nodes_explored < 2_000);
            assert_eq!(result.roster.len(), roster_size);
            assert_respects_rules(&result, &rules(roster_size));
        }
    }
}

#[test]
fn test_node_limit_zero_is_one() {
    let backend = RosterBranchAndBound::new().with_node_limit(Some(0));
    assert_eq!(backend.node_limit(), Some(1));
}

#[test]
fn test_caps_respected_on_club() {
    let rules = LeagueRules {
        roster_size: 4,
        max_events_per_swimmer: 2,
        max_swimmers_per_event: 1,
        ..LeagueRules::default()
    };
    let result = LeagueSolver::new(PoolLength::Long)
        .with_rules(rules)
        .solve(&club(), &REFERENCE_EVENTS)
        .unwrap();

    assert_eq!(result.status, SolveStatus::Optimal);
    assert_respects_rules(&result, &rules);
    assert_eq!(result.assignments.len(), 8);
    assert_eq!(result.uncovered_events.len(), REFERENCE_EVENTS.len() - 8);
    let points: i64 = result.assignments.iter().map(|a| i64::from(a.points)).sum();
    assert_eq!(
        result.total_points,
        points - 10_000 * result.uncovered_events.len() as i64
    );
}

#[test]
fn test_assignment_points_match_scoring() {
    let result = LeagueSolver::new(PoolLength::Long)
        .solve(&club(), &REFERENCE_EVENTS)
        .unwrap();
    let table = WorldRecordTable::standard();
    let pool = club();
    for assignment in &result.assignments {
        let swimmer = pool.iter().find(|s| s.id() == &assignment.swimmer_id).unwrap();
        let time = swimmer.best_time(assignment.event).unwrap();
        assert_eq!(time, assignment.time_ms);
        let score = table.score(time, assignment.event, PoolLength::Long, swimmer.gender());
        assert_eq!(score.points(), assignment.points);
    }
}

#[test]
fn test_roster_in_input_order() {
    let result = LeagueSolver::new(PoolLength::Long)
        .solve(&club(), &REFERENCE_EVENTS)
        .unwrap();
    let pool = club();
    let positions: Vec<usize> = result
        .roster
        .iter()
        .map(|id| pool.iter().position(|s| s.id() == id).unwrap())
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_duplicates_collapse() {
    let mut pool = league_single_event();
    pool.push(man("c", &[("100K", 45_000)]));
    let result = LeagueSolver::new(PoolLength::Long)
        .with_rules(rules(2))
        .solve(&pool, &[FREE_100, FREE_100])
        .unwrap();

    // The second "c" is ignored, and so is the repeated event.
    assert_eq!(result.total_points, 947 + 928);
    assert_eq!(result.assignments.len(), 2);
}

#[test]
fn test_short_course_scoring() {
    let result = LeagueSolver::new(PoolLength::Short)
        .with_rules(rules(1))
        .solve(&league_single_event(), &[FREE_100])
        .unwrap();
    let expected = lineup_core::fina_points(49_000, FREE_100, PoolLength::Short, Gender::Male);
    assert_eq!(result.total_points, i64::from(expected.points()));
}

#[test]
fn test_from_config() {
    let config = LineupConfig::new().with_league(
        LeagueConfig::new()
            .with_roster_size(2)
            .with_uncovered_penalty(500)
            .with_node_limit(None),
    );
    let solver = LeagueSolver::from_config(&config);
    assert_eq!(solver.rules().roster_size, 2);
    assert_eq!(solver.rules().uncovered_penalty, 500);
    assert_eq!(solver.backend().node_limit(), None);
    assert_eq!(solver.pool_length(), PoolLength::Long);

    let result = solver.solve(&league_single_event(), &[FREE_100]).unwrap();
    assert_eq!(result.total_points, 1875);
}

#[test]
fn test_result_serializes_camel_case() {
    let result = LeagueSolver::new(PoolLength::Long)
        .with_rules(rules(2))
        .solve(&league_single_event(), &[FREE_100])
        .unwrap();
    let json = serde_json::to_value(&result).unwrap();

    assert_eq!(json["totalPoints"], 1875);
    assert_eq!(json["status"], "optimal");
    assert_eq!(json["roster"], serde_json::json!(["a", "c"]));
    assert_eq!(json["assignments"][0]["event"], "100m Freestyle");
    assert_eq!(json["assignments"][0]["swimmerId"], "a");
    assert!(json["stats"]["nodes_explored"].as_u64().unwrap() >= 1);
}

// Model

#[test]
fn test_model_variables() {
    let pool = vec![
        man("a", &[("100K", 50_000), ("25K", 11_000)]),
        man("b", &[("200P", 150_000)]),
    ];
    let solver = LeagueSolver::new(PoolLength::Long);
    let events = [FREE_100, Event::new(25, Stroke::Freestyle)];
    let model = solver.build_model(&pool, &events).unwrap();

    // 25 m has no record and "b" swims neither event
    assert_eq!(model.assignments().len(), 1);
    assert_eq!(model.assignments()[0].points, 928);
    assert_eq!(model.assignments_of_swimmer(1).len(), 0);
    assert_eq!(
        model.eligible_per_event(),
        vec![("100m Freestyle".to_string(), 1), ("25m Freestyle".to_string(), 0)]
    );
    assert_eq!(model.constraints().len(), model.constraint_count());
}

#[test]
fn test_model_rows_check_solutions() {
    let pool = league_single_event();
    let model = LeagueSolver::new(PoolLength::Long)
        .with_rules(rules(2))
        .build_model(&pool, &[FREE_100])
        .unwrap();

    let all: Vec<usize> = (0..model.assignments().len()).collect();
    let crowded = model.solution_from_assignments(&all);
    let violations = model.violations(&crowded);
    assert!(violations.contains(&"event_cap[100m Freestyle]".to_string()));
    assert!(violations.contains(&"roster_cap".to_string()));

    let fine = model.solution_from_assignments(&[0, 2]);
    assert!(model.violations(&fine).is_empty());
    assert_eq!(model.objective(&fine), 1875);
    assert_eq!(model.value_of(&[0, 2]), 1875);

    // Roster link: an assignment without its roster variable
    let mut unlinked = fine.clone();
    unlinked.roster[0] = false;
    assert_eq!(model.violations(&unlinked), vec!["roster_link[a,100m Freestyle]".to_string()]);

    // Cover: nobody swims and z is not set
    let mut bare = model.solution_from_assignments(&[]);
    assert_eq!(model.objective(&bare), -10_000);
    bare.uncovered[0] = false;
    assert_eq!(model.violations(&bare), vec!["cover[100m Freestyle]".to_string()]);
}

// Back ends

#[derive(Debug)]
struct EveryoneSwims;

impl LeagueBackend for EveryoneSwims {
    fn name(&self) -> &'static str {
        "everyone"
    }

    fn solve(&self, model: &LeagueModel<'_>) -> BackendOutcome {
        let all: Vec<usize> = (0..model.assignments().len()).collect();
        BackendOutcome::optimal(model.solution_from_assignments(&all), SolveStats::default())
    }
}

#[derive(Debug)]
struct GivesUp;

impl LeagueBackend for GivesUp {
    fn name(&self) -> &'static str {
        "gives-up"
    }

    fn solve(&self, _model: &LeagueModel<'_>) -> BackendOutcome {
        BackendOutcome::infeasible(SolveStats::default())
    }
}

#[test]
fn test_broken_solution_is_infeasible_error() {
    let err = LeagueSolver::new(PoolLength::Long)
        .with_rules(rules(2))
        .with_backend(EveryoneSwims)
        .solve(&league_single_event(), &[FREE_100])
        .unwrap_err();

    let report = match err {
        LineupError::Infeasible(report) => report,
        other => panic!("expected infeasible, got {other:?}"),
    };
    assert_eq!(report.swimmers_with_times, 3);
    assert!(report.violations.contains(&"roster_cap".to_string()));
}

#[test]
fn test_backend_infeasible_carries_diagnostics() {
    let err = LeagueSolver::new(PoolLength::Long)
        .with_backend(GivesUp)
        .solve(&league_single_event(), &[FREE_100])
        .unwrap_err();

    let report = match err {
        LineupError::Infeasible(report) => report,
        other => panic!("expected infeasible, got {other:?}"),
    };
    assert_eq!(report.eligible_per_event, vec![("100m Freestyle".to_string(), 3)]);
    assert!(report.violations.is_empty());
    assert!(err_message(&report).contains("100m Freestyle: 3"));
}

fn err_message(report: &InfeasibilityReport) -> String {
    LineupError::Infeasible(report.clone()).to_string()
}

// Exhaustive cross-check

struct Exhaustive<'m, 'a> {
    model: &'m LeagueModel<'a>,
    per_swimmer: Vec<usize>,
    per_event: Vec<usize>,
    rostered: usize,
    points: i64,
    best: i64,
}

impl Exhaustive<'_, '_> {
    fn visit(&mut self, v: usize) {
        let model = self.model;
        let vars = model.assignments();
        if v == vars.len() {
            let uncovered = self.per_event.iter().filter(|&&n| n == 0).count() as i64;
            let value = self.points - model.rules().uncovered_penalty * uncovered;
            self.best = self.best.max(value);
            return;
        }
        self.visit(v + 1);

        let var = vars[v];
        let rules = *model.rules();
        let joins = self.per_swimmer[var.swimmer] == 0;
        if self.per_swimmer[var.swimmer] == rules.max_events_per_swimmer
            || self.per_event[var.event] == rules.max_swimmers_per_event
            || (joins && self.rostered == rules.roster_size)
        {
            return;
        }
        self.per_swimmer[var.swimmer] += 1;
        self.per_event[var.event] += 1;
        self.rostered += usize::from(joins);
        self.points += i64::from(var.points);
        self.visit(v + 1);
        self.per_swimmer[var.swimmer] -= 1;
        self.per_event[var.event] -= 1;
        self.rostered -= usize::from(joins);
        self.points -= i64::from(var.points);
    }
}

fn exhaustive_optimum(model: &LeagueModel<'_>) -> i64 {
    let mut search = Exhaustive {
        model,
        per_swimmer: vec![0; model.swimmers().len()],
        per_event: vec![0; model.events().len()],
        rostered: 0,
        points: 0,
        best: i64::MIN,
    };
    search.visit(0);
    search.best
}

#[test]
fn test_matches_exhaustive_search() {
    let events = [
        Event::new(50, Stroke::Freestyle),
        Event::new(100, Stroke::Backstroke),
        Event::new(100, Stroke::Breaststroke),
        Event::new(200, Stroke::IndividualMedley),
    ];
    let shape = PoolShape {
        swimmers: 6,
        density: 0.6,
        max_ratio: 1.8,
    };

    for seed in 0..24u64 {
        let pool = random_pool(seed, &events, shape);
        let rules = LeagueRules {
            roster_size: 1 + (seed % 4) as usize,
            max_events_per_swimmer: 1 + (seed % 3) as usize,
            max_swimmers_per_event: 1 + (seed % 2) as usize,
            uncovered_penalty: 10_000,
        };
        let solver = LeagueSolver::new(PoolLength::Long).with_rules(rules);
        let model = solver.build_model(&pool, &events).unwrap();
        let expected = exhaustive_optimum(&model);

        let result = solver.solve(&pool, &events).unwrap();
        assert_eq!(result.status, SolveStatus::Optimal, "seed {seed}");
        assert_eq!(result.total_points, expected, "seed {seed}");
        assert_respects_rules(&result, &rules);
    }
}

//! Tests for the relay solver.

use super::*;
use lineup_core::LineupError;
use lineup_test::pools::{club, freestyle_men_50, mixed_medley_quartet};
use lineup_test::{man, woman};

fn totals(teams: &[RelayTeam]) -> Vec<u64> {
    teams.iter().map(|t| t.total_time_ms).collect()
}

#[test]
fn test_rule_ids() {
    for id in RelayRuleId::ALL {
        assert_eq!(id.code().parse::<RelayRuleId>().unwrap(), id);
    }
    assert_eq!("4x100pz".parse::<RelayRuleId>().unwrap(), RelayRuleId::Medley4x100);
    assert!(matches!(
        "4x400VZ".parse::<RelayRuleId>(),
        Err(LineupError::UnknownRelayRule(id)) if id == "4x400VZ"
    ));

    let medley = RelayRuleId::Medley4x100.rule();
    assert_eq!(medley.distance(), 100);
    assert_eq!(medley.legs(), MEDLEY_ORDER);
    assert!(!medley.is_freestyle());
    assert_eq!(medley.description(), "4x100m Medley Relay");

    let free = RelayRuleId::Freestyle4x200.rule();
    assert!(free.is_freestyle());
    assert_eq!(free.leg_event(3), lineup_core::Event::new(200, Stroke::Freestyle));
}

#[test]
fn test_custom_rule_validation() {
    use Stroke::*;

    assert!(RelayRule::new(50, [Butterfly, Backstroke, Breaststroke, Freestyle], "fly first").is_ok());
    assert!(RelayRule::new(400, [Freestyle; 4], "too long").is_err());
    assert!(RelayRule::new(100, [IndividualMedley; 4], "im").is_err());
    assert!(RelayRule::new(100, [Backstroke, Backstroke, Butterfly, Freestyle], "dup").is_err());
}

#[test]
fn test_gender_policy_parse() {
    assert_eq!("men".parse::<GenderPolicy>().unwrap(), GenderPolicy::Men);
    assert_eq!("F".parse::<GenderPolicy>().unwrap(), GenderPolicy::Women);
    assert_eq!("Mixed".parse::<GenderPolicy>().unwrap(), GenderPolicy::Mixed);
    assert_eq!("ženy".parse::<GenderPolicy>().unwrap(), GenderPolicy::Women);
    assert!("teams".parse::<GenderPolicy>().is_err());
    assert!(GenderPolicy::Mixed.admits(Gender::Female));
    assert!(!GenderPolicy::Men.admits(Gender::Female));
}

#[test]
fn test_freestyle_men_top_two() {
    let teams = RelaySolver::new().solve(
        &freestyle_men_50(),
        &RelayRuleId::Freestyle4x50.rule(),
        GenderPolicy::Men,
    );

    // C(5, 4) teams, fewer than the default top 6
    assert_eq!(teams.len(), 5);
    assert_eq!(teams[0].total_time_ms, 91_600);
    let fastest: Vec<u32> = teams[0].legs.iter().map(|l| l.time_ms).collect();
    assert_eq!(fastest, vec![22_300, 22_800, 23_100, 23_400]);
    assert_eq!(teams[1].total_time_ms, 92_200);
    assert!(teams[1].swimmer_ids().any(|id| id.as_str() == "m5"));
    assert!(teams[0].legs.iter().all(|l| l.stroke == Stroke::Freestyle));
}

#[test]
fn test_top_n_truncates() {
    let teams = RelaySolver::new().with_top_n(2).solve(
        &freestyle_men_50(),
        &RelayRuleId::Freestyle4x50.rule(),
        GenderPolicy::Men,
    );
    assert_eq!(totals(&teams), vec![91_600, 92_200]);
}

#[test]
fn test_gender_filter_excludes_other_gender() {
    let mut pool = freestyle_men_50();
    pool.push(woman("w1", &[("50K", 20_000)]));

    let teams = RelaySolver::new().solve(&pool, &RelayRuleId::Freestyle4x50.rule(), GenderPolicy::Men);
    assert_eq!(teams[0].total_time_ms, 91_600);
    assert!(teams.iter().all(|t| t.count_gender(Gender::Male) == 4));

    let women = RelaySolver::new().solve(&pool, &RelayRuleId::Freestyle4x50.rule(), GenderPolicy::Women);
    assert!(women.is_empty());
}

#[test]
fn test_mixed_freestyle_takes_two_fastest_of_each() {
    let pool = vec![
        man("m1", &[("100K", 50_000)]),
        man("m2", &[("100K", 51_000)]),
        man("m3", &[("100K", 49_000)]),
        woman("w1", &[("100K", 57_000)]),
        woman("w2", &[("100K", 56_000)]),
        woman("w3", &[("100K", 58_000)]),
    ];
    let teams = RelaySolver::new().solve(&pool, &RelayRuleId::Freestyle4x100.rule(), GenderPolicy::Mixed);

    assert_eq!(teams.len(), 1);
    let team = &teams[0];
    assert_eq!(team.total_time_ms, 49_000 + 50_000 + 56_000 + 57_000);
    assert_eq!(team.count_gender(Gender::Male), 2);
    assert_eq!(team.count_gender(Gender::Female), 2);
    let ids: Vec<&str> = team.swimmer_ids().map(|id| id.as_str()).collect();
    assert_eq!(ids, vec!["m3", "m1", "w2", "w1"]);
}

#[test]
fn test_mixed_freestyle_needs_two_of_each() {
    let pool = vec![
        man("m1", &[("50K", 25_000)]),
        man("m2", &[("50K", 25_500)]),
        man("m3", &[("50K", 26_000)]),
        woman("w1", &[("50K", 28_000)]),
    ];
    let teams = RelaySolver::new().solve(&pool, &RelayRuleId::Freestyle4x50.rule(), GenderPolicy::Mixed);
    assert!(teams.is_empty());
}

#[test]
fn test_mixed_medley_unique_order() {
    let teams = RelaySolver::new().solve(
        &mixed_medley_quartet(),
        &RelayRuleId::Medley4x100.rule(),
        GenderPolicy::Mixed,
    );

    assert_eq!(teams.len(), 1);
    let team = &teams[0];
    let order: Vec<(&str, Stroke)> = team
        .legs
        .iter()
        .map(|l| (l.swimmer_id.as_str(), l.stroke))
        .collect();
    assert_eq!(
        order,
        vec![
            ("back", Stroke::Backstroke),
            ("breast", Stroke::Breaststroke),
            ("fly", Stroke::Butterfly),
            ("free", Stroke::Freestyle),
        ]
    );
    assert_eq!(team.total_time_ms, 56_000 + 70_000 + 60_000 + 50_000);
}

#[test]
fn test_mixed_medley_rejects_unbalanced_subsets() {
    // Three men could swim a faster medley, but mixed teams need 2M + 2F
    let pool = vec![
        man("back", &[("50Z", 26_000)]),
        man("breast", &[("50P", 28_000)]),
        man("fly", &[("50M", 24_500)]),
        woman("free", &[("50K", 26_500)]),
        woman("fly_w", &[("50M", 28_000)]),
    ];
    let teams = RelaySolver::new().solve(&pool, &RelayRuleId::Medley4x50.rule(), GenderPolicy::Mixed);

    assert!(!teams.is_empty());
    for team in &teams {
        assert_eq!(team.count_gender(Gender::Male), 2);
        assert_eq!(team.count_gender(Gender::Female), 2);
    }
    assert_eq!(teams[0].total_time_ms, 26_000 + 28_000 + 28_000 + 26_500);
}

#[test]
fn test_medley_picks_best_assignment() {
    // "a" is faster at both back and fly; the solver must place them where
    // the team gains most.
    let pool = vec![
        man("a", &[("100Z", 55_000), ("100M", 53_000)]),
        man("b", &[("100Z", 56_000), ("100M", 58_000)]),
        man("c", &[("100P", 61_000)]),
        man("d", &[("100K", 49_000)]),
    ];
    let teams = RelaySolver::new().solve(&pool, &RelayRuleId::Medley4x100.rule(), GenderPolicy::Men);

    assert_eq!(teams.len(), 2);
    assert_eq!(teams[0].total_time_ms, 56_000 + 61_000 + 53_000 + 49_000);
    assert_eq!(teams[0].legs[0].swimmer_id.as_str(), "b");
    assert_eq!(teams[0].legs[2].swimmer_id.as_str(), "a");
    assert_eq!(teams[1].total_time_ms, 55_000 + 61_000 + 58_000 + 49_000);
}

#[test]
fn test_medley_every_stroke_once() {
    let rule = RelayRuleId::Medley4x100.rule();
    for policy in [GenderPolicy::Men, GenderPolicy::Women, GenderPolicy::Mixed] {
        for team in RelaySolver::new().solve(&club(), &rule, policy) {
            let strokes: Vec<Stroke> = team.legs.iter().map(|l| l.stroke).collect();
            assert_eq!(strokes, MEDLEY_ORDER.to_vec());
            let sum: u64 = team.legs.iter().map(|l| u64::from(l.time_ms)).sum();
            assert_eq!(sum, team.total_time_ms);
        }
    }
}

#[test]
fn test_too_few_swimmers_is_empty_not_error() {
    let pool: Vec<Swimmer> = freestyle_men_50().into_iter().take(3).collect();
    let rule = RelayRuleId::Freestyle4x50.rule();
    assert!(RelaySolver::new().solve(&pool, &rule, GenderPolicy::Men).is_empty());
    assert!(RelaySolver::new().solve(&[], &rule, GenderPolicy::Mixed).is_empty());

    // Times at the wrong distance do not count
    let rule = RelayRuleId::Freestyle4x100.rule();
    assert!(RelaySolver::new().solve(&freestyle_men_50(), &rule, GenderPolicy::Men).is_empty());
}

#[test]
fn test_duplicate_swimmer_counted_once() {
    let mut pool = freestyle_men_50();
    pool.push(man("m1", &[("50K", 22_300)]));
    let teams = RelaySolver::new().solve(&pool, &RelayRuleId::Freestyle4x50.rule(), GenderPolicy::Men);
    assert_eq!(teams.len(), 5);
    for team in &teams {
        let mut ids: Vec<&str> = team.swimmer_ids().map(|id| id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 4);
    }
}

#[test]
fn test_solve_by_id() {
    let solver = RelaySolver::from_config(&RelayConfig { top_n: 1 });
    let teams = solver.solve_by_id(&freestyle_men_50(), "4x50VZ", GenderPolicy::Men).unwrap();
    assert_eq!(totals(&teams), vec![91_600]);

    let err = solver.solve_by_id(&freestyle_men_50(), "4x25VZ", GenderPolicy::Men).unwrap_err();
    assert!(matches!(err, LineupError::UnknownRelayRule(_)));
}

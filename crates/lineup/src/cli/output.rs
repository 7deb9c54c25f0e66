//! Plain-text rendering of solver results.

use std::fmt::Write as _;

use lineup::{format_ms, LeagueResult, RelayRule, RelayTeam};

/// Ranked relay teams, one block per team.
pub(super) fn relay_text(rule: &RelayRule, teams: &[RelayTeam]) -> String {
    let mut out = String::new();
    if teams.is_empty() {
        let _ = writeln!(out, "{}: no team can be formed", rule.description());
        return out;
    }

    let _ = writeln!(out, "{}", rule.description());
    for (rank, team) in teams.iter().enumerate() {
        let total = u32::try_from(team.total_time_ms).unwrap_or(u32::MAX);
        let _ = writeln!(out, "\n#{} {}", rank + 1, format_ms(total));
        for leg in &team.legs {
            let _ = writeln!(
                out,
                "  {:<14} {:<28} {} {:>9}",
                leg.stroke.name(),
                leg.swimmer_name,
                leg.gender,
                format_ms(leg.time_ms),
            );
        }
    }
    out
}

/// League nominations grouped by event, then the roster.
pub(super) fn league_text(result: &LeagueResult) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Total points: {} ({})",
        result.total_points, result.status
    );

    let mut current = None;
    for assignment in &result.assignments {
        if current != Some(assignment.event) {
            let _ = writeln!(out, "\n{}", assignment.event);
            current = Some(assignment.event);
        }
        let _ = writeln!(
            out,
            "  {:<28} {:>9} {:>5}",
            assignment.swimmer_name,
            format_ms(assignment.time_ms),
            assignment.points,
        );
    }

    if !result.uncovered_events.is_empty() {
        let _ = writeln!(out, "\nUncovered:");
        for event in &result.uncovered_events {
            let _ = writeln!(out, "  {event}");
        }
    }

    let _ = writeln!(out, "\nRoster ({}):", result.roster.len());
    for id in &result.roster {
        let events: Vec<String> = result
            .assignments_of(id)
            .map(|a| a.event.storage_code())
            .collect();
        let _ = writeln!(out, "  {:<12} {}", id, events.join(", "));
    }
    out
}

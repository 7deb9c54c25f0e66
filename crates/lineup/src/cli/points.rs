//! `lineup points` and `lineup events` - scoring lookups.

use lineup::{fina_points, parse_time, Event, FinaScore, Gender, PoolLength, WorldRecordTable};
use serde::Serialize;

use super::{print_json, CliResult, Context};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PointsReport {
    event: Event,
    time_ms: u32,
    gender: Gender,
    pool_length: PoolLength,
    score: FinaScore,
}

pub(crate) fn execute(
    ctx: &Context,
    event: &str,
    time: &str,
    gender: Gender,
    pool: Option<u16>,
) -> CliResult<()> {
    let event: Event = event.parse()?;
    let time_ms = parse_time(time)?;
    let pool_length = match pool {
        Some(meters) => PoolLength::try_from(meters)?,
        None => ctx.config.pool_length,
    };
    let score = fina_points(time_ms, event, pool_length, gender);

    if ctx.json {
        return print_json(&PointsReport {
            event,
            time_ms,
            gender,
            pool_length,
            score,
        });
    }
    match score {
        FinaScore::Scored(points) => println!("{points}"),
        FinaScore::Unscorable => {
            println!("unscorable: no {pool_length} world record for {event} ({gender})")
        }
    }
    Ok(())
}

/// Lists the configured league events with their codes and whether the
/// record table can score them in the configured pool.
pub(crate) fn list_events(ctx: &Context) -> CliResult<()> {
    let events = ctx.config.league.event_list()?;
    let table = WorldRecordTable::standard();
    let pool = ctx.config.pool_length;

    if ctx.json {
        let names: Vec<String> = events.iter().map(Event::display_name).collect();
        return print_json(&names);
    }
    for event in events {
        let scorable = [Gender::Male, Gender::Female]
            .into_iter()
            .all(|gender| table.lookup(event, gender, pool).is_some());
        let marker = if scorable { "" } else { " (no world record)" };
        println!("{:<6} {}{marker}", event.storage_code(), event);
    }
    Ok(())
}

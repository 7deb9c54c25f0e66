//! `lineup league` - pick the roster and event nominations.

use std::path::Path;

use lineup::{LeagueSolver, PoolLength};

use super::output::league_text;
use super::{load_swimmers, print_json, CliResult, Context};

pub(crate) fn execute(
    ctx: Context,
    pool: Option<u16>,
    events: &[String],
    roster: Option<usize>,
    node_limit: Option<u64>,
    swimmers: &Path,
) -> CliResult<()> {
    let mut config = ctx.config;
    if let Some(meters) = pool {
        config.pool_length = PoolLength::try_from(meters)?;
    }
    if !events.is_empty() {
        config.league.events = events.to_vec();
    }
    if let Some(roster) = roster {
        config.league.roster_size = roster;
    }
    if node_limit.is_some() {
        config.league.node_limit = node_limit;
    }
    config.validate()?;

    let events = config.league.event_list()?;
    let pool = load_swimmers(swimmers)?;
    let result = LeagueSolver::from_config(&config).solve(&pool, &events)?;

    if ctx.json {
        print_json(&result)
    } else {
        print!("{}", league_text(&result));
        Ok(())
    }
}

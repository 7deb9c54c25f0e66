//! `lineup relay` - rank the fastest relay teams.

use std::path::Path;

use lineup::{GenderPolicy, RelayRuleId, RelaySolver};

use super::output::relay_text;
use super::{load_swimmers, print_json, CliError, CliResult, Context};

pub(crate) fn execute(
    ctx: &Context,
    rule_id: RelayRuleId,
    policy: GenderPolicy,
    top: Option<usize>,
    swimmers: &Path,
) -> CliResult<()> {
    let mut relay = ctx.config.relay.clone();
    if let Some(top) = top {
        if top == 0 {
            return Err(CliError::new("--top must be at least 1"));
        }
        relay.top_n = top;
    }

    let pool = load_swimmers(swimmers)?;
    let rule = rule_id.rule();
    let teams = RelaySolver::from_config(&relay).solve(&pool, &rule, policy);

    if ctx.json {
        print_json(&teams)
    } else {
        print!("{}", relay_text(&rule, &teams));
        Ok(())
    }
}

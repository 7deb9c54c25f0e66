//! Turns upstream swimmer records into a solver pool.

use std::collections::HashSet;

use lineup_core::{DataWarning, Swimmer, SwimmerRecord};
use tracing::{debug, warn};

/// Converts `records` into swimmers, in input order.
///
/// Every data-quality problem is logged once as a `data_quality` warning
/// and returned. Records without a `times` sequence are dropped, as are
/// records repeating an id already seen (the first one wins). Unusable time
/// lines are dropped from their swimmer.
pub fn build_pool<I>(records: I) -> (Vec<Swimmer>, Vec<DataWarning>)
where
    I: IntoIterator<Item = SwimmerRecord>,
{
    let mut swimmers = Vec::new();
    let mut warnings = Vec::new();
    let mut seen = HashSet::new();

    for record in records {
        let (swimmer, record_warnings) = Swimmer::from_record(record);
        let missing_times = record_warnings
            .iter()
            .any(|w| matches!(w, DataWarning::MissingTimes { .. }));
        for warning in record_warnings {
            warn!(event = "data_quality", swimmer = %swimmer.id(), "{warning}");
            warnings.push(warning);
        }
        if missing_times {
            continue;
        }
        if !seen.insert(swimmer.id().clone()) {
            warn!(
                event = "data_quality",
                swimmer = %swimmer.id(),
                "duplicate swimmer id; keeping the first record"
            );
            continue;
        }
        swimmers.push(swimmer);
    }

    debug!(
        event = "pool_built",
        swimmers = swimmers.len() as u64,
        warnings = warnings.len() as u64,
    );
    (swimmers, warnings)
}

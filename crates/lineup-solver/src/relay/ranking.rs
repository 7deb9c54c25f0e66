//! Bounded ranking of candidate teams.

/// A team as candidate indices plus its total time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RankedTeam {
    pub members: [usize; 4],
    pub total_ms: u64,
}

/// Keeps the `limit` fastest teams offered so far, ascending by total.
///
/// Teams with equal totals keep the order in which they were offered.
#[derive(Debug)]
pub(crate) struct TopTeams {
    limit: usize,
    ranked: Vec<RankedTeam>,
    offered: u64,
}

impl TopTeams {
    pub fn new(limit: usize) -> Self {
        Self {
            limit,
            ranked: Vec::with_capacity(limit + 1),
            offered: 0,
        }
    }

    pub fn offer(&mut self, members: [usize; 4], total_ms: u64) {
        self.offered += 1;
        if self.ranked.len() == self.limit
            && self.ranked.last().map_or(true, |worst| worst.total_ms <= total_ms)
        {
            return;
        }
        let at = self.ranked.partition_point(|t| t.total_ms <= total_ms);
        self.ranked.insert(at, RankedTeam { members, total_ms });
        self.ranked.truncate(self.limit);
    }

    /// Number of valid teams offered, kept or not.
    pub fn offered(&self) -> u64 {
        self.offered
    }

    pub fn into_ranked(self) -> Vec<RankedTeam> {
        self.ranked
    }
}

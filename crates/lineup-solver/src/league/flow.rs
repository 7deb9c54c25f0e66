//! Min-cost flow on a small residual network.
//!
//! Arcs are stored in pairs: forward arc `id` and its reverse `id ^ 1`.
//! Costs are integers and may be negative; the network must be acyclic in
//! its forward arcs, which the league graph always is.

use std::collections::VecDeque;

#[derive(Debug, Clone, Copy)]
struct FlowArc {
    from: usize,
    to: usize,
    residual: i64,
    capacity: i64,
    cost: i64,
}

/// Residual network with successive-shortest-path min-cost flow.
#[derive(Debug, Clone)]
pub(crate) struct FlowNetwork {
    adjacency: Vec<Vec<usize>>,
    arcs: Vec<FlowArc>,
}

impl FlowNetwork {
    pub(crate) fn new(nodes: usize) -> Self {
        Self {
            adjacency: vec![Vec::new(); nodes],
            arcs: Vec::new(),
        }
    }

    /// Adds `from -> to` and returns the forward arc id.
    pub(crate) fn add_arc(&mut self, from: usize, to: usize, capacity: i64, cost: i64) -> usize {
        let id = self.arcs.len();
        self.arcs.push(FlowArc {
            from,
            to,
            residual: capacity,
            capacity,
            cost,
        });
        self.arcs.push(FlowArc {
            from: to,
            to: from,
            residual: 0,
            capacity: 0,
            cost: -cost,
        });
        self.adjacency[from].push(id);
        self.adjacency[to].push(id + 1);
        id
    }

    /// Flow currently on forward arc `id`.
    pub(crate) fn flow(&self, id: usize) -> i64 {
        let arc = &self.arcs[id];
        arc.capacity - arc.residual
    }

    /// Pushes flow from `source` to `sink` along negative-cost shortest
    /// paths until none is left. Returns `(cost, flow)`.
    ///
    /// The amount of flow is free: the result is the cheapest flow of any
    /// value.
    pub(crate) fn min_cost_flow(&mut self, source: usize, sink: usize) -> (i64, i64) {
        let mut total_cost = 0;
        let mut total_flow = 0;

        loop {
            let (dist, prev) = self.shortest_paths(source);
            if dist[sink] >= 0 {
                break;
            }

            let mut push = i64::MAX;
            let mut node = sink;
            while node != source {
                let arc = &self.arcs[prev[node]];
                push = push.min(arc.residual);
                node = arc.from;
            }

            let mut node = sink;
            while node != source {
                let id = prev[node];
                self.arcs[id].residual -= push;
                self.arcs[id ^ 1].residual += push;
                node = self.arcs[id].from;
            }

            total_cost += push * dist[sink];
            total_flow += push;
        }

        (total_cost, total_flow)
    }

    // Label-correcting shortest paths over arcs with residual capacity.
    fn shortest_paths(&self, source: usize) -> (Vec<i64>, Vec<usize>) {
        let n = self.adjacency.len();
        let mut dist = vec![i64::MAX; n];
        let mut prev = vec![usize::MAX; n];
        let mut queued = vec![false; n];
        let mut queue = VecDeque::with_capacity(n);

        dist[source] = 0;
        queue.push_back(source);
        queued[source] = true;

        while let Some(u) = queue.pop_front() {
            queued[u] = false;
            for &id in &self.adjacency[u] {
                let arc = &self.arcs[id];
                if arc.residual <= 0 {
                    continue;
                }
                let candidate = dist[u] + arc.cost;
                if candidate < dist[arc.to] {
                    dist[arc.to] = candidate;
                    prev[arc.to] = id;
                    if !queued[arc.to] {
                        queued[arc.to] = true;
                        queue.push_back(arc.to);
                    }
                }
            }
        }

        (dist, prev)
    }
}

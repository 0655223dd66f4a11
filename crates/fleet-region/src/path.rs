//! Path calculation trait and default Dijkstra implementation.
//!
//! # Pluggability
//!
//! The vehicle manager calls routing through the [`PathCalculator`] trait,
//! so applications can swap in A* or a congestion-aware model without
//! touching the tick engine.
//!
//! # Determinism
//!
//! Vehicle routing must be reproducible for a given region, so among equal
//! cost frontier entries the one pushed first wins.  The heap key carries an
//! insertion sequence number as its secondary component.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use fleet_core::NodeId;

use crate::region::Region;
use crate::{RegionError, RegionResult};

// ── Path ──────────────────────────────────────────────────────────────────────

/// The result of a path query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path {
    /// Nodes from source to destination, both inclusive.
    pub nodes: Vec<NodeId>,
    /// Sum of the weights of the traversed edges.
    pub cost:  u64,
}

impl Path {
    /// `true` if source and destination are the same node.
    pub fn is_trivial(&self) -> bool {
        self.nodes.len() <= 1
    }

    /// Number of edges traversed.
    pub fn hops(&self) -> usize {
        self.nodes.len().saturating_sub(1)
    }
}

// ── PathCalculator trait ──────────────────────────────────────────────────────

/// Pluggable shortest-path engine.
pub trait PathCalculator: Send + Sync {
    /// Compute a path from `from` to `to`.
    ///
    /// `from == to` yields the single-node path with cost 0.
    ///
    /// # Errors
    ///
    /// [`RegionError::PathNotFound`] if `to` is unreachable, or
    /// [`RegionError::NodeNotFound`] if either node is not in `region`.
    fn path(&self, region: &Region, from: NodeId, to: NodeId) -> RegionResult<Path>;
}

// ── DijkstraPathCalculator ────────────────────────────────────────────────────

/// Dijkstra over edge weights with a binary-heap frontier.
/// O((V + E) log V).
#[derive(Debug, Clone, Copy, Default)]
pub struct DijkstraPathCalculator;

impl PathCalculator for DijkstraPathCalculator {
    fn path(&self, region: &Region, from: NodeId, to: NodeId) -> RegionResult<Path> {
        dijkstra(region, from, to)
    }
}

fn dijkstra(region: &Region, from: NodeId, to: NodeId) -> RegionResult<Path> {
    region.try_node(from)?;
    region.try_node(to)?;

    if from == to {
        return Ok(Path { nodes: vec![from], cost: 0 });
    }

    let n = region.node_count();
    // dist[v] = best known cost to reach v.
    let mut dist = vec![u64::MAX; n];
    // prev[v] = predecessor of v on the best known path.
    let mut prev: Vec<Option<NodeId>> = vec![None; n];
    let mut seq: u64 = 0;

    dist[from.index()] = 0;

    // Min-heap: (cost, insertion seq, node).  Reverse turns BinaryHeap into a
    // min-heap; seq breaks cost ties in discovery order.
    let mut heap: BinaryHeap<Reverse<(u64, u64, NodeId)>> = BinaryHeap::new();
    heap.push(Reverse((0, seq, from)));

    while let Some(Reverse((cost, _, node))) = heap.pop() {
        if node == to {
            return Ok(reconstruct(&prev, from, to, cost));
        }

        // Skip stale heap entries.
        if cost > dist[node.index()] {
            continue;
        }

        for (edge, neighbor) in region.neighbors(node) {
            let weight = region.edges()[edge.index()].weight;
            let new_cost = cost.saturating_add(weight);

            if new_cost < dist[neighbor.index()] {
                dist[neighbor.index()] = new_cost;
                prev[neighbor.index()] = Some(node);
                seq += 1;
                heap.push(Reverse((new_cost, seq, neighbor)));
            }
        }
    }

    Err(RegionError::PathNotFound { from, to })
}

fn reconstruct(prev: &[Option<NodeId>], from: NodeId, to: NodeId, cost: u64) -> Path {
    let mut nodes = vec![to];
    let mut cur = to;
    while cur != from {
        match prev[cur.index()] {
            Some(p) => {
                nodes.push(p);
                cur = p;
            }
            None => break,
        }
    }
    nodes.reverse();
    Path { nodes, cost }
}

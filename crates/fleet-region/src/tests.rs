//! Unit tests for fleet-region.
//!
//! All tests use small hand-built regions.

#[cfg(test)]
mod helpers {
    use fleet_core::Location;

    use crate::{Region, RegionBuilder};

    pub const A: Location = Location::new(0, 0);
    pub const B: Location = Location::new(2, 0);
    pub const C: Location = Location::new(0, 2);
    pub const D: Location = Location::new(2, 2);

    /// Four nodes, five weighted edges:
    ///
    /// ```text
    ///   A --1-- B
    ///   |     / |
    ///   4   2   6
    ///   | /     |
    ///   C --3-- D
    /// ```
    ///
    /// Shortest A→D is A→B→C→D with cost 6; the alternatives cost 7, 7, 12.
    pub fn diamond_builder() -> RegionBuilder {
        Region::builder()
            .add_warehouse("A", A)
            .add_node("B", B)
            .add_neighborhood("C", C, 0.5)
            .add_neighborhood("D", D, 1.0)
            .add_weighted_edge("ab", A, B, 1)
            .add_weighted_edge("ac", A, C, 4)
            .add_weighted_edge("bc", B, C, 2)
            .add_weighted_edge("bd", B, D, 6)
            .add_weighted_edge("cd", C, D, 3)
    }

    pub fn diamond() -> Region {
        diamond_builder().build().unwrap()
    }
}

// ── Builder validation & structure ────────────────────────────────────────────

#[cfg(test)]
mod builder {
    use fleet_core::{Location, NodeId};

    use super::helpers::{self, A, B, C, D};
    use crate::{NodeKind, Region, RegionError};

    #[test]
    fn empty_build() {
        let region = Region::builder().build().unwrap();
        assert_eq!(region.node_count(), 0);
        assert_eq!(region.edge_count(), 0);
    }

    #[test]
    fn diamond_structure() {
        let region = helpers::diamond();
        assert_eq!(region.node_count(), 4);
        assert_eq!(region.edge_count(), 5);
        assert_eq!(region.neighborhoods().count(), 2);
        assert_eq!(region.warehouses().count(), 1);
        assert_eq!(region.node_at(A).unwrap().kind, NodeKind::Warehouse);
        assert_eq!(region.node_by_name("D").unwrap().location, D);
    }

    #[test]
    fn duplicate_location_rejected() {
        let result = Region::builder()
            .add_node("x", Location::new(1, 1))
            .add_neighborhood("y", Location::new(1, 1), 0.3)
            .build();
        assert!(matches!(result, Err(RegionError::DuplicateLocation(l)) if l == Location::new(1, 1)));
    }

    #[test]
    fn dangling_edge_rejected() {
        let result = Region::builder()
            .add_node("x", A)
            .add_edge("nowhere", A, Location::new(9, 9))
            .build();
        assert!(matches!(result, Err(RegionError::UnknownLocation { .. })));
    }

    #[test]
    fn self_loop_rejected() {
        let result = Region::builder().add_node("x", A).add_edge("loop", A, A).build();
        assert!(matches!(result, Err(RegionError::SelfLoop(_))));
    }

    #[test]
    fn duplicate_edge_rejected_in_either_direction() {
        let result = Region::builder()
            .add_node("x", A)
            .add_node("y", B)
            .add_edge("xy", A, B)
            .add_edge("yx", B, A)
            .build();
        assert!(matches!(result, Err(RegionError::DuplicateEdge { .. })));
    }

    #[test]
    fn weight_factor_range_checked() {
        let result = Region::builder().add_neighborhood("n", A, 1.5).build();
        assert!(matches!(result, Err(RegionError::InvalidWeightFactor { .. })));
    }

    #[test]
    fn default_weight_is_ceiled_euclidean() {
        let region = Region::builder()
            .add_node("x", A)
            .add_node("y", D)
            .add_edge("diag", A, D)
            .build()
            .unwrap();
        // sqrt(8) ≈ 2.83 → 3
        assert_eq!(region.edges()[0].weight, 3);
    }

    #[test]
    fn edge_lookup_is_undirected() {
        let region = helpers::diamond();
        let bc = region.edge_at(B, C).unwrap();
        assert_eq!(bc.name, "bc");
        assert_eq!(region.edge_at(C, B).unwrap().id, bc.id);
        assert!(region.edge_at(A, D).is_none());
    }

    #[test]
    fn neighbors_follow_insertion_order() {
        let region = helpers::diamond();
        let b = region.node_at(B).unwrap().id;
        let names: Vec<_> = region
            .neighbors(b)
            .map(|(_, n)| region.node(n).unwrap().name.clone())
            .collect();
        assert_eq!(names, vec!["A", "C", "D"]);
        assert_eq!(region.neighbors(NodeId(99)).count(), 0);
    }
}

// ── Distance metrics ──────────────────────────────────────────────────────────

#[cfg(test)]
mod distance {
    use fleet_core::Location;

    use crate::{ChessboardDistance, DistanceCalculator, EuclideanDistance, ManhattanDistance, Region};

    const P: Location = Location::new(0, 0);
    const Q: Location = Location::new(3, -4);

    #[test]
    fn metrics() {
        assert_eq!(EuclideanDistance.distance(P, Q), 5.0);
        assert_eq!(ManhattanDistance.distance(P, Q), 7.0);
        assert_eq!(ChessboardDistance.distance(P, Q), 4.0);
    }

    #[test]
    fn closure_as_calculator() {
        let constant = |_: Location, _: Location| 10.0;
        assert_eq!(constant.distance(P, Q), 10.0);
    }

    #[test]
    fn calculator_drives_default_weights() {
        let region = Region::builder()
            .add_node("p", P)
            .add_node("q", Q)
            .add_edge("pq", P, Q)
            .distance_calculator(ManhattanDistance)
            .build()
            .unwrap();
        assert_eq!(region.edges()[0].weight, 7);
        let (p, q) = (region.node_at(P).unwrap().id, region.node_at(Q).unwrap().id);
        assert_eq!(region.distance(p, q).unwrap(), 7.0);
    }
}

// ── Dijkstra ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod dijkstra {
    use fleet_core::{Location, NodeId};

    use super::helpers::{self, A, B, C, D};
    use crate::{DijkstraPathCalculator, PathCalculator, Region, RegionError};

    /// Cost of every simple path from `from` to `to`, by exhaustive DFS.
    fn all_path_costs(region: &Region, from: NodeId, to: NodeId) -> Vec<u64> {
        fn walk(region: &Region, at: NodeId, to: NodeId, seen: &mut Vec<NodeId>, cost: u64, out: &mut Vec<u64>) {
            if at == to {
                out.push(cost);
                return;
            }
            for (edge, next) in region.neighbors(at) {
                if seen.contains(&next) {
                    continue;
                }
                seen.push(next);
                walk(region, next, to, seen, cost + region.edges()[edge.index()].weight, out);
                seen.pop();
            }
        }
        let mut out = Vec::new();
        walk(region, from, to, &mut vec![from], 0, &mut out);
        out
    }

    #[test]
    fn trivial_same_node() {
        let region = helpers::diamond();
        let a = region.node_at(A).unwrap().id;
        let path = DijkstraPathCalculator.path(&region, a, a).unwrap();
        assert!(path.is_trivial());
        assert_eq!(path.nodes, vec![a]);
        assert_eq!(path.cost, 0);
    }

    #[test]
    fn shortest_path_correct() {
        let region = helpers::diamond();
        let id = |l| region.node_at(l).unwrap().id;
        let path = DijkstraPathCalculator.path(&region, id(A), id(D)).unwrap();

        assert_eq!(path.nodes, vec![id(A), id(B), id(C), id(D)]);
        assert_eq!(path.cost, 6);
        assert_eq!(path.hops(), 3);
    }

    #[test]
    fn cost_is_edge_sum_and_minimal() {
        let region = helpers::diamond();
        for from in region.nodes().iter().map(|n| n.id) {
            for to in region.nodes().iter().map(|n| n.id) {
                let path = DijkstraPathCalculator.path(&region, from, to).unwrap();
                let sum: u64 = path
                    .nodes
                    .windows(2)
                    .map(|w| region.edge_between(w[0], w[1]).unwrap().weight)
                    .sum();
                assert_eq!(path.cost, sum);
                let alternatives = all_path_costs(&region, from, to);
                assert!(alternatives.iter().all(|&c| path.cost <= c), "{from}->{to}: {alternatives:?}");
            }
        }
    }

    #[test]
    fn equal_cost_ties_prefer_first_discovered() {
        let s = Location::new(0, 0);
        let x = Location::new(1, 1);
        let y = Location::new(1, -1);
        let t = Location::new(2, 0);

        let build = |x_first: bool| {
            let b = Region::builder()
                .add_node("s", s)
                .add_node("x", x)
                .add_node("y", y)
                .add_node("t", t);
            let b = if x_first {
                b.add_weighted_edge("sx", s, x, 1).add_weighted_edge("sy", s, y, 1)
            } else {
                b.add_weighted_edge("sy", s, y, 1).add_weighted_edge("sx", s, x, 1)
            };
            b.add_weighted_edge("xt", x, t, 1)
                .add_weighted_edge("yt", y, t, 1)
                .build()
                .unwrap()
        };

        for x_first in [true, false] {
            let region = build(x_first);
            let id = |l| region.node_at(l).unwrap().id;
            let path = DijkstraPathCalculator.path(&region, id(s), id(t)).unwrap();
            let via = if x_first { id(x) } else { id(y) };
            assert_eq!(path.nodes, vec![id(s), via, id(t)]);
            // Repeated queries give the same answer.
            assert_eq!(DijkstraPathCalculator.path(&region, id(s), id(t)).unwrap(), path);
        }
    }

    #[test]
    fn disconnected_is_path_not_found() {
        let region = Region::builder()
            .add_node("x", Location::new(0, 0))
            .add_node("y", Location::new(5, 5))
            .build()
            .unwrap();
        let result = DijkstraPathCalculator.path(&region, NodeId(0), NodeId(1));
        assert!(matches!(result, Err(RegionError::PathNotFound { .. })));
    }

    #[test]
    fn unknown_node_errors() {
        let region = helpers::diamond();
        let result = DijkstraPathCalculator.path(&region, NodeId(0), NodeId(42));
        assert!(matches!(result, Err(RegionError::NodeNotFound(NodeId(42)))));
    }
}

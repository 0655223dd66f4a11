//! Region graph representation and builder.
//!
//! # Data layout
//!
//! Nodes and edges live in two dense arenas indexed by `NodeId` / `EdgeId`
//! (assigned in insertion order).  Each node keeps the ids of its incident
//! edges in insertion order, so neighbour iteration and every path search
//! are deterministic for a given construction sequence.
//!
//! Two hash indices give O(1) lookup by `Location` and by endpoint pair.
//! Edges are undirected: the pair index is keyed by the ordered
//! `(min, max)` node pair.

use rustc_hash::FxHashMap;

use fleet_core::{EdgeId, Location, NodeId};

use crate::distance::{DistanceCalculator, EuclideanDistance};
use crate::{RegionError, RegionResult};

// ── Components ────────────────────────────────────────────────────────────────

/// What kind of place a node is.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NodeKind {
    /// A junction with no special role.
    Plain,
    /// A residential area that orders are delivered to.  `weight_factor` in
    /// `[0, 1]` scales how likely orders originate here; the simulation core
    /// never interprets it.
    Neighborhood { weight_factor: f64 },
    /// The depot where vehicles spawn, idle, and are loaded.
    Warehouse,
}

#[derive(Debug, Clone)]
pub struct Node {
    pub id:       NodeId,
    pub name:     String,
    pub location: Location,
    pub kind:     NodeKind,
    /// Incident edges in insertion order.
    pub edges:    Vec<EdgeId>,
}

impl Node {
    #[inline]
    pub fn is_neighborhood(&self) -> bool {
        matches!(self.kind, NodeKind::Neighborhood { .. })
    }

    #[inline]
    pub fn is_warehouse(&self) -> bool {
        matches!(self.kind, NodeKind::Warehouse)
    }
}

/// An undirected, weighted connection between two distinct nodes.
#[derive(Debug, Clone)]
pub struct Edge {
    pub id:     EdgeId,
    pub name:   String,
    pub a:      NodeId,
    pub b:      NodeId,
    /// Traversal duration in ticks.  Used as the path cost and as the number
    /// of ticks a vehicle spends on the edge.
    pub weight: u64,
}

impl Edge {
    /// The endpoint opposite `node`, or `None` if `node` is not an endpoint.
    #[inline]
    pub fn other(&self, node: NodeId) -> Option<NodeId> {
        if node == self.a {
            Some(self.b)
        } else if node == self.b {
            Some(self.a)
        } else {
            None
        }
    }

    #[inline]
    pub fn connects(&self, x: NodeId, y: NodeId) -> bool {
        (self.a == x && self.b == y) || (self.a == y && self.b == x)
    }
}

/// Reference to one graph component: the unit a vehicle can occupy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Component {
    Node(NodeId),
    Edge(EdgeId),
}

impl std::fmt::Display for Component {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Component::Node(n) => write!(f, "{n}"),
            Component::Edge(e) => write!(f, "{e}"),
        }
    }
}

#[inline]
fn pair_key(x: NodeId, y: NodeId) -> (NodeId, NodeId) {
    if x <= y { (x, y) } else { (y, x) }
}

// ── Region ────────────────────────────────────────────────────────────────────

/// Immutable weighted graph of the serviceable area.
///
/// Construct with [`Region::builder`].  Every edge's endpoints are nodes of
/// the region and node locations are unique; both are checked at build time.
pub struct Region {
    nodes:        Vec<Node>,
    edges:        Vec<Edge>,
    by_location:  FxHashMap<Location, NodeId>,
    by_endpoints: FxHashMap<(NodeId, NodeId), EdgeId>,
    distance:     Box<dyn DistanceCalculator>,
}

impl Region {
    pub fn builder() -> RegionBuilder {
        RegionBuilder::new()
    }

    // ── Graph dimensions ──────────────────────────────────────────────────

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    // ── Lookup ────────────────────────────────────────────────────────────

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    #[inline]
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    #[inline]
    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(id.index())
    }

    /// Like [`node`](Self::node), but fails with [`RegionError::NodeNotFound`].
    pub fn try_node(&self, id: NodeId) -> RegionResult<&Node> {
        self.node(id).ok_or(RegionError::NodeNotFound(id))
    }

    /// Like [`edge`](Self::edge), but fails with [`RegionError::EdgeNotFound`].
    pub fn try_edge(&self, id: EdgeId) -> RegionResult<&Edge> {
        self.edge(id).ok_or(RegionError::EdgeNotFound(id))
    }

    pub fn node_at(&self, location: Location) -> Option<&Node> {
        self.by_location.get(&location).map(|id| &self.nodes[id.index()])
    }

    /// First node with the given name.  Names are labels, not keys.
    pub fn node_by_name(&self, name: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.name == name)
    }

    /// The edge joining `x` and `y`, in either direction.
    pub fn edge_between(&self, x: NodeId, y: NodeId) -> Option<&Edge> {
        self.by_endpoints
            .get(&pair_key(x, y))
            .map(|id| &self.edges[id.index()])
    }

    /// The edge joining the nodes at two locations.
    pub fn edge_at(&self, x: Location, y: Location) -> Option<&Edge> {
        let x = self.by_location.get(&x)?;
        let y = self.by_location.get(&y)?;
        self.edge_between(*x, *y)
    }

    /// `(edge, neighbour)` pairs of `node` in edge insertion order.  Empty for
    /// an unknown node.
    pub fn neighbors(&self, node: NodeId) -> impl Iterator<Item = (EdgeId, NodeId)> + '_ {
        self.node(node)
            .map(|n| n.edges.as_slice())
            .unwrap_or_default()
            .iter()
            .filter_map(move |&e| self.edges[e.index()].other(node).map(|other| (e, other)))
    }

    pub fn neighborhoods(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter().filter(|n| n.is_neighborhood())
    }

    pub fn warehouses(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter().filter(|n| n.is_warehouse())
    }

    /// `true` if `component` refers to a node or edge of this region.
    pub fn contains(&self, component: Component) -> bool {
        match component {
            Component::Node(n) => n.index() < self.nodes.len(),
            Component::Edge(e) => e.index() < self.edges.len(),
        }
    }

    // ── Metric ────────────────────────────────────────────────────────────

    pub fn distance_calculator(&self) -> &dyn DistanceCalculator {
        self.distance.as_ref()
    }

    /// Distance between two nodes under the region's metric.
    pub fn distance(&self, x: NodeId, y: NodeId) -> RegionResult<f64> {
        let x = self.try_node(x)?.location;
        let y = self.try_node(y)?.location;
        Ok(self.distance.distance(x, y))
    }
}

impl std::fmt::Debug for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Region")
            .field("nodes", &self.nodes)
            .field("edges", &self.edges)
            .finish_non_exhaustive()
    }
}

// ── RegionBuilder ─────────────────────────────────────────────────────────────

/// Construct a [`Region`] incrementally, then call [`build`](Self::build).
///
/// Nodes and edges are recorded as given; all validation happens in
/// `build()`, which fails on the first violation and never hands out a
/// partially built graph.
///
/// # Example
///
/// ```
/// use fleet_core::Location;
/// use fleet_region::Region;
///
/// let region = Region::builder()
///     .add_warehouse("depot", Location::new(0, 0))
///     .add_neighborhood("north", Location::new(0, 4), 0.5)
///     .add_edge("main st", Location::new(0, 0), Location::new(0, 4))
///     .build()
///     .unwrap();
/// assert_eq!(region.node_count(), 2);
/// assert_eq!(region.edges()[0].weight, 4);
/// ```
pub struct RegionBuilder {
    nodes:    Vec<RawNode>,
    edges:    Vec<RawEdge>,
    distance: Box<dyn DistanceCalculator>,
}

struct RawNode {
    name:     String,
    location: Location,
    kind:     NodeKind,
}

struct RawEdge {
    name:   String,
    a:      Location,
    b:      Location,
    weight: Option<u64>,
}

impl RegionBuilder {
    pub fn new() -> Self {
        Self {
            nodes:    Vec::new(),
            edges:    Vec::new(),
            distance: Box::new(EuclideanDistance),
        }
    }

    pub fn add_node(self, name: impl Into<String>, location: Location) -> Self {
        self.push_node(name.into(), location, NodeKind::Plain)
    }

    pub fn add_neighborhood(self, name: impl Into<String>, location: Location, weight_factor: f64) -> Self {
        self.push_node(name.into(), location, NodeKind::Neighborhood { weight_factor })
    }

    pub fn add_warehouse(self, name: impl Into<String>, location: Location) -> Self {
        self.push_node(name.into(), location, NodeKind::Warehouse)
    }

    /// Add an undirected edge whose weight is the ceiling of the distance
    /// between its endpoints under the configured calculator.
    pub fn add_edge(mut self, name: impl Into<String>, a: Location, b: Location) -> Self {
        self.edges.push(RawEdge { name: name.into(), a, b, weight: None });
        self
    }

    /// Add an undirected edge with an explicit weight in ticks.
    pub fn add_weighted_edge(mut self, name: impl Into<String>, a: Location, b: Location, weight: u64) -> Self {
        self.edges.push(RawEdge { name: name.into(), a, b, weight: Some(weight) });
        self
    }

    /// Replace the default Euclidean metric.
    pub fn distance_calculator(mut self, calculator: impl DistanceCalculator + 'static) -> Self {
        self.distance = Box::new(calculator);
        self
    }

    fn push_node(mut self, name: String, location: Location, kind: NodeKind) -> Self {
        self.nodes.push(RawNode { name, location, kind });
        self
    }

    /// Validate and produce the [`Region`].
    ///
    /// # Errors
    ///
    /// - [`RegionError::DuplicateLocation`] if two nodes share a location.
    /// - [`RegionError::InvalidWeightFactor`] for a neighborhood factor
    ///   outside `[0, 1]`.
    /// - [`RegionError::UnknownLocation`] if an edge endpoint is not a node.
    /// - [`RegionError::SelfLoop`] if both endpoints are the same node.
    /// - [`RegionError::DuplicateEdge`] if two edges join the same pair.
    pub fn build(self) -> RegionResult<Region> {
        let mut nodes = Vec::with_capacity(self.nodes.len());
        let mut by_location = FxHashMap::default();

        for (i, raw) in self.nodes.into_iter().enumerate() {
            if let NodeKind::Neighborhood { weight_factor } = raw.kind {
                if !(0.0..=1.0).contains(&weight_factor) {
                    return Err(RegionError::InvalidWeightFactor { name: raw.name, factor: weight_factor });
                }
            }
            let id = NodeId(i as u32);
            if by_location.insert(raw.location, id).is_some() {
                return Err(RegionError::DuplicateLocation(raw.location));
            }
            nodes.push(Node {
                id,
                name: raw.name,
                location: raw.location,
                kind: raw.kind,
                edges: Vec::new(),
            });
        }

        let mut edges: Vec<Edge> = Vec::with_capacity(self.edges.len());
        let mut by_endpoints = FxHashMap::default();

        for (i, raw) in self.edges.into_iter().enumerate() {
            let lookup = |location: Location| {
                by_location
                    .get(&location)
                    .copied()
                    .ok_or_else(|| RegionError::UnknownLocation { edge: raw.name.clone(), location })
            };
            let a = lookup(raw.a)?;
            let b = lookup(raw.b)?;
            if a == b {
                return Err(RegionError::SelfLoop(raw.name));
            }

            let id = EdgeId(i as u32);
            if by_endpoints.insert(pair_key(a, b), id).is_some() {
                return Err(RegionError::DuplicateEdge { name: raw.name, a: raw.a, b: raw.b });
            }

            let weight = raw
                .weight
                .unwrap_or_else(|| self.distance.distance(raw.a, raw.b).ceil() as u64);

            nodes[a.index()].edges.push(id);
            nodes[b.index()].edges.push(id);
            edges.push(Edge { id, name: raw.name, a, b, weight });
        }

        Ok(Region {
            nodes,
            edges,
            by_location,
            by_endpoints,
            distance: self.distance,
        })
    }
}

impl Default for RegionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//! Region error type.

use thiserror::Error;

use fleet_core::{EdgeId, Location, NodeId};

/// Errors produced by `fleet-region`.
///
/// Everything except [`RegionError::PathNotFound`] is a definition error
/// raised by [`RegionBuilder::build`](crate::RegionBuilder::build) or a
/// lookup of a component that is not part of the region.
#[derive(Debug, Error)]
pub enum RegionError {
    #[error("two nodes share location {0}")]
    DuplicateLocation(Location),

    #[error("edge {edge:?} references unknown location {location}")]
    UnknownLocation { edge: String, location: Location },

    #[error("edge {0:?} connects a node to itself")]
    SelfLoop(String),

    #[error("edge {name:?} duplicates an existing edge between {a} and {b}")]
    DuplicateEdge { name: String, a: Location, b: Location },

    #[error("neighborhood {name:?} has weight factor {factor} outside [0, 1]")]
    InvalidWeightFactor { name: String, factor: f64 },

    #[error("node {0} not found in region")]
    NodeNotFound(NodeId),

    #[error("edge {0} not found in region")]
    EdgeNotFound(EdgeId),

    #[error("no node at location {0}")]
    NoNodeAt(Location),

    #[error("no edge between {0} and {1}")]
    NoEdgeBetween(NodeId, NodeId),

    #[error("no path from {from} to {to}")]
    PathNotFound { from: NodeId, to: NodeId },
}

pub type RegionResult<T> = Result<T, RegionError>;

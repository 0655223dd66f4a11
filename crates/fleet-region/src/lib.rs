//! `fleet-region`: the region graph and routing.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                        |
//! |--------------|-----------------------------------------------------------------|
//! | [`region`]   | `Region`, `RegionBuilder`, `Node`, `NodeKind`, `Edge`, `Component` |
//! | [`distance`] | `DistanceCalculator` trait, Euclidean/Manhattan/Chessboard      |
//! | [`path`]     | `PathCalculator` trait, `Path`, `DijkstraPathCalculator`        |
//! | [`error`]    | `RegionError`, `RegionResult<T>`                                |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on `fleet-core` types.     |

pub mod distance;
pub mod error;
pub mod path;
pub mod region;

#[cfg(test)]
mod tests;

pub use distance::{ChessboardDistance, DistanceCalculator, EuclideanDistance, ManhattanDistance};
pub use error::{RegionError, RegionResult};
pub use path::{DijkstraPathCalculator, Path, PathCalculator};
pub use region::{Component, Edge, Node, NodeKind, Region, RegionBuilder};

//! `fleet-core`: foundational types for the fleet delivery simulator.
//!
//! This crate is a dependency of every other `fleet-*` crate.  It has no
//! `fleet-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `VehicleId`, `NodeId`, `EdgeId`, `OrderId`            |
//! | [`location`]    | `Location`: integer grid coordinate, node identity   |
//! | [`time`]        | `Tick`, `TickInterval`, `SimClock`                    |
//! | [`cargo`]       | `CargoType`, `CargoItem`                              |
//! | [`order`]       | `ConfirmedOrder`                                      |
//! | [`rng`]         | `SimRng` (seeded, deterministic)                      |
//! | [`error`]       | `CoreError`, `CoreResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public value types.  |

pub mod cargo;
pub mod error;
pub mod ids;
pub mod location;
pub mod order;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use cargo::{CargoItem, CargoType};
pub use error::{CoreError, CoreResult};
pub use ids::{EdgeId, NodeId, OrderId, VehicleId};
pub use location::Location;
pub use order::ConfirmedOrder;
pub use rng::SimRng;
pub use time::{SimClock, Tick, TickInterval};

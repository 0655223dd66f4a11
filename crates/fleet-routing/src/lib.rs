//! `fleet-routing`: vehicle occupancy, move queues, and the tick engine.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                          |
//! |--------------|-------------------------------------------------------------------|
//! | [`occupied`] | `Occupied`, `VehicleStats`: who sits on one node or edge         |
//! | [`vehicle`]  | `Vehicle`, `ArrivalAction`, `ArrivalContext`                      |
//! | [`event`]    | `Event`, `EventKind`, `EventBus`                                  |
//! | [`manager`]  | `VehicleManager`: the per-tick state machine                     |
//! | [`builder`]  | `VehicleManagerBuilder`                                           |
//! | [`error`]    | `RoutingError`, `RoutingResult<T>`                                |
//!
//! # Movement model (hop-per-transition)
//!
//! Every vehicle occupies exactly one region component at a time.  Its state
//! is implicit in which [`Occupied`] holds it: the warehouse node, another
//! node, or an edge.  [`VehicleManager::tick`] advances the clock by one
//! minute and then:
//!
//! 1. spawns vehicles created since the last tick,
//! 2. ticks every node: a resident vehicle with a queued move steps onto the
//!    edge towards the next node of its path,
//! 3. ticks every edge: a vehicle whose elapsed time reaches the edge weight
//!    steps onto the far node, runs its arrival action if that node ends the
//!    queued path, and an arrival event is posted,
//! 4. drains the event bus, stamping every event with the new tick.
//!
//! Nodes are ticked before edges and a vehicle that entered an edge during
//! this tick is never advanced by the edge tick of the same tick, so each
//! vehicle makes at most one transition per tick.

pub mod builder;
pub mod error;
pub mod event;
pub mod manager;
pub mod occupied;
pub mod vehicle;

#[cfg(test)]
mod tests;

pub use builder::VehicleManagerBuilder;
pub use error::{RoutingError, RoutingResult};
pub use event::{Event, EventBus, EventKind};
pub use manager::VehicleManager;
pub use occupied::{Occupied, VehicleStats};
pub use vehicle::{ArrivalAction, ArrivalContext, Vehicle};

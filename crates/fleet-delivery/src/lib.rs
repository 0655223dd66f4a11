//! `fleet-delivery`: turning orders into vehicle moves.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                          |
//! |---------------|-------------------------------------------------------------------|
//! | [`service`]   | `DeliveryService` trait                                           |
//! | [`basic`]     | `BasicDeliveryService`: earliest-window-first, first-fit loading |
//! | [`strategy`]  | `DeliveryStrategy`: name → constructor registry                  |
//! | [`generator`] | `OrderGenerator` trait, `FixedOrderGenerator`, `RandomOrderGenerator` |
//! | [`error`]     | `DeliveryError`, `DeliveryResult<T>`                              |
//!
//! # Per-tick flow
//!
//! The simulation driver asks its [`OrderGenerator`] for the orders of the
//! coming tick, hands them to [`DeliveryService::deliver`], then calls
//! [`DeliveryService::tick`].  The service posts an `OrderReceived` event per
//! order, advances the vehicle manager, and finally loads idle vehicles at
//! the warehouse.  Loading happens after the event bus was drained, so the
//! matching `LoadOrder` events surface with the next tick.

pub mod basic;
pub mod error;
pub mod generator;
pub mod service;
pub mod strategy;


pub use basic::BasicDeliveryService;
pub use error::{DeliveryError, DeliveryResult};
pub use generator::{FixedOrderGenerator, OrderGenerator, RandomOrderGenerator, RandomOrderGeneratorConfig};
pub use service::DeliveryService;
pub use strategy::DeliveryStrategy;

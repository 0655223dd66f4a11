//! `fleet-sim`: the simulation driver.
//!
//! # Tick loop
//!
//! ```text
//! while current_tick < last_tick and no end was requested:
//!   wait while paused
//!   ① Orders   : OrderGenerator::generate_orders(current_tick + 1)
//!   ② Service  : DeliveryService::deliver(orders); DeliveryService::tick()
//!                 (OrderReceived events, vehicle movement, loading)
//!   ③ Rating   : every Rater::on_tick(events, tick)
//!   ④ Listeners: every SimListener::on_tick(events, tick)
//!   sleep out the rest of `millis_per_tick`
//! listeners: on_simulation_end(tick, scores)
//! ```
//!
//! # Crate layout
//!
//! | Module         | Contents                                                       |
//! |----------------|----------------------------------------------------------------|
//! | [`simulation`] | `Simulation`: owns service, generator, raters, listeners      |
//! | [`builder`]    | `SimulationBuilder`                                            |
//! | [`config`]     | `SimulationConfig`                                             |
//! | [`handle`]     | `SimHandle`: end / pause / resume from any thread             |
//! | [`listener`]   | `SimListener`, `NoopListener`, `TracingListener`, `TickPublisher` |
//! | [`error`]      | `SimError`, `SimResult<T>`                                     |
//!
//! # Threads
//!
//! The loop itself is single threaded.  A [`Simulation`] is `Send`, so it can
//! be moved onto a dedicated thread; other threads then steer it only through
//! a [`SimHandle`] and observe it only through channels fed by a
//! [`TickPublisher`].  Requests take effect at the next tick boundary.

pub mod builder;
pub mod config;
pub mod error;
pub mod handle;
pub mod listener;
pub mod simulation;


pub use builder::SimulationBuilder;
pub use config::SimulationConfig;
pub use error::{SimError, SimResult};
pub use handle::SimHandle;
pub use listener::{NoopListener, Scores, SimListener, SimUpdate, TickPublisher, TracingListener};
pub use simulation::{ListenerId, Simulation};

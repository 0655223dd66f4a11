//! `fleet-output`: simulation output writers.
//!
//! | Backend | Files created                |
//! |---------|------------------------------|
//! | CSV     | `events.csv`, `scores.csv`   |
//!
//! Backends implement [`OutputWriter`] and are driven by
//! [`SimOutputListener`], which implements `fleet_sim::SimListener`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use fleet_output::{CsvWriter, SimOutputListener};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let output = Arc::new(Mutex::new(SimOutputListener::new(writer, sim.vehicle_manager().clock())));
//! sim.add_listener(Arc::clone(&output));
//! sim.run_simulation(Tick(480))?;
//! if let Some(e) = output.lock().unwrap().take_error() { ... }
//! ```
//!
//! Write errors cannot surface through `SimListener`, so the listener keeps
//! the first one for [`SimOutputListener::take_error`].

pub mod csv;
pub mod error;
pub mod listener;
pub mod row;
pub mod writer;


pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use listener::SimOutputListener;
pub use row::{EventRow, ScoreRow};
pub use writer::OutputWriter;

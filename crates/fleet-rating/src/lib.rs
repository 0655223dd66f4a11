//! `fleet-rating`: scoring a run from its event stream.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                   |
//! |---------------|------------------------------------------------------------|
//! | [`rater`]     | `Rater` and `RaterFactory` traits                          |
//! | [`in_time`]   | `InTimeRater` + factory: lateness against delivery windows |
//! | [`amount`]    | `AmountDeliveredRater` + factory: share of orders delivered |
//! | [`criterion`] | `RatingCriterion` enum                                     |
//! | [`registry`]  | `RaterRegistry`: one factory per criterion                |
//! | [`error`]     | `RatingError`, `RatingResult<T>`                           |
//!
//! A rater is created fresh for every run and sees each tick's events
//! exactly once, in the order they were produced.

pub mod amount;
pub mod criterion;
pub mod error;
pub mod in_time;
pub mod rater;
pub mod registry;


pub use amount::{AmountDeliveredRater, AmountDeliveredRaterFactory};
pub use criterion::RatingCriterion;
pub use error::{RatingError, RatingResult};
pub use in_time::{InTimeRater, InTimeRaterFactory};
pub use rater::{Rater, RaterFactory};
pub use registry::RaterRegistry;

//! The `Rater` and `RaterFactory` traits.

use fleet_core::Tick;
use fleet_routing::Event;

use crate::RatingCriterion;

/// Stateful score for one [`RatingCriterion`], fed the event stream tick by
/// tick.
pub trait Rater: Send {
    fn criterion(&self) -> RatingCriterion;

    /// Consume the events of `tick`.  Called once per tick, in tick order.
    fn on_tick(&mut self, events: &[Event], tick: Tick);

    /// The score so far.  `1.0` is perfect; see each rater for its range.
    fn score(&self) -> f64;
}

/// Creates [`Rater`]s with fresh per-run state.
pub trait RaterFactory: Send + Sync {
    fn criterion(&self) -> RatingCriterion;

    fn create(&self) -> Box<dyn Rater>;
}

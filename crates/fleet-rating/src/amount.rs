//! Delivered-share rating.

use fleet_core::Tick;
use fleet_routing::{Event, EventKind};

use crate::{Rater, RaterFactory, RatingCriterion};

/// Scores `delivered / received`, in `[0, 1]`.  A run that received no
/// orders scores `1.0`.
#[derive(Debug, Clone, Default)]
pub struct AmountDeliveredRater {
    received:  u64,
    delivered: u64,
}

impl AmountDeliveredRater {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn received(&self) -> u64 {
        self.received
    }

    pub fn delivered(&self) -> u64 {
        self.delivered
    }
}

impl Rater for AmountDeliveredRater {
    fn criterion(&self) -> RatingCriterion {
        RatingCriterion::AmountDelivered
    }

    fn on_tick(&mut self, events: &[Event], _tick: Tick) {
        for event in events {
            match event.kind {
                EventKind::OrderReceived { .. } => self.received += 1,
                EventKind::DeliverOrder { .. } => self.delivered += 1,
                _ => {}
            }
        }
    }

    fn score(&self) -> f64 {
        if self.received == 0 {
            return 1.0;
        }
        self.delivered as f64 / self.received as f64
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AmountDeliveredRaterFactory;

impl RaterFactory for AmountDeliveredRaterFactory {
    fn criterion(&self) -> RatingCriterion {
        RatingCriterion::AmountDelivered
    }

    fn create(&self) -> Box<dyn Rater> {
        Box::new(AmountDeliveredRater::new())
    }
}

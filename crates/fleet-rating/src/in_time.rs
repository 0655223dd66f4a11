//! Lateness rating.

use rustc_hash::FxHashSet;

use fleet_core::{ConfirmedOrder, OrderId, Tick};
use fleet_routing::{Event, EventKind};

use crate::{Rater, RaterFactory, RatingCriterion};

/// No single order adds more than this many ticks of lateness.
pub const MAX_TICKS_OFF_PER_ORDER: i64 = 15;

/// Rates how late orders are delivered.
///
/// Each delivery adds `clamp(actual − window end − ignored_ticks_off, 0, 15)`
/// ticks to a running total: the first `ignored_ticks_off` ticks of
/// tardiness are free and one order costs at most 15.  The score is
///
/// ```text
/// 1                                                   if total == 0
/// 1 − max_ticks_off · (delivered + pending) / total   otherwise
/// ```
///
/// where `pending` counts received but undelivered orders.  The second branch
/// is not confined to `[0, 1]` and is negative whenever
/// `total < max_ticks_off · orders`.
#[derive(Debug, Clone)]
pub struct InTimeRater {
    ignored_ticks_off: u64,
    max_ticks_off:     u64,
    total_ticks_off:   u64,
    delivered:         u64,
    pending:           FxHashSet<OrderId>,
}

impl InTimeRater {
    pub fn new(ignored_ticks_off: u64, max_ticks_off: u64) -> Self {
        Self {
            ignored_ticks_off,
            max_ticks_off,
            total_ticks_off: 0,
            delivered:       0,
            pending:         FxHashSet::default(),
        }
    }

    /// Lateness one delivered order adds to the total.
    pub fn ticks_off(&self, order: &ConfirmedOrder) -> u64 {
        let Some(actual) = order.actual_delivery_tick() else {
            return 0;
        };
        let late = actual.signed_diff(order.window().end()) - self.ignored_ticks_off as i64;
        late.clamp(0, MAX_TICKS_OFF_PER_ORDER) as u64
    }

    pub fn total_ticks_off(&self) -> u64 {
        self.total_ticks_off
    }

    pub fn delivered(&self) -> u64 {
        self.delivered
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }
}

impl Rater for InTimeRater {
    fn criterion(&self) -> RatingCriterion {
        RatingCriterion::InTime
    }

    fn on_tick(&mut self, events: &[Event], _tick: Tick) {
        for event in events {
            match &event.kind {
                EventKind::OrderReceived { order } => {
                    self.pending.insert(order.id());
                }
                EventKind::DeliverOrder { order, .. } => {
                    self.pending.remove(&order.id());
                    self.total_ticks_off += self.ticks_off(order);
                    self.delivered += 1;
                }
                _ => {}
            }
        }
    }

    fn score(&self) -> f64 {
        if self.total_ticks_off == 0 {
            return 1.0;
        }
        let max_total = self.max_ticks_off * (self.delivered + self.pending.len() as u64);
        1.0 - max_total as f64 / self.total_ticks_off as f64
    }
}

/// Creates [`InTimeRater`]s.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InTimeRaterFactory {
    pub ignored_ticks_off: u64,
    pub max_ticks_off:     u64,
}

impl Default for InTimeRaterFactory {
    fn default() -> Self {
        Self { ignored_ticks_off: 5, max_ticks_off: 25 }
    }
}

impl RaterFactory for InTimeRaterFactory {
    fn criterion(&self) -> RatingCriterion {
        RatingCriterion::InTime
    }

    fn create(&self) -> Box<dyn Rater> {
        Box::new(InTimeRater::new(self.ignored_ticks_off, self.max_ticks_off))
    }
}

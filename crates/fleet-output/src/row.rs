//! Plain data row types written by output backends.

use fleet_routing::Event;

/// One simulation event, flattened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventRow {
    pub tick:           u64,
    pub unix_time_secs: i64,
    /// Snake-case event name, e.g. `deliver_order`.
    pub event:          &'static str,
    pub vehicle:        Option<u32>,
    pub node:           Option<u32>,
    pub order:          Option<u64>,
}

impl EventRow {
    pub fn from_event(event: &Event, unix_time_secs: i64) -> Self {
        Self {
            tick: event.tick.0,
            unix_time_secs,
            event: event.name(),
            vehicle: event.vehicle().map(|v| v.0),
            node: event.node().map(|n| n.0),
            order: event.order().map(|o| o.id().0),
        }
    }
}

/// One final score.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreRow {
    pub criterion:  &'static str,
    pub score:      f64,
    pub final_tick: u64,
}

//! Per-tick listeners.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use std::sync::mpsc::{self, Receiver, Sender};

use fleet_core::Tick;
use fleet_rating::RatingCriterion;
use fleet_routing::{Event, EventKind};
use tracing::info;

/// Final score per registered criterion.
pub type Scores = BTreeMap<RatingCriterion, f64>;

/// Callbacks invoked by [`Simulation`](crate::Simulation) on the simulation
/// thread.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.  Listeners must not block for long:
/// the loop waits for them.
pub trait SimListener: Send {
    /// Called once per tick with that tick's events, after the raters.
    fn on_tick(&mut self, _events: &[Event], _tick: Tick) {}

    /// Called once when [`run_simulation`](crate::Simulation::run_simulation)
    /// returns normally.
    fn on_simulation_end(&mut self, _tick: Tick, _scores: &Scores) {}
}

/// A [`SimListener`] that does nothing.
pub struct NoopListener;

impl SimListener for NoopListener {}

/// Shares a listener with the thread that started the run, e.g. to inspect
/// its state once `run_simulation` returns.  A poisoned lock skips the call.
impl<L: SimListener> SimListener for Arc<Mutex<L>> {
    fn on_tick(&mut self, events: &[Event], tick: Tick) {
        if let Ok(mut inner) = self.lock() {
            inner.on_tick(events, tick);
        }
    }

    fn on_simulation_end(&mut self, tick: Tick, scores: &Scores) {
        if let Ok(mut inner) = self.lock() {
            inner.on_simulation_end(tick, scores);
        }
    }
}

// ── TracingListener ───────────────────────────────────────────────────────────

/// Logs a progress line every `interval` ticks and the final scores.
pub struct TracingListener {
    interval:  u64,
    received:  u64,
    delivered: u64,
}

impl TracingListener {
    /// `interval` of 0 disables the per-tick lines.
    pub fn new(interval: u64) -> Self {
        Self { interval, received: 0, delivered: 0 }
    }
}

impl SimListener for TracingListener {
    fn on_tick(&mut self, events: &[Event], tick: Tick) {
        for event in events {
            match event.kind {
                EventKind::OrderReceived { .. } => self.received += 1,
                EventKind::DeliverOrder { .. } => self.delivered += 1,
                _ => {}
            }
        }
        if self.interval > 0 && tick.0.is_multiple_of(self.interval) {
            info!(%tick, events = events.len(), received = self.received, delivered = self.delivered, "progress");
        }
    }

    fn on_simulation_end(&mut self, tick: Tick, scores: &Scores) {
        for (criterion, score) in scores {
            info!(%tick, %criterion, score, "final score");
        }
    }
}

// ── TickPublisher ─────────────────────────────────────────────────────────────

/// Message sent to [`TickPublisher`] subscribers.
#[derive(Debug, Clone)]
pub enum SimUpdate {
    /// One completed tick.  The event batch is shared by all subscribers.
    Tick { tick: Tick, events: Arc<[Event]> },

    /// The run ended.
    Finished { tick: Tick, scores: Scores },
}

/// Fans every tick out to any number of [`Receiver`]s.
///
/// The simulation thread is the single producer; each subscriber reads its
/// own channel at its own pace.  Subscribers whose receiver was dropped are
/// forgotten on the next send.
#[derive(Default)]
pub struct TickPublisher {
    subscribers: Vec<Sender<SimUpdate>>,
}

impl TickPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a new channel.  Only updates published after this call arrive.
    pub fn subscribe(&mut self) -> Receiver<SimUpdate> {
        let (tx, rx) = mpsc::channel();
        self.subscribers.push(tx);
        rx
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    fn publish(&mut self, update: SimUpdate) {
        self.subscribers.retain(|tx| tx.send(update.clone()).is_ok());
    }
}

impl SimListener for TickPublisher {
    fn on_tick(&mut self, events: &[Event], tick: Tick) {
        if self.subscribers.is_empty() {
            return;
        }
        let events: Arc<[Event]> = events.into();
        self.publish(SimUpdate::Tick { tick, events });
    }

    fn on_simulation_end(&mut self, tick: Tick, scores: &Scores) {
        self.publish(SimUpdate::Finished { tick, scores: scores.clone() });
    }
}

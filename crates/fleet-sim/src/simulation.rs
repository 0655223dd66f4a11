//! The `Simulation` struct and its tick loop.

use std::thread;
use std::time::{Duration, Instant};

use fleet_core::Tick;
use fleet_delivery::{DeliveryService, OrderGenerator};
use fleet_rating::{Rater, RatingCriterion};
use fleet_routing::{Event, VehicleManager};
use tracing::{debug, info};

use crate::{Scores, SimHandle, SimListener, SimResult, SimulationConfig, SimulationBuilder};

/// Token returned by [`Simulation::add_listener`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// The simulation driver.
///
/// Owns the delivery service (and through it the vehicle manager), the order
/// generator, one rater per criterion, and the listeners.  Nothing outside
/// the driver mutates this state while a run is in progress.
///
/// Create via [`SimulationBuilder`].
pub struct Simulation {
    pub(crate) config:        SimulationConfig,
    pub(crate) service:       Box<dyn DeliveryService>,
    pub(crate) generator:     Box<dyn OrderGenerator>,
    pub(crate) raters:        Vec<Box<dyn Rater>>,
    pub(crate) listeners:     Vec<(ListenerId, Box<dyn SimListener>)>,
    pub(crate) next_listener: u64,
    pub(crate) handle:        SimHandle,
}

impl Simulation {
    pub fn builder(service: Box<dyn DeliveryService>) -> SimulationBuilder {
        SimulationBuilder::new(service)
    }

    // ── Public API ────────────────────────────────────────────────────────

    /// Run ticks until `last_tick` has been simulated or an end is requested
    /// through a [`SimHandle`], then notify listeners and return the scores.
    ///
    /// Blocks the calling thread.  A stale end request from an earlier run
    /// is discarded on entry.
    pub fn run_simulation(&mut self, last_tick: Tick) -> SimResult<Scores> {
        self.handle.clear_end();
        info!(from = %self.current_tick(), to = %last_tick, "simulation started");

        while self.current_tick() < last_tick {
            self.handle.wait_while_paused();
            if self.handle.is_end_requested() {
                info!(tick = %self.current_tick(), "end requested");
                break;
            }
            let started = Instant::now();
            self.run_current_tick()?;
            self.pace(started);
        }

        let tick = self.current_tick();
        let scores = self.scores();
        info!(%tick, ?scores, "simulation finished");
        for (_, listener) in &mut self.listeners {
            listener.on_simulation_end(tick, &scores);
        }
        Ok(scores)
    }

    /// Simulate exactly one tick and return its events.  Ignores pause and
    /// end requests.
    pub fn run_current_tick(&mut self) -> SimResult<Vec<Event>> {
        let tick = self.current_tick() + 1;
        let orders = self.generator.generate_orders(tick);
        if !orders.is_empty() {
            debug!(%tick, count = orders.len(), "orders arrived");
        }
        self.service.deliver(orders);
        let events = self.service.tick()?;

        for rater in &mut self.raters {
            rater.on_tick(&events, tick);
        }
        for (_, listener) in &mut self.listeners {
            listener.on_tick(&events, tick);
        }
        Ok(events)
    }

    /// Request a stop at the next tick boundary.
    pub fn end_simulation(&self) {
        self.handle.end_simulation();
    }

    /// A handle for steering this simulation from another thread.
    pub fn handle(&self) -> SimHandle {
        self.handle.clone()
    }

    pub fn add_listener(&mut self, listener: impl SimListener + 'static) -> ListenerId {
        self.add_boxed_listener(Box::new(listener))
    }

    pub(crate) fn add_boxed_listener(&mut self, listener: Box<dyn SimListener>) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, listener));
        id
    }

    pub fn remove_listener(&mut self, id: ListenerId) -> Option<Box<dyn SimListener>> {
        let pos = self.listeners.iter().position(|(l, _)| *l == id)?;
        Some(self.listeners.remove(pos).1)
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// The last simulated tick (`T0` before the first).
    pub fn current_tick(&self) -> Tick {
        self.service.vehicle_manager().current_time()
    }

    pub fn delivery_service(&self) -> &dyn DeliveryService {
        self.service.as_ref()
    }

    pub fn vehicle_manager(&self) -> &VehicleManager {
        self.service.vehicle_manager()
    }

    pub fn score(&self, criterion: RatingCriterion) -> Option<f64> {
        self.raters
            .iter()
            .find(|r| r.criterion() == criterion)
            .map(|r| r.score())
    }

    pub fn scores(&self) -> Scores {
        self.raters.iter().map(|r| (r.criterion(), r.score())).collect()
    }

    // ── Internals ─────────────────────────────────────────────────────────

    fn pace(&self, started: Instant) {
        if !self.config.is_paced() {
            return;
        }
        let budget = Duration::from_millis(self.config.millis_per_tick);
        if let Some(rest) = budget.checked_sub(started.elapsed()) {
            thread::sleep(rest);
        }
    }
}

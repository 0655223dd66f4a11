//! Earliest-window-first scheduling with greedy first-fit loading.

use fleet_core::{ConfirmedOrder, Location, NodeId, OrderId, VehicleId};
use fleet_region::RegionError;
use fleet_routing::{Event, EventKind, RoutingResult, VehicleManager};
use tracing::{debug, warn};

use crate::DeliveryService;

/// The reference scheduler.
///
/// Each tick, after the vehicles have moved:
///
/// 1. pending orders are stably sorted by window start, so ties keep their
///    arrival order;
/// 2. every idle vehicle at the warehouse scans the pending list once and
///    takes each order that still fits by weight and cargo type;
/// 3. a vehicle that took anything is queued to each delivery node in load
///    order, delivering on arrival, and then back to the warehouse.
///
/// This is a heuristic, not a bin-packing solver.
pub struct BasicDeliveryService {
    manager:       VehicleManager,
    incoming:      Vec<ConfirmedOrder>,
    pending:       Vec<ConfirmedOrder>,
    undeliverable: Vec<ConfirmedOrder>,
}

impl BasicDeliveryService {
    pub fn new(manager: VehicleManager) -> Self {
        Self {
            manager,
            incoming:      Vec::new(),
            pending:       Vec::new(),
            undeliverable: Vec::new(),
        }
    }

    /// The node an order is delivered to, if it exists and can be reached
    /// from the warehouse.
    fn delivery_node(&self, order: &ConfirmedOrder) -> Option<NodeId> {
        let node = self.manager.region().node_at(order.location())?.id;
        let warehouse = self.manager.warehouse_node().id;
        self.manager.path(warehouse, node).ok().map(|_| node)
    }

    fn accept_incoming(&mut self) {
        for order in std::mem::take(&mut self.incoming) {
            self.manager.post_event(EventKind::OrderReceived { order: order.clone() });
            if self.delivery_node(&order).is_some() {
                self.pending.push(order);
            } else {
                warn!(order = %order.id(), location = %order.location(), "order location unreachable; dropped");
                self.undeliverable.push(order);
            }
        }
    }

    fn assign_idle_vehicles(&mut self) -> RoutingResult<()> {
        self.pending.sort_by_key(|o| o.window().start());

        for vehicle in self.manager.idle_vehicles() {
            let mut loaded = Vec::new();
            let mut remaining = Vec::with_capacity(self.pending.len());
            for order in std::mem::take(&mut self.pending) {
                if self.manager.vehicle(vehicle)?.can_load(&order) {
                    loaded.push((order.id(), order.location()));
                    self.manager.load_order(vehicle, order)?;
                } else {
                    remaining.push(order);
                }
            }
            self.pending = remaining;

            if !loaded.is_empty() {
                self.dispatch(vehicle, &loaded)?;
            }
        }
        Ok(())
    }

    fn dispatch(&mut self, vehicle: VehicleId, loaded: &[(OrderId, Location)]) -> RoutingResult<()> {
        debug!(%vehicle, orders = loaded.len(), "vehicle dispatched");
        for &(order, location) in loaded {
            let node = self
                .manager
                .region()
                .node_at(location)
                .map(|n| n.id)
                .ok_or(RegionError::NoNodeAt(location))?;
            self.manager
                .move_queued_then(vehicle, node, move |ctx| ctx.deliver_order(order))?;
        }
        let warehouse = self.manager.warehouse_node().id;
        self.manager.move_queued(vehicle, warehouse)
    }
}

impl DeliveryService for BasicDeliveryService {
    fn deliver(&mut self, orders: Vec<ConfirmedOrder>) {
        self.incoming.extend(orders);
    }

    fn tick(&mut self) -> RoutingResult<Vec<Event>> {
        self.accept_incoming();
        let events = self.manager.tick()?;
        self.assign_idle_vehicles()?;
        Ok(events)
    }

    fn vehicle_manager(&self) -> &VehicleManager {
        &self.manager
    }

    fn pending_orders(&self) -> &[ConfirmedOrder] {
        &self.pending
    }

    fn undeliverable_orders(&self) -> &[ConfirmedOrder] {
        &self.undeliverable
    }
}

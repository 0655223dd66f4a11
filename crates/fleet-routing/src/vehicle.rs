//! Vehicles, their move queues, and arrival actions.

use std::collections::{BTreeSet, VecDeque};
use std::fmt;

use fleet_core::{CargoType, ConfirmedOrder, NodeId, OrderId, Tick, VehicleId};
use fleet_region::{Component, Node};

use crate::{EventBus, EventKind, RoutingError, RoutingResult};

/// Callback run exactly once when a vehicle reaches the destination it was
/// queued with.
pub type ArrivalAction = Box<dyn FnOnce(&mut ArrivalContext<'_>) -> RoutingResult<()> + Send>;

/// One entry of a vehicle's move queue: the rest of a precomputed path.
pub(crate) struct QueuedPath {
    /// Nodes still to reach, in order.  Empty once the destination is reached.
    pub(crate) remaining:   VecDeque<NodeId>,
    pub(crate) destination: NodeId,
    pub(crate) action:      Option<ArrivalAction>,
}

// ── Vehicle ───────────────────────────────────────────────────────────────────

/// A delivery vehicle.
///
/// Vehicles are created by the [`VehicleManager`](crate::VehicleManager) and
/// only mutated through it; the public API here is read-only.
pub struct Vehicle {
    pub(crate) id:         VehicleId,
    pub(crate) capacity:   f64,
    pub(crate) compatible: BTreeSet<CargoType>,
    pub(crate) orders:     Vec<ConfirmedOrder>,
    pub(crate) queue:      VecDeque<QueuedPath>,
    /// Node or edge the vehicle is on.  Before spawning: its placement node.
    pub(crate) location:   Component,
    pub(crate) spawned:    bool,
}

impl Vehicle {
    pub(crate) fn new(id: VehicleId, capacity: f64, compatible: BTreeSet<CargoType>, placement: NodeId) -> Self {
        Self {
            id,
            capacity,
            compatible,
            orders: Vec::new(),
            queue: VecDeque::new(),
            location: Component::Node(placement),
            spawned: false,
        }
    }

    #[inline]
    pub fn id(&self) -> VehicleId {
        self.id
    }

    /// Maximum total cargo weight in kilograms.
    #[inline]
    pub fn capacity(&self) -> f64 {
        self.capacity
    }

    pub fn compatible_cargo(&self) -> &BTreeSet<CargoType> {
        &self.compatible
    }

    pub fn supports(&self, cargo: CargoType) -> bool {
        self.compatible.contains(&cargo)
    }

    /// Orders currently on board, in load order.
    pub fn orders(&self) -> &[ConfirmedOrder] {
        &self.orders
    }

    /// Total weight on board.
    pub fn current_weight(&self) -> f64 {
        self.orders.iter().map(ConfirmedOrder::weight).sum()
    }

    /// Capacity left.
    pub fn free_capacity(&self) -> f64 {
        self.capacity - self.current_weight()
    }

    /// `true` if `order` fits by weight and every cargo type is supported.
    pub fn can_load(&self, order: &ConfirmedOrder) -> bool {
        self.first_load_violation(order).is_none()
    }

    pub(crate) fn first_load_violation(&self, order: &ConfirmedOrder) -> Option<RoutingError> {
        let load = self.current_weight();
        let weight = order.weight();
        if load + weight > self.capacity {
            return Some(RoutingError::CapacityExceeded {
                vehicle: self.id,
                capacity: self.capacity,
                load,
                weight,
            });
        }
        order
            .cargo_types()
            .find(|c| !self.supports(*c))
            .map(|cargo| RoutingError::CargoNotSupported { vehicle: self.id, cargo })
    }

    /// The component the vehicle currently occupies.
    #[inline]
    pub fn location(&self) -> Component {
        self.location
    }

    /// The node the vehicle is on, or `None` while it is on an edge.
    pub fn current_node(&self) -> Option<NodeId> {
        match self.location {
            Component::Node(n) => Some(n),
            Component::Edge(_) => None,
        }
    }

    #[inline]
    pub fn is_spawned(&self) -> bool {
        self.spawned
    }

    pub fn has_queued_moves(&self) -> bool {
        !self.queue.is_empty()
    }

    /// Destinations still queued, in order.
    pub fn queued_destinations(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.queue.iter().map(|p| p.destination)
    }

    /// The node the vehicle is travelling to right now, if moving.
    pub fn next_node(&self) -> Option<NodeId> {
        self.queue.iter().find_map(|p| p.remaining.front().copied())
    }

    /// Where a newly queued move starts from: the last queued destination,
    /// or the current node when the queue is empty.
    pub(crate) fn queue_tail(&self) -> Option<NodeId> {
        self.queue.back().map(|p| p.destination).or(self.current_node())
    }
}

impl fmt::Debug for Vehicle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Vehicle")
            .field("id", &self.id)
            .field("capacity", &self.capacity)
            .field("compatible", &self.compatible)
            .field("orders", &self.orders.len())
            .field("queued", &self.queue.len())
            .field("location", &self.location)
            .field("spawned", &self.spawned)
            .finish()
    }
}

// ── ArrivalContext ────────────────────────────────────────────────────────────

/// What an [`ArrivalAction`] may see and do.
pub struct ArrivalContext<'a> {
    pub(crate) vehicle: &'a mut Vehicle,
    pub(crate) node:    &'a Node,
    pub(crate) tick:    Tick,
    pub(crate) events:  &'a mut EventBus,
}

impl ArrivalContext<'_> {
    pub fn vehicle(&self) -> &Vehicle {
        self.vehicle
    }

    /// The node just reached.
    pub fn node(&self) -> &Node {
        self.node
    }

    pub fn tick(&self) -> Tick {
        self.tick
    }

    /// Queue an event for the current tick.
    pub fn post(&mut self, kind: EventKind) {
        self.events.post(kind);
    }

    /// Hand an on-board order over at the current node: unload it, record the
    /// delivery tick, and post a `DeliverOrder` event.
    ///
    /// # Errors
    /// [`RoutingError::OrderNotOnVehicle`] if the order is not on board.
    pub fn deliver_order(&mut self, order: OrderId) -> RoutingResult<()> {
        let vehicle = self.vehicle.id;
        let pos = self
            .vehicle
            .orders
            .iter()
            .position(|o| o.id() == order)
            .ok_or(RoutingError::OrderNotOnVehicle { vehicle, order })?;

        let mut delivered = self.vehicle.orders.remove(pos);
        delivered.mark_delivered(self.tick);
        tracing::debug!(%vehicle, %order, node = %self.node.name, tick = %self.tick, "order delivered");
        self.events.post(EventKind::DeliverOrder {
            vehicle,
            node: self.node.id,
            order: delivered,
        });
        Ok(())
    }
}

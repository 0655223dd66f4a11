//! Domain events and the per-tick event bus.
//!
//! Events are posted untimestamped while a tick runs and stamped all at once
//! when the bus is drained at the end of the tick.  Post order is preserved:
//! consumers see events in the order the operations producing them ran.

use fleet_core::{ConfirmedOrder, EdgeId, NodeId, Tick, VehicleId};

/// What happened.
#[derive(Debug, Clone, PartialEq)]
pub enum EventKind {
    /// A vehicle became active on its placement node.
    Spawn { vehicle: VehicleId, node: NodeId },

    /// A vehicle reached a plain node.
    ArrivedAtNode { vehicle: VehicleId, node: NodeId, last_edge: EdgeId },

    /// A vehicle reached a neighborhood.
    ArrivedAtNeighborhood { vehicle: VehicleId, node: NodeId, last_edge: EdgeId },

    /// A vehicle returned to the warehouse.
    ArrivedAtWarehouse { vehicle: VehicleId, node: NodeId, last_edge: EdgeId },

    /// An order entered the system.
    OrderReceived { order: ConfirmedOrder },

    /// An order was loaded onto a vehicle at the warehouse.
    LoadOrder { vehicle: VehicleId, order: ConfirmedOrder },

    /// An order was handed over.  `order.actual_delivery_tick()` is set.
    DeliverOrder { vehicle: VehicleId, node: NodeId, order: ConfirmedOrder },
}

/// A timestamped [`EventKind`].
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    /// The tick during which the event was produced.
    pub tick: Tick,
    pub kind: EventKind,
}

impl Event {
    /// The vehicle involved, if any.
    pub fn vehicle(&self) -> Option<VehicleId> {
        match &self.kind {
            EventKind::Spawn { vehicle, .. }
            | EventKind::ArrivedAtNode { vehicle, .. }
            | EventKind::ArrivedAtNeighborhood { vehicle, .. }
            | EventKind::ArrivedAtWarehouse { vehicle, .. }
            | EventKind::LoadOrder { vehicle, .. }
            | EventKind::DeliverOrder { vehicle, .. } => Some(*vehicle),
            EventKind::OrderReceived { .. } => None,
        }
    }

    /// The node involved, if any.
    pub fn node(&self) -> Option<NodeId> {
        match &self.kind {
            EventKind::Spawn { node, .. }
            | EventKind::ArrivedAtNode { node, .. }
            | EventKind::ArrivedAtNeighborhood { node, .. }
            | EventKind::ArrivedAtWarehouse { node, .. }
            | EventKind::DeliverOrder { node, .. } => Some(*node),
            EventKind::OrderReceived { .. } | EventKind::LoadOrder { .. } => None,
        }
    }

    /// The order involved, if any.
    pub fn order(&self) -> Option<&ConfirmedOrder> {
        match &self.kind {
            EventKind::OrderReceived { order }
            | EventKind::LoadOrder { order, .. }
            | EventKind::DeliverOrder { order, .. } => Some(order),
            _ => None,
        }
    }

    /// `true` for the three arrival variants.
    pub fn is_arrival(&self) -> bool {
        matches!(
            self.kind,
            EventKind::ArrivedAtNode { .. }
                | EventKind::ArrivedAtNeighborhood { .. }
                | EventKind::ArrivedAtWarehouse { .. }
        )
    }

    /// Stable snake_case name of the variant, for logs and output files.
    pub fn name(&self) -> &'static str {
        match self.kind {
            EventKind::Spawn { .. } => "spawn",
            EventKind::ArrivedAtNode { .. } => "arrived_at_node",
            EventKind::ArrivedAtNeighborhood { .. } => "arrived_at_neighborhood",
            EventKind::ArrivedAtWarehouse { .. } => "arrived_at_warehouse",
            EventKind::OrderReceived { .. } => "order_received",
            EventKind::LoadOrder { .. } => "load_order",
            EventKind::DeliverOrder { .. } => "deliver_order",
        }
    }
}

/// FIFO of not-yet-timestamped events for the current tick.
#[derive(Debug, Default)]
pub struct EventBus {
    queue: Vec<EventKind>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event.  It is timestamped when the bus is next drained.
    pub fn post(&mut self, kind: EventKind) {
        self.queue.push(kind);
    }

    /// Stamp every queued event with `tick`, return them in post order, and
    /// leave the bus empty.
    pub fn drain(&mut self, tick: Tick) -> Vec<Event> {
        self.queue
            .drain(..)
            .map(|kind| Event { tick, kind })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

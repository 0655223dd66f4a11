//! The `DeliveryService` trait.

use fleet_core::ConfirmedOrder;
use fleet_routing::{Event, RoutingResult, VehicleManager};

/// Owns a [`VehicleManager`] and decides which vehicle carries which order.
///
/// The driver calls [`deliver`](Self::deliver) with the orders that arrived
/// for a tick and then [`tick`](Self::tick) exactly once.  Implementations
/// must post one `OrderReceived` event per delivered order before the
/// manager's events for the tick are drained, so the event is always seen
/// before any `LoadOrder` or `DeliverOrder` for the same order.
///
/// `Send` so the whole service can be moved onto a simulation thread.
pub trait DeliveryService: Send {
    /// Hand over newly confirmed orders.  They take part in the next
    /// [`tick`](Self::tick).
    fn deliver(&mut self, orders: Vec<ConfirmedOrder>);

    /// Run one tick: accept orders, advance the vehicles, assign work.
    /// Returns the tick's events in production order.
    fn tick(&mut self) -> RoutingResult<Vec<Event>>;

    fn vehicle_manager(&self) -> &VehicleManager;

    /// Accepted orders not yet loaded onto a vehicle.
    fn pending_orders(&self) -> &[ConfirmedOrder];

    /// Orders dropped at intake because their location cannot be reached.
    fn undeliverable_orders(&self) -> &[ConfirmedOrder] {
        &[]
    }
}

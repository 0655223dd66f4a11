//! Confirmed delivery orders.

use crate::{CargoItem, CargoType, Location, OrderId, Tick, TickInterval};

/// An order accepted for delivery.
///
/// `actual_delivery_tick` is `None` until the order is handed over, and is
/// set exactly once by [`ConfirmedOrder::mark_delivered`].
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConfirmedOrder {
    id:                   OrderId,
    location:             Location,
    window:               TickInterval,
    items:                Vec<CargoItem>,
    actual_delivery_tick: Option<Tick>,
}

impl ConfirmedOrder {
    pub fn new(id: OrderId, location: Location, window: TickInterval, items: Vec<CargoItem>) -> Self {
        Self {
            id,
            location,
            window,
            items,
            actual_delivery_tick: None,
        }
    }

    #[inline]
    pub fn id(&self) -> OrderId {
        self.id
    }

    /// Location of the delivery node.
    #[inline]
    pub fn location(&self) -> Location {
        self.location
    }

    /// The delivery window `[start, end]`.
    #[inline]
    pub fn window(&self) -> TickInterval {
        self.window
    }

    pub fn items(&self) -> &[CargoItem] {
        &self.items
    }

    /// Total cargo weight in kilograms.
    pub fn weight(&self) -> f64 {
        self.items.iter().map(|i| i.weight).sum()
    }

    /// Distinct cargo kinds in this order, in first-seen order.
    pub fn cargo_types(&self) -> impl Iterator<Item = CargoType> + '_ {
        self.items
            .iter()
            .enumerate()
            .filter(|(i, item)| !self.items[..*i].iter().any(|prev| prev.kind == item.kind))
            .map(|(_, item)| item.kind)
    }

    #[inline]
    pub fn actual_delivery_tick(&self) -> Option<Tick> {
        self.actual_delivery_tick
    }

    #[inline]
    pub fn is_delivered(&self) -> bool {
        self.actual_delivery_tick.is_some()
    }

    /// Record the delivery tick.  Returns `false` (and changes nothing) if the
    /// order was already delivered.
    pub fn mark_delivered(&mut self, tick: Tick) -> bool {
        if self.actual_delivery_tick.is_some() {
            return false;
        }
        self.actual_delivery_tick = Some(tick);
        true
    }
}

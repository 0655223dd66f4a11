//! Order sources.
//!
//! The simulation driver pulls orders from an [`OrderGenerator`] once per
//! tick.  Generated orders need not arrive sorted by window start; the
//! delivery service sorts its pending list itself.

use std::collections::BTreeMap;

use rand::distributions::WeightedIndex;

use fleet_core::{CargoItem, CargoType, ConfirmedOrder, Location, OrderId, SimRng, Tick, TickInterval};
use fleet_region::{NodeKind, Region};

use crate::{DeliveryError, DeliveryResult};

/// Produces the orders that arrive at a tick.
pub trait OrderGenerator: Send {
    /// Orders arriving at `tick`.  Each tick is asked for at most once.
    fn generate_orders(&mut self, tick: Tick) -> Vec<ConfirmedOrder>;
}

impl<F> OrderGenerator for F
where
    F: FnMut(Tick) -> Vec<ConfirmedOrder> + Send,
{
    fn generate_orders(&mut self, tick: Tick) -> Vec<ConfirmedOrder> {
        self(tick)
    }
}

// ── FixedOrderGenerator ───────────────────────────────────────────────────────

/// A scripted order stream, mostly for tests.
#[derive(Debug, Default, Clone)]
pub struct FixedOrderGenerator {
    orders: BTreeMap<Tick, Vec<ConfirmedOrder>>,
}

impl FixedOrderGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `order` to arrive at `tick`.  Orders for the same tick arrive
    /// in the order they were added.
    pub fn with_order(mut self, tick: Tick, order: ConfirmedOrder) -> Self {
        self.orders.entry(tick).or_default().push(order);
        self
    }

    /// Orders not handed out yet.
    pub fn remaining(&self) -> usize {
        self.orders.values().map(Vec::len).sum()
    }
}

impl FromIterator<(Tick, ConfirmedOrder)> for FixedOrderGenerator {
    fn from_iter<I: IntoIterator<Item = (Tick, ConfirmedOrder)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::new(), |generator, (tick, order)| generator.with_order(tick, order))
    }
}

impl OrderGenerator for FixedOrderGenerator {
    fn generate_orders(&mut self, tick: Tick) -> Vec<ConfirmedOrder> {
        self.orders.remove(&tick).unwrap_or_default()
    }
}

// ── RandomOrderGenerator ──────────────────────────────────────────────────────

/// Parameters of a [`RandomOrderGenerator`].
#[derive(Debug, Clone)]
pub struct RandomOrderGeneratorConfig {
    /// Total number of orders over the whole run.
    pub order_count:       usize,
    /// Length of each delivery window in ticks.
    pub delivery_interval: u64,
    /// Upper bound of an order's total weight.
    pub max_weight:        f64,
    /// Orders arrive uniformly in `1..=last_tick`; tick 0 is never run.
    pub last_tick:         u64,
    pub seed:              u64,
    /// Cargo types drawn from, uniformly.
    pub cargo_types:       Vec<CargoType>,
}

impl Default for RandomOrderGeneratorConfig {
    fn default() -> Self {
        Self {
            order_count:       1000,
            delivery_interval: 15,
            max_weight:        0.5,
            last_tick:         480,
            seed:              42,
            cargo_types:       vec![CargoType::PIZZA, CargoType::PASTA, CargoType::ICE_CREAM, CargoType::SAUCE],
        }
    }
}

/// Seeded random orders over the region's neighborhoods.
///
/// The whole stream is drawn up front from one [`SimRng`]: a neighborhood is
/// picked with probability proportional to its weight factor, the arrival
/// tick uniformly, and one to three items whose weights add up to at most
/// `max_weight`.  Order ids follow arrival order.  The same config and
/// region always yield the same stream.
#[derive(Debug, Clone)]
pub struct RandomOrderGenerator {
    orders: BTreeMap<Tick, Vec<ConfirmedOrder>>,
}

impl RandomOrderGenerator {
    /// # Errors
    /// [`DeliveryError::NoNeighborhoods`] if the region has none, and
    /// [`DeliveryError::InvalidConfig`] for an empty cargo type list, a
    /// non-positive `max_weight`, a zero `last_tick`, or all-zero
    /// neighborhood weights.
    pub fn new(config: &RandomOrderGeneratorConfig, region: &Region) -> DeliveryResult<Self> {
        let targets: Vec<(Location, f64)> = region
            .neighborhoods()
            .filter_map(|n| match n.kind {
                NodeKind::Neighborhood { weight_factor } => Some((n.location, weight_factor)),
                NodeKind::Plain | NodeKind::Warehouse => None,
            })
            .collect();
        if targets.is_empty() {
            return Err(DeliveryError::NoNeighborhoods);
        }
        if config.order_count == 0 {
            return Ok(Self { orders: BTreeMap::new() });
        }
        if config.cargo_types.is_empty() {
            return Err(DeliveryError::InvalidConfig("cargo_types is empty".into()));
        }
        if !config.max_weight.is_finite() || config.max_weight <= 0.0 {
            return Err(DeliveryError::InvalidConfig(format!("max_weight must be positive, got {}", config.max_weight)));
        }
        if config.last_tick == 0 {
            return Err(DeliveryError::InvalidConfig("last_tick must be positive".into()));
        }
        let pick = WeightedIndex::new(targets.iter().map(|(_, w)| *w))
            .map_err(|e| DeliveryError::InvalidConfig(format!("neighborhood weights: {e}")))?;

        let mut rng = SimRng::new(config.seed);
        let mut drafts = Vec::with_capacity(config.order_count);
        for _ in 0..config.order_count {
            let tick = rng.tick_in(Tick(1)..=Tick(config.last_tick));
            let location = targets[rng.weighted(&pick)].0;

            let count = rng.gen_range(1..=3usize);
            let total = config.max_weight * rng.fraction();
            let mut items = Vec::with_capacity(count);
            for _ in 0..count {
                let kind = rng
                    .choose(&config.cargo_types)
                    .copied()
                    .unwrap_or(CargoType::PIZZA);
                items.push(CargoItem::new(kind, total / count as f64)?);
            }
            drafts.push((tick, location, items));
        }
        drafts.sort_by_key(|(tick, _, _)| *tick);

        let mut orders: BTreeMap<Tick, Vec<ConfirmedOrder>> = BTreeMap::new();
        for (i, (tick, location, items)) in drafts.into_iter().enumerate() {
            let window = TickInterval::new(tick, tick + config.delivery_interval)?;
            let order = ConfirmedOrder::new(OrderId(i as u64), location, window, items);
            orders.entry(tick).or_default().push(order);
        }
        Ok(Self { orders })
    }

    pub fn remaining(&self) -> usize {
        self.orders.values().map(Vec::len).sum()
    }
}

impl OrderGenerator for RandomOrderGenerator {
    fn generate_orders(&mut self, tick: Tick) -> Vec<ConfirmedOrder> {
        self.orders.remove(&tick).unwrap_or_default()
    }
}

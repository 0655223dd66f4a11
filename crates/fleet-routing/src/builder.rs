//! Fluent builder for constructing a [`VehicleManager`].

use fleet_core::{CargoType, NodeId, SimClock, Tick};
use fleet_region::{DijkstraPathCalculator, Node, PathCalculator, Region};

use crate::{RoutingError, RoutingResult, VehicleManager};

type Placement = Box<dyn Fn(&Node) -> bool>;

struct VehicleSpec {
    capacity:   f64,
    compatible: Vec<CargoType>,
    placement:  Option<Placement>,
}

/// Fluent builder for [`VehicleManager`].
///
/// # Optional inputs (have defaults)
///
/// | Method                   | Default                                 |
/// |--------------------------|-----------------------------------------|
/// | `.path_calculator(p)`    | [`DijkstraPathCalculator`]              |
/// | `.warehouse(n)`          | First warehouse node of the region      |
/// | `.clock(c)`              | `SimClock::default()` (tick 0, 60 s)    |
/// | `.add_vehicle(..)`       | No vehicles                             |
///
/// # Example
///
/// ```rust,ignore
/// let mut manager = VehicleManagerBuilder::new(region)
///     .add_vehicle(2.0, [CargoType::PIZZA])
///     .add_vehicle(2.0, [CargoType::PIZZA, CargoType::PASTA])
///     .build()?;
/// let events = manager.tick()?;   // both vehicles spawn at the warehouse
/// ```
pub struct VehicleManagerBuilder {
    region:          Region,
    path_calculator: Option<Box<dyn PathCalculator>>,
    warehouse:       Option<NodeId>,
    clock:           Option<SimClock>,
    vehicles:        Vec<VehicleSpec>,
}

impl VehicleManagerBuilder {
    pub fn new(region: Region) -> Self {
        Self {
            region,
            path_calculator: None,
            warehouse:       None,
            clock:           None,
            vehicles:        Vec::new(),
        }
    }

    pub fn path_calculator(mut self, calculator: impl PathCalculator + 'static) -> Self {
        self.path_calculator = Some(Box::new(calculator));
        self
    }

    /// Use `node` as the warehouse instead of the region's first warehouse.
    pub fn warehouse(mut self, node: NodeId) -> Self {
        self.warehouse = Some(node);
        self
    }

    pub fn clock(mut self, clock: SimClock) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Shorthand for a default clock starting at `tick`.
    pub fn start_tick(self, tick: Tick) -> Self {
        self.clock(SimClock::starting_at(tick))
    }

    /// Add a vehicle placed at the warehouse.
    pub fn add_vehicle(mut self, capacity: f64, compatible: impl IntoIterator<Item = CargoType>) -> Self {
        self.vehicles.push(VehicleSpec {
            capacity,
            compatible: compatible.into_iter().collect(),
            placement:  None,
        });
        self
    }

    /// Add a vehicle placed on the first node for which `placement` holds.
    pub fn add_vehicle_placed(
        mut self,
        capacity:   f64,
        compatible: impl IntoIterator<Item = CargoType>,
        placement:  impl Fn(&Node) -> bool + 'static,
    ) -> Self {
        self.vehicles.push(VehicleSpec {
            capacity,
            compatible: compatible.into_iter().collect(),
            placement:  Some(Box::new(placement)),
        });
        self
    }

    /// Resolve the warehouse, create the occupancy arenas, and register every
    /// vehicle.  Vehicles spawn on the first tick.
    ///
    /// # Errors
    /// [`RoutingError::NoWarehouse`] if no warehouse was given and the region
    /// has none; any error of [`VehicleManager::add_vehicle`].
    pub fn build(self) -> RoutingResult<VehicleManager> {
        let warehouse = match self.warehouse {
            Some(node) => self.region.try_node(node)?.id,
            None => self
                .region
                .warehouses()
                .next()
                .map(|n| n.id)
                .ok_or(RoutingError::NoWarehouse)?,
        };

        let path_calculator = self
            .path_calculator
            .unwrap_or_else(|| Box::new(DijkstraPathCalculator));
        let clock = self.clock.unwrap_or_default();

        let mut manager = VehicleManager::new(self.region, path_calculator, clock, warehouse);
        for spec in self.vehicles {
            manager.add_vehicle(spec.capacity, spec.compatible, spec.placement.as_deref())?;
        }
        Ok(manager)
    }
}

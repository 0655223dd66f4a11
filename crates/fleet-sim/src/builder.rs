//! Fluent builder for constructing a [`Simulation`].

use fleet_delivery::{
    DeliveryService, DeliveryStrategy, FixedOrderGenerator, OrderGenerator, RandomOrderGenerator,
    RandomOrderGeneratorConfig,
};
use fleet_rating::RaterRegistry;
use fleet_routing::VehicleManager;

use crate::{SimHandle, SimListener, SimResult, Simulation, SimulationConfig};

enum Orders {
    Generator(Box<dyn OrderGenerator>),
    Random(RandomOrderGeneratorConfig),
}

/// Fluent builder for [`Simulation`].
///
/// # Required inputs
///
/// - a [`DeliveryService`], or a [`VehicleManager`] plus a
///   [`DeliveryStrategy`] via [`from_strategy`](Self::from_strategy)
///
/// # Optional inputs (have defaults)
///
/// | Method                   | Default                                   |
/// |--------------------------|-------------------------------------------|
/// | `.order_generator(g)`    | Empty `FixedOrderGenerator`               |
/// | `.random_orders(c)`      | (replaces the generator)                  |
/// | `.raters(r)`             | `RaterRegistry::default()` (both raters)  |
/// | `.config(c)`             | `SimulationConfig::default()` (unpaced)   |
/// | `.listener(l)`           | No listeners                              |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimulationBuilder::from_strategy(DeliveryStrategy::Basic, manager)
///     .random_orders(RandomOrderGeneratorConfig::default())
///     .listener(TracingListener::new(60))
///     .build()?;
/// let scores = sim.run_simulation(Tick(480))?;
/// ```
pub struct SimulationBuilder {
    service:   Box<dyn DeliveryService>,
    orders:    Orders,
    raters:    RaterRegistry,
    config:    SimulationConfig,
    listeners: Vec<Box<dyn SimListener>>,
}

impl SimulationBuilder {
    pub fn new(service: Box<dyn DeliveryService>) -> Self {
        Self {
            service,
            orders:    Orders::Generator(Box::new(FixedOrderGenerator::new())),
            raters:    RaterRegistry::default(),
            config:    SimulationConfig::default(),
            listeners: Vec::new(),
        }
    }

    pub fn from_strategy(strategy: DeliveryStrategy, manager: VehicleManager) -> Self {
        Self::new(strategy.create(manager))
    }

    pub fn order_generator(mut self, generator: impl OrderGenerator + 'static) -> Self {
        self.orders = Orders::Generator(Box::new(generator));
        self
    }

    /// Generate orders randomly over the service's region.  The generator is
    /// created in [`build`](Self::build).
    pub fn random_orders(mut self, config: RandomOrderGeneratorConfig) -> Self {
        self.orders = Orders::Random(config);
        self
    }

    pub fn raters(mut self, raters: RaterRegistry) -> Self {
        self.raters = raters;
        self
    }

    pub fn config(mut self, config: SimulationConfig) -> Self {
        self.config = config;
        self
    }

    pub fn listener(mut self, listener: impl SimListener + 'static) -> Self {
        self.listeners.push(Box::new(listener));
        self
    }

    /// # Errors
    /// [`SimError::Delivery`](crate::SimError::Delivery) if the random order
    /// generator cannot be set up for the region.
    pub fn build(self) -> SimResult<Simulation> {
        let generator: Box<dyn OrderGenerator> = match self.orders {
            Orders::Generator(g) => g,
            Orders::Random(config) => {
                Box::new(RandomOrderGenerator::new(&config, self.service.vehicle_manager().region())?)
            }
        };

        let mut sim = Simulation {
            config: self.config,
            service: self.service,
            generator,
            raters: self.raters.create_all(),
            listeners: Vec::new(),
            next_listener: 0,
            handle: SimHandle::new(),
        };
        for listener in self.listeners {
            sim.add_boxed_listener(listener);
        }
        Ok(sim)
    }
}

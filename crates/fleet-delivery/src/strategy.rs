//! Named delivery strategies.

use std::fmt;
use std::str::FromStr;

use fleet_routing::VehicleManager;

use crate::{BasicDeliveryService, DeliveryError, DeliveryService};

/// Constructor for a boxed delivery service.
pub type DeliveryServiceFactory = fn(VehicleManager) -> Box<dyn DeliveryService>;

/// Registry of the available scheduling strategies.
///
/// Parse one from a config string with [`FromStr`] and call
/// [`create`](Self::create) to get a ready service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeliveryStrategy {
    /// [`BasicDeliveryService`].
    Basic,
}

impl DeliveryStrategy {
    pub const ALL: [DeliveryStrategy; 1] = [DeliveryStrategy::Basic];

    pub fn name(self) -> &'static str {
        match self {
            DeliveryStrategy::Basic => "basic",
        }
    }

    pub fn factory(self) -> DeliveryServiceFactory {
        match self {
            DeliveryStrategy::Basic => basic,
        }
    }

    pub fn create(self, manager: VehicleManager) -> Box<dyn DeliveryService> {
        (self.factory())(manager)
    }
}

impl fmt::Display for DeliveryStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DeliveryStrategy {
    type Err = DeliveryError;

    /// Case-insensitive; `simple` is accepted as an alias of `basic`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "basic" | "simple" => Ok(DeliveryStrategy::Basic),
            _ => Err(DeliveryError::UnknownStrategy(s.to_owned())),
        }
    }
}

fn basic(manager: VehicleManager) -> Box<dyn DeliveryService> {
    Box::new(BasicDeliveryService::new(manager))
}

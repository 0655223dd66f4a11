use fleet_core::{CargoType, OrderId, VehicleId};
use fleet_region::{Component, RegionError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RoutingError {
    #[error("vehicle {0} does not exist")]
    UnknownVehicle(VehicleId),

    #[error("component {0} is not part of the region")]
    UnknownComponent(Component),

    #[error("no warehouse configured and the region has no warehouse node")]
    NoWarehouse,

    #[error("no node matches the placement predicate")]
    NoMatchingNode,

    #[error("vehicle capacity must be finite and non-negative, got {0}")]
    InvalidCapacity(f64),

    #[error("vehicle {0} is not at the warehouse")]
    NotAtWarehouse(VehicleId),

    #[error("vehicle {vehicle} cannot take {weight} kg: carrying {load} of {capacity} kg")]
    CapacityExceeded {
        vehicle:  VehicleId,
        capacity: f64,
        load:     f64,
        weight:   f64,
    },

    #[error("vehicle {vehicle} does not support cargo type {cargo}")]
    CargoNotSupported { vehicle: VehicleId, cargo: CargoType },

    #[error("order {order} is not loaded on vehicle {vehicle}")]
    OrderNotOnVehicle { vehicle: VehicleId, order: OrderId },

    #[error("occupancy invariant violated: {0}")]
    OccupancyInvariant(String),

    #[error("region error: {0}")]
    Region(#[from] RegionError),
}

pub type RoutingResult<T> = Result<T, RoutingError>;

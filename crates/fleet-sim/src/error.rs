use fleet_delivery::DeliveryError;
use fleet_routing::RoutingError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("routing error: {0}")]
    Routing(#[from] RoutingError),

    #[error("delivery setup error: {0}")]
    Delivery(#[from] DeliveryError),
}

pub type SimResult<T> = Result<T, SimError>;

use fleet_core::CoreError;
use fleet_routing::RoutingError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("region has no neighborhood to deliver to")]
    NoNeighborhoods,

    #[error("invalid order generator config: {0}")]
    InvalidConfig(String),

    #[error("unknown delivery strategy {0:?}")]
    UnknownStrategy(String),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Routing(#[from] RoutingError),
}

pub type DeliveryResult<T> = Result<T, DeliveryError>;

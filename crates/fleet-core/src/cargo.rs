//! Cargo kinds and weighted cargo items.

use std::fmt;
use std::str::FromStr;

use crate::{CoreError, CoreResult};

/// A kind of cargo a vehicle may or may not be able to carry.
///
/// The set is open: applications number their own kinds.  A handful of named
/// constants cover the common food categories.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CargoType(pub u16);

impl CargoType {
    pub const PIZZA: CargoType = CargoType(0);
    pub const PASTA: CargoType = CargoType(1);
    pub const ICE_CREAM: CargoType = CargoType(2);
    pub const SAUCE: CargoType = CargoType(3);

    const NAMED: [(&'static str, CargoType); 4] = [
        ("pizza", Self::PIZZA),
        ("pasta", Self::PASTA),
        ("ice_cream", Self::ICE_CREAM),
        ("sauce", Self::SAUCE),
    ];

    /// Name of a predefined kind, or `None` for application-defined ones.
    pub fn name(self) -> Option<&'static str> {
        Self::NAMED.iter().find(|(_, c)| *c == self).map(|(n, _)| *n)
    }
}

impl fmt::Display for CargoType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "cargo#{}", self.0),
        }
    }
}

impl FromStr for CargoType {
    type Err = CoreError;

    /// Accepts a predefined name (`"pizza"`) or a raw number (`"17"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some((_, c)) = Self::NAMED.iter().find(|(n, _)| n.eq_ignore_ascii_case(s)) {
            return Ok(*c);
        }
        s.parse::<u16>()
            .map(CargoType)
            .map_err(|_| CoreError::Parse(format!("unknown cargo type {s:?}")))
    }
}

/// One weighted item of an order.
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CargoItem {
    pub kind:   CargoType,
    /// Weight in kilograms.
    pub weight: f64,
}

impl CargoItem {
    /// # Errors
    /// Returns [`CoreError::InvalidWeight`] for negative or non-finite weights.
    pub fn new(kind: CargoType, weight: f64) -> CoreResult<Self> {
        if !weight.is_finite() || weight < 0.0 {
            return Err(CoreError::InvalidWeight(weight));
        }
        Ok(Self { kind, weight })
    }
}

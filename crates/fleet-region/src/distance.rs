//! Pluggable distance metrics between locations.
//!
//! The region uses its calculator to derive an edge's weight when the edge
//! is added without an explicit one.

use fleet_core::Location;

/// A distance metric over grid locations.
pub trait DistanceCalculator: Send + Sync {
    fn distance(&self, a: Location, b: Location) -> f64;
}

/// Straight-line distance.  The default metric.
#[derive(Debug, Clone, Copy, Default)]
pub struct EuclideanDistance;

impl DistanceCalculator for EuclideanDistance {
    fn distance(&self, a: Location, b: Location) -> f64 {
        let (dx, dy) = a.delta(b);
        dx.hypot(dy)
    }
}

/// Sum of the axis distances (taxicab metric).
#[derive(Debug, Clone, Copy, Default)]
pub struct ManhattanDistance;

impl DistanceCalculator for ManhattanDistance {
    fn distance(&self, a: Location, b: Location) -> f64 {
        let (dx, dy) = a.delta(b);
        dx.abs() + dy.abs()
    }
}

/// Largest axis distance.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChessboardDistance;

impl DistanceCalculator for ChessboardDistance {
    fn distance(&self, a: Location, b: Location) -> f64 {
        let (dx, dy) = a.delta(b);
        dx.abs().max(dy.abs())
    }
}

impl<F> DistanceCalculator for F
where
    F: Fn(Location, Location) -> f64 + Send + Sync,
{
    fn distance(&self, a: Location, b: Location) -> f64 {
        self(a, b)
    }
}

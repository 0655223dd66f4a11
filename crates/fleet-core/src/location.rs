//! Grid coordinate type.
//!
//! A `Location` is the unique key of a region node: two nodes can never share
//! one.  Coordinates are plain integers on an abstract city grid; distance
//! semantics are supplied by the region's pluggable distance calculator.

use std::fmt;

/// An immutable 2-D integer coordinate with value equality.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Location {
    pub x: i32,
    pub y: i32,
}

impl Location {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Component-wise difference `other - self` as floats.
    #[inline]
    pub fn delta(self, other: Location) -> (f64, f64) {
        (
            f64::from(other.x) - f64::from(self.x),
            f64::from(other.y) - f64::from(self.y),
        )
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

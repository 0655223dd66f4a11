//! Typed identifiers.
//!
//! Node, edge and vehicle ids are dense indices into the arenas held by the
//! region and the vehicle manager; use `.index()` to subscript.  Order ids
//! are chosen by whoever produces the orders.

use std::fmt;

/// Declare a `Copy + Ord + Hash` id newtype that displays as `label#n`.
macro_rules! typed_id {
    ($(#[$attr:meta])* $name:ident($inner:ty), $label:literal) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        pub struct $name(pub $inner);

        impl $name {
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }

            /// The id of arena slot `index`, if it fits the id's range.
            pub fn from_index(index: usize) -> Option<Self> {
                <$inner>::try_from(index).ok().map($name)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($label, "#{}"), self.0)
            }
        }
    };
}

typed_id! {
    /// A vehicle, numbered in creation order.
    VehicleId(u32), "vehicle"
}

typed_id! {
    /// A region node.
    NodeId(u32), "node"
}

typed_id! {
    /// An undirected region edge.
    EdgeId(u32), "edge"
}

typed_id! {
    /// A confirmed order.  Expected to be unique within one run.
    OrderId(u64), "order"
}

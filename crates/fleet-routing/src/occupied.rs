//! Per-component occupancy.

use std::collections::BTreeMap;

use fleet_core::{NodeId, Tick, VehicleId};
use fleet_region::Component;

/// Bookkeeping for one resident vehicle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VehicleStats {
    /// Tick at which the vehicle entered this component.
    pub arrived: Tick,

    /// For edge residents: the endpoint the vehicle is travelling towards.
    /// `None` on nodes.
    pub heading: Option<NodeId>,
}

impl VehicleStats {
    #[inline]
    pub fn at_node(arrived: Tick) -> Self {
        Self { arrived, heading: None }
    }

    #[inline]
    pub fn on_edge(arrived: Tick, heading: NodeId) -> Self {
        Self { arrived, heading: Some(heading) }
    }

    /// Fraction of an edge of `weight` ticks covered at `now`, in `[0, 1]`.
    pub fn progress(&self, now: Tick, weight: u64) -> f32 {
        if weight == 0 {
            return 1.0;
        }
        (now.since(self.arrived) as f32 / weight as f32).min(1.0)
    }
}

/// The vehicles currently resident on one node or edge.
///
/// Residents are kept ordered by `VehicleId` so every scan over them is
/// deterministic.
#[derive(Debug, Clone)]
pub struct Occupied {
    component: Component,
    vehicles:  BTreeMap<VehicleId, VehicleStats>,
}

impl Occupied {
    pub(crate) fn new(component: Component) -> Self {
        Self { component, vehicles: BTreeMap::new() }
    }

    #[inline]
    pub fn component(&self) -> Component {
        self.component
    }

    /// Residents and their stats in ascending `VehicleId` order.
    pub fn vehicles(&self) -> impl Iterator<Item = (VehicleId, &VehicleStats)> {
        self.vehicles.iter().map(|(v, s)| (*v, s))
    }

    pub fn vehicle_ids(&self) -> impl Iterator<Item = VehicleId> + '_ {
        self.vehicles.keys().copied()
    }

    pub fn contains(&self, vehicle: VehicleId) -> bool {
        self.vehicles.contains_key(&vehicle)
    }

    pub fn stats(&self, vehicle: VehicleId) -> Option<&VehicleStats> {
        self.vehicles.get(&vehicle)
    }

    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }

    /// Returns `false` if the vehicle was already resident.
    pub(crate) fn insert(&mut self, vehicle: VehicleId, stats: VehicleStats) -> bool {
        self.vehicles.insert(vehicle, stats).is_none()
    }

    pub(crate) fn remove(&mut self, vehicle: VehicleId) -> Option<VehicleStats> {
        self.vehicles.remove(&vehicle)
    }
}

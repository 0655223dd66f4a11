//! The `VehicleManager`: occupancy arenas and the per-tick state machine.

use std::collections::{BTreeSet, VecDeque};

use tracing::debug;

use fleet_core::{CargoType, ConfirmedOrder, EdgeId, NodeId, SimClock, Tick, VehicleId};
use fleet_region::{Component, Node, NodeKind, Path, PathCalculator, Region, RegionError};

use crate::vehicle::QueuedPath;
use crate::{
    ArrivalAction, ArrivalContext, Event, EventBus, EventKind, Occupied, RoutingError, RoutingResult,
    Vehicle, VehicleManagerBuilder, VehicleStats,
};

/// Owns the region, every vehicle, and one [`Occupied`] per node and edge.
///
/// Occupancies live in two arenas parallel to the region's node and edge
/// arrays, so lookup by component is a plain index.  At every tick boundary
/// the occupancies partition the set of spawned vehicles; [`tick`](Self::tick)
/// verifies this and fails with [`RoutingError::OccupancyInvariant`] if not.
///
/// Create via [`VehicleManagerBuilder`].
pub struct VehicleManager {
    pub(crate) region:          Region,
    pub(crate) path_calculator: Box<dyn PathCalculator>,
    pub(crate) clock:           SimClock,
    pub(crate) warehouse:       NodeId,
    pub(crate) occupied_nodes:  Vec<Occupied>,
    pub(crate) occupied_edges:  Vec<Occupied>,
    pub(crate) vehicles:        Vec<Vehicle>,
    pub(crate) to_spawn:        Vec<VehicleId>,
    pub(crate) events:          EventBus,
}

impl VehicleManager {
    pub fn builder(region: Region) -> VehicleManagerBuilder {
        VehicleManagerBuilder::new(region)
    }

    pub(crate) fn new(
        region:          Region,
        path_calculator: Box<dyn PathCalculator>,
        clock:           SimClock,
        warehouse:       NodeId,
    ) -> Self {
        let occupied_nodes = region.nodes().iter().map(|n| Occupied::new(Component::Node(n.id))).collect();
        let occupied_edges = region.edges().iter().map(|e| Occupied::new(Component::Edge(e.id))).collect();
        Self {
            region,
            path_calculator,
            clock,
            warehouse,
            occupied_nodes,
            occupied_edges,
            vehicles: Vec::new(),
            to_spawn: Vec::new(),
            events: EventBus::new(),
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn region(&self) -> &Region {
        &self.region
    }

    pub fn path_calculator(&self) -> &dyn PathCalculator {
        self.path_calculator.as_ref()
    }

    pub fn clock(&self) -> &SimClock {
        &self.clock
    }

    pub fn current_time(&self) -> Tick {
        self.clock.current_tick
    }

    /// The occupancy of a node or edge.
    pub fn occupied(&self, component: Component) -> RoutingResult<&Occupied> {
        let found = match component {
            Component::Node(n) => self.occupied_nodes.get(n.index()),
            Component::Edge(e) => self.occupied_edges.get(e.index()),
        };
        found.ok_or(RoutingError::UnknownComponent(component))
    }

    /// Node occupancies, indexed by `NodeId`.
    pub fn occupied_nodes(&self) -> &[Occupied] {
        &self.occupied_nodes
    }

    /// Edge occupancies, indexed by `EdgeId`.
    pub fn occupied_edges(&self) -> &[Occupied] {
        &self.occupied_edges
    }

    pub fn warehouse_node(&self) -> &Node {
        &self.region.nodes()[self.warehouse.index()]
    }

    /// The warehouse occupancy.
    pub fn warehouse(&self) -> &Occupied {
        &self.occupied_nodes[self.warehouse.index()]
    }

    /// Vehicles at the warehouse with nothing on board and nothing queued,
    /// in ascending id order.
    pub fn idle_vehicles(&self) -> Vec<VehicleId> {
        self.warehouse()
            .vehicle_ids()
            .filter(|v| {
                let vehicle = &self.vehicles[v.index()];
                vehicle.orders.is_empty() && vehicle.queue.is_empty()
            })
            .collect()
    }

    /// Spawned vehicles in id order.
    pub fn vehicles(&self) -> impl Iterator<Item = &Vehicle> {
        self.vehicles.iter().filter(|v| v.spawned)
    }

    /// Any vehicle, spawned or pending.
    pub fn vehicle(&self, id: VehicleId) -> RoutingResult<&Vehicle> {
        self.vehicles.get(id.index()).ok_or(RoutingError::UnknownVehicle(id))
    }

    /// Number of vehicles waiting for the next spawn phase.
    pub fn pending_spawns(&self) -> usize {
        self.to_spawn.len()
    }

    /// Shortest path under the configured calculator.
    pub fn path(&self, from: NodeId, to: NodeId) -> RoutingResult<Path> {
        Ok(self.path_calculator.path(&self.region, from, to)?)
    }

    /// Queue an event to be drained with the next tick.
    pub fn post_event(&mut self, kind: EventKind) {
        self.events.post(kind);
    }

    // ── Fleet & moves ─────────────────────────────────────────────────────

    /// Create a vehicle.  It becomes active (and emits `Spawn`) on the next
    /// tick, on the first node matching `placement`, or the warehouse.
    pub fn add_vehicle(
        &mut self,
        capacity:   f64,
        compatible: impl IntoIterator<Item = CargoType>,
        placement:  Option<&dyn Fn(&Node) -> bool>,
    ) -> RoutingResult<VehicleId> {
        if !capacity.is_finite() || capacity < 0.0 {
            return Err(RoutingError::InvalidCapacity(capacity));
        }
        let node = match placement {
            None => self.warehouse,
            Some(pred) => self
                .region
                .nodes()
                .iter()
                .find(|n| pred(n))
                .map(|n| n.id)
                .ok_or(RoutingError::NoMatchingNode)?,
        };
        let id = VehicleId(self.vehicles.len() as u32);
        let compatible: BTreeSet<CargoType> = compatible.into_iter().collect();
        self.vehicles.push(Vehicle::new(id, capacity, compatible, node));
        self.to_spawn.push(id);
        Ok(id)
    }

    /// Drop the vehicle's move queue (without running any arrival actions)
    /// and relocate it to `node` immediately.
    pub fn move_direct(&mut self, vehicle: VehicleId, node: NodeId) -> RoutingResult<()> {
        self.region.try_node(node)?;
        let now = self.clock.current_tick;
        let v = self
            .vehicles
            .get_mut(vehicle.index())
            .ok_or(RoutingError::UnknownVehicle(vehicle))?;
        v.queue.clear();

        if v.spawned {
            let from = match v.location {
                Component::Node(n) => &mut self.occupied_nodes[n.index()],
                Component::Edge(e) => &mut self.occupied_edges[e.index()],
            };
            from.remove(vehicle).ok_or_else(|| missing(vehicle, v.location))?;
            self.occupied_nodes[node.index()].insert(vehicle, VehicleStats::at_node(now));
        }
        v.location = Component::Node(node);
        Ok(())
    }

    /// Append `node` to the vehicle's move queue.  The path is computed now,
    /// starting from the end of the existing queue.
    ///
    /// # Errors
    /// Propagates [`RegionError::PathNotFound`] if `node` is unreachable; the
    /// queue is left unchanged.
    pub fn move_queued(&mut self, vehicle: VehicleId, node: NodeId) -> RoutingResult<()> {
        self.enqueue(vehicle, node, None)
    }

    /// Like [`move_queued`](Self::move_queued), running `action` once on
    /// arrival at `node`.
    pub fn move_queued_then<F>(&mut self, vehicle: VehicleId, node: NodeId, action: F) -> RoutingResult<()>
    where
        F: FnOnce(&mut ArrivalContext<'_>) -> RoutingResult<()> + Send + 'static,
    {
        self.enqueue(vehicle, node, Some(Box::new(action)))
    }

    fn enqueue(&mut self, vehicle: VehicleId, node: NodeId, action: Option<ArrivalAction>) -> RoutingResult<()> {
        let v = self.vehicle(vehicle)?;
        let from = v.queue_tail().ok_or_else(|| {
            RoutingError::OccupancyInvariant(format!("{vehicle} is on an edge with an empty move queue"))
        })?;
        let path = self.path(from, node)?;
        let remaining: VecDeque<NodeId> = path.nodes.into_iter().skip(1).collect();

        self.vehicles[vehicle.index()].queue.push_back(QueuedPath {
            remaining,
            destination: node,
            action,
        });
        Ok(())
    }

    /// Load `order` onto a vehicle waiting at the warehouse.
    ///
    /// # Errors
    /// [`RoutingError::NotAtWarehouse`], [`RoutingError::CapacityExceeded`]
    /// if the order would push the load past capacity, or
    /// [`RoutingError::CargoNotSupported`].  Nothing changes on error.
    pub fn load_order(&mut self, vehicle: VehicleId, order: ConfirmedOrder) -> RoutingResult<()> {
        let v = self
            .vehicles
            .get_mut(vehicle.index())
            .ok_or(RoutingError::UnknownVehicle(vehicle))?;
        if !v.spawned || v.location != Component::Node(self.warehouse) {
            return Err(RoutingError::NotAtWarehouse(vehicle));
        }
        if let Some(err) = v.first_load_violation(&order) {
            return Err(err);
        }

        debug!(%vehicle, order = %order.id(), weight = order.weight(), "order loaded");
        self.events.post(EventKind::LoadOrder { vehicle, order: order.clone() });
        v.orders.push(order);
        Ok(())
    }

    // ── Tick ──────────────────────────────────────────────────────────────

    /// Advance the simulation by one minute and return this tick's events in
    /// the order they were produced.
    pub fn tick(&mut self) -> RoutingResult<Vec<Event>> {
        self.spawn_pending();
        self.clock.advance();
        let now = self.clock.current_tick;

        // Nodes strictly before edges: a vehicle moved onto an edge here has
        // zero elapsed time and is skipped by the edge pass below.
        for i in 0..self.occupied_nodes.len() {
            self.tick_node(NodeId(i as u32), now)?;
        }
        for i in 0..self.occupied_edges.len() {
            self.tick_edge(EdgeId(i as u32), now)?;
        }

        self.check_partition()?;
        Ok(self.events.drain(now))
    }

    fn spawn_pending(&mut self) {
        let now = self.clock.current_tick;
        for id in std::mem::take(&mut self.to_spawn) {
            let vehicle = &mut self.vehicles[id.index()];
            let Component::Node(node) = vehicle.location else {
                continue;
            };
            vehicle.spawned = true;
            self.occupied_nodes[node.index()].insert(id, VehicleStats::at_node(now));
            debug!(vehicle = %id, %node, "vehicle spawned");
            self.events.post(EventKind::Spawn { vehicle: id, node });
        }
    }

    fn tick_node(&mut self, node: NodeId, now: Tick) -> RoutingResult<()> {
        let departing: Vec<VehicleId> = self.occupied_nodes[node.index()]
            .vehicle_ids()
            .filter(|v| self.vehicles[v.index()].has_queued_moves())
            .collect();

        for id in departing {
            self.depart(id, node, now)?;
        }
        Ok(())
    }

    /// Step a vehicle at `node` onto the edge towards its next path node.
    /// Queued paths that already end here complete in place first.
    fn depart(&mut self, id: VehicleId, node: NodeId, now: Tick) -> RoutingResult<()> {
        let vehicle = &mut self.vehicles[id.index()];
        loop {
            let Some(path) = vehicle.queue.front() else {
                return Ok(());
            };

            if let Some(&next) = path.remaining.front() {
                let edge = self
                    .region
                    .edge_between(node, next)
                    .ok_or(RegionError::NoEdgeBetween(node, next))?
                    .id;
                self.occupied_nodes[node.index()]
                    .remove(id)
                    .ok_or_else(|| missing(id, Component::Node(node)))?;
                self.occupied_edges[edge.index()].insert(id, VehicleStats::on_edge(now, next));
                vehicle.location = Component::Edge(edge);
                return Ok(());
            }

            let action = vehicle.queue.pop_front().and_then(|p| p.action);
            if let Some(action) = action {
                let mut ctx = ArrivalContext {
                    vehicle: &mut *vehicle,
                    node:    &self.region.nodes()[node.index()],
                    tick:    now,
                    events:  &mut self.events,
                };
                action(&mut ctx)?;
            }
        }
    }

    fn tick_edge(&mut self, edge: EdgeId, now: Tick) -> RoutingResult<()> {
        let weight = self.region.edges()[edge.index()].weight;
        let arriving: Vec<VehicleId> = self.occupied_edges[edge.index()]
            .vehicles()
            .filter(|(_, s)| s.arrived < now && now.since(s.arrived) >= weight)
            .map(|(v, _)| v)
            .collect();

        for id in arriving {
            self.arrive(id, edge, now)?;
        }
        Ok(())
    }

    /// Move a vehicle that has covered `edge` onto the node it was heading to.
    fn arrive(&mut self, id: VehicleId, edge: EdgeId, now: Tick) -> RoutingResult<()> {
        let stats = self.occupied_edges[edge.index()]
            .remove(id)
            .ok_or_else(|| missing(id, Component::Edge(edge)))?;

        let vehicle = &mut self.vehicles[id.index()];
        let (node, finished) = {
            let path = vehicle.queue.front_mut().ok_or_else(|| {
                RoutingError::OccupancyInvariant(format!("{id} on {edge} has an empty move queue"))
            })?;
            let node = match (path.remaining.pop_front(), stats.heading) {
                (Some(next), Some(heading)) if next == heading => next,
                (next, heading) => {
                    return Err(RoutingError::OccupancyInvariant(format!(
                        "{id} on {edge} was heading to {heading:?} but its path continues at {next:?}"
                    )));
                }
            };
            (node, path.remaining.is_empty())
        };

        self.occupied_nodes[node.index()].insert(id, VehicleStats::at_node(now));
        vehicle.location = Component::Node(node);

        let target = &self.region.nodes()[node.index()];
        if finished {
            if let Some(action) = vehicle.queue.pop_front().and_then(|p| p.action) {
                let mut ctx = ArrivalContext {
                    vehicle: &mut *vehicle,
                    node:    target,
                    tick:    now,
                    events:  &mut self.events,
                };
                action(&mut ctx)?;
            }
        }

        debug!(vehicle = %id, node = %target.name, %edge, tick = %now, "vehicle arrived");
        let kind = if node == self.warehouse {
            EventKind::ArrivedAtWarehouse { vehicle: id, node, last_edge: edge }
        } else {
            match target.kind {
                NodeKind::Neighborhood { .. } => EventKind::ArrivedAtNeighborhood { vehicle: id, node, last_edge: edge },
                NodeKind::Plain | NodeKind::Warehouse => EventKind::ArrivedAtNode { vehicle: id, node, last_edge: edge },
            }
        };
        self.events.post(kind);
        Ok(())
    }

    // ── Invariants ────────────────────────────────────────────────────────

    /// Verify that every spawned vehicle is resident in exactly one
    /// occupancy, the one its `location` names, and no pending vehicle is
    /// resident anywhere.
    pub fn check_partition(&self) -> RoutingResult<()> {
        let mut seen = vec![0u32; self.vehicles.len()];
        for occupied in self.occupied_nodes.iter().chain(&self.occupied_edges) {
            for id in occupied.vehicle_ids() {
                let vehicle = self
                    .vehicles
                    .get(id.index())
                    .ok_or(RoutingError::UnknownVehicle(id))?;
                if !vehicle.spawned || vehicle.location != occupied.component() {
                    return Err(RoutingError::OccupancyInvariant(format!(
                        "{id} found on {} but located at {}",
                        occupied.component(),
                        vehicle.location
                    )));
                }
                seen[id.index()] += 1;
            }
        }
        for vehicle in &self.vehicles {
            let expected = u32::from(vehicle.spawned);
            if seen[vehicle.id.index()] != expected {
                return Err(RoutingError::OccupancyInvariant(format!(
                    "{} resident in {} occupancies",
                    vehicle.id,
                    seen[vehicle.id.index()]
                )));
            }
        }
        Ok(())
    }
}

fn missing(vehicle: VehicleId, component: Component) -> RoutingError {
    RoutingError::OccupancyInvariant(format!("{vehicle} missing from {component}"))
}

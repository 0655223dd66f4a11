//! Unit tests for fleet-routing.

#[cfg(test)]
mod helpers {
    use fleet_core::{CargoItem, CargoType, ConfirmedOrder, Location, OrderId, Tick, TickInterval};
    use fleet_region::Region;

    use crate::{Event, VehicleManager, VehicleManagerBuilder};

    pub const W: Location = Location::new(0, 0);
    pub const X: Location = Location::new(5, 0);
    pub const N: Location = Location::new(8, 0);
    pub const ISLAND: Location = Location::new(100, 100);

    /// `W --5-- X --3-- N`, plus an unconnected node.  Default weights are the
    /// ceiled Euclidean lengths.
    pub fn line() -> Region {
        Region::builder()
            .add_warehouse("W", W)
            .add_node("X", X)
            .add_neighborhood("N", N, 1.0)
            .add_node("island", ISLAND)
            .add_edge("wx", W, X)
            .add_edge("xn", X, N)
            .build()
            .unwrap()
    }

    pub fn manager(vehicles: usize) -> VehicleManager {
        let mut builder = VehicleManagerBuilder::new(line());
        for _ in 0..vehicles {
            builder = builder.add_vehicle(2.0, [CargoType::PIZZA]);
        }
        builder.build().unwrap()
    }

    pub fn order(id: u64, weight: f64, kind: CargoType) -> ConfirmedOrder {
        let window = TickInterval::new(Tick(0), Tick(30)).unwrap();
        ConfirmedOrder::new(OrderId(id), N, window, vec![CargoItem::new(kind, weight).unwrap()])
    }

    /// Tick `n` times, checking the partition after each tick, and return
    /// every event.
    pub fn run(manager: &mut VehicleManager, n: usize) -> Vec<Event> {
        let mut all = Vec::new();
        for _ in 0..n {
            all.extend(manager.tick().unwrap());
            manager.check_partition().unwrap();
        }
        all
    }
}

// ── Builder & spawning ────────────────────────────────────────────────────────

#[cfg(test)]
mod spawning {
    use fleet_core::{CargoType, Location, NodeId, Tick, VehicleId};
    use fleet_region::{Component, Region};

    use super::helpers::{self, line};
    use crate::{EventKind, RoutingError, VehicleManagerBuilder};

    #[test]
    fn warehouse_defaults_to_first_warehouse_node() {
        let manager = helpers::manager(0);
        assert_eq!(manager.warehouse_node().name, "W");
        assert_eq!(manager.warehouse().component(), Component::Node(NodeId(0)));
    }

    #[test]
    fn region_without_warehouse_errors() {
        let region = Region::builder().add_node("a", Location::new(0, 0)).build().unwrap();
        let result = VehicleManagerBuilder::new(region).build();
        assert!(matches!(result, Err(RoutingError::NoWarehouse)));
    }

    #[test]
    fn explicit_warehouse_overrides() {
        let manager = VehicleManagerBuilder::new(line()).warehouse(NodeId(1)).build().unwrap();
        assert_eq!(manager.warehouse_node().name, "X");
    }

    #[test]
    fn vehicles_spawn_on_first_tick() {
        let mut manager = helpers::manager(2);
        assert_eq!(manager.vehicles().count(), 0);
        assert_eq!(manager.pending_spawns(), 2);

        let events = manager.tick().unwrap();
        assert_eq!(events.len(), 2);
        assert!(events.iter().all(|e| e.tick == Tick(1)));
        assert_eq!(
            events[0].kind,
            EventKind::Spawn { vehicle: VehicleId(0), node: NodeId(0) }
        );
        assert_eq!(manager.vehicles().count(), 2);
        assert_eq!(manager.warehouse().len(), 2);
        assert_eq!(manager.idle_vehicles(), vec![VehicleId(0), VehicleId(1)]);
    }

    #[test]
    fn placement_predicate_picks_first_match() {
        let mut manager = VehicleManagerBuilder::new(line())
            .add_vehicle_placed(1.0, [CargoType::PIZZA], |n| n.is_neighborhood())
            .build()
            .unwrap();
        manager.tick().unwrap();
        let vehicle = manager.vehicle(VehicleId(0)).unwrap();
        assert_eq!(vehicle.current_node(), Some(NodeId(2)));
        assert!(manager.idle_vehicles().is_empty());
    }

    #[test]
    fn placement_without_match_errors() {
        let result = VehicleManagerBuilder::new(line())
            .add_vehicle_placed(1.0, [], |n| n.name == "nowhere")
            .build();
        assert!(matches!(result, Err(RoutingError::NoMatchingNode)));
    }

    #[test]
    fn vehicle_added_mid_run_spawns_next_tick() {
        let mut manager = helpers::manager(1);
        helpers::run(&mut manager, 3);
        let id = manager.add_vehicle(1.0, [CargoType::PASTA], None).unwrap();
        assert_eq!(id, VehicleId(1));
        assert!(!manager.vehicle(id).unwrap().is_spawned());

        let events = manager.tick().unwrap();
        assert_eq!(events[0].kind, EventKind::Spawn { vehicle: id, node: NodeId(0) });
        assert_eq!(events[0].tick, Tick(4));
    }

    #[test]
    fn invalid_capacity_rejected() {
        let mut manager = helpers::manager(0);
        assert!(matches!(
            manager.add_vehicle(-1.0, [], None),
            Err(RoutingError::InvalidCapacity(_))
        ));
        assert!(matches!(
            manager.add_vehicle(f64::NAN, [], None),
            Err(RoutingError::InvalidCapacity(_))
        ));
    }

    #[test]
    fn start_tick_offsets_clock() {
        let mut manager = VehicleManagerBuilder::new(line()).start_tick(Tick(100)).build().unwrap();
        manager.tick().unwrap();
        assert_eq!(manager.current_time(), Tick(101));
    }
}

// ── Movement & timing ─────────────────────────────────────────────────────────

#[cfg(test)]
mod movement {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use fleet_core::{EdgeId, NodeId, Tick, VehicleId};
    use fleet_region::{Component, RegionError};

    use super::helpers;
    use crate::{EventKind, RoutingError};

    const V: VehicleId = VehicleId(0);

    #[test]
    fn edge_is_traversed_in_exactly_its_weight() {
        let mut manager = helpers::manager(1);
        manager.move_queued(V, NodeId(1)).unwrap();

        // Tick 1: spawn, then step onto the weight-5 edge.
        manager.tick().unwrap();
        assert_eq!(manager.vehicle(V).unwrap().location(), Component::Edge(EdgeId(0)));
        let stats = *manager.occupied(Component::Edge(EdgeId(0))).unwrap().stats(V).unwrap();
        assert_eq!(stats.arrived, Tick(1));
        assert_eq!(stats.heading, Some(NodeId(1)));

        for _ in 2..6 {
            let events = manager.tick().unwrap();
            assert!(events.is_empty());
            assert_eq!(manager.vehicle(V).unwrap().location(), Component::Edge(EdgeId(0)));
        }

        let events = manager.tick().unwrap();
        assert_eq!(manager.current_time(), Tick(6));
        assert_eq!(events.len(), 1);
        assert_eq!(
            events[0].kind,
            EventKind::ArrivedAtNode { vehicle: V, node: NodeId(1), last_edge: EdgeId(0) }
        );
        assert_eq!(manager.vehicle(V).unwrap().current_node(), Some(NodeId(1)));
        assert!(!manager.vehicle(V).unwrap().has_queued_moves());
    }

    #[test]
    fn multi_hop_path_makes_one_transition_per_tick() {
        let mut manager = helpers::manager(1);
        manager.move_queued(V, NodeId(2)).unwrap();

        let mut locations = Vec::new();
        for _ in 0..12 {
            manager.tick().unwrap();
            locations.push(manager.vehicle(V).unwrap().location());
        }

        // Spawn at W and depart in tick 1; arrive at X in tick 6; depart in
        // tick 7; arrive at N (weight 3) in tick 10.
        let expected = |tick: usize| match tick {
            1..=5 => Component::Edge(EdgeId(0)),
            6 => Component::Node(NodeId(1)),
            7..=9 => Component::Edge(EdgeId(1)),
            _ => Component::Node(NodeId(2)),
        };
        for (i, loc) in locations.iter().enumerate() {
            assert_eq!(*loc, expected(i + 1), "tick {}", i + 1);
        }
    }

    #[test]
    fn neighborhood_and_warehouse_arrivals_are_tagged() {
        let mut manager = helpers::manager(1);
        manager.move_queued(V, NodeId(2)).unwrap();
        manager.move_queued(V, NodeId(0)).unwrap();
        let events = helpers::run(&mut manager, 25);

        let arrivals: Vec<_> = events.iter().filter(|e| e.is_arrival()).map(|e| (e.tick, e.name())).collect();
        assert_eq!(
            arrivals,
            vec![
                (Tick(6), "arrived_at_node"),
                (Tick(10), "arrived_at_neighborhood"),
                (Tick(14), "arrived_at_node"),
                (Tick(20), "arrived_at_warehouse"),
            ]
        );
        assert_eq!(manager.idle_vehicles(), vec![V]);
    }

    #[test]
    fn arrival_action_runs_once_at_destination() {
        let mut manager = helpers::manager(1);
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::new(Mutex::new(Vec::new()));
        {
            let calls = Arc::clone(&calls);
            let seen = Arc::clone(&seen);
            manager
                .move_queued_then(V, NodeId(2), move |ctx| {
                    calls.fetch_add(1, Ordering::SeqCst);
                    seen.lock().unwrap().push((ctx.tick(), ctx.node().id));
                    Ok(())
                })
                .unwrap();
        }
        helpers::run(&mut manager, 20);

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(*seen.lock().unwrap(), vec![(Tick(10), NodeId(2))]);
    }

    #[test]
    fn queue_to_current_node_completes_in_place() {
        let mut manager = helpers::manager(1);
        helpers::run(&mut manager, 1);
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        manager
            .move_queued_then(V, NodeId(0), move |_| {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(())
            })
            .unwrap();

        let events = manager.tick().unwrap();
        assert!(events.is_empty());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(manager.vehicle(V).unwrap().current_node(), Some(NodeId(0)));
    }

    #[test]
    fn queued_moves_chain_from_last_destination() {
        let mut manager = helpers::manager(1);
        manager.move_queued(V, NodeId(1)).unwrap();
        manager.move_queued(V, NodeId(2)).unwrap();
        let vehicle = manager.vehicle(V).unwrap();
        assert_eq!(vehicle.queued_destinations().collect::<Vec<_>>(), vec![NodeId(1), NodeId(2)]);
        assert_eq!(vehicle.next_node(), Some(NodeId(1)));
    }

    #[test]
    fn unreachable_destination_leaves_queue_unchanged() {
        let mut manager = helpers::manager(1);
        manager.move_queued(V, NodeId(1)).unwrap();
        let result = manager.move_queued(V, NodeId(3));
        assert!(matches!(
            result,
            Err(RoutingError::Region(RegionError::PathNotFound { .. }))
        ));
        assert_eq!(
            manager.vehicle(V).unwrap().queued_destinations().collect::<Vec<_>>(),
            vec![NodeId(1)]
        );
    }

    #[test]
    fn unknown_vehicle_errors() {
        let mut manager = helpers::manager(1);
        assert!(matches!(
            manager.move_queued(VehicleId(7), NodeId(1)),
            Err(RoutingError::UnknownVehicle(_))
        ));
    }

    #[test]
    fn move_direct_teleports_and_drops_queue() {
        let mut manager = helpers::manager(1);
        manager.move_queued(V, NodeId(2)).unwrap();
        helpers::run(&mut manager, 3);
        assert_eq!(manager.vehicle(V).unwrap().location(), Component::Edge(EdgeId(0)));

        manager.move_direct(V, NodeId(2)).unwrap();
        manager.check_partition().unwrap();
        let vehicle = manager.vehicle(V).unwrap();
        assert_eq!(vehicle.current_node(), Some(NodeId(2)));
        assert!(!vehicle.has_queued_moves());
        assert!(manager.occupied(Component::Edge(EdgeId(0))).unwrap().is_empty());
        assert!(manager.occupied(Component::Node(NodeId(2))).unwrap().contains(V));
    }

    #[test]
    fn move_direct_before_spawn_changes_spawn_node() {
        let mut manager = helpers::manager(1);
        manager.move_direct(V, NodeId(1)).unwrap();
        let events = manager.tick().unwrap();
        assert_eq!(events[0].kind, EventKind::Spawn { vehicle: V, node: NodeId(1) });
    }

    #[test]
    fn path_query_matches_region() {
        let manager = helpers::manager(0);
        let path = manager.path(NodeId(0), NodeId(2)).unwrap();
        assert_eq!(path.nodes, vec![NodeId(0), NodeId(1), NodeId(2)]);
        assert_eq!(path.cost, 8);
    }

    #[test]
    fn unknown_component_errors() {
        let manager = helpers::manager(0);
        assert!(matches!(
            manager.occupied(Component::Edge(EdgeId(9))),
            Err(RoutingError::UnknownComponent(_))
        ));
    }
}

// ── Cargo ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod cargo {
    use fleet_core::{CargoType, NodeId, OrderId, Tick, VehicleId};

    use super::helpers::{self, order};
    use crate::{EventKind, RoutingError};

    const V: VehicleId = VehicleId(0);

    #[test]
    fn load_requires_spawned_vehicle_at_warehouse() {
        let mut manager = helpers::manager(1);
        assert!(matches!(
            manager.load_order(V, order(1, 0.5, CargoType::PIZZA)),
            Err(RoutingError::NotAtWarehouse(_))
        ));

        helpers::run(&mut manager, 1);
        manager.move_direct(V, NodeId(1)).unwrap();
        assert!(matches!(
            manager.load_order(V, order(1, 0.5, CargoType::PIZZA)),
            Err(RoutingError::NotAtWarehouse(_))
        ));
    }

    #[test]
    fn capacity_is_inclusive_and_enforced() {
        let mut manager = helpers::manager(1);
        helpers::run(&mut manager, 1);

        manager.load_order(V, order(1, 1.5, CargoType::PIZZA)).unwrap();
        manager.load_order(V, order(2, 0.5, CargoType::PIZZA)).unwrap();
        let err = manager.load_order(V, order(3, 0.1, CargoType::PIZZA)).unwrap_err();
        assert!(matches!(err, RoutingError::CapacityExceeded { .. }));

        let vehicle = manager.vehicle(V).unwrap();
        assert_eq!(vehicle.orders().len(), 2);
        assert!(vehicle.current_weight() <= vehicle.capacity());
        assert_eq!(vehicle.free_capacity(), 0.0);
    }

    #[test]
    fn unsupported_cargo_rejected() {
        let mut manager = helpers::manager(1);
        helpers::run(&mut manager, 1);
        let err = manager.load_order(V, order(1, 0.5, CargoType::ICE_CREAM)).unwrap_err();
        assert!(matches!(
            err,
            RoutingError::CargoNotSupported { cargo: CargoType::ICE_CREAM, .. }
        ));
        assert!(manager.vehicle(V).unwrap().orders().is_empty());
        assert!(!manager.vehicle(V).unwrap().can_load(&order(2, 0.5, CargoType::SAUCE)));
    }

    #[test]
    fn load_posts_event_on_next_drain() {
        let mut manager = helpers::manager(1);
        helpers::run(&mut manager, 1);
        manager.load_order(V, order(1, 0.5, CargoType::PIZZA)).unwrap();
        let events = manager.tick().unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].tick, Tick(2));
        assert!(matches!(events[0].kind, EventKind::LoadOrder { vehicle: V, .. }));
    }

    #[test]
    fn loaded_vehicle_is_not_idle() {
        let mut manager = helpers::manager(2);
        helpers::run(&mut manager, 1);
        manager.load_order(V, order(1, 0.5, CargoType::PIZZA)).unwrap();
        assert_eq!(manager.idle_vehicles(), vec![VehicleId(1)]);
    }

    #[test]
    fn deliver_in_arrival_action() {
        let mut manager = helpers::manager(1);
        helpers::run(&mut manager, 1);
        manager.load_order(V, order(7, 0.5, CargoType::PIZZA)).unwrap();
        manager
            .move_queued_then(V, NodeId(2), |ctx| ctx.deliver_order(OrderId(7)))
            .unwrap();

        let events = helpers::run(&mut manager, 12);
        let delivered: Vec<_> = events
            .iter()
            .filter_map(|e| match &e.kind {
                EventKind::DeliverOrder { order, node, .. } => Some((e.tick, *node, order.clone())),
                _ => None,
            })
            .collect();
        assert_eq!(delivered.len(), 1);
        let (tick, node, order) = &delivered[0];
        assert_eq!(*tick, Tick(11));
        assert_eq!(*node, NodeId(2));
        assert_eq!(order.actual_delivery_tick(), Some(Tick(11)));
        assert!(manager.vehicle(V).unwrap().orders().is_empty());

        // The action runs before the arrival event is posted.
        let arrival = events.iter().position(|e| e.name() == "arrived_at_neighborhood").unwrap();
        let delivery = events.iter().position(|e| e.name() == "deliver_order").unwrap();
        assert_eq!(events[arrival].tick, Tick(11));
        assert_eq!(arrival, delivery + 1);
    }

    #[test]
    fn delivering_missing_order_fails_the_tick() {
        let mut manager = helpers::manager(1);
        manager
            .move_queued_then(V, NodeId(1), |ctx| ctx.deliver_order(OrderId(99)))
            .unwrap();
        let mut result = Ok(Vec::new());
        for _ in 0..6 {
            result = manager.tick();
            if result.is_err() {
                break;
            }
        }
        assert!(matches!(result, Err(RoutingError::OrderNotOnVehicle { .. })));
    }
}

// ── Invariants & determinism ──────────────────────────────────────────────────

#[cfg(test)]
mod invariants {
    use fleet_core::{NodeId, VehicleId};

    use super::helpers;
    use crate::{EventKind, VehicleManager};

    fn busy_manager() -> VehicleManager {
        let mut manager = helpers::manager(4);
        for v in 0..4u32 {
            let id = VehicleId(v);
            manager.move_queued(id, NodeId(2 - (v % 2))).unwrap();
            manager.move_queued(id, NodeId(0)).unwrap();
        }
        manager
    }

    #[test]
    fn every_spawned_vehicle_in_exactly_one_component() {
        let mut manager = busy_manager();
        for _ in 0..30 {
            manager.tick().unwrap();
            let resident: usize = manager
                .occupied_nodes()
                .iter()
                .chain(manager.occupied_edges())
                .map(|o| o.len())
                .sum();
            assert_eq!(resident, manager.vehicles().count());
            manager.check_partition().unwrap();
        }
    }

    #[test]
    fn identical_inputs_give_identical_events() {
        let a = helpers::run(&mut busy_manager(), 30);
        let b = helpers::run(&mut busy_manager(), 30);
        assert_eq!(a, b);
        assert!(!a.is_empty());
    }

    #[test]
    fn posted_events_drain_with_next_tick() {
        let mut manager = helpers::manager(0);
        let order = helpers::order(1, 0.1, fleet_core::CargoType::PIZZA);
        manager.post_event(EventKind::OrderReceived { order });
        let events = manager.tick().unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].name(), "order_received");
        assert!(manager.tick().unwrap().is_empty());
    }
}

//! city: one Friday evening of pizza deliveries around Frankfurt.
//!
//! Eleven vehicles serve 1000 random orders over 480 one-minute ticks.  The
//! simulation runs on its own thread; the main thread follows progress over
//! a `TickPublisher` channel and prints the final scores.

mod region;

use std::path::Path;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Instant;

use anyhow::{Context, Result, anyhow};
use fleet_core::{CargoType, SimClock, Tick};
use fleet_delivery::{DeliveryStrategy, RandomOrderGeneratorConfig};
use fleet_output::{CsvWriter, SimOutputListener};
use fleet_routing::{EventKind, VehicleManagerBuilder};
use fleet_sim::{SimUpdate, SimulationBuilder, TickPublisher, TracingListener};
use tracing::info;

use region::build_region;

// ── Constants ─────────────────────────────────────────────────────────────────

const VEHICLE_COUNT:     usize = 11;
const VEHICLE_CAPACITY:  f64   = 2.0;
const LAST_TICK:         u64   = 480;
const START_UNIX_SECS:   i64   = 1_700_000_000;
const OUTPUT_DIR:        &str  = "output/city";

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    // 1. Region and fleet.
    let region = build_region()?;
    info!(nodes = region.node_count(), edges = region.edge_count(), "region built");

    let clock = SimClock::new(START_UNIX_SECS, SimClock::DEFAULT_TICK_SECS);
    let cargo = [CargoType::PIZZA, CargoType::PASTA, CargoType::ICE_CREAM, CargoType::SAUCE];
    let mut manager = VehicleManagerBuilder::new(region).clock(clock.clone());
    for _ in 0..VEHICLE_COUNT {
        manager = manager.add_vehicle(VEHICLE_CAPACITY, cargo);
    }
    let manager = manager.build()?;

    // 2. Output.
    std::fs::create_dir_all(OUTPUT_DIR)?;
    let writer = CsvWriter::new(Path::new(OUTPUT_DIR))?;
    let output = Arc::new(Mutex::new(SimOutputListener::new(writer, &clock)));

    // 3. Simulation.
    let mut publisher = TickPublisher::new();
    let updates = publisher.subscribe();
    let mut sim = SimulationBuilder::from_strategy(DeliveryStrategy::Basic, manager)
        .random_orders(RandomOrderGeneratorConfig { last_tick: LAST_TICK, ..Default::default() })
        .listener(TracingListener::new(60))
        .listener(publisher)
        .build()?;
    sim.add_listener(Arc::clone(&output));

    // 4. Run on a worker thread, follow along here.
    let t0 = Instant::now();
    let worker = thread::spawn(move || sim.run_simulation(Tick(LAST_TICK)));

    let mut delivered = 0usize;
    let mut arrivals = 0usize;
    for update in updates {
        match update {
            SimUpdate::Tick { events, .. } => {
                for event in events.iter() {
                    match event.kind {
                        EventKind::DeliverOrder { .. } => delivered += 1,
                        _ if event.is_arrival() => arrivals += 1,
                        _ => {}
                    }
                }
            }
            SimUpdate::Finished { .. } => break,
        }
    }

    let scores = worker
        .join()
        .map_err(|_| anyhow!("simulation thread panicked"))?
        .context("simulation failed")?;
    let elapsed = t0.elapsed();

    if let Some(e) = output.lock().map_err(|_| anyhow!("output listener poisoned"))?.take_error() {
        eprintln!("output error: {e}");
    }

    // 5. Summary.
    println!("Simulation complete in {:.3} s", elapsed.as_secs_f64());
    println!("  deliveries : {delivered}");
    println!("  arrivals   : {arrivals}");
    println!("  output     : {OUTPUT_DIR}/events.csv, {OUTPUT_DIR}/scores.csv");
    println!();
    println!("{:<20} {:>8}", "Criterion", "Score");
    println!("{}", "-".repeat(29));
    for (criterion, score) in &scores {
        println!("{:<20} {:>8.4}", criterion.name(), score);
    }

    Ok(())
}

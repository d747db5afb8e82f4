//! walk: edge-walking vehicles on a synthetic street grid.
//!
//! Every vehicle leaves from the intersection nearest the depot on a random
//! shortest-path route.  The fleet walks for a fixed number of one-second
//! ticks and every frame goes to CSV.
//!
//! ```text
//! cargo run -p walk --release -- [config.json]
//! ```
//!
//! The optional JSON file overrides any `SimConfig` field, e.g.
//! `{"vehicle_count": 50, "end_of_route": {"kind": "wait_then_restart", "wait_secs": 30.0}}`.

mod network;

use std::fs::File;
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use log::info;

use ts_core::{ClockControls, GeoPoint, SimConfig};
use ts_output::{CsvFrameWriter, FrameOutputObserver};
use ts_sim::{SimBuilder, WalkerModel};
use ts_spatial::{DijkstraRouter, RouteSampler};

use network::build_grid;

// ── Constants ─────────────────────────────────────────────────────────────────

const GRID_ROWS:  usize = 8;
const GRID_COLS:  usize = 8;
const SIM_TICKS:  u64   = 900; // 15 simulated minutes at 1 s/tick
const START_UNIX: i64   = 1_211_018_400; // 2008-05-17 10:00:00 UTC
const OUTPUT_DIR: &str  = "output/walk";

// Off-grid on purpose; snapped onto the nearest intersection.
const DEPOT: GeoPoint = GeoPoint { lat: 37.76143, lon: -122.42488 };

fn load_config() -> Result<SimConfig> {
    let Some(path) = std::env::args().nth(1) else {
        return Ok(SimConfig {
            start_unix_secs: START_UNIX,
            depot:           Some(DEPOT),
            ..SimConfig::default()
        });
    };
    let file = File::open(&path).with_context(|| format!("opening config {path}"))?;
    let config: SimConfig =
        serde_json::from_reader(file).with_context(|| format!("parsing config {path}"))?;
    info!("config loaded from {path}");
    Ok(config)
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = load_config()?;
    println!("=== walk: edge-walking playback ===");
    println!(
        "Vehicles: {}  |  Speeds: {}..={} m/s  |  End of route: {}  |  Seed: {}",
        config.vehicle_count,
        config.min_speed_mps,
        config.max_speed_mps,
        config.end_of_route,
        config.seed,
    );

    // 1. Road network.
    let (network, _nodes) = build_grid(GRID_ROWS, GRID_COLS);
    println!("Road network: {} nodes, {} edges", network.node_count(), network.edge_count());
    if let Some(depot) = config.depot {
        match network.snap_to_node(depot) {
            Some(node) => println!("Depot: {depot} -> node {node}"),
            None => println!("Depot: {depot} (network is empty)"),
        }
    }

    // 2. Routes and walkers.
    let model = WalkerModel::spawn(network, &DijkstraRouter, &RouteSampler::default(), &config)?;

    // 3. Sim, paced by a fixed tick.
    let mut sim = SimBuilder::new(config.clone(), model).build()?;
    let date = config
        .start_time()
        .date()
        .context("start time outside the calendar range")?;
    let mut controls = ClockControls::new(date);

    // 4. Output.
    let writer = CsvFrameWriter::new(Path::new(OUTPUT_DIR))?;
    let mut obs = FrameOutputObserver::new(writer);

    let t0 = Instant::now();
    let frames = sim.run_ticks(SIM_TICKS, 0.0, config.tick_secs, &mut controls, &mut obs);
    let elapsed = t0.elapsed();

    if let Some(e) = obs.take_error() {
        return Err(e).context("writing frames");
    }

    println!();
    println!("Done: {frames} frames in {:.2?}", elapsed);
    if let Some(t) = sim.current_time() {
        println!("Final simulated time: {}", t.label());
    }
    println!("Output written to {OUTPUT_DIR}/");
    println!();

    println!("{:<8} {:<8} {:<10} {:<12} {:<6}", "vehicle", "visible", "speed", "travelled", "laps");
    for (id, w) in sim.model.fleet.iter() {
        println!(
            "{:<8} {:<8} {:<10.1} {:<12.0} {:<6}",
            id.0,
            if w.is_visible() { "yes" } else { "no" },
            w.speed_mps(),
            w.travelled_m(),
            w.laps(),
        );
    }

    Ok(())
}

//! taxi: replay a directory of recorded cab traces under the playback clock.
//!
//! ```text
//! cargo run -p taxi --release -- <trace-dir> [YYYY-MM-DD] [config.json]
//! ```
//!
//! Every `*.txt` file in `<trace-dir>` is one cab (`lat lon occupied unix`
//! rows).  Playback starts at the first fix of the chosen day (default: the
//! first recorded day) and runs at 8x for an hour of wall-clock ticks; the
//! visible cabs of every frame go to CSV.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use log::{info, warn};

use ts_core::{ClockControls, SimConfig, SimTime, SpeedMultiplier};
use ts_motion::load_trace_dir;
use ts_output::{CsvFrameWriter, FrameOutputObserver};
use ts_sim::{SimBuilder, TraceLookup, TraceModel};

// ── Constants ─────────────────────────────────────────────────────────────────

const REAL_TICKS: u64  = 3_600; // one wall-clock hour at 1 s per tick
const OUTPUT_DIR: &str = "output/taxi";

struct Args {
    trace_dir: PathBuf,
    date:      Option<NaiveDate>,
    config:    SimConfig,
}

fn parse_args() -> Result<Args> {
    let mut args = std::env::args().skip(1);
    let Some(trace_dir) = args.next() else {
        bail!("usage: taxi <trace-dir> [YYYY-MM-DD] [config.json]");
    };

    let date = args
        .next()
        .map(|s| NaiveDate::parse_from_str(&s, "%Y-%m-%d").with_context(|| format!("bad date {s}")))
        .transpose()?;

    let config = match args.next() {
        Some(path) => {
            let file = File::open(&path).with_context(|| format!("opening config {path}"))?;
            serde_json::from_reader(file).with_context(|| format!("parsing config {path}"))?
        }
        None => SimConfig::default(),
    };

    Ok(Args { trace_dir: PathBuf::from(trace_dir), date, config })
}

/// Seconds into `date` of the earliest fix recorded on that day.
fn first_fix_on(model: &TraceModel, date: NaiveDate) -> u32 {
    model
        .traces
        .iter()
        .flat_map(|t| t.samples().iter().map(|s| s.time))
        .filter(|t| t.date() == Some(date))
        .map(|t| t.seconds_into(date))
        .fold(None, |best: Option<f64>, s| Some(best.map_or(s, |b| b.min(s))))
        .map_or(0, |s| s.floor() as u32)
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let Args { trace_dir, date, config } = parse_args()?;
    println!("=== taxi: GPS trace replay ===");

    // 1. Traces.
    let traces = load_trace_dir(&trace_dir)?;
    let Some((first_date, last_date)) = traces.date_range() else {
        bail!("no dated fixes in {}", trace_dir.display());
    };
    println!(
        "Cabs: {}  |  Fixes: {}  |  Days: {first_date} .. {last_date}",
        traces.len(),
        traces.sample_count(),
    );

    // 2. Model and sim, paced by the playback clock.
    let model = TraceModel::new(traces, TraceLookup::Hold { inactivity_secs: config.inactivity_secs });
    let day = match date {
        Some(d) if d < first_date || d > last_date => {
            warn!("{d} is outside the recorded range; using {first_date}");
            first_date
        }
        Some(d) => d,
        None => first_date,
    };
    let slider = first_fix_on(&model, day);
    info!("starting playback at {}", (SimTime::day_start(day) + slider as f64).label());

    let mut sim = SimBuilder::new(config, model).playback().build()?;
    let mut controls = ClockControls::new(day);
    controls.slider_secs = slider;
    controls.multiplier = SpeedMultiplier::X8;

    // 3. Output.
    let writer = CsvFrameWriter::new(Path::new(OUTPUT_DIR))?;
    let mut obs = FrameOutputObserver::new(writer);

    let t0 = Instant::now();
    let frames = sim.run_ticks(REAL_TICKS, 0.0, 1.0, &mut controls, &mut obs);
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
    Ok(())
}

//! Cabspotting-style trace loader.
//!
//! # File layout
//!
//! One file per vehicle, named `<label>.txt`, holding space-separated rows
//! without a header:
//!
//! ```text
//! 37.75134 -122.39488 0 1213084687
//! 37.75136 -122.39527 0 1213084659
//! 37.75199 -122.3946 1 1213084540
//! ```
//!
//! Columns are latitude, longitude, an occupancy flag (ignored) and Unix
//! seconds.  Rows are not required to be in time order.  Rows that fail to
//! parse are skipped with a warning; a file with no usable rows is skipped
//! entirely.

use std::io::Read;
use std::path::Path;

use log::{debug, info, warn};
use serde::Deserialize;

use ts_core::SimTime;

use crate::gps::GpsSample;
use crate::traces::TraceSet;
use crate::{MotionError, MotionResult};

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct CabRecord {
    lat:        f64,
    lon:        f64,
    _occupancy: Option<u8>,
    unix_secs:  f64,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load every `*.txt` trace file in `dir`, in file-name order.
///
/// Returns [`MotionError::NoTraces`] if no file yields a usable fix.
pub fn load_trace_dir(dir: &Path) -> MotionResult<TraceSet> {
    let mut paths: Vec<_> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.is_file() && p.extension().is_some_and(|ext| ext == "txt"))
        .collect();
    paths.sort();

    let mut set = TraceSet::new();
    for path in &paths {
        let Some(label) = path.file_stem().and_then(|s| s.to_str()) else {
            warn!("skipping trace file with non-UTF-8 name: {path:?}");
            continue;
        };
        let samples = match std::fs::File::open(path) {
            Ok(file) => load_trace_reader(file, label),
            Err(e) => {
                warn!("skipping unreadable trace file {path:?}: {e}");
                continue;
            }
        };
        if samples.is_empty() {
            warn!("trace file {path:?} has no usable rows; skipped");
            continue;
        }
        set.push(label, samples);
    }

    if set.is_empty() {
        return Err(MotionError::NoTraces(dir.to_path_buf()));
    }
    info!(
        "loaded {} traces ({} fixes) from {}",
        set.len(),
        set.sample_count(),
        dir.display(),
    );
    Ok(set)
}

/// Parse one vehicle's rows from any `Read` source.
///
/// `label` is only used in log lines.
pub fn load_trace_reader<R: Read>(reader: R, label: &str) -> Vec<GpsSample> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(b' ')
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut samples = Vec::new();
    let mut skipped = 0usize;
    for (row, result) in csv_reader.deserialize::<CabRecord>().enumerate() {
        match result {
            Ok(r) if r.unix_secs.is_finite() && r.lat.is_finite() && r.lon.is_finite() => {
                samples.push(GpsSample::new(SimTime(r.unix_secs), r.lat, r.lon));
            }
            Ok(_) => {
                warn!("{label}: row {} has a non-finite value; skipped", row + 1);
                skipped += 1;
            }
            Err(e) => {
                warn!("{label}: row {} unparsable ({e}); skipped", row + 1);
                skipped += 1;
            }
        }
    }
    debug!("{label}: {} fixes, {skipped} rows skipped", samples.len());
    samples
}

//! The set of all loaded GPS traces.

use chrono::NaiveDate;
use rustc_hash::FxHashMap;

use ts_core::{GeoPoint, SimTime, VehicleId};

use crate::gps::{GpsSample, GpsTrace};

/// Every trace of a replay, indexed by `VehicleId` and by label.
///
/// Traces are immutable once added; lookups borrow them without copying.
#[derive(Clone, Debug, Default)]
pub struct TraceSet {
    traces:   Vec<GpsTrace>,
    by_label: FxHashMap<String, VehicleId>,
}

impl TraceSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect `traces`, reassigning each trace's vehicle id to its position
    /// in the set.  A later trace with an already-used label replaces the
    /// earlier one in the label index only.
    pub fn from_traces(traces: impl IntoIterator<Item = GpsTrace>) -> Self {
        let mut set = Self::new();
        for trace in traces {
            set.insert(trace);
        }
        set
    }

    /// Add a trace built from raw samples; returns its vehicle id.
    pub fn push(&mut self, label: impl Into<String>, samples: Vec<GpsSample>) -> VehicleId {
        let vehicle = VehicleId(self.traces.len() as u32);
        self.insert(GpsTrace::new(vehicle, label, samples))
    }

    fn insert(&mut self, mut trace: GpsTrace) -> VehicleId {
        let vehicle = VehicleId(self.traces.len() as u32);
        trace.vehicle = vehicle;
        self.by_label.insert(trace.label.clone(), vehicle);
        self.traces.push(trace);
        vehicle
    }

    pub fn len(&self) -> usize {
        self.traces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.traces.is_empty()
    }

    #[inline]
    pub fn get(&self, vehicle: VehicleId) -> Option<&GpsTrace> {
        self.traces.get(vehicle.index())
    }

    pub fn by_label(&self, label: &str) -> Option<&GpsTrace> {
        self.by_label.get(label).and_then(|v| self.get(*v))
    }

    pub fn iter(&self) -> impl Iterator<Item = &GpsTrace> + '_ {
        self.traces.iter()
    }

    /// Total fixes across all traces.
    pub fn sample_count(&self) -> usize {
        self.traces.iter().map(GpsTrace::len).sum()
    }

    /// Earliest and latest fix over every trace.
    pub fn time_range(&self) -> Option<(SimTime, SimTime)> {
        self.traces
            .iter()
            .filter_map(GpsTrace::time_range)
            .reduce(|(lo, hi), (a, b)| {
                (if a < lo { a } else { lo }, if b > hi { b } else { hi })
            })
    }

    /// Calendar dates of the earliest and latest fix.
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        let (lo, hi) = self.time_range()?;
        Some((lo.date()?, hi.date()?))
    }

    /// Positions of every active vehicle at `t`.
    pub fn positions_at(&self, t: SimTime, hold_secs: f64) -> impl Iterator<Item = (VehicleId, GeoPoint)> + '_ {
        self.traces
            .iter()
            .filter_map(move |tr| tr.position_at(t, hold_secs).map(|p| (tr.vehicle, p)))
    }

    /// Windowed variant of [`positions_at`](Self::positions_at).
    pub fn positions_within(&self, t: SimTime, radius_secs: f64) -> impl Iterator<Item = (VehicleId, GeoPoint)> + '_ {
        self.traces
            .iter()
            .filter_map(move |tr| tr.position_within(t, radius_secs).map(|p| (tr.vehicle, p)))
    }
}

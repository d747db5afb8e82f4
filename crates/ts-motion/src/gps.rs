//! Recorded GPS traces and time-based position interpolation.
//!
//! A trace is a sparse, time-ordered list of fixes for one vehicle.  The
//! position at an arbitrary time is the linear blend of the two fixes that
//! bracket it.  After the last fix the vehicle lingers at that fix for a
//! caller-supplied threshold and is then considered inactive; before the
//! first fix it is inactive.

use ts_core::{GeoPoint, SimTime, VehicleId};

/// One recorded fix.
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GpsSample {
    pub time:     SimTime,
    pub position: GeoPoint,
}

impl GpsSample {
    pub fn new(time: SimTime, lat: f64, lon: f64) -> Self {
        Self { time, position: GeoPoint::new(lat, lon) }
    }
}

/// All fixes of one vehicle, ascending by time with unique timestamps.
#[derive(Clone, Debug)]
pub struct GpsTrace {
    pub vehicle: VehicleId,
    pub label:   String,
    samples:     Vec<GpsSample>,
}

impl GpsTrace {
    /// Sort `samples` by time and keep the first fix of each timestamp.
    ///
    /// Fixes with a non-finite timestamp are dropped.
    pub fn new(vehicle: VehicleId, label: impl Into<String>, mut samples: Vec<GpsSample>) -> Self {
        samples.retain(|s| s.time.0.is_finite());
        // Stable sort: among equal timestamps the input order survives, so
        // dedup keeps the earliest-supplied fix.
        samples.sort_by(|a, b| a.time.0.total_cmp(&b.time.0));
        samples.dedup_by(|later, kept| later.time == kept.time);
        Self { vehicle, label: label.into(), samples }
    }

    pub fn samples(&self) -> &[GpsSample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Timestamps of the first and last fix.
    pub fn time_range(&self) -> Option<(SimTime, SimTime)> {
        Some((self.samples.first()?.time, self.samples.last()?.time))
    }

    /// Position at `t`, or `None` if the vehicle is inactive.
    ///
    /// `hold_secs` is how long the vehicle stays at its last fix when no
    /// later fix exists.
    pub fn position_at(&self, t: SimTime, hold_secs: f64) -> Option<GeoPoint> {
        bracket(&self.samples, t, hold_secs)
    }

    /// Like [`position_at`](Self::position_at) but only fixes inside
    /// `[t - radius_secs, t + radius_secs]` are considered, and the hold
    /// after the last fix is the window radius.
    pub fn position_within(&self, t: SimTime, radius_secs: f64) -> Option<GeoPoint> {
        let lo = self.samples.partition_point(|s| s.time < t + (-radius_secs));
        let hi = self.samples.partition_point(|s| s.time <= t + radius_secs);
        bracket(&self.samples[lo..hi.max(lo)], t, radius_secs)
    }
}

/// Shared bracketing rule over an ascending sample slice.
fn bracket(samples: &[GpsSample], t: SimTime, hold_secs: f64) -> Option<GeoPoint> {
    let after = samples.partition_point(|s| s.time <= t);
    let prev = samples.get(after.checked_sub(1)?)?;
    match samples.get(after) {
        Some(next) => {
            let span = next.time - prev.time;
            let fraction = if span > 0.0 { (t - prev.time) / span } else { 0.0 };
            Some(prev.position.lerp(next.position, fraction))
        }
        None if t - prev.time <= hold_secs => Some(prev.position),
        None => None,
    }
}

//! Motion models the orchestrator can drive.
//!
//! The orchestrator only knows the [`MotionModel`] trait: each tick it hands
//! over the simulated time and the simulated seconds elapsed since the last
//! frame, and receives the visible positions.

use log::info;

use ts_core::{ClockBounds, EndOfRoute, GeoPoint, SimConfig, SimRng, SimTime, VehicleId};
use ts_motion::{TraceSet, WalkerFleet};
use ts_spatial::{RoadNetwork, RouteSampler, Router};

use crate::{SimResult, VehiclePosition};

// ── MotionModel trait ─────────────────────────────────────────────────────────

/// Source of per-tick vehicle positions.
pub trait MotionModel: Send {
    /// Number of vehicles the model tracks, visible or not.
    fn vehicle_count(&self) -> usize;

    /// Bring every vehicle to `now` (`dt_secs` after the previous frame) and
    /// append the visible ones to `out` in ascending vehicle order.
    fn collect(&mut self, now: SimTime, dt_secs: f64, out: &mut Vec<VehiclePosition>);

    /// Range the playback clock should be confined to.
    fn clock_bounds(&self) -> ClockBounds {
        ClockBounds::default()
    }
}

// ── WalkerModel ───────────────────────────────────────────────────────────────

/// Vehicles walking shortest-path routes over a road network.
pub struct WalkerModel {
    pub network: RoadNetwork,
    pub fleet:   WalkerFleet,
    pub policy:  EndOfRoute,
}

impl WalkerModel {
    pub fn new(network: RoadNetwork, fleet: WalkerFleet, policy: EndOfRoute) -> Self {
        Self { network, fleet, policy }
    }

    /// Sample `config.vehicle_count` routes with `router` and spawn the fleet.
    pub fn spawn<R: Router + ?Sized>(
        network: RoadNetwork,
        router:  &R,
        sampler: &RouteSampler,
        config:  &SimConfig,
    ) -> SimResult<Self> {
        let mut rng = SimRng::new(config.seed);
        let fleet = WalkerFleet::spawn(&network, router, sampler, config, &mut rng)?;
        Ok(Self::new(network, fleet, config.end_of_route))
    }

    #[cfg(not(feature = "parallel"))]
    fn advance(&mut self, now: SimTime, dt_secs: f64) {
        self.fleet.advance_all(&self.network, dt_secs, now, self.policy);
    }

    #[cfg(feature = "parallel")]
    fn advance(&mut self, now: SimTime, dt_secs: f64) {
        use rayon::prelude::*;

        let network = &self.network;
        let policy = self.policy;
        self.fleet
            .as_mut_slice()
            .par_iter_mut()
            .for_each(|w| {
                w.advance(network, dt_secs, now, policy);
            });
    }
}

impl MotionModel for WalkerModel {
    fn vehicle_count(&self) -> usize {
        self.fleet.len()
    }

    fn collect(&mut self, now: SimTime, dt_secs: f64, out: &mut Vec<VehiclePosition>) {
        self.advance(now, dt_secs);
        out.extend(self.fleet.visible().map(|(vehicle, w)| VehiclePosition {
            vehicle,
            position: w.position(),
            token:    w.render_token(),
        }));
    }
}

// ── TraceModel ────────────────────────────────────────────────────────────────

/// How a trace vehicle is looked up at a given time.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum TraceLookup {
    /// Full-trace bracketing; the last fix is held for `inactivity_secs`.
    Hold { inactivity_secs: f64 },
    /// Only fixes within `radius_secs` of the query time are considered.
    Window { radius_secs: f64 },
}

/// Replay of pre-recorded GPS traces.
pub struct TraceModel {
    pub traces: TraceSet,
    pub lookup: TraceLookup,
}

impl TraceModel {
    pub fn new(traces: TraceSet, lookup: TraceLookup) -> Self {
        if let Some((first, last)) = traces.time_range() {
            info!("trace model: {} vehicles, {first} .. {last}", traces.len());
        }
        Self { traces, lookup }
    }
}

impl MotionModel for TraceModel {
    fn vehicle_count(&self) -> usize {
        self.traces.len()
    }

    fn collect(&mut self, now: SimTime, _dt_secs: f64, out: &mut Vec<VehiclePosition>) {
        let to_position = |(vehicle, position): (VehicleId, GeoPoint)| VehiclePosition { vehicle, position, token: 0 };
        match self.lookup {
            TraceLookup::Hold { inactivity_secs } => {
                out.extend(self.traces.positions_at(now, inactivity_secs).map(to_position));
            }
            TraceLookup::Window { radius_secs } => {
                out.extend(self.traces.positions_within(now, radius_secs).map(to_position));
            }
        }
    }

    /// Dates limited to the recorded range; playback stops at the last fix.
    fn clock_bounds(&self) -> ClockBounds {
        let dates = self.traces.date_range();
        ClockBounds {
            first_date: dates.map(|d| d.0),
            last_date:  dates.map(|d| d.1),
            horizon:    self.traces.time_range().map(|r| r.1),
        }
    }
}

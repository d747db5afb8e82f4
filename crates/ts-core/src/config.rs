//! Top-level simulation configuration.
//!
//! Typically loaded from a JSON file by the application crate and passed to
//! the simulation builder.  The defaults describe a small street-map demo:
//! ten vehicles, 5–15 m/s, one simulated second per tick.

use crate::{CoreError, CoreResult, EndOfRoute, GeoPoint};

/// Simulation configuration shared by the fixed-step and clock-driven modes.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// Simulated Unix timestamp of tick 0 in fixed-step mode.
    pub start_unix_secs: i64,

    /// Simulated seconds that elapse per tick in fixed-step mode.
    pub tick_secs: f64,

    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,

    /// Number of edge-walking vehicles to spawn.
    pub vehicle_count: usize,

    /// Lower bound of the per-vehicle speed draw, metres per second.
    pub min_speed_mps: f64,

    /// Upper bound of the per-vehicle speed draw.  Equal to `min_speed_mps`
    /// for a fleet with one constant speed.
    pub max_speed_mps: f64,

    /// What a walker does after its last edge.
    pub end_of_route: EndOfRoute,

    /// When set, every walker's route starts at the road node nearest to
    /// this point instead of a random one.
    pub depot: Option<GeoPoint>,

    /// How long a GPS vehicle stays visible at its last fix when no later
    /// fix exists.
    pub inactivity_secs: f64,

    /// Notify observers with a snapshot every N ticks.  1 = every tick.
    pub output_interval_ticks: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            start_unix_secs:       0,
            tick_secs:             1.0,
            seed:                  42,
            vehicle_count:         10,
            min_speed_mps:         5.0,
            max_speed_mps:         15.0,
            end_of_route:          EndOfRoute::Loop,
            depot:                 None,
            inactivity_secs:       600.0,
            output_interval_ticks: 1,
        }
    }
}

impl SimConfig {
    /// Reject values that would make the motion models misbehave.
    pub fn validate(&self) -> CoreResult<()> {
        if !self.tick_secs.is_finite() || self.tick_secs <= 0.0 {
            return Err(CoreError::Config(format!(
                "tick_secs must be a positive number, got {}",
                self.tick_secs
            )));
        }
        if !(self.min_speed_mps.is_finite() && self.max_speed_mps.is_finite())
            || self.min_speed_mps < 0.0
            || self.max_speed_mps < self.min_speed_mps
        {
            return Err(CoreError::Config(format!(
                "speed range {}..={} m/s is invalid",
                self.min_speed_mps, self.max_speed_mps
            )));
        }
        let pause = self.end_of_route.pause_secs();
        if !pause.is_finite() || pause < 0.0 {
            return Err(CoreError::Config(format!(
                "{} pause must be non-negative, got {pause}",
                self.end_of_route
            )));
        }
        if let Some(depot) = self.depot {
            if !(depot.lat.is_finite() && depot.lon.is_finite()) {
                return Err(CoreError::Config(format!(
                    "depot ({}, {}) is not a finite coordinate",
                    depot.lat, depot.lon
                )));
            }
        }
        if !self.inactivity_secs.is_finite() || self.inactivity_secs < 0.0 {
            return Err(CoreError::Config(format!(
                "inactivity_secs must be non-negative, got {}",
                self.inactivity_secs
            )));
        }
        Ok(())
    }

    /// Simulated time of tick 0 in fixed-step mode.
    #[inline]
    pub fn start_time(&self) -> crate::SimTime {
        crate::SimTime(self.start_unix_secs as f64)
    }
}

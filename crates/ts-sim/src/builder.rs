//! Fluent builder for constructing a [`Sim`].

use log::{info, warn};

use ts_core::{PlaybackClock, SimConfig};

use crate::{MotionModel, Pacing, Sim, SimError, SimResult};

/// Fluent builder for [`Sim<M>`].
///
/// # Required inputs
///
/// - [`SimConfig`]: seed, tick length, output cadence
/// - `M: MotionModel`, e.g. [`WalkerModel`][crate::WalkerModel] or
///   [`TraceModel`][crate::TraceModel]
///
/// # Optional inputs
///
/// | Method         | Effect                                                      |
/// |----------------|-------------------------------------------------------------|
/// | `.pacing(p)`   | Explicit pacing; default `Pacing::Fixed { tick_secs: config.tick_secs }` |
/// | `.playback()`  | Playback clock bounded by `model.clock_bounds()`            |
///
/// # Example
///
/// ```rust,ignore
/// let model = WalkerModel::spawn(network, &DijkstraRouter, &RouteSampler::default(), &config)?;
/// let mut sim = SimBuilder::new(config, model).build()?;
/// let frame = sim.step(0.0, &controls);
/// ```
pub struct SimBuilder<M: MotionModel> {
    config: SimConfig,
    model:  M,
    pacing: Option<Pacing>,
}

impl<M: MotionModel> SimBuilder<M> {
    pub fn new(config: SimConfig, model: M) -> Self {
        Self { config, model, pacing: None }
    }

    /// Use an explicit pacing mode.
    pub fn pacing(mut self, pacing: Pacing) -> Self {
        self.pacing = Some(pacing);
        self
    }

    /// Drive simulated time from a playback clock confined to the model's
    /// own bounds (e.g. the recorded trace range).
    pub fn playback(mut self) -> Self {
        self.pacing = Some(Pacing::Clock(PlaybackClock::with_bounds(self.model.clock_bounds())));
        self
    }

    /// Validate inputs and return a ready-to-step [`Sim`].
    pub fn build(self) -> SimResult<Sim<M>> {
        self.config.validate()?;

        let pacing = self
            .pacing
            .unwrap_or(Pacing::Fixed { tick_secs: self.config.tick_secs });
        if let Pacing::Fixed { tick_secs } = pacing {
            if !tick_secs.is_finite() || tick_secs <= 0.0 {
                return Err(SimError::Config(format!(
                    "fixed pacing needs a positive tick length, got {tick_secs}"
                )));
            }
        }

        let vehicles = self.model.vehicle_count();
        if vehicles == 0 {
            warn!("simulation built with no vehicles; every frame will be empty");
        }
        info!(
            "sim built: {vehicles} vehicles, {} pacing",
            match pacing {
                Pacing::Fixed { .. } => "fixed-step",
                Pacing::Clock(_) => "playback-clock",
            }
        );

        Ok(Sim::new(self.config, self.model, pacing))
    }
}

//! The `Sim` struct and its tick loop.

use ts_core::{ClockControls, PlaybackClock, SimConfig, SimTime, Tick};

use crate::{MotionModel, RenderFrame, SimObserver};

// ── Pacing ────────────────────────────────────────────────────────────────────

/// How simulated time advances from one step to the next.
#[derive(Clone, Debug)]
pub enum Pacing {
    /// Every running step advances simulated time by `tick_secs`, so frame
    /// `n` shows the state at `start + (n + 1) × tick_secs`.  Real time and
    /// the speed multiplier are ignored.  A paused step emits nothing.
    Fixed { tick_secs: f64 },
    /// Simulated time follows a [`PlaybackClock`] driven by real time and the
    /// operator's controls.
    Clock(PlaybackClock),
}

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The tick orchestrator.
///
/// `Sim<M>` owns the motion model exclusively; the rendering side only ever
/// sees the [`RenderFrame`]s it returns.  One call to [`step`](Self::step)
/// runs to completion before the next, so no vehicle state is shared.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<M: MotionModel> {
    pub config: SimConfig,
    pub model:  M,
    pub pacing: Pacing,

    /// Tick number of the next frame.
    tick: Tick,

    /// Simulated time of the last frame, `None` before the first.
    last_time: Option<SimTime>,

    /// Reused between steps to avoid a fresh allocation per frame.
    scratch: Vec<crate::VehiclePosition>,
}

impl<M: MotionModel> Sim<M> {
    pub(crate) fn new(config: SimConfig, model: M, pacing: Pacing) -> Self {
        let scratch = Vec::with_capacity(model.vehicle_count());
        Self { config, model, pacing, tick: Tick::ZERO, last_time: None, scratch }
    }

    // ── Public API ────────────────────────────────────────────────────────

    /// Tick number the next frame will carry.
    #[inline]
    pub fn tick(&self) -> Tick {
        self.tick
    }

    /// Simulated time of the most recent frame.
    #[inline]
    pub fn current_time(&self) -> Option<SimTime> {
        self.last_time
    }

    /// Process one wall-clock tick observed at `real_now` (seconds).
    ///
    /// Returns `None` when there is nothing new to draw (paused without a
    /// seek).  Otherwise every vehicle is brought to the new simulated time
    /// and the visible ones are returned.
    pub fn step(&mut self, real_now: f64, controls: &ClockControls) -> Option<RenderFrame> {
        let (time, dt) = match &mut self.pacing {
            Pacing::Fixed { tick_secs } => {
                if !controls.running {
                    return None;
                }
                let dt = *tick_secs;
                // Computed from the tick count so long runs do not drift.
                let time = self.config.start_time() + (self.tick.0 + 1) as f64 * dt;
                (time, dt)
            }
            Pacing::Clock(clock) => {
                let reading = clock.tick(real_now, controls)?;
                let dt = match self.last_time {
                    Some(prev) if !reading.seeked => (reading.time - prev).max(0.0),
                    _ => 0.0,
                };
                (reading.time, dt)
            }
        };

        self.scratch.clear();
        self.model.collect(time, dt, &mut self.scratch);

        let frame = RenderFrame {
            tick:      self.tick,
            time,
            label:     time.label(),
            positions: self.scratch.clone(),
        };
        self.last_time = Some(time);
        self.tick = self.tick + 1;
        Some(frame)
    }

    /// Like [`step`](Self::step), with observer hooks.
    ///
    /// `on_frame` fires only for frames whose tick is a multiple of
    /// `config.output_interval_ticks`.
    pub fn step_observed<O: SimObserver>(
        &mut self,
        real_now: f64,
        controls: &ClockControls,
        observer: &mut O,
    ) -> Option<RenderFrame> {
        observer.on_tick_start(self.tick);
        let frame = self.step(real_now, controls)?;
        let interval = self.config.output_interval_ticks;
        if interval > 0 && frame.tick.0 % interval == 0 {
            observer.on_frame(&frame);
        }
        Some(frame)
    }

    /// Echo the clock's derived date and slider back into `controls`, as a
    /// UI does after drawing a frame.  No-op under fixed pacing.
    pub fn sync_controls(&self, controls: &mut ClockControls) {
        if let Pacing::Clock(clock) = &self.pacing {
            controls.follow(clock.state());
        }
    }

    /// Drive `n` steps from a synthetic wall clock that starts at
    /// `real_start` and advances `real_step` seconds per step, syncing
    /// `controls` after each step.
    ///
    /// Returns the number of frames produced.  Useful for tests, batch
    /// export, and headless replays.
    pub fn run_ticks<O: SimObserver>(
        &mut self,
        n:          u64,
        real_start: f64,
        real_step:  f64,
        controls:   &mut ClockControls,
        observer:   &mut O,
    ) -> u64 {
        let mut frames = 0;
        for i in 0..n {
            let real_now = real_start + i as f64 * real_step;
            if self.step_observed(real_now, controls, observer).is_some() {
                frames += 1;
            }
            self.sync_controls(controls);
        }
        observer.on_sim_end(self.tick);
        frames
    }
}

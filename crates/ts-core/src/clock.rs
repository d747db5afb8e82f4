//! Playback clock: maps a stream of wall-clock observations onto simulated
//! time under operator control.
//!
//! # Model
//!
//! The clock is a pure transition function
//!
//! ```text
//! (ClockState, now, ClockControls) → (ClockState, Option<ClockReading>)
//! ```
//!
//! wrapped by [`PlaybackClock`] for callers that just want to feed ticks.
//! The operator controls are a complete snapshot (date, slider position,
//! multiplier, running flag) rather than a stream of change events, so the
//! outcome of a tick never depends on which control changed most recently.
//!
//! # Rules, per tick
//!
//! 1. **Seek**: the incoming `(date, slider)` differs from the state's
//!    derived `(date, slider)`: simulated time jumps to
//!    `day_start(date) + slider` and the real-time anchor moves to `now`.
//!    A seek is emitted even while paused.
//! 2. **Rebaseline**: the multiplier changed, or playback just resumed:
//!    simulated time holds for this tick and the anchor moves to `now`.
//! 3. **Advance**: running, nothing changed: simulated time grows by
//!    `(now - last_real) × multiplier`.
//! 4. **Frozen**: paused, no seek: nothing is emitted.
//!
//! After any of 1–3 the time is clamped to the end of the selected day (or
//! the configured horizon) and the derived slider is written back so that
//! echoing it through the controller is never mistaken for a seek.

use chrono::NaiveDate;
use log::{debug, warn};

use crate::{SimTime, SECS_PER_DAY};

/// Largest slider value: the last whole second of a day.
pub const MAX_SLIDER_SECS: u32 = 86_399;

// ── SpeedMultiplier ───────────────────────────────────────────────────────────

/// Playback rate: simulated seconds per real second.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SpeedMultiplier {
    #[default]
    X1,
    X2,
    X4,
    X8,
}

impl SpeedMultiplier {
    pub const ALL: [SpeedMultiplier; 4] = [
        SpeedMultiplier::X1,
        SpeedMultiplier::X2,
        SpeedMultiplier::X4,
        SpeedMultiplier::X8,
    ];

    #[inline]
    pub fn factor(self) -> f64 {
        match self {
            SpeedMultiplier::X1 => 1.0,
            SpeedMultiplier::X2 => 2.0,
            SpeedMultiplier::X4 => 4.0,
            SpeedMultiplier::X8 => 8.0,
        }
    }

    /// Parse the integer factor offered by a UI selector (1, 2, 4 or 8).
    pub fn from_factor(n: u32) -> Option<Self> {
        match n {
            1 => Some(SpeedMultiplier::X1),
            2 => Some(SpeedMultiplier::X2),
            4 => Some(SpeedMultiplier::X4),
            8 => Some(SpeedMultiplier::X8),
            _ => None,
        }
    }
}

impl std::fmt::Display for SpeedMultiplier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x", self.factor())
    }
}

// ── Controls and bounds ───────────────────────────────────────────────────────

/// Snapshot of the operator controls at one tick.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClockControls {
    /// `false` while playback is paused.
    pub running:     bool,
    pub multiplier:  SpeedMultiplier,
    /// Selected calendar day.
    pub date:        NaiveDate,
    /// Seconds into `date` shown by the time slider.
    pub slider_secs: u32,
}

impl ClockControls {
    /// Running at 1x from midnight of `date`.
    pub fn new(date: NaiveDate) -> Self {
        Self {
            running:     true,
            multiplier:  SpeedMultiplier::X1,
            date,
            slider_secs: 0,
        }
    }

    /// Copy the clock's derived date and slider back into the controls, as
    /// a UI does when it redraws the slider after every tick.
    pub fn follow(&mut self, state: &ClockState) {
        if let Some(date) = state.date {
            self.date = date;
        }
        if let Some(slider) = state.slider_secs {
            self.slider_secs = slider;
        }
    }

    /// Move the slider to `secs` on `date` (an operator seek).
    pub fn seek(&mut self, date: NaiveDate, secs: u32) {
        self.date = date;
        self.slider_secs = secs;
    }
}

/// Valid range for seeks and playback.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ClockBounds {
    /// Earliest selectable date.
    pub first_date: Option<NaiveDate>,
    /// Latest selectable date.
    pub last_date:  Option<NaiveDate>,
    /// Playback never runs past this instant (e.g. the last trace sample).
    pub horizon:    Option<SimTime>,
}

impl ClockBounds {
    fn clamp_date(&self, date: NaiveDate) -> NaiveDate {
        let mut d = date;
        if let Some(first) = self.first_date {
            d = d.max(first);
        }
        if let Some(last) = self.last_date {
            d = d.min(last);
        }
        d
    }

    fn upper_limit(&self, date: NaiveDate) -> SimTime {
        let end_of_day = SimTime::day_start(date) + SECS_PER_DAY;
        match self.horizon {
            Some(h) => end_of_day.min(h),
            None => end_of_day,
        }
    }
}

// ── State and transition ──────────────────────────────────────────────────────

/// The outcome of a tick that produced a simulated time.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ClockReading {
    pub time:    SimTime,
    /// `true` when this reading came from a seek rather than elapsed time.
    pub seeked:  bool,
    /// `true` when the time was pinned to the upper limit.
    pub clamped: bool,
}

/// Everything the clock remembers between ticks.
///
/// All `Option` fields are `None` until the first observation.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ClockState {
    /// Real time (seconds) of the most recent observation.
    pub last_real:   Option<f64>,
    /// Current simulated time.
    pub sim_time:    Option<SimTime>,
    /// Slider value derived from `sim_time` at the last observation.
    pub slider_secs: Option<u32>,
    /// Date applied at the last observation.
    pub date:        Option<NaiveDate>,
    pub multiplier:  SpeedMultiplier,
    pub running:     bool,
}

impl ClockState {
    /// Apply one observation.  Returns the successor state and, unless the
    /// clock is frozen, the simulated time to render.
    pub fn step(
        &self,
        now:      f64,
        controls: &ClockControls,
        bounds:   &ClockBounds,
    ) -> (ClockState, Option<ClockReading>) {
        let date = bounds.clamp_date(controls.date);
        let slider = controls.slider_secs.min(MAX_SLIDER_SECS);
        if date != controls.date || slider != controls.slider_secs {
            warn!(
                "seek to {} +{}s is out of range; clamped to {} +{}s",
                controls.date, controls.slider_secs, date, slider
            );
        }

        let mut next = ClockState {
            last_real:  Some(now),
            multiplier: controls.multiplier,
            running:    controls.running,
            ..self.clone()
        };

        let seek = self.sim_time.is_none()
            || self.date != Some(date)
            || self.slider_secs != Some(slider);

        let time = match self.sim_time {
            Some(current) if !seek => {
                if !controls.running {
                    return (next, None);
                }
                let rebaseline = !self.running || self.multiplier != controls.multiplier;
                if rebaseline {
                    current
                } else {
                    let elapsed = (now - self.last_real.unwrap_or(now)).max(0.0);
                    current + elapsed * controls.multiplier.factor()
                }
            }
            _ => {
                debug!("clock seek to {date} +{slider}s");
                SimTime::day_start(date) + slider as f64
            }
        };

        let limit = bounds.upper_limit(date);
        let clamped = time > limit;
        let time = if clamped { limit } else { time };

        next.sim_time = Some(time);
        next.date = Some(date);
        next.slider_secs = Some(derive_slider(time, date));

        (next, Some(ClockReading { time, seeked: seek, clamped }))
    }
}

/// Whole seconds into `date`, clamped to the slider range.
fn derive_slider(time: SimTime, date: NaiveDate) -> u32 {
    let secs = time.seconds_into(date).floor();
    if secs <= 0.0 {
        0
    } else {
        (secs as u64).min(MAX_SLIDER_SECS as u64) as u32
    }
}

// ── PlaybackClock ─────────────────────────────────────────────────────────────

/// Stateful wrapper around [`ClockState::step`].
#[derive(Clone, Debug, Default)]
pub struct PlaybackClock {
    state:  ClockState,
    bounds: ClockBounds,
}

impl PlaybackClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bounds(bounds: ClockBounds) -> Self {
        Self { state: ClockState::default(), bounds }
    }

    /// Feed one wall-clock observation.
    pub fn tick(&mut self, now: f64, controls: &ClockControls) -> Option<ClockReading> {
        let (next, reading) = self.state.step(now, controls, &self.bounds);
        self.state = next;
        reading
    }

    #[inline]
    pub fn state(&self) -> &ClockState {
        &self.state
    }

    #[inline]
    pub fn bounds(&self) -> &ClockBounds {
        &self.bounds
    }

    /// Current simulated time, if the clock has been observed at least once.
    #[inline]
    pub fn now(&self) -> Option<SimTime> {
        self.state.sim_time
    }

    /// Slider value the controller should display.
    #[inline]
    pub fn slider_secs(&self) -> Option<u32> {
        self.state.slider_secs
    }

    /// `YYYY-MM-DD HH:MM:SS` label for the current simulated time.
    pub fn label(&self) -> Option<String> {
        self.state.sim_time.map(SimTime::label)
    }
}

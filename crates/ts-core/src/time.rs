//! Simulation time model.
//!
//! # Design
//!
//! Two notions of time coexist:
//!
//! - [`Tick`] counts orchestrator invocations (one per wall-clock timer
//!   fire).  It is exact and only ever increments.
//! - [`SimTime`] is the simulated Unix timestamp in seconds that drives
//!   vehicle motion.  It is advanced either by a fixed step per tick or by
//!   the [`PlaybackClock`](crate::PlaybackClock) from real elapsed time.
//!
//! Calendar arithmetic treats timestamps as naive UTC: a "day" is the
//! half-open interval `[day_start, day_start + 86 400)`.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveTime};

/// Seconds in one simulated day.
pub const SECS_PER_DAY: f64 = 86_400.0;

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute orchestrator tick counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Return the tick `n` steps after `self`.
    #[inline]
    pub fn offset(self, n: u64) -> Tick {
        Tick(self.0 + n)
    }

    /// Ticks elapsed from `earlier` to `self`.
    ///
    /// # Panics
    /// Panics in debug mode if `earlier > self`.
    #[inline]
    pub fn since(self, earlier: Tick) -> u64 {
        self.0 - earlier.0
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── SimTime ──────────────────────────────────────────────────────────────────

/// Simulated time as Unix seconds (fractional).
#[derive(Copy, Clone, PartialEq, PartialOrd, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimTime(pub f64);

impl SimTime {
    #[inline]
    pub fn from_unix(secs: f64) -> Self {
        SimTime(secs)
    }

    #[inline]
    pub fn as_secs(self) -> f64 {
        self.0
    }

    /// Midnight (naive UTC) at the start of `date`.
    pub fn day_start(date: NaiveDate) -> SimTime {
        SimTime(date.and_time(NaiveTime::MIN).and_utc().timestamp() as f64)
    }

    /// Calendar date this instant falls on, or `None` if the timestamp is
    /// outside chrono's representable range.
    pub fn date(self) -> Option<NaiveDate> {
        DateTime::from_timestamp(self.0.floor() as i64, 0).map(|dt| dt.date_naive())
    }

    /// Seconds elapsed since the start of `date` (may be negative or exceed
    /// a day when `self` lies on another date).
    #[inline]
    pub fn seconds_into(self, date: NaiveDate) -> f64 {
        self.0 - SimTime::day_start(date).0
    }

    /// Human-readable `YYYY-MM-DD HH:MM:SS` label (fraction truncated).
    pub fn label(self) -> String {
        match DateTime::from_timestamp(self.0.floor() as i64, 0) {
            Some(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
            None => format!("{:.0}s", self.0),
        }
    }

    #[inline]
    pub fn min(self, other: SimTime) -> SimTime {
        if other.0 < self.0 { other } else { self }
    }
}

impl std::ops::Add<f64> for SimTime {
    type Output = SimTime;
    #[inline]
    fn add(self, rhs: f64) -> SimTime {
        SimTime(self.0 + rhs)
    }
}

impl std::ops::Sub for SimTime {
    type Output = f64;
    #[inline]
    fn sub(self, rhs: SimTime) -> f64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

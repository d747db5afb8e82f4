//! End-of-route policy shared by configuration and the edge walker.
//!
//! One enum replaces three near-identical motion loops: the walker consults
//! the policy only at the moment a vehicle runs past the last edge of its
//! route.

/// What a vehicle does after traversing the last edge of its route.
#[derive(Copy, Clone, PartialEq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum EndOfRoute {
    /// Wrap to the first edge immediately, carrying leftover distance.
    ///
    /// The wrap takes zero simulated time: the vehicle jumps from the route
    /// end back to the route start within one tick.
    #[default]
    Loop,

    /// Disappear for `wait_secs` of simulated time, then restart from the
    /// first node of the route.
    WaitThenRestart { wait_secs: f64 },

    /// Wrap to the first edge and stay hidden until `hide_secs` of simulated
    /// time have passed.
    HideThenLoop { hide_secs: f64 },
}

impl EndOfRoute {
    /// Default pause used by the wait and hide variants.
    pub const DEFAULT_PAUSE_SECS: f64 = 10.0;

    /// Human-readable label, useful for log lines and CSV columns.
    pub fn as_str(self) -> &'static str {
        match self {
            EndOfRoute::Loop                   => "loop",
            EndOfRoute::WaitThenRestart { .. } => "wait_then_restart",
            EndOfRoute::HideThenLoop { .. }    => "hide_then_loop",
        }
    }

    /// The pause duration carried by the policy (0 for `Loop`).
    pub fn pause_secs(self) -> f64 {
        match self {
            EndOfRoute::Loop                           => 0.0,
            EndOfRoute::WaitThenRestart { wait_secs }  => wait_secs,
            EndOfRoute::HideThenLoop { hide_secs }     => hide_secs,
        }
    }
}

impl std::fmt::Display for EndOfRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

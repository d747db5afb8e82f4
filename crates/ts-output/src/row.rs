//! Plain data row types written by output backends.

use ts_sim::{RenderFrame, VehiclePosition};

/// One visible vehicle in one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionRow {
    pub tick:    u64,
    /// Simulated Unix seconds.
    pub time:    f64,
    pub vehicle: u32,
    /// Changes whenever the vehicle reappears after a restart.
    pub token:   u32,
    pub lat:     f64,
    pub lon:     f64,
}

impl PositionRow {
    pub fn new(frame: &RenderFrame, p: &VehiclePosition) -> Self {
        Self {
            tick:    frame.tick.0,
            time:    frame.time.0,
            vehicle: p.vehicle.0,
            token:   p.token,
            lat:     p.position.lat,
            lon:     p.position.lon,
        }
    }
}

/// Per-frame summary.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameRow {
    pub tick:    u64,
    pub time:    f64,
    pub label:   String,
    pub visible: u64,
}

impl From<&RenderFrame> for FrameRow {
    fn from(frame: &RenderFrame) -> Self {
        Self {
            tick:    frame.tick.0,
            time:    frame.time.0,
            label:   frame.label.clone(),
            visible: frame.visible_count() as u64,
        }
    }
}

//! Per-tick render payload.

use ts_core::{GeoPoint, SimTime, Tick, VehicleId};

/// One visible vehicle in a frame.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VehiclePosition {
    pub vehicle:  VehicleId,
    pub position: GeoPoint,
    /// Changes whenever the vehicle reappears after a restart or a hidden
    /// wrap, so renderers can treat it as a new marker.
    pub token:    u32,
}

impl VehiclePosition {
    /// Stable marker key, `vehicle_<id>_<token>`.
    pub fn render_key(&self) -> String {
        format!("vehicle_{}_{}", self.vehicle.0, self.token)
    }
}

/// Everything the rendering layer needs for one tick.
///
/// Vehicles that are waiting, hidden or inactive are simply absent.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RenderFrame {
    pub tick:      Tick,
    pub time:      SimTime,
    /// `YYYY-MM-DD HH:MM:SS` form of `time`.
    pub label:     String,
    pub positions: Vec<VehiclePosition>,
}

impl RenderFrame {
    pub fn visible_count(&self) -> usize {
        self.positions.len()
    }

    /// Caption shown next to the map.
    pub fn caption(&self) -> String {
        format!("Current Time: {}", self.label)
    }
}

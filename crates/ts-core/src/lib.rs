//! `ts-core`: foundational types for the `tracksim` vehicle playback engine.
//!
//! This crate is a dependency of every other `ts-*` crate.  It has no `ts-*`
//! dependencies and few external ones (`rand`, `chrono`, `log`, `thiserror`,
//! plus optional `serde`).
//!
//! # What lives here
//!
//! | Module       | Contents                                                   |
//! |--------------|------------------------------------------------------------|
//! | [`ids`]      | `VehicleId`, `NodeId`, `EdgeId`                            |
//! | [`geo`]      | `GeoPoint`, haversine distance, clamped interpolation      |
//! | [`time`]     | `Tick`, `SimTime`, day arithmetic                          |
//! | [`clock`]    | `PlaybackClock`, `ClockState`, `ClockControls`             |
//! | [`rng`]      | `VehicleRng` (per-vehicle), `SimRng` (global)              |
//! | [`policy`]   | `EndOfRoute` policy enum                                   |
//! | [`config`]   | `SimConfig`                                                |
//! | [`error`]    | `CoreError`, `CoreResult`                                  |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod clock;
pub mod config;
pub mod error;
pub mod geo;
pub mod ids;
pub mod policy;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use clock::{ClockBounds, ClockControls, ClockReading, ClockState, PlaybackClock, SpeedMultiplier};
pub use config::SimConfig;
pub use error::{CoreError, CoreResult};
pub use geo::GeoPoint;
pub use ids::{EdgeId, NodeId, VehicleId};
pub use policy::EndOfRoute;
pub use rng::{SimRng, VehicleRng};
pub use time::{SimTime, Tick, SECS_PER_DAY};

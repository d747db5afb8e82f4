//! `ts-motion`: the two motion models of the engine.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                          |
//! |------------|-------------------------------------------------------------------|
//! | [`walker`] | `EdgeWalker`: constant-speed walk along a route, end-of-route policy |
//! | [`fleet`]  | `WalkerFleet`: `Vec<EdgeWalker>` arena indexed by `VehicleId`    |
//! | [`gps`]    | `GpsSample`, `GpsTrace`: bracketing interpolation of recorded fixes |
//! | [`traces`] | `TraceSet`: all traces, label index, time/date range, batch queries |
//! | [`loader`] | Space-separated trace directory loader                           |
//! | [`error`]  | `MotionError`, `MotionResult<T>`                                  |
//!
//! # Edge walking
//!
//! Each tick a walker adds `speed × Δt` metres to its distance on the
//! current edge and crosses as many edges as that distance covers.  Past the
//! last edge the [`EndOfRoute`](ts_core::EndOfRoute) policy decides whether
//! it wraps immediately, waits, or hides.  Positions are interpolated along
//! the edge's recorded shape by arc length, or along the straight segment
//! when the edge has no shape.
//!
//! # Trace playback
//!
//! A GPS vehicle is positioned by linear interpolation between the fixes
//! bracketing the query time.  Vehicles before their first fix, or too long
//! after their last, are inactive and omitted from query results.

pub mod error;
pub mod fleet;
pub mod gps;
pub mod loader;
pub mod traces;
pub mod walker;

#[cfg(test)]
mod tests;

pub use error::{MotionError, MotionResult};
pub use fleet::WalkerFleet;
pub use gps::{GpsSample, GpsTrace};
pub use loader::{load_trace_dir, load_trace_reader};
pub use traces::TraceSet;
pub use walker::{EdgeWalker, WalkPhase, WalkStatus};

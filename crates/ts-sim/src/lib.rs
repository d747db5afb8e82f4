//! `ts-sim`: tick orchestrator for the tracksim engine.
//!
//! # Tick
//!
//! ```text
//! on every wall-clock tick (real_now, controls):
//!   1. Time    Fixed: Δt = tick_secs (nothing while paused)
//!              Clock: PlaybackClock::tick → simulated time, or nothing
//!                     when paused without a seek; Δt = change since the
//!                     previous frame, 0 after a seek
//!   2. Motion  MotionModel::collect(now, Δt) advances every vehicle and
//!              gathers the visible ones (waiting / hidden / inactive
//!              vehicles are left out, never removed)
//!   3. Frame   RenderFrame { tick, time, label, positions }
//! ```
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Advances edge walkers on Rayon's thread pool.          |
//! | `serde`    | Derives `Serialize`/`Deserialize` on render frames.    |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use ts_core::{ClockControls, SimConfig};
//! use ts_sim::{NoopObserver, SimBuilder, WalkerModel};
//! use ts_spatial::{DijkstraRouter, RouteSampler};
//!
//! let model = WalkerModel::spawn(network, &DijkstraRouter, &RouteSampler::default(), &config)?;
//! let mut sim = SimBuilder::new(config, model).build()?;
//! sim.run_ticks(600, 0.0, 1.0, &mut controls, &mut NoopObserver);
//! ```

pub mod builder;
pub mod error;
pub mod frame;
pub mod models;
pub mod observer;
pub mod sim;


pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use frame::{RenderFrame, VehiclePosition};
pub use models::{MotionModel, TraceLookup, TraceModel, WalkerModel};
pub use observer::{NoopObserver, SimObserver};
pub use sim::{Pacing, Sim};

//! `ts-output`: render-frame writers for the tracksim engine.
//!
//! | Backend | Files created                   |
//! |---------|---------------------------------|
//! | CSV     | `positions.csv`, `frames.csv`   |
//!
//! Writers implement [`FrameWriter`] and are driven by
//! [`FrameOutputObserver`], which implements `ts_sim::SimObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use ts_output::{CsvFrameWriter, FrameOutputObserver};
//!
//! let writer = CsvFrameWriter::new(Path::new("./output"))?;
//! let mut obs = FrameOutputObserver::new(writer);
//! sim.run_ticks(600, 0.0, 1.0, &mut controls, &mut obs);
//! if let Some(e) = obs.take_error() {
//!     eprintln!("output error: {e}");
//! }
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;


pub use csv::CsvFrameWriter;
pub use error::{OutputError, OutputResult};
pub use observer::FrameOutputObserver;
pub use row::{FrameRow, PositionRow};
pub use writer::FrameWriter;

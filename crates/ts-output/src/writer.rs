//! The `FrameWriter` trait implemented by all backend writers.

use ts_sim::RenderFrame;

use crate::OutputResult;

/// Sink for render frames.
///
/// Errors surface through [`FrameOutputObserver::take_error`][crate::FrameOutputObserver::take_error]
/// when the writer is driven by the simulation.
pub trait FrameWriter {
    /// Write one frame: its summary row and a row per visible vehicle.
    fn write_frame(&mut self, frame: &RenderFrame) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent: safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}

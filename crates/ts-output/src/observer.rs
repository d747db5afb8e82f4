//! `FrameOutputObserver<W>`: bridges `SimObserver` to a `FrameWriter`.

use log::warn;

use ts_core::Tick;
use ts_sim::{RenderFrame, SimObserver};

use crate::writer::FrameWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that hands every observed frame to a [`FrameWriter`].
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  After the run, check with
/// [`take_error`][Self::take_error].
pub struct FrameOutputObserver<W: FrameWriter> {
    writer:     W,
    frames:     u64,
    last_error: Option<OutputError>,
}

impl<W: FrameWriter> FrameOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, frames: 0, last_error: None }
    }

    /// Take the stored write error (if any).
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Frames successfully handed to the writer.
    pub fn frames_written(&self) -> u64 {
        self.frames
    }

    /// Unwrap the inner writer (e.g. to inspect files after the run).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                warn!("frame output failed: {e}");
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: FrameWriter> SimObserver for FrameOutputObserver<W> {
    fn on_frame(&mut self, frame: &RenderFrame) {
        let result = self.writer.write_frame(frame);
        if result.is_ok() {
            self.frames += 1;
        }
        self.store_err(result);
    }

    fn on_sim_end(&mut self, _final_tick: Tick) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}

//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `positions.csv`: one row per visible vehicle per frame
//! - `frames.csv`: one row per frame

use std::fs::File;
use std::path::Path;

use csv::Writer;
use log::debug;

use ts_sim::RenderFrame;

use crate::row::{FrameRow, PositionRow};
use crate::writer::FrameWriter;
use crate::{OutputError, OutputResult};

pub const POSITIONS_FILE: &str = "positions.csv";
pub const FRAMES_FILE: &str = "frames.csv";

/// Writes render frames to two CSV files.
pub struct CsvFrameWriter {
    positions: Writer<File>,
    frames:    Writer<File>,
    rows:      u64,
    finished:  bool,
}

impl CsvFrameWriter {
    /// Create `dir` if needed, open the two CSV files and write the headers.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        std::fs::create_dir_all(dir)?;

        let mut positions = Writer::from_path(dir.join(POSITIONS_FILE))?;
        positions.write_record(["tick", "time", "vehicle", "token", "lat", "lon"])?;

        let mut frames = Writer::from_path(dir.join(FRAMES_FILE))?;
        frames.write_record(["tick", "time", "label", "visible"])?;

        Ok(Self { positions, frames, rows: 0, finished: false })
    }

    /// Position rows written so far.
    pub fn rows_written(&self) -> u64 {
        self.rows
    }

    fn write_position(&mut self, row: &PositionRow) -> OutputResult<()> {
        self.positions.write_record(&[
            row.tick.to_string(),
            row.time.to_string(),
            row.vehicle.to_string(),
            row.token.to_string(),
            row.lat.to_string(),
            row.lon.to_string(),
        ])?;
        self.rows += 1;
        Ok(())
    }
}

impl FrameWriter for CsvFrameWriter {
    fn write_frame(&mut self, frame: &RenderFrame) -> OutputResult<()> {
        if self.finished {
            return Err(OutputError::Finished);
        }
        for p in &frame.positions {
            self.write_position(&PositionRow::new(frame, p))?;
        }
        let row = FrameRow::from(frame);
        self.frames.write_record(&[
            row.tick.to_string(),
            row.time.to_string(),
            row.label,
            row.visible.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.positions.flush()?;
        self.frames.flush()?;
        debug!("csv writer finished after {} position rows", self.rows);
        Ok(())
    }
}

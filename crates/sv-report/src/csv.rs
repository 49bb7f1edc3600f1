//! CSV report backend.
//!
//! Creates three files in the configured experiment directory:
//! - `learned_edges.csv`
//! - `frame_counts.csv`
//! - `detections.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::ReportWriter;
use crate::{DetectionRow, FrameCountRow, LearnedEdgeRow, ReportResult};

/// Writes evaluation artifacts to three CSV files.
pub struct CsvReporter {
    edges:      Writer<File>,
    frames:     Writer<File>,
    detections: Writer<File>,
    finished:   bool,
}

impl CsvReporter {
    /// Open (or create) the three CSV files in `dir`.  Headers come from the
    /// row structs' serde field names.
    pub fn new(dir: &Path) -> ReportResult<Self> {
        Ok(Self {
            edges:      Writer::from_path(dir.join("learned_edges.csv"))?,
            frames:     Writer::from_path(dir.join("frame_counts.csv"))?,
            detections: Writer::from_path(dir.join("detections.csv"))?,
            finished:   false,
        })
    }
}

impl ReportWriter for CsvReporter {
    fn write_learned_edges(&mut self, rows: &[LearnedEdgeRow]) -> ReportResult<()> {
        for row in rows {
            self.edges.serialize(row)?;
        }
        Ok(())
    }

    fn write_frame_counts(&mut self, rows: &[FrameCountRow]) -> ReportResult<()> {
        for row in rows {
            self.frames.serialize(row)?;
        }
        Ok(())
    }

    fn write_detections(&mut self, rows: &[DetectionRow]) -> ReportResult<()> {
        for row in rows {
            self.detections.serialize(row)?;
        }
        Ok(())
    }

    fn finish(&mut self) -> ReportResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.edges.flush()?;
        self.frames.flush()?;
        self.detections.flush()?;
        Ok(())
    }
}

//! The `ReportWriter` trait implemented by backend writers.

use crate::{DetectionRow, FrameCountRow, LearnedEdgeRow, ReportResult};

/// Trait implemented by report backends (CSV today; others can slot in
/// without touching the callers).
pub trait ReportWriter {
    /// Write the learned edge table.
    fn write_learned_edges(&mut self, rows: &[LearnedEdgeRow]) -> ReportResult<()>;

    /// Write the per-node frame statistics.
    fn write_frame_counts(&mut self, rows: &[FrameCountRow]) -> ReportResult<()>;

    /// Write a batch of detection records.
    fn write_detections(&mut self, rows: &[DetectionRow]) -> ReportResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent — safe to call more than once.
    fn finish(&mut self) -> ReportResult<()>;
}

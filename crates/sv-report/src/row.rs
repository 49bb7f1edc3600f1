//! Plain data row types written by the reporter.

use serde::Serialize;

use sv_overlay::EdgeRecord;

/// One learned overlay edge — the training artifact.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LearnedEdgeRow {
    pub src:       u32,
    pub dst:       u32,
    pub distance:  f64,
    pub intensity: u64,
    /// Empty field when the edge was never observed during training.
    pub min_time:  Option<u64>,
}

impl From<&EdgeRecord> for LearnedEdgeRow {
    fn from(record: &EdgeRecord) -> Self {
        Self {
            src:       record.src.0,
            dst:       record.dst.0,
            distance:  record.distance,
            intensity: record.intensity,
            min_time:  record.min_time,
        }
    }
}

/// Frames processed by one overlay node — the cost metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FrameCountRow {
    pub node:             u32,
    pub frames_processed: u64,
}

/// One target sighting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DetectionRow {
    pub object: u32,
    pub domain: u32,
    pub tick:   u64,
}

//! Unit tests for the CSV reporter.

use std::fs;

use sv_core::OverlayId;
use sv_overlay::EdgeRecord;

use crate::{CsvReporter, DetectionRow, FrameCountRow, LearnedEdgeRow, ReportWriter};

#[test]
fn learned_edges_round_trip_through_csv() {
    let dir = tempfile::tempdir().unwrap();
    let record = EdgeRecord {
        src:       OverlayId(0),
        dst:       OverlayId(1),
        distance:  7.0,
        intensity: 12,
        min_time:  Some(3),
    };
    let rows = vec![LearnedEdgeRow::from(&record)];

    let mut reporter = CsvReporter::new(dir.path()).unwrap();
    reporter.write_learned_edges(&rows).unwrap();
    reporter.finish().unwrap();

    let content = fs::read_to_string(dir.path().join("learned_edges.csv")).unwrap();
    let mut lines = content.lines();
    assert_eq!(lines.next().unwrap(), "src,dst,distance,intensity,min_time");
    assert_eq!(lines.next().unwrap(), "0,1,7.0,12,3");
}

#[test]
fn unobserved_min_time_serialises_as_empty_field() {
    let dir = tempfile::tempdir().unwrap();
    let rows = vec![LearnedEdgeRow {
        src:       0,
        dst:       2,
        distance:  4.5,
        intensity: 0,
        min_time:  None,
    }];

    let mut reporter = CsvReporter::new(dir.path()).unwrap();
    reporter.write_learned_edges(&rows).unwrap();
    reporter.finish().unwrap();

    let content = fs::read_to_string(dir.path().join("learned_edges.csv")).unwrap();
    assert!(content.lines().nth(1).unwrap().ends_with("4.5,0,"));
}

#[test]
fn frame_counts_and_detections_written() {
    let dir = tempfile::tempdir().unwrap();
    let mut reporter = CsvReporter::new(dir.path()).unwrap();
    reporter
        .write_frame_counts(&[
            FrameCountRow { node: 0, frames_processed: 100 },
            FrameCountRow { node: 1, frames_processed: 42 },
        ])
        .unwrap();
    reporter
        .write_detections(&[DetectionRow { object: 0, domain: 2, tick: 17 }])
        .unwrap();
    reporter.finish().unwrap();

    let frames = fs::read_to_string(dir.path().join("frame_counts.csv")).unwrap();
    assert_eq!(frames.lines().count(), 3); // header + 2 rows
    let detections = fs::read_to_string(dir.path().join("detections.csv")).unwrap();
    assert_eq!(detections.lines().nth(1).unwrap(), "0,2,17");
}

#[test]
fn finish_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let mut reporter = CsvReporter::new(dir.path()).unwrap();
    reporter.finish().unwrap();
    reporter.finish().unwrap();
}

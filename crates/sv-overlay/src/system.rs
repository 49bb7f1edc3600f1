//! The seam between the tick loop and a surveillance implementation.

use rustc_hash::FxHashMap;

use sv_core::{DomainId, ObjectId, OverlayId, Tick};
use sv_graph::DomainGraph;

use crate::OverlayResult;

/// A surveillance system the tick loop can drive.
///
/// Implemented by the adaptive overlay and by the always-on reference
/// baseline — both are the same frame-processing primitive wired to
/// different activation policies, not a class hierarchy.
pub trait SurveillanceSystem {
    /// Process one tick: read frames from the domain graph's guest sets,
    /// then (inference only) run the activation pass.  Called after all
    /// objects have moved for this tick.
    fn on_timetick(&mut self, graph: &DomainGraph, now: Tick) -> OverlayResult<()>;

    /// Toggle training/inference.  Implementations reset their per-node
    /// in-flight state on toggle.  Default: no-op (the reference baseline
    /// has no modes).
    fn set_training_mode(&mut self, _training: bool) {}

    /// Seed frame state from the world as it stands at a phase start, before
    /// any object has moved.  Default: no-op (systems that do not diff
    /// frames need no seed).
    fn prime(&mut self, _graph: &DomainGraph) -> OverlayResult<()> {
        Ok(())
    }

    /// Called once when a phase's tick budget is exhausted — emit the
    /// training artifact or final statistics.  Default: no-op.
    fn on_end_of_time(&mut self) {}

    /// Detection history per target: every `(observed_domain, tick)` at
    /// which some node reported the target.
    fn history(&self) -> &FxHashMap<ObjectId, Vec<(DomainId, Tick)>>;

    /// Frames processed per overlay node.
    fn frames_by_node(&self) -> Vec<(OverlayId, u64)>;

    /// Total frames processed across all nodes — the cost metric the
    /// evaluation harness compares.
    fn total_frames(&self) -> u64 {
        self.frames_by_node().iter().map(|&(_, f)| f).sum()
    }
}

//! The always-on reference system the adaptive overlay is scored against.

use rustc_hash::{FxHashMap, FxHashSet};

use sv_core::{DomainId, ObjectId, OverlayId, SimRng, Tick};
use sv_graph::DomainGraph;

use crate::{OverlayBuilder, OverlayResult, SurveillanceSystem};

/// Every node processes every frame, every tick.  No messaging, no awaiting
/// tables, no activation policy — the frame primitive wired to an
/// always-active policy.
pub struct ReferenceSurveillance {
    /// Node `i` observes `observed[i]`.
    observed: Vec<DomainId>,
    frames:   Vec<u64>,
    targets:  FxHashSet<ObjectId>,
    history:  FxHashMap<ObjectId, Vec<(DomainId, Tick)>>,
}

impl ReferenceSurveillance {
    /// Sample the observed set exactly as the adaptive overlay does.
    pub fn new(
        graph:   &DomainGraph,
        alpha:   f64,
        targets: FxHashSet<ObjectId>,
        rng:     &mut SimRng,
    ) -> OverlayResult<Self> {
        let observed = OverlayBuilder::sample_observed(graph, alpha, rng)?;
        Ok(Self::from_observed(observed, targets))
    }

    /// Observe an explicit domain list (deterministic setups).
    pub fn from_observed(observed: Vec<DomainId>, targets: FxHashSet<ObjectId>) -> Self {
        let history = targets.iter().map(|&t| (t, Vec::new())).collect();
        let frames = vec![0; observed.len()];
        Self {
            observed,
            frames,
            targets,
            history,
        }
    }

    pub fn observed(&self) -> &[DomainId] {
        &self.observed
    }
}

impl SurveillanceSystem for ReferenceSurveillance {
    fn on_timetick(&mut self, graph: &DomainGraph, now: Tick) -> OverlayResult<()> {
        for (i, &domain) in self.observed.iter().enumerate() {
            let frame = graph.guests(domain)?;
            self.frames[i] += 1;

            for object in frame.intersection(&self.targets) {
                self.history.entry(*object).or_default().push((domain, now));
            }
        }
        Ok(())
    }

    fn history(&self) -> &FxHashMap<ObjectId, Vec<(DomainId, Tick)>> {
        &self.history
    }

    fn frames_by_node(&self) -> Vec<(OverlayId, u64)> {
        self.frames
            .iter()
            .enumerate()
            .map(|(i, &f)| (OverlayId(i as u32), f))
            .collect()
    }
}

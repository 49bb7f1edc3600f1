//! The adaptive spatio-temporal surveillance controller.

use rustc_hash::{FxHashMap, FxHashSet};

use sv_core::{DomainId, EdgeId, ObjectId, OverlayId, SimRng, Tick};
use sv_graph::DomainGraph;

use crate::{
    EdgeRecord, Network, OverlayBuilder, OverlayEdge, OverlayGraph, OverlayNode, OverlayResult,
    Phase, SurveillanceSystem,
};

/// Drives the overlay through training and inference.
///
/// Owns the overlay graph and the message fabric; fans frame processing out
/// to the nodes, drains every message cascade within the tick, and — during
/// inference — runs the activation pass after all nodes have finished their
/// frame phase.
pub struct SpatioTemporalSurveillance {
    overlay: OverlayGraph,
    network: Network,
    targets: FxHashSet<ObjectId>,

    phase:   Phase,
    history: FxHashMap<ObjectId, Vec<(DomainId, Tick)>>,
}

impl SpatioTemporalSurveillance {
    /// Build over a uniformly sampled ⌈α·|V|⌉-domain observed set.
    pub fn new(
        graph:   &DomainGraph,
        alpha:   f64,
        targets: FxHashSet<ObjectId>,
        rng:     &mut SimRng,
    ) -> OverlayResult<Self> {
        let observed = OverlayBuilder::sample_observed(graph, alpha, rng)?;
        Self::with_observed(graph, &observed, targets)
    }

    /// Build for an explicit node ↦ domain assignment (deterministic setups).
    pub fn with_observed(
        graph:    &DomainGraph,
        observed: &[DomainId],
        targets:  FxHashSet<ObjectId>,
    ) -> OverlayResult<Self> {
        let overlay = OverlayBuilder::build_from_observed(graph, observed)?;
        let network = Network::establish(overlay.node_count());
        let history = targets.iter().map(|&t| (t, Vec::new())).collect();
        tracing::info!(
            target: "surveillance",
            nodes = overlay.node_count(),
            targets = targets.len(),
            "adaptive overlay initialized"
        );
        Ok(Self {
            overlay,
            network,
            targets,
            phase: Phase::Training,
            history,
        })
    }

    // ── Introspection ─────────────────────────────────────────────────────

    pub fn overlay(&self) -> &OverlayGraph {
        &self.overlay
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The learned edge table — the training artifact.
    pub fn learned_edges(&self) -> Vec<EdgeRecord> {
        self.overlay.edge_records()
    }

    // ── Message routing ───────────────────────────────────────────────────

    /// Drain the fabric to empty, delivering each envelope to its addressee.
    /// Receive handlers may enqueue further messages (the CANCEL cascade);
    /// those are delivered in the same drain, so the cascade completes
    /// before the caller moves on to the next node's frame step.
    fn drain_messages(
        nodes:     &mut [OverlayNode],
        edges:     &[OverlayEdge],
        adjacency: &[Vec<(OverlayId, EdgeId)>],
        network:   &mut Network,
    ) -> OverlayResult<()> {
        while let Some(envelope) = network.pop() {
            let dst = envelope.dst.index();
            nodes[dst].on_receive(
                envelope.src,
                envelope.phase,
                envelope.signal,
                &adjacency[dst],
                edges,
                network,
            )?;
        }
        Ok(())
    }
}

impl SurveillanceSystem for SpatioTemporalSurveillance {
    fn on_timetick(&mut self, graph: &DomainGraph, now: Tick) -> OverlayResult<()> {
        let OverlayGraph { nodes, edges, adjacency } = &mut self.overlay;

        // ── Frame phase ───────────────────────────────────────────────────
        for i in 0..nodes.len() {
            match self.phase {
                Phase::Training => {
                    let frame = graph.guests(nodes[i].observed_domain())?.clone();
                    nodes[i].on_training_tick(frame, now, &adjacency[i], edges, &mut self.network)?;
                }
                Phase::Inference => {
                    if nodes[i].is_active() {
                        let domain = nodes[i].observed_domain();
                        let frame = graph.guests(domain)?.clone();
                        let detected = nodes[i].on_inference_tick(
                            frame,
                            now,
                            &adjacency[i],
                            &self.targets,
                            &mut self.network,
                        )?;
                        for object in detected {
                            tracing::info!(
                                target: "surveillance",
                                node = %nodes[i].id(),
                                domain = %domain,
                                object = %object,
                                tick = %now,
                                "target detected"
                            );
                            self.history.entry(object).or_default().push((domain, now));
                        }
                    }
                }
            }
            // Cascades complete before the next node reads its frame.
            Self::drain_messages(nodes, edges, adjacency, &mut self.network)?;
        }

        // ── Activation pass ───────────────────────────────────────────────
        //
        // Every node finishes its frame phase before any node decides
        // activation; the decision reads the live guest set, not the frame
        // snapshot, so a node that skipped processing still wakes on
        // occupancy.
        if self.phase == Phase::Inference {
            for node in nodes.iter_mut() {
                let frame_empty = graph.guests(node.observed_domain())?.is_empty();
                node.update_active_status(now, frame_empty);
            }
        }
        Ok(())
    }

    fn set_training_mode(&mut self, training: bool) {
        self.phase = if training { Phase::Training } else { Phase::Inference };
        for node in &mut self.overlay.nodes {
            node.reset();
        }
    }

    fn prime(&mut self, graph: &DomainGraph) -> OverlayResult<()> {
        for node in &mut self.overlay.nodes {
            let frame = graph.guests(node.observed_domain())?.clone();
            node.prime(frame);
        }
        Ok(())
    }

    fn on_end_of_time(&mut self) {
        if self.phase == Phase::Training {
            for record in self.learned_edges() {
                tracing::info!(
                    target: "surveillance",
                    src = %record.src,
                    dst = %record.dst,
                    distance = record.distance,
                    intensity = record.intensity,
                    min_time = ?record.min_time,
                    "learned edge"
                );
            }
        }
    }

    fn history(&self) -> &FxHashMap<ObjectId, Vec<(DomainId, Tick)>> {
        &self.history
    }

    fn frames_by_node(&self) -> Vec<(OverlayId, u64)> {
        self.overlay
            .nodes
            .iter()
            .map(|n| (n.id(), n.frames_processed()))
            .collect()
    }
}

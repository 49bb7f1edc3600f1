//! The observation node: frame processor, training and inference handlers,
//! signal receiver, activation policy.
//!
//! A node never holds references to its peers.  It receives its adjacency
//! slice and the shared edge cells as arguments each call, and all outgoing
//! communication goes through the [`Network`] queue — the controller routes
//! deliveries back by id.

use rustc_hash::{FxHashMap, FxHashSet};

use sv_core::{DomainId, EdgeId, ObjectId, OverlayId, Tick};

use crate::{Network, OverlayEdge, OverlayError, OverlayResult, Phase, Signal};

// ── Expectation ───────────────────────────────────────────────────────────────

/// One awaiting-table entry: which node flagged the departure, and the
/// reference tick.  During training the reference is the departure tick
/// itself; during inference it is the predicted earliest arrival
/// (`departure + learned min_time − 1`).
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Expectation {
    pub src:       OverlayId,
    pub reference: Tick,
}

// ── OverlayNode ───────────────────────────────────────────────────────────────

/// One observation node watching a single domain.
pub struct OverlayNode {
    id:              OverlayId,
    observed_domain: DomainId,

    active:           bool,
    frames_processed: u64,

    prev_frame: FxHashSet<ObjectId>,
    awaiting:   FxHashMap<ObjectId, Expectation>,
}

impl OverlayNode {
    pub fn new(id: OverlayId, observed_domain: DomainId) -> Self {
        Self {
            id,
            observed_domain,
            active:           true,
            frames_processed: 0,
            prev_frame:       FxHashSet::default(),
            awaiting:         FxHashMap::default(),
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn id(&self) -> OverlayId {
        self.id
    }

    pub fn observed_domain(&self) -> DomainId {
        self.observed_domain
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn frames_processed(&self) -> u64 {
        self.frames_processed
    }

    pub fn awaiting(&self) -> &FxHashMap<ObjectId, Expectation> {
        &self.awaiting
    }

    // ── Phase control ─────────────────────────────────────────────────────

    /// Forget everything learned about in-flight objects (mode toggle).
    pub fn reset(&mut self) {
        self.awaiting.clear();
        self.prev_frame.clear();
    }

    /// Seed the previous frame from the current guest set, so the first
    /// departure after a phase start is visible to the set diff.
    pub fn prime(&mut self, frame: FxHashSet<ObjectId>) {
        self.prev_frame = frame;
    }

    // ── Training ──────────────────────────────────────────────────────────

    /// Process one training frame: record departures, match arrivals against
    /// the awaiting table, and learn edge statistics from matched pairs.
    pub fn on_training_tick(
        &mut self,
        frame:     FxHashSet<ObjectId>,
        now:       Tick,
        neighbors: &[(OverlayId, EdgeId)],
        edges:     &mut [OverlayEdge],
        network:   &mut Network,
    ) -> OverlayResult<()> {
        let incoming: Vec<ObjectId> = frame.difference(&self.prev_frame).copied().collect();
        let outgoing: Vec<ObjectId> = self.prev_frame.difference(&frame).copied().collect();

        for object in outgoing {
            self.awaiting.insert(
                object,
                Expectation { src: self.id, reference: now },
            );
            for &(neighbor, _) in neighbors {
                network.send(
                    self.id,
                    neighbor,
                    Phase::Training,
                    Signal::Left { object, tick: now },
                )?;
            }
        }

        for object in incoming {
            if let Some(expectation) = self.awaiting.get(&object).copied() {
                self.update_weight_set(expectation.src, expectation.reference, now, neighbors, edges)?;
                network.send(
                    self.id,
                    expectation.src,
                    Phase::Training,
                    Signal::Entered { object, tick: now },
                )?;
            }
        }

        self.prev_frame = frame;
        Ok(())
    }

    /// Record one observed transit on the shared edge towards `src`.
    ///
    /// No-op when the departure was flagged by this node itself (the object
    /// left and came back without being sighted elsewhere).
    fn update_weight_set(
        &mut self,
        src:       OverlayId,
        start:     Tick,
        end:       Tick,
        neighbors: &[(OverlayId, EdgeId)],
        edges:     &mut [OverlayEdge],
    ) -> OverlayResult<()> {
        if src == self.id {
            return Ok(());
        }
        let &(_, edge) = neighbors
            .iter()
            .find(|&&(n, _)| n == src)
            .ok_or(OverlayError::MissingEdge { a: self.id, b: src })?;
        let elapsed = end.since(start);
        edges[edge.index()].weights.observe_transit(elapsed);
        tracing::debug!(
            target: "overlay",
            node = %self.id,
            src = %src,
            elapsed,
            "transit observed"
        );
        Ok(())
    }

    // ── Inference ─────────────────────────────────────────────────────────

    /// Process one inference frame.  Only called while the node is active.
    ///
    /// Returns the target ids detected in this frame; the controller records
    /// them in the detection history and bumps the frame statistics.
    pub fn on_inference_tick(
        &mut self,
        frame:     FxHashSet<ObjectId>,
        now:       Tick,
        neighbors: &[(OverlayId, EdgeId)],
        targets:   &FxHashSet<ObjectId>,
        network:   &mut Network,
    ) -> OverlayResult<Vec<ObjectId>> {
        let incoming: Vec<ObjectId> = frame.difference(&self.prev_frame).copied().collect();
        let outgoing: Vec<ObjectId> = self.prev_frame.difference(&frame).copied().collect();

        for object in outgoing {
            if !targets.contains(&object) {
                continue;
            }
            self.awaiting.insert(
                object,
                Expectation { src: self.id, reference: now },
            );
            for &(neighbor, _) in neighbors {
                network.send(
                    self.id,
                    neighbor,
                    Phase::Inference,
                    Signal::Left { object, tick: now },
                )?;
            }
        }

        let mut detected = Vec::new();
        for object in incoming {
            if !targets.contains(&object) {
                continue;
            }
            detected.push(object);
            if let Some(expectation) = self.awaiting.get(&object).copied() {
                network.send(
                    self.id,
                    expectation.src,
                    Phase::Inference,
                    Signal::Entered { object, tick: now },
                )?;
            }
        }

        self.frames_processed += 1;
        self.prev_frame = frame;
        Ok(detected)
    }

    /// Decide whether to keep processing frames.
    ///
    /// The node stays on while a target is present (`frame_empty` is false)
    /// or while some flagged departure's predicted arrival has come due.
    /// Deactivation clears the previous frame so a later reactivation
    /// computes its incoming diff from the empty set.
    pub fn update_active_status(&mut self, now: Tick, frame_empty: bool) {
        let pending = self.awaiting.values().any(|e| e.reference <= now);
        if !pending && frame_empty {
            if self.active {
                tracing::debug!(target: "overlay", node = %self.id, tick = %now, "deactivating");
            }
            self.active = false;
            self.prev_frame.clear();
        } else {
            self.active = true;
        }
    }

    // ── Receive ───────────────────────────────────────────────────────────

    /// Handle one delivered signal.  Self-sends are dropped here rather than
    /// at the sender, so frame handlers can address "the flagged source"
    /// uniformly.
    pub fn on_receive(
        &mut self,
        src:       OverlayId,
        phase:     Phase,
        signal:    Signal,
        neighbors: &[(OverlayId, EdgeId)],
        edges:     &[OverlayEdge],
        network:   &mut Network,
    ) -> OverlayResult<()> {
        if src == self.id {
            return Ok(());
        }

        match (phase, signal) {
            // ── Training ──────────────────────────────────────────────────
            (Phase::Training, Signal::Left { object, tick }) => {
                self.awaiting.insert(object, Expectation { src, reference: tick });
            }
            (Phase::Training, Signal::Entered { object, .. }) => {
                self.awaiting.remove(&object);
                for &(neighbor, _) in neighbors {
                    network.send(self.id, neighbor, phase, Signal::Cancel { object })?;
                }
            }

            // ── Inference ─────────────────────────────────────────────────
            (Phase::Inference, Signal::Left { object, tick }) => {
                let &(_, edge) = neighbors
                    .iter()
                    .find(|&&(n, _)| n == src)
                    .ok_or(OverlayError::MissingEdge { a: self.id, b: src })?;
                // No learned prior on this edge → nothing to predict from.
                if let Some(min_time) = edges[edge.index()].weights.min_time {
                    let eta = Tick((tick.0 + min_time).saturating_sub(1));
                    self.awaiting.insert(object, Expectation { src, reference: eta });
                    tracing::debug!(
                        target: "overlay",
                        node = %self.id,
                        src = %src,
                        eta = %eta,
                        "awaiting object"
                    );
                }
            }
            (Phase::Inference, Signal::Entered { object, .. }) => {
                self.awaiting.remove(&object);
                for &(neighbor, _) in neighbors {
                    if neighbor != src {
                        network.send(self.id, neighbor, phase, Signal::Cancel { object })?;
                    }
                }
            }

            // ── Both modes ────────────────────────────────────────────────
            (_, Signal::Cancel { object }) => {
                self.awaiting.remove(&object);
            }
        }
        Ok(())
    }
}

//! The mobility dispatcher: task hand-out, routing, guest-set bookkeeping,
//! and the ground-truth itinerary record.

use rustc_hash::FxHashMap;

use sv_core::{DomainId, ObjectId, ObjectRng, Tick};
use sv_graph::{paths, DomainGraph};

use crate::{Coordinates, MobilityResult, Task, TaskGenerator};

// ── ObjectSnapshot ────────────────────────────────────────────────────────────

/// The slice of object state the dispatcher is allowed to see: identity and
/// position.  Objects hand this out instead of `&self` so the dispatcher
/// cannot reach into task stacks or routes.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct ObjectSnapshot {
    pub id:          ObjectId,
    pub coordinates: Coordinates,
}

// ── MobilityDispatcher ────────────────────────────────────────────────────────

/// Owns the domain graph and mediates every object↔world interaction.
///
/// The dispatcher is the **only** writer of guest sets.  Objects call back
/// into it on domain enter/leave; the surveillance overlay reads the guest
/// sets through [`graph()`](Self::graph) in a later phase of the same tick.
pub struct MobilityDispatcher {
    graph:     DomainGraph,
    generator: TaskGenerator,

    /// Ground-truth itinerary: every `(domain, tick)` enter event per object.
    history: FxHashMap<ObjectId, Vec<(DomainId, Tick)>>,

    /// Per-destination Move counters, for end-of-phase statistics.
    move_targets: FxHashMap<DomainId, u64>,

    objects_count: usize,
}

impl MobilityDispatcher {
    pub fn new(graph: DomainGraph, generator: TaskGenerator, objects_count: usize) -> Self {
        let history = (0..objects_count as u32)
            .map(|i| (ObjectId(i), Vec::new()))
            .collect();
        let move_targets = graph.domains().map(|d| (d, 0)).collect();
        Self {
            graph,
            generator,
            history,
            move_targets,
            objects_count,
        }
    }

    // ── Graph access ──────────────────────────────────────────────────────

    pub fn graph(&self) -> &DomainGraph {
        &self.graph
    }

    /// Distance of the edge `(a, b)` — consulted by moving objects.
    pub fn edge_weight(&self, a: DomainId, b: DomainId) -> MobilityResult<f64> {
        Ok(self.graph.weight(a, b)?)
    }

    // ── Task and route hand-out ───────────────────────────────────────────

    /// Delegate to the task generator; count Move destinations as a side
    /// effect.
    pub fn get_task(
        &mut self,
        snapshot: &ObjectSnapshot,
        now:      Tick,
        rng:      &mut ObjectRng,
    ) -> MobilityResult<Task> {
        let task = self.generator.create_task(snapshot, now, rng)?;
        if let Task::Move { destination } = task {
            *self.move_targets.entry(destination).or_default() += 1;
            tracing::debug!(
                target: "mobility",
                object = %snapshot.id,
                destination = %destination,
                tick = %now,
                "issued move task"
            );
        }
        Ok(task)
    }

    /// Shortest route between two domains as an ordered vertex sequence.
    pub fn get_route(
        &self,
        src: DomainId,
        dst: DomainId,
    ) -> MobilityResult<(Vec<DomainId>, f64)> {
        Ok(paths::shortest_path(&self.graph, src, dst)?)
    }

    // ── Guest-set callbacks ───────────────────────────────────────────────

    /// Remove the object from `domain`'s guest set.  Absence is tolerated as
    /// a no-op — the system is eventually consistent within a tick.
    pub fn on_domain_leave(
        &mut self,
        snapshot: &ObjectSnapshot,
        domain:   DomainId,
        now:      Tick,
    ) -> MobilityResult<()> {
        self.graph.guests_mut(domain)?.remove(&snapshot.id);
        tracing::debug!(
            target: "mobility",
            object = %snapshot.id,
            domain = %domain,
            tick = %now,
            "left domain"
        );
        Ok(())
    }

    /// Add the object to `domain`'s guest set and append the enter event to
    /// the ground-truth history.
    pub fn on_domain_enter(
        &mut self,
        snapshot: &ObjectSnapshot,
        domain:   DomainId,
        now:      Tick,
    ) -> MobilityResult<()> {
        self.graph.guests_mut(domain)?.insert(snapshot.id);
        self.history.entry(snapshot.id).or_default().push((domain, now));
        tracing::debug!(
            target: "mobility",
            object = %snapshot.id,
            domain = %domain,
            tick = %now,
            "entered domain"
        );
        Ok(())
    }

    /// Seat the object in `domain` without recording a history entry.  Used
    /// at setup and after a phase reset, so that guest sets reflect start
    /// positions from tick 0.
    pub fn place(&mut self, object: ObjectId, domain: DomainId) -> MobilityResult<()> {
        self.graph.guests_mut(domain)?.insert(object);
        Ok(())
    }

    // ── Phase control ─────────────────────────────────────────────────────

    /// Clear all history and all guest sets, returning the world to its
    /// pre-run state.  Callers re-`place` objects afterwards.
    pub fn reset(&mut self) {
        self.history = (0..self.objects_count as u32)
            .map(|i| (ObjectId(i), Vec::new()))
            .collect();
        self.graph.clear_guests();
    }

    /// Log accumulated movement statistics at the end of a phase.
    pub fn on_end_of_time(&self) {
        let mut counters: Vec<_> = self.move_targets.iter().collect();
        counters.sort_by_key(|&(d, _)| *d);
        tracing::info!(target: "mobility", ?counters, "move task targets");
    }

    // ── Introspection ─────────────────────────────────────────────────────

    pub fn history(&self) -> &FxHashMap<ObjectId, Vec<(DomainId, Tick)>> {
        &self.history
    }

    /// The enter events recorded for one object, oldest first.
    pub fn history_of(&self, object: ObjectId) -> &[(DomainId, Tick)] {
        self.history.get(&object).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn move_target_count(&self, domain: DomainId) -> u64 {
        self.move_targets.get(&domain).copied().unwrap_or(0)
    }
}

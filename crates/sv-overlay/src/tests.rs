//! Unit tests for overlay derivation, the learning protocol, and the
//! activation state machine.
//!
//! These tests play the mobility dispatcher's role by mutating guest sets
//! directly between ticks.

use rustc_hash::FxHashSet;

use sv_core::{DomainId, ObjectId, OverlayId, Tick};
use sv_graph::DomainGraph;

use crate::{
    OverlayBuilder, Phase, ReferenceSurveillance, Signal, SpatioTemporalSurveillance,
    SurveillanceSystem,
};

fn d(n: u32) -> DomainId {
    DomainId(n)
}

fn o(n: u32) -> OverlayId {
    OverlayId(n)
}

fn obj(n: u32) -> ObjectId {
    ObjectId(n)
}

fn targets(ids: &[u32]) -> FxHashSet<ObjectId> {
    ids.iter().map(|&i| obj(i)).collect()
}

/// Line 0—1—2 with the given leg weights.
fn line3(w01: f64, w12: f64) -> DomainGraph {
    let mut g = DomainGraph::new(3);
    g.add_edge(d(0), d(1), w01).unwrap();
    g.add_edge(d(1), d(2), w12).unwrap();
    g
}

/// Complete triangle with uniform weights.
fn triangle(w: f64) -> DomainGraph {
    let mut g = DomainGraph::new(3);
    g.add_edge(d(0), d(1), w).unwrap();
    g.add_edge(d(1), d(2), w).unwrap();
    g.add_edge(d(0), d(2), w).unwrap();
    g
}

fn put(graph: &mut DomainGraph, domain: DomainId, object: ObjectId) {
    graph.guests_mut(domain).unwrap().insert(object);
}

fn take(graph: &mut DomainGraph, domain: DomainId, object: ObjectId) {
    graph.guests_mut(domain).unwrap().remove(&object);
}

// ── Builder ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod builder {
    use super::*;
    use sv_core::SimRng;

    #[test]
    fn alpha_out_of_range_is_config_error() {
        let g = triangle(1.0);
        let mut rng = SimRng::new(1);
        assert!(OverlayBuilder::build(&g, 0.0, &mut rng).is_err());
        assert!(OverlayBuilder::build(&g, 1.5, &mut rng).is_err());
    }

    #[test]
    fn full_coverage_triangle_keeps_direct_edges_only() {
        let g = triangle(3.0);
        let overlay =
            OverlayBuilder::build_from_observed(&g, &[d(0), d(1), d(2)]).unwrap();
        assert_eq!(overlay.node_count(), 3);
        // Every pair is adjacent in the domain graph, so every pair gets an
        // edge whose distance is the direct edge weight (the two-hop
        // alternatives pass through an observed interior).
        assert_eq!(overlay.edges.len(), 3);
        for edge in &overlay.edges {
            assert_eq!(edge.weights.distance, 3.0);
            assert_eq!(edge.weights.min_time, None);
            assert_eq!(edge.weights.intensity, 0);
        }
    }

    #[test]
    fn full_coverage_line_has_no_skip_edge() {
        let g = line3(2.0, 5.0);
        let overlay =
            OverlayBuilder::build_from_observed(&g, &[d(0), d(1), d(2)]).unwrap();
        // The only 0↔2 path runs through observed domain 1 — not direct.
        assert!(overlay.edge_between(o(0), o(2)).is_none());
        assert_eq!(overlay.weight(o(0), o(1)).unwrap().distance, 2.0);
        assert_eq!(overlay.weight(o(1), o(2)).unwrap().distance, 5.0);
    }

    #[test]
    fn unobserved_interior_bridges_the_gap() {
        // Observe only the endpoints of the line: the middle hop is
        // invisible, so one overlay edge spans it with the summed distance.
        let g = line3(2.0, 5.0);
        let overlay = OverlayBuilder::build_from_observed(&g, &[d(0), d(2)]).unwrap();
        assert_eq!(overlay.node_count(), 2);
        assert_eq!(overlay.edges.len(), 1);
        assert_eq!(overlay.weight(o(0), o(1)).unwrap().distance, 7.0);
    }

    #[test]
    fn sampled_size_is_ceil_of_alpha() {
        let g = triangle(1.0);
        let mut rng = SimRng::new(9);
        let observed = OverlayBuilder::sample_observed(&g, 0.5, &mut rng).unwrap();
        assert_eq!(observed.len(), 2); // ceil(0.5 * 3)
        let overlay = OverlayBuilder::build(&g, 1.0, &mut rng).unwrap();
        assert_eq!(overlay.node_count(), 3);
    }
}

// ── Training ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod training {
    use super::*;

    /// Two observed domains joined directly; walk one object across and
    /// check the learned statistics on the shared cell.
    #[test]
    fn transit_learns_min_time_and_intensity() {
        let mut g = DomainGraph::new(2);
        g.add_edge(d(0), d(1), 3.0).unwrap();
        let mut sys =
            SpatioTemporalSurveillance::with_observed(&g, &[d(0), d(1)], targets(&[0]))
                .unwrap();
        sys.set_training_mode(true);

        put(&mut g, d(0), obj(0));
        sys.prime(&g).unwrap();

        // Tick 1: the object departs domain 0.
        take(&mut g, d(0), obj(0));
        sys.on_timetick(&g, Tick(1)).unwrap();

        // Ticks 2–3: in transit.
        sys.on_timetick(&g, Tick(2)).unwrap();

        // Tick 3: arrival at domain 1.
        put(&mut g, d(1), obj(0));
        sys.on_timetick(&g, Tick(3)).unwrap();

        let w = sys.overlay().weight(o(0), o(1)).unwrap();
        assert_eq!(w.min_time, Some(2));
        assert_eq!(w.intensity, 1);
        // Shared cell: the reverse view reads the same values.
        let w_rev = sys.overlay().weight(o(1), o(0)).unwrap();
        assert_eq!(w_rev.min_time, Some(2));
    }

    #[test]
    fn min_time_shrinks_and_intensity_grows_monotonically() {
        let mut g = DomainGraph::new(2);
        g.add_edge(d(0), d(1), 3.0).unwrap();
        let mut sys =
            SpatioTemporalSurveillance::with_observed(&g, &[d(0), d(1)], targets(&[0]))
                .unwrap();
        sys.set_training_mode(true);
        put(&mut g, d(0), obj(0));
        sys.prime(&g).unwrap();

        // Slow transit: leave at 1, arrive at 5 → candidate 4.
        take(&mut g, d(0), obj(0));
        sys.on_timetick(&g, Tick(1)).unwrap();
        for t in 2..5 {
            sys.on_timetick(&g, Tick(t)).unwrap();
        }
        put(&mut g, d(1), obj(0));
        sys.on_timetick(&g, Tick(5)).unwrap();
        assert_eq!(sys.overlay().weight(o(0), o(1)).unwrap().min_time, Some(4));

        // Faster transit back: leave at 6, arrive at 8 → candidate 2.
        take(&mut g, d(1), obj(0));
        sys.on_timetick(&g, Tick(6)).unwrap();
        sys.on_timetick(&g, Tick(7)).unwrap();
        put(&mut g, d(0), obj(0));
        sys.on_timetick(&g, Tick(8)).unwrap();

        let w = sys.overlay().weight(o(0), o(1)).unwrap();
        assert_eq!(w.min_time, Some(2));
        assert_eq!(w.intensity, 2);

        // A slower transit later must not raise the learned minimum.
        take(&mut g, d(0), obj(0));
        sys.on_timetick(&g, Tick(9)).unwrap();
        for t in 10..15 {
            sys.on_timetick(&g, Tick(t)).unwrap();
        }
        put(&mut g, d(1), obj(0));
        sys.on_timetick(&g, Tick(15)).unwrap();
        let w = sys.overlay().weight(o(0), o(1)).unwrap();
        assert_eq!(w.min_time, Some(2));
        assert_eq!(w.intensity, 3);
    }

    /// Training observes every object, not just declared targets.
    #[test]
    fn training_learns_from_non_targets_too() {
        let mut g = DomainGraph::new(2);
        g.add_edge(d(0), d(1), 3.0).unwrap();
        let mut sys =
            SpatioTemporalSurveillance::with_observed(&g, &[d(0), d(1)], targets(&[0]))
                .unwrap();
        sys.set_training_mode(true);
        put(&mut g, d(0), obj(9)); // not a target
        sys.prime(&g).unwrap();

        take(&mut g, d(0), obj(9));
        sys.on_timetick(&g, Tick(1)).unwrap();
        put(&mut g, d(1), obj(9));
        sys.on_timetick(&g, Tick(2)).unwrap();

        assert_eq!(sys.overlay().weight(o(0), o(1)).unwrap().intensity, 1);
    }
}

// ── Inference ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod inference {
    use super::*;

    /// Train min_time = 2 on the single edge, then hand the object off.
    fn trained_pair() -> (DomainGraph, SpatioTemporalSurveillance) {
        let mut g = DomainGraph::new(2);
        g.add_edge(d(0), d(1), 3.0).unwrap();
        let mut sys =
            SpatioTemporalSurveillance::with_observed(&g, &[d(0), d(1)], targets(&[0]))
                .unwrap();
        sys.set_training_mode(true);
        put(&mut g, d(0), obj(0));
        sys.prime(&g).unwrap();
        take(&mut g, d(0), obj(0));
        sys.on_timetick(&g, Tick(1)).unwrap();
        sys.on_timetick(&g, Tick(2)).unwrap();
        put(&mut g, d(1), obj(0));
        sys.on_timetick(&g, Tick(3)).unwrap();
        assert_eq!(sys.overlay().weight(o(0), o(1)).unwrap().min_time, Some(2));

        // Rewind the world for the inference phase.
        g.clear_guests();
        put(&mut g, d(0), obj(0));
        sys.set_training_mode(false);
        sys.prime(&g).unwrap();
        (g, sys)
    }

    #[test]
    fn handoff_wakes_the_destination_before_arrival() {
        let (mut g, mut sys) = trained_pair();

        // Tick 0: the target departs; node 0 flags it, node 1 computes
        // eta = 0 + 2 − 1 = 1.
        take(&mut g, d(0), obj(0));
        sys.on_timetick(&g, Tick(0)).unwrap();
        let b = &sys.overlay().nodes[1];
        assert_eq!(
            b.awaiting().get(&obj(0)).map(|e| e.reference),
            Some(Tick(1))
        );
        // Not yet due at the end of tick 0 → node 1 sleeps.
        assert!(!b.is_active());

        // End of tick 1: the eta comes due → node 1 wakes.
        sys.on_timetick(&g, Tick(1)).unwrap();
        assert!(sys.overlay().nodes[1].is_active());

        // Tick 2: arrival — the awake node detects it on time.
        put(&mut g, d(1), obj(0));
        sys.on_timetick(&g, Tick(2)).unwrap();
        assert_eq!(sys.history()[&obj(0)], vec![(d(1), Tick(2))]);
    }

    /// A LEFT on an edge that was never observed during training must leave
    /// the receiver's awaiting table untouched and the receiver asleep.
    #[test]
    fn no_prior_left_is_ignored() {
        let mut g = DomainGraph::new(2);
        g.add_edge(d(0), d(1), 3.0).unwrap();
        let mut sys =
            SpatioTemporalSurveillance::with_observed(&g, &[d(0), d(1)], targets(&[0]))
                .unwrap();
        put(&mut g, d(0), obj(0));
        sys.set_training_mode(false); // straight to inference: nothing learned
        sys.prime(&g).unwrap();

        take(&mut g, d(0), obj(0));
        sys.on_timetick(&g, Tick(0)).unwrap();

        let b = &sys.overlay().nodes[1];
        assert!(b.awaiting().is_empty());
        assert!(!b.is_active());
    }

    /// Scenario: A flags a departure; C later sees the arrival.  The ENTERED
    /// notification and the CANCEL cascade must clear A's and B's awaiting
    /// entries within the same tick.
    #[test]
    fn cancel_cascade_clears_stale_waits_same_tick() {
        let mut g = triangle(3.0);
        let mut sys = SpatioTemporalSurveillance::with_observed(
            &g,
            &[d(0), d(1), d(2)],
            targets(&[0]),
        )
        .unwrap();

        // Train every edge to min_time = 1 by walking the object around.
        sys.set_training_mode(true);
        put(&mut g, d(0), obj(0));
        sys.prime(&g).unwrap();
        let tour = [(d(0), d(1)), (d(1), d(2)), (d(2), d(0))];
        let mut t = 1;
        for (from, to) in tour {
            take(&mut g, from, obj(0));
            sys.on_timetick(&g, Tick(t)).unwrap();
            put(&mut g, to, obj(0));
            sys.on_timetick(&g, Tick(t + 1)).unwrap();
            t += 2;
        }
        for record in sys.learned_edges() {
            assert_eq!(record.min_time, Some(1), "edge {:?} untrained", record);
        }

        // Inference: object starts at domain 0 (node A).
        g.clear_guests();
        put(&mut g, d(0), obj(0));
        sys.set_training_mode(false);
        sys.prime(&g).unwrap();

        // Tick 0: departure — A broadcasts LEFT; B and C wait with eta 0.
        take(&mut g, d(0), obj(0));
        sys.on_timetick(&g, Tick(0)).unwrap();
        assert!(sys.overlay().nodes[0].awaiting().contains_key(&obj(0)));
        assert!(sys.overlay().nodes[1].awaiting().contains_key(&obj(0)));
        assert!(sys.overlay().nodes[2].awaiting().contains_key(&obj(0)));

        // Tick 1: the object surfaces at domain 2 (node C).
        put(&mut g, d(2), obj(0));
        sys.on_timetick(&g, Tick(1)).unwrap();

        // C notified A (its flagged source); A cancelled B.  Both tables
        // are clean by the end of the tick.
        assert!(!sys.overlay().nodes[0].awaiting().contains_key(&obj(0)));
        assert!(!sys.overlay().nodes[1].awaiting().contains_key(&obj(0)));
        assert_eq!(sys.history()[&obj(0)], vec![(d(2), Tick(1))]);
    }

    /// Frames are counted iff the node was active that tick.
    #[test]
    fn frames_counted_only_while_active() {
        let (mut g, mut sys) = trained_pair();

        // Tick 0: both nodes active (node 0 holds the target, node 1 has
        // not yet decided) → 2 frames.
        sys.on_timetick(&g, Tick(0)).unwrap();
        assert_eq!(sys.total_frames(), 2);
        // Node 1 deactivated at the end of tick 0; node 0 stays on its
        // occupied frame.
        sys.on_timetick(&g, Tick(1)).unwrap();
        assert_eq!(sys.total_frames(), 3);

        // The target departs at tick 2; node 1's eta lands at tick 3.
        take(&mut g, d(0), obj(0));
        sys.on_timetick(&g, Tick(2)).unwrap();
        let frames_after_departure = sys.total_frames();

        // Tick 3: node 0 keeps processing (its own departure flag is due),
        // node 1 is still asleep until the activation pass at tick's end.
        sys.on_timetick(&g, Tick(3)).unwrap();
        assert!(sys.total_frames() > frames_after_departure);
    }

    /// A non-target guest keeps its node awake but produces no detections.
    #[test]
    fn non_target_occupancy_holds_activation_without_detection() {
        let (mut g, mut sys) = trained_pair();

        // Remove the target entirely; park a non-target in domain 1.
        take(&mut g, d(0), obj(0));
        put(&mut g, d(1), obj(5));
        sys.prime(&g).unwrap();

        for t in 0..5 {
            sys.on_timetick(&g, Tick(t)).unwrap();
        }
        assert!(sys.overlay().nodes[1].is_active());
        assert!(sys.history()[&obj(0)].is_empty());
    }
}

// ── Reference system ──────────────────────────────────────────────────────────

#[cfg(test)]
mod reference {
    use super::*;

    #[test]
    fn every_node_processes_every_tick() {
        let mut g = triangle(3.0);
        let mut sys =
            ReferenceSurveillance::from_observed(vec![d(0), d(1), d(2)], targets(&[0]));
        put(&mut g, d(1), obj(0));

        for t in 0..10 {
            sys.on_timetick(&g, Tick(t)).unwrap();
        }
        assert_eq!(sys.total_frames(), 30);
        for (_, frames) in sys.frames_by_node() {
            assert_eq!(frames, 10);
        }
    }

    #[test]
    fn matches_are_recorded_per_present_tick() {
        let mut g = line3(1.0, 1.0);
        let mut sys = ReferenceSurveillance::from_observed(vec![d(0), d(2)], targets(&[0]));

        put(&mut g, d(0), obj(0));
        sys.on_timetick(&g, Tick(0)).unwrap();
        take(&mut g, d(0), obj(0));
        sys.on_timetick(&g, Tick(1)).unwrap();
        put(&mut g, d(2), obj(0));
        sys.on_timetick(&g, Tick(2)).unwrap();

        assert_eq!(
            sys.history()[&obj(0)],
            vec![(d(0), Tick(0)), (d(2), Tick(2))]
        );
    }

    #[test]
    fn non_targets_are_invisible() {
        let mut g = triangle(1.0);
        let mut sys =
            ReferenceSurveillance::from_observed(vec![d(0), d(1), d(2)], targets(&[0]));
        put(&mut g, d(0), obj(3));
        sys.on_timetick(&g, Tick(0)).unwrap();
        assert!(sys.history()[&obj(0)].is_empty());
    }
}

// ── Messaging fabric ──────────────────────────────────────────────────────────

#[cfg(test)]
mod network {
    use super::*;
    use crate::Network;

    #[test]
    fn unknown_receiver_is_fatal() {
        let mut net = Network::establish(2);
        let err = net.send(
            o(0),
            o(7),
            Phase::Inference,
            Signal::Cancel { object: obj(0) },
        );
        assert!(err.is_err());
    }

    #[test]
    fn fifo_delivery_order() {
        let mut net = Network::establish(3);
        net.send(o(0), o(1), Phase::Training, Signal::Cancel { object: obj(0) })
            .unwrap();
        net.send(o(0), o(2), Phase::Training, Signal::Cancel { object: obj(1) })
            .unwrap();
        assert_eq!(net.pop().unwrap().dst, o(1));
        assert_eq!(net.pop().unwrap().dst, o(2));
        assert!(net.is_idle());
    }
}

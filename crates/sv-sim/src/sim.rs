//! The `Sim` struct and its tick loop.

use rustc_hash::FxHashSet;

use sv_core::{ObjectId, ObjectRng, SimClock, SimConfig, Tick};
use sv_mobility::{MobileObject, MobilityDispatcher};
use sv_overlay::{Phase, SurveillanceSystem};

use crate::{SimObserver, SimResult};

/// The main simulation runner.
///
/// `Sim<S>` owns all simulation state: the mobility dispatcher (which owns
/// the domain graph and its guest sets), the objects with their per-object
/// RNGs, and one surveillance system `S` — adaptive or reference.  The
/// train-then-infer pattern is two [`run_phase`](Self::run_phase) calls with
/// a [`reset`](Self::reset) in between.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<S: SurveillanceSystem> {
    /// Global configuration (tick budget, seed, knobs, …).
    pub config: SimConfig,

    /// Phase clock — rewound to tick 0 at each phase boundary.
    pub clock: SimClock,

    /// Owns the domain graph; the only writer of guest sets.
    pub dispatcher: MobilityDispatcher,

    /// The simulated objects, indexed by `ObjectId`.
    pub objects: Vec<MobileObject>,

    /// Per-object deterministic RNGs, parallel to `objects`.
    pub rngs: Vec<ObjectRng>,

    /// The surveillance system under evaluation.
    pub surveillance: S,

    /// The declared tracking targets.
    pub targets: FxHashSet<ObjectId>,
}

impl<S: SurveillanceSystem> Sim<S> {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run one full phase of `config.time_limit` ticks.
    ///
    /// Toggles the surveillance mode, seeds its frame state from the world
    /// as it stands (so the first departure is visible to the set diff),
    /// runs the tick loop, and fans out the end-of-time hooks.
    pub fn run_phase<O: SimObserver>(
        &mut self,
        training: bool,
        observer: &mut O,
    ) -> SimResult<()> {
        self.surveillance.set_training_mode(training);
        self.surveillance.prime(self.dispatcher.graph())?;

        self.run_ticks(self.config.time_limit, observer)?;

        self.surveillance.on_end_of_time();
        self.dispatcher.on_end_of_time();
        let phase = if training { Phase::Training } else { Phase::Inference };
        observer.on_phase_end(phase, self.clock.current_tick);
        tracing::info!(target: "sim", ?phase, final_tick = %self.clock.current_tick, "phase complete");
        Ok(())
    }

    /// Run exactly `n` ticks from the current position.
    ///
    /// Useful for tests and incremental stepping; `run_phase` delegates here.
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            let now = self.clock.current_tick;
            observer.on_tick_start(now);
            self.process_tick(now)?;
            observer.on_tick_end(now);
            self.clock.advance();
        }
        Ok(())
    }

    /// Rewind the world to tick 0: objects back at their start domains,
    /// history and guest sets cleared, start positions re-seated, and the
    /// per-object RNG streams rewound so the next phase replays the same
    /// trajectories a fresh build would produce.
    ///
    /// The surveillance system keeps its learned edge weights — that is the
    /// point of the train-then-infer pattern.
    pub fn reset(&mut self) {
        self.dispatcher.reset();
        for (object, rng) in self.objects.iter_mut().zip(&mut self.rngs) {
            let start = object.start_domain();
            object.reset_state(start);
            // Start positions were validated at build; the graph is unchanged.
            let _ = self.dispatcher.place(object.id(), start);
            *rng = ObjectRng::new(self.config.seed, object.id());
        }
        self.clock.reset();
        tracing::debug!(target: "sim", "world reset to tick 0");
    }

    // ── Core tick processing ──────────────────────────────────────────────

    fn process_tick(&mut self, now: Tick) -> SimResult<()> {
        // ── Phase 1: objects move, mutating guest sets ────────────────────
        for (object, rng) in self.objects.iter_mut().zip(&mut self.rngs) {
            object.on_timetick(now, &mut self.dispatcher, rng)?;
        }

        // ── Phase 2: the overlay reads frames and reacts ──────────────────
        self.surveillance.on_timetick(self.dispatcher.graph(), now)?;

        Ok(())
    }
}

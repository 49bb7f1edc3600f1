//! Simulation observer trait for progress reporting and data collection.

use sv_core::Tick;
use sv_overlay::Phase;

/// Callbacks invoked by [`Sim::run_phase`][crate::Sim::run_phase] at key
/// points in the tick loop.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
pub trait SimObserver {
    /// Called at the very start of each tick, before any object moves.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called at the end of each tick, after the surveillance phase.
    fn on_tick_end(&mut self, _tick: Tick) {}

    /// Called once when a phase's tick budget is exhausted.
    fn on_phase_end(&mut self, _phase: Phase, _final_tick: Tick) {}
}

/// A [`SimObserver`] that does nothing.  Use when you need to run a phase
/// but don't want progress callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}

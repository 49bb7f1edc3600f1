//! `sv-sim` — the tick loop driving mobility and surveillance together.
//!
//! # Tick anatomy
//!
//! ```text
//! for tick in 0..config.time_limit:
//!   ① Objects   — each object consumes its task, moves, and mutates the
//!                 guest sets through the mobility dispatcher.
//!   ② Overlay   — the surveillance system reads frames, exchanges
//!                 signals, and (inference) runs the activation pass.
//!   ③ Observer  — progress callbacks; the clock advances.
//! ```
//!
//! A tick is indivisible and the whole loop is single-threaded: the phase
//! boundary between ① and ② is the only ordering the overlay semantics
//! depend on.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! let mut sim = SimBuilder::new(config).build_adaptive()?;
//! sim.run_phase(true,  &mut NoopObserver)?;   // training
//! sim.reset();
//! sim.run_phase(false, &mut NoopObserver)?;   // inference
//! println!("{} frames", sim.surveillance.total_frames());
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod sim;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use sim::Sim;

//! `sv-mobility` — the mobility engine: objects moving along weighted graph
//! edges, driven by task stacks whose destinations come from per-object
//! transition matrices.
//!
//! # Tick anatomy
//!
//! ```text
//! for each object:  object.on_timetick(now, &mut dispatcher, &mut rng)
//!   ① no current task?  → dispatcher.get_task → push → enter
//!   ② IDLE    → coordinates preserved
//!      MOVING  → advance along route; guest-set leave/enter callbacks
//!   ③ current task completed? → pop → enter next (or fetch a fresh one)
//! ```
//!
//! The dispatcher owns the [`DomainGraph`](sv_graph::DomainGraph) and is the
//! only writer of its guest sets; the surveillance overlay reads them in a
//! later phase of the same tick.
//!
//! | Module         | Contents                                           |
//! |----------------|----------------------------------------------------|
//! | [`coordinate`] | `Coordinates` — `(domain, offset)` pairs           |
//! | [`task`]       | `Task`, `TaskStack`                                |
//! | [`transition`] | `TransitionMatrix`, `TransitionGenerator`          |
//! | [`generator`]  | `TaskGenerator` — Bernoulli move/wait + inverse CDF|
//! | [`object`]     | `MobileObject` state machine                       |
//! | [`dispatcher`] | `MobilityDispatcher` — guests, routes, history     |
//! | [`speed`]      | Normal speed sampling with positivity rejection    |

pub mod coordinate;
pub mod dispatcher;
pub mod error;
pub mod generator;
pub mod object;
pub mod speed;
pub mod task;
pub mod transition;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use coordinate::Coordinates;
pub use dispatcher::{MobilityDispatcher, ObjectSnapshot};
pub use error::{MobilityError, MobilityResult};
pub use generator::TaskGenerator;
pub use object::{MobileObject, Mode};
pub use speed::sample_average_speeds;
pub use task::{Task, TaskStack};
pub use transition::{TransitionGenerator, TransitionMatrix};

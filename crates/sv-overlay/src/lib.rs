//! `sv-overlay` — the surveillance overlay: a derived graph of observation
//! nodes that cooperate to track declared target objects as they move
//! between domains.
//!
//! # The two systems
//!
//! Both implement [`SurveillanceSystem`] over the same frame-processing
//! primitive (read the observed domain's guest set, diff against the
//! previous frame):
//!
//! - [`SpatioTemporalSurveillance`] — the adaptive overlay.  During training
//!   it learns per-edge transit statistics (`min_time`, `intensity`) from
//!   ground-truth transitions; during inference it uses them to keep only
//!   the nodes likely to see a target awake.
//! - [`ReferenceSurveillance`] — the always-on baseline: every node
//!   processes every frame, no messaging, no activation policy.
//!
//! # Message flow (one tick, inference)
//!
//! ```text
//! node A: frame diff → target left     → broadcast LEFT(t) to neighbors
//! node B: LEFT on a learned edge       → awaiting[obj] = departure + min_time − 1
//! node C: target entered, was awaited  → ENTERED to the flagged source
//! source: ENTERED                      → CANCEL fan-out; stale waits die
//! ...all cascades drain before the next node's frame step.
//! ```
//!
//! | Module        | Contents                                             |
//! |---------------|------------------------------------------------------|
//! | [`signal`]    | `Signal`, `Phase`, `Envelope`                        |
//! | [`network`]   | In-process message fabric                            |
//! | [`weight`]    | `EdgeWeightSet` — learned edge statistics            |
//! | [`graph`]     | `OverlayGraph` — nodes, shared edge cells, adjacency |
//! | [`node`]      | `OverlayNode` training/inference state machines      |
//! | [`builder`]   | Coverage sampling and direct-route edge derivation   |
//! | [`adaptive`]  | `SpatioTemporalSurveillance` controller              |
//! | [`reference`] | `ReferenceSurveillance` baseline                     |
//! | [`system`]    | The `SurveillanceSystem` seam both implement         |

pub mod adaptive;
pub mod builder;
pub mod error;
pub mod graph;
pub mod network;
pub mod node;
pub mod reference;
pub mod signal;
pub mod system;
pub mod weight;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use adaptive::SpatioTemporalSurveillance;
pub use builder::OverlayBuilder;
pub use error::{OverlayError, OverlayResult};
pub use graph::{EdgeRecord, OverlayEdge, OverlayGraph};
pub use network::{Envelope, Network};
pub use node::{Expectation, OverlayNode};
pub use reference::ReferenceSurveillance;
pub use signal::{Phase, Signal};
pub use system::SurveillanceSystem;
pub use weight::EdgeWeightSet;

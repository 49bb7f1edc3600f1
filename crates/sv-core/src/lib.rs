//! `sv-core` — foundational types for the `rust_sv` surveillance framework.
//!
//! This crate is a dependency of every other `sv-*` crate.  It intentionally
//! has no `sv-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module      | Contents                                              |
//! |-------------|-------------------------------------------------------|
//! | [`ids`]     | `ObjectId`, `DomainId`, `OverlayId`, `EdgeId`         |
//! | [`time`]    | `Tick`, `SimClock`                                    |
//! | [`config`]  | `SimConfig` and the distribution selectors            |
//! | [`rng`]     | `ObjectRng` (per-object), `SimRng` (global)           |
//! | [`error`]   | `CoreError`, `CoreResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod error;
pub mod ids;
pub mod rng;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{GroupSizeDistribution, SimConfig, TransitionRowDistribution};
pub use error::{CoreError, CoreResult};
pub use ids::{DomainId, EdgeId, ObjectId, OverlayId};
pub use rng::{ObjectRng, SimRng};
pub use time::{SimClock, Tick};

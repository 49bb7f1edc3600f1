//! `sv-graph` — the spatial graph objects move on, plus the path oracles the
//! rest of the framework consumes.
//!
//! # Data layout
//!
//! Domains are dense small integers, so the graph is a `Vec`-indexed
//! adjacency list rather than a hash-keyed structure.  Each vertex carries a
//! mutable `guests` set — the object identifiers currently resident in that
//! domain — which the mobility dispatcher writes and the surveillance overlay
//! reads.
//!
//! | Module        | Contents                                            |
//! |---------------|-----------------------------------------------------|
//! | [`graph`]     | `DomainGraph` — undirected, weighted, guest sets    |
//! | [`generator`] | Random connected weighted graph synthesis           |
//! | [`paths`]     | Dijkstra shortest path, all-simple-paths enumeration|
//! | [`error`]     | `GraphError`, `GraphResult`                         |

pub mod error;
pub mod generator;
pub mod graph;
pub mod paths;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{GraphError, GraphResult};
pub use generator::GraphGenerator;
pub use graph::DomainGraph;
pub use paths::{path_length, shortest_path, simple_paths};

//! Graph-subsystem error type.

use thiserror::Error;

use sv_core::DomainId;

/// Errors produced by `sv-graph`.  All of these indicate integrity
/// violations — a request against a node or edge that does not exist — and
/// abort the phase.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("domain {0} not found in graph")]
    NodeNotFound(DomainId),

    #[error("no edge between {a} and {b}")]
    EdgeNotFound { a: DomainId, b: DomainId },

    #[error("no route from {from} to {to}")]
    NoRoute { from: DomainId, to: DomainId },
}

pub type GraphResult<T> = Result<T, GraphError>;

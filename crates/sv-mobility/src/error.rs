//! Mobility-subsystem error type.

use thiserror::Error;

use sv_core::{DomainId, ObjectId};
use sv_graph::GraphError;

/// Errors produced by `sv-mobility`.
///
/// `EmptyTaskStack` indicates a programming bug and aborts the phase; the
/// transition and distribution variants surface bad configuration at setup.
#[derive(Debug, Error)]
pub enum MobilityError {
    #[error("failed to pop: task stack is empty")]
    EmptyTaskStack,

    #[error("transition row for domain {src} sums to {sum}, expected 1")]
    NonStochasticRow { src: DomainId, sum: f64 },

    #[error("domain {domain} is not part of the transition matrix")]
    DomainNotInMatrix { domain: DomainId },

    #[error("transition group must contain at least 2 domains, got {0}")]
    GroupTooSmall(usize),

    #[error("no transition matrix for object {0}")]
    UnknownObject(ObjectId),

    #[error("distribution error: {0}")]
    Distribution(String),

    #[error(transparent)]
    Graph(#[from] GraphError),
}

pub type MobilityResult<T> = Result<T, MobilityError>;

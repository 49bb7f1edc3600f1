//! Overlay-subsystem error type.

use thiserror::Error;

use sv_core::OverlayId;
use sv_graph::GraphError;

/// Errors produced by `sv-overlay`.
///
/// `Config` surfaces at setup and halts; `UnknownReceiver` and `MissingEdge`
/// are integrity violations and abort the phase.  A `LEFT` signal on an edge
/// with no learned prior is deliberately *not* an error — the receiver simply
/// ignores it.
#[derive(Debug, Error)]
pub enum OverlayError {
    #[error("overlay configuration error: {0}")]
    Config(String),

    #[error("message sent to unknown overlay node {0}")]
    UnknownReceiver(OverlayId),

    #[error("overlay nodes {a} and {b} are not connected")]
    MissingEdge { a: OverlayId, b: OverlayId },

    #[error(transparent)]
    Graph(#[from] GraphError),
}

pub type OverlayResult<T> = Result<T, OverlayError>;

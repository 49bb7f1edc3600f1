//! Simulation-level error type.

use thiserror::Error;

use sv_core::CoreError;
use sv_graph::GraphError;
use sv_mobility::MobilityError;
use sv_overlay::OverlayError;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("{what} length {got} does not match objects count {expected}")]
    ObjectCountMismatch {
        expected: usize,
        got:      usize,
        what:     &'static str,
    },

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error(transparent)]
    Mobility(#[from] MobilityError),

    #[error(transparent)]
    Overlay(#[from] OverlayError),
}

pub type SimResult<T> = Result<T, SimError>;

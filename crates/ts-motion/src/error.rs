use std::path::PathBuf;

use thiserror::Error;

use ts_core::{CoreError, EdgeId, NodeId};
use ts_spatial::SpatialError;

#[derive(Debug, Error)]
pub enum MotionError {
    #[error("route must contain at least two nodes, got {nodes}")]
    RouteTooShort { nodes: usize },

    #[error("no edge from {from} to {to} for route step {step}")]
    MissingEdge { from: NodeId, to: NodeId, step: usize },

    #[error("edge {0} is not part of the network")]
    UnknownEdge(EdgeId),

    #[error("trace directory {0:?} contains no usable traces")]
    NoTraces(PathBuf),

    #[error("routing failed: {0}")]
    Spatial(#[from] SpatialError),

    #[error("configuration error: {0}")]
    Core(#[from] CoreError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type MotionResult<T> = Result<T, MotionError>;

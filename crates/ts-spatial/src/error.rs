//! Spatial-subsystem error type.

use thiserror::Error;

use ts_core::NodeId;

/// Errors produced by `ts-spatial`.
#[derive(Debug, Error)]
pub enum SpatialError {
    #[error("no route from {from} to {to}")]
    NoRoute { from: NodeId, to: NodeId },

    #[error("node {0} not found in network")]
    NodeNotFound(NodeId),

    #[error("no edge from {from} to {to}")]
    EdgeNotFound { from: NodeId, to: NodeId },

    #[error("network has {count} node(s); route sampling needs at least 2")]
    TooFewNodes { count: usize },

    #[error("no connected node pair found after {attempts} attempts")]
    SamplingExhausted { attempts: u32 },
}

pub type SpatialResult<T> = Result<T, SpatialError>;

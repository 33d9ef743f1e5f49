use thiserror::Error;

use crate::Algorithm;

/// Errors produced while decoding or validating a persisted [`crate::Graph`].
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("invalid graph json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("edge {edge} references missing node {node}")]
    DanglingEdge { edge: String, node: String },

    #[error("duplicate node id {0}")]
    DuplicateNode(String),

    #[error("duplicate edge id {0}")]
    DuplicateEdge(String),

    #[error("edge {0} connects a node to itself")]
    SelfLoop(String),

    #[error("edge {edge} repeats the node pair of edge {existing}")]
    ParallelEdge { edge: String, existing: String },

    #[error("edge {edge} has invalid weight {weight}")]
    InvalidWeight { edge: String, weight: f64 },
}

/// Unmet precondition when starting a [`crate::Playback`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlaybackError {
    #[error("no algorithm selected")]
    NoAlgorithm,

    #[error("{0} requires a start node")]
    MissingStartNode(Algorithm),

    #[error("start node {0} does not exist")]
    UnknownStartNode(String),
}

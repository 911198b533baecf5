//! Crate-wide error type and result alias.
//!
//! Graph mutation and the sorting/pruning algorithms never fail; only the
//! id-based lookups and the diagnostic dump have an error path.

use thiserror::Error;

use crate::graph::NodeId;

#[derive(Error, Debug)]
pub enum GraphError {
    /// The id was never handed out by this graph.
    #[error("Unknown node id: {0}")]
    UnknownNode(NodeId),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, GraphError>;

//! Error types for procedure execution.

use netprox_graph_algorithms::{GraphError, NodeId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProcedureError {
    #[error("unknown procedure: {0}")]
    UnknownProcedure(String),

    #[error("missing argument '{0}'")]
    MissingArgument(&'static str),

    #[error("invalid value for argument '{name}': {message}")]
    InvalidArgument {
        name: &'static str,
        message: String,
    },

    #[error("node {0} does not exist")]
    NodeNotFound(NodeId),

    #[error("graph has too few nodes for this measure")]
    EmptyGraph,

    #[error("label '{0}' matches no nodes")]
    EmptyLabelSet(String),

    #[error(transparent)]
    Graph(#[from] GraphError),
}

pub type ProcedureResult<T> = Result<T, ProcedureError>;

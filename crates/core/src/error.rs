use thiserror::Error;

use crate::graph::NodeIndex;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SsspError {
    #[error("Invalid graph: {0}")]
    InvalidGraph(#[from] GraphDefect),

    #[error("Node {node} is unreachable from the source")]
    Unreachable { node: NodeIndex },

    #[error("Node {node} out of range for a graph of {node_count} nodes")]
    NodeOutOfRange { node: NodeIndex, node_count: usize },

    #[error("Parent links form a cycle through node {node}")]
    ParentCycle { node: NodeIndex },

    #[error("Worker pool error: {0}")]
    WorkerPool(String),

    #[error("Worker aborted: a peer left the round protocol")]
    WorkerAborted,
}

/// Why a matrix/source pair was rejected before any worker started.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphDefect {
    #[error("row {row} has {len} entries, expected {expected}")]
    NotSquare {
        row: usize,
        len: usize,
        expected: usize,
    },

    #[error("weight ({from}, {to}) is NaN")]
    NotANumber { from: NodeIndex, to: NodeIndex },

    #[error("weight ({from}, {to}) is negative: {weight}")]
    NegativeWeight {
        from: NodeIndex,
        to: NodeIndex,
        weight: f64,
    },

    #[error("start node {start} out of range for {node_count} nodes")]
    SourceOutOfRange { start: NodeIndex, node_count: usize },
}

pub type Result<T> = std::result::Result<T, SsspError>;

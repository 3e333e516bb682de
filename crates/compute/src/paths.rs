use serde::Serialize;

use citypath_core::{NodeIndex, SsspError};

use crate::algorithms::path::reconstruct_path;

/// A node made final in a given round, with the distance it was settled at.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Settlement {
    pub round: usize,
    pub node: NodeIndex,
    pub distance: f64,
}

/// Outcome of a single-source run.
///
/// Unreached nodes keep an infinite distance (serialized as `null` in JSON)
/// and no parent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShortestPaths {
    pub source: NodeIndex,
    pub distances: Vec<f64>,
    pub parents: Vec<Option<NodeIndex>>,
    /// Nodes in the order they were settled. Empty for the sequential reference.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub settlements: Vec<Settlement>,
}

impl ShortestPaths {
    pub fn node_count(&self) -> usize {
        self.distances.len()
    }

    /// Finite distance to `node`, `None` if unreachable or out of range.
    pub fn distance(&self, node: NodeIndex) -> Option<f64> {
        self.distances
            .get(node)
            .copied()
            .filter(|d| d.is_finite())
    }

    pub fn is_reachable(&self, node: NodeIndex) -> bool {
        self.distance(node).is_some()
    }

    pub fn reachable_count(&self) -> usize {
        self.distances.iter().filter(|d| d.is_finite()).count()
    }

    /// Nodes from the source to `node`, both inclusive.
    pub fn path_to(&self, node: NodeIndex) -> Result<Vec<NodeIndex>, SsspError> {
        reconstruct_path(&self.parents, &self.distances, node)
    }
}

use citypath_core::{DistanceMatrix, NodeIndex, SsspError};

/// Walk parent links back from `target` and return the node sequence from the
/// source to `target`, both inclusive.
///
/// Fails with `Unreachable` when `target` has no finite distance, and with
/// `ParentCycle` when the parent links never reach a root.
pub fn reconstruct_path(
    parents: &[Option<NodeIndex>],
    distances: &[f64],
    target: NodeIndex,
) -> Result<Vec<NodeIndex>, SsspError> {
    let node_count = parents.len();
    if target >= node_count {
        return Err(SsspError::NodeOutOfRange {
            node: target,
            node_count,
        });
    }
    if !distances[target].is_finite() {
        return Err(SsspError::Unreachable { node: target });
    }

    let mut path = vec![target];
    let mut current = target;
    while let Some(prev) = parents[current] {
        // A chain longer than the node count can only mean a cycle.
        if path.len() >= node_count {
            return Err(SsspError::ParentCycle { node: prev });
        }
        path.push(prev);
        current = prev;
    }

    path.reverse();
    Ok(path)
}

/// Sum of edge weights along `path`, accumulated from the first hop onward.
pub fn path_weight(matrix: &DistanceMatrix, path: &[NodeIndex]) -> f64 {
    path.windows(2)
        .fold(0.0, |total, hop| total + matrix.weight(hop[0], hop[1]))
}

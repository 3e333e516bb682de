use citypath_core::{DistanceMatrix, NodeIndex};

use crate::algorithms::partition::Partition;
use crate::state::RelaxationState;

/// Relax every unsettled node of `partition` against the newly settled node
/// `via`. Returns how many tentative distances improved.
///
/// Writes stay inside `partition`, so workers can run this concurrently on
/// their own slices without locking.
pub fn relax_partition(
    via: NodeIndex,
    partition: &Partition,
    matrix: &DistanceMatrix,
    state: &RelaxationState,
) -> usize {
    let base = state.distance(via);
    let row = matrix.row(via);
    let mut improved = 0;

    for node in partition.range() {
        if state.is_settled(node) {
            continue;
        }
        let weight = row[node];
        if !weight.is_finite() {
            continue;
        }
        let candidate = base + weight;
        if candidate < state.distance(node) {
            state.improve(node, candidate, via);
            improved += 1;
        }
    }

    improved
}

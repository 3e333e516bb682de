use serde::Serialize;

use citypath_core::{NodeIndex, NO_EDGE};

use crate::algorithms::partition::Partition;
use crate::state::RelaxationState;

/// Best unsettled node found by a scan, or the explicit "nothing left" state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Candidate {
    /// No unsettled node with a finite tentative distance.
    Exhausted,
    Node { node: NodeIndex, distance: f64 },
}

impl Candidate {
    pub fn distance(&self) -> f64 {
        match *self {
            Candidate::Exhausted => NO_EDGE,
            Candidate::Node { distance, .. } => distance,
        }
    }

    pub fn node(&self) -> Option<NodeIndex> {
        match *self {
            Candidate::Exhausted => None,
            Candidate::Node { node, .. } => Some(node),
        }
    }

    /// Strictly closer than `other`. Equal distances never win, so the first
    /// candidate to reach a shared accumulator keeps its place.
    pub fn beats(&self, other: &Candidate) -> bool {
        self.distance() < other.distance()
    }
}

/// Closest unsettled node inside `partition`.
///
/// Pure read-only scan. Ties inside one partition go to the lowest index.
pub fn find_local_minimum(partition: &Partition, state: &RelaxationState) -> Candidate {
    let mut best = Candidate::Exhausted;
    for node in partition.range() {
        if state.is_settled(node) {
            continue;
        }
        let candidate = Candidate::Node {
            node,
            distance: state.distance(node),
        };
        if candidate.beats(&best) {
            best = candidate;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use citypath_core::Graph;

    const X: f64 = NO_EDGE;

    fn star() -> Graph {
        // 0 reaches 1..=4 directly with distinct weights; 5 is isolated.
        Graph::from_rows(
            vec![
                vec![0.0, 4.0, 2.0, 2.0, 9.0, X],
                vec![4.0, 0.0, X, X, X, X],
                vec![2.0, X, 0.0, X, X, X],
                vec![2.0, X, X, 0.0, X, X],
                vec![9.0, X, X, X, 0.0, X],
                vec![X, X, X, X, X, 0.0],
            ],
            0,
        )
        .unwrap()
    }

    #[test]
    fn finds_minimum_in_range() {
        let state = RelaxationState::new(&star());
        let p = Partition::for_worker(0, 1, 6);
        assert_eq!(
            find_local_minimum(&p, &state),
            Candidate::Node {
                node: 2,
                distance: 2.0
            }
        );
    }

    #[test]
    fn skips_settled_nodes() {
        let state = RelaxationState::new(&star());
        state.settle(2);
        state.settle(3);
        let p = Partition::for_worker(0, 1, 6);
        assert_eq!(find_local_minimum(&p, &state).node(), Some(1));
    }

    #[test]
    fn empty_partition_reports_exhausted() {
        let state = RelaxationState::new(&star());
        let p = Partition {
            worker: 3,
            first: 4,
            end: 4,
        };
        assert_eq!(find_local_minimum(&p, &state), Candidate::Exhausted);
    }

    #[test]
    fn unreached_nodes_are_never_candidates() {
        let state = RelaxationState::new(&star());
        let p = Partition {
            worker: 1,
            first: 5,
            end: 6,
        };
        assert_eq!(find_local_minimum(&p, &state), Candidate::Exhausted);
    }

    #[test]
    fn beats_is_strict() {
        let a = Candidate::Node {
            node: 1,
            distance: 3.0,
        };
        let b = Candidate::Node {
            node: 2,
            distance: 3.0,
        };
        assert!(!a.beats(&b));
        assert!(!b.beats(&a));
        assert!(a.beats(&Candidate::Exhausted));
        assert!(!Candidate::Exhausted.beats(&a));
        assert_eq!(Candidate::Exhausted.distance(), NO_EDGE);
    }
}

use std::sync::{Mutex, PoisonError};

use crate::algorithms::local_min::Candidate;
use crate::paths::Settlement;
use crate::state::RelaxationState;

/// Shared accumulator that merges every worker's local minimum into the
/// round's single global choice.
#[derive(Debug)]
pub struct GlobalMinimum {
    best: Mutex<Candidate>,
}

impl Default for GlobalMinimum {
    fn default() -> Self {
        Self::new()
    }
}

impl GlobalMinimum {
    pub fn new() -> Self {
        Self {
            best: Mutex::new(Candidate::Exhausted),
        }
    }

    /// Start a new round. Called by the designated worker before barrier A.
    pub fn reset(&self) {
        *self.best.lock().unwrap_or_else(PoisonError::into_inner) = Candidate::Exhausted;
    }

    /// Critical section: keep `candidate` only if strictly closer than the
    /// current choice. Returns whether it was taken.
    pub fn offer(&self, candidate: Candidate) -> bool {
        let mut best = self.best.lock().unwrap_or_else(PoisonError::into_inner);
        if candidate.beats(&best) {
            *best = candidate;
            true
        } else {
            false
        }
    }

    /// The round's choice. Final once every worker has passed barrier B.
    pub fn current(&self) -> Candidate {
        *self.best.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Mark the round's choice settled. `Exhausted` settles nothing.
pub fn settle(round: usize, choice: Candidate, state: &RelaxationState) -> Option<Settlement> {
    match choice {
        Candidate::Exhausted => None,
        Candidate::Node { node, distance } => {
            state.settle(node);
            Some(Settlement {
                round,
                node,
                distance,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;

    use super::*;
    use citypath_core::{Graph, NO_EDGE};

    fn node(node: usize, distance: f64) -> Candidate {
        Candidate::Node { node, distance }
    }

    #[test]
    fn keeps_strictly_smaller() {
        let acc = GlobalMinimum::new();
        assert!(acc.offer(node(3, 7.0)));
        assert!(acc.offer(node(1, 2.0)));
        assert!(!acc.offer(node(4, 5.0)));
        assert!(!acc.offer(Candidate::Exhausted));
        assert_eq!(acc.current(), node(1, 2.0));
    }

    #[test]
    fn first_writer_wins_ties() {
        let acc = GlobalMinimum::new();
        acc.offer(node(8, 1.5));
        acc.offer(node(2, 1.5));
        assert_eq!(acc.current().node(), Some(8));
    }

    #[test]
    fn reset_clears_choice() {
        let acc = GlobalMinimum::new();
        acc.offer(node(0, 1.0));
        acc.reset();
        assert_eq!(acc.current(), Candidate::Exhausted);
    }

    #[test]
    fn concurrent_offers_keep_global_minimum() {
        let acc = Arc::new(GlobalMinimum::new());
        let handles: Vec<_> = (0..8)
            .map(|w| {
                let acc = Arc::clone(&acc);
                thread::spawn(move || {
                    for k in 0..100 {
                        acc.offer(node(w * 100 + k, (w * 100 + k) as f64 + 10.0));
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().expect("offer thread panicked");
        }
        assert_eq!(acc.current(), node(0, 10.0));
    }

    #[test]
    fn settle_marks_node_and_records_distance() {
        let g = Graph::from_rows(vec![vec![0.0, 3.0], vec![NO_EDGE, 0.0]], 0).unwrap();
        let state = RelaxationState::new(&g);

        assert_eq!(settle(1, Candidate::Exhausted, &state), None);
        assert!(!state.is_settled(1));

        let s = settle(1, node(1, 3.0), &state).unwrap();
        assert_eq!(s.node, 1);
        assert_eq!(s.distance, 3.0);
        assert!(state.is_settled(1));
    }
}

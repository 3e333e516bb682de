//! Per-run shared relaxation state: tentative distances, parents, settled flags.
//!
//! Entries are atomics only so that several workers can hold `&RelaxationState`
//! at once. Every access is `Relaxed`; ordering between phases comes from the
//! round barrier, and within a phase each index has a single writer (its owning
//! partition, or the designated worker during settlement).

use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};

use citypath_core::{Graph, NodeIndex};

const NO_PARENT: usize = usize::MAX;

pub struct RelaxationState {
    dist: Vec<AtomicU64>,
    parent: Vec<AtomicUsize>,
    settled: Vec<AtomicBool>,
}

impl RelaxationState {
    /// Initial state for `graph`: only the source is settled, and every node
    /// starts at the direct edge weight from the source.
    pub fn new(graph: &Graph) -> Self {
        let n = graph.node_count();
        let source = graph.source();
        let matrix = graph.matrix();

        let mut dist = Vec::with_capacity(n);
        let mut parent = Vec::with_capacity(n);
        let mut settled = Vec::with_capacity(n);

        for i in 0..n {
            let (d, p) = if i == source {
                (0.0, NO_PARENT)
            } else {
                let w = matrix.weight(source, i);
                (w, if w.is_finite() { source } else { NO_PARENT })
            };
            dist.push(AtomicU64::new(d.to_bits()));
            parent.push(AtomicUsize::new(p));
            settled.push(AtomicBool::new(i == source));
        }

        Self {
            dist,
            parent,
            settled,
        }
    }

    pub fn node_count(&self) -> usize {
        self.dist.len()
    }

    #[inline]
    pub fn distance(&self, node: NodeIndex) -> f64 {
        f64::from_bits(self.dist[node].load(Ordering::Relaxed))
    }

    #[inline]
    pub fn parent(&self, node: NodeIndex) -> Option<NodeIndex> {
        match self.parent[node].load(Ordering::Relaxed) {
            NO_PARENT => None,
            p => Some(p),
        }
    }

    #[inline]
    pub fn is_settled(&self, node: NodeIndex) -> bool {
        self.settled[node].load(Ordering::Relaxed)
    }

    /// Record a shorter path to `node` through `via`.
    ///
    /// Only the worker owning `node` may call this, and never once `node` is settled.
    #[inline]
    pub fn improve(&self, node: NodeIndex, distance: f64, via: NodeIndex) {
        debug_assert!(!self.is_settled(node), "distance of settled node {} changed", node);
        debug_assert!(distance < self.distance(node));
        self.dist[node].store(distance.to_bits(), Ordering::Relaxed);
        self.parent[node].store(via, Ordering::Relaxed);
    }

    /// Mark `node` final. Each node is settled at most once.
    pub fn settle(&self, node: NodeIndex) {
        let was = self.settled[node].swap(true, Ordering::Relaxed);
        debug_assert!(!was, "node {} settled twice", node);
    }

    pub fn settled_count(&self) -> usize {
        self.settled
            .iter()
            .filter(|s| s.load(Ordering::Relaxed))
            .count()
    }

    /// Consume the state once all workers have joined.
    pub fn into_parts(self) -> (Vec<f64>, Vec<Option<NodeIndex>>) {
        let distances = self
            .dist
            .into_iter()
            .map(|d| f64::from_bits(d.into_inner()))
            .collect();
        let parents = self
            .parent
            .into_iter()
            .map(|p| match p.into_inner() {
                NO_PARENT => None,
                p => Some(p),
            })
            .collect();
        (distances, parents)
    }
}

impl std::fmt::Debug for RelaxationState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let n = self.node_count();
        f.debug_struct("RelaxationState")
            .field("dist", &(0..n).map(|i| self.distance(i)).collect::<Vec<_>>())
            .field("parent", &(0..n).map(|i| self.parent(i)).collect::<Vec<_>>())
            .field("settled", &(0..n).map(|i| self.is_settled(i)).collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use citypath_core::NO_EDGE;

    const X: f64 = NO_EDGE;

    fn triangle(source: NodeIndex) -> Graph {
        Graph::from_rows(
            vec![
                vec![0.0, 5.0, X],
                vec![5.0, 0.0, 1.0],
                vec![X, 1.0, 0.0],
            ],
            source,
        )
        .unwrap()
    }

    #[test]
    fn initial_state_from_source_row() {
        let state = RelaxationState::new(&triangle(0));

        assert_eq!(state.distance(0), 0.0);
        assert_eq!(state.distance(1), 5.0);
        assert_eq!(state.distance(2), X);

        assert_eq!(state.parent(0), None);
        assert_eq!(state.parent(1), Some(0));
        assert_eq!(state.parent(2), None);

        assert!(state.is_settled(0));
        assert!(!state.is_settled(1));
        assert_eq!(state.settled_count(), 1);
    }

    #[test]
    fn source_distance_is_zero_even_with_missing_diagonal() {
        let g = Graph::from_rows(vec![vec![X, 2.0], vec![2.0, X]], 1).unwrap();
        let state = RelaxationState::new(&g);
        assert_eq!(state.distance(1), 0.0);
        assert_eq!(state.parent(0), Some(1));
    }

    #[test]
    fn improve_and_settle() {
        let state = RelaxationState::new(&triangle(0));
        state.improve(2, 6.0, 1);
        state.settle(1);

        assert_eq!(state.distance(2), 6.0);
        assert_eq!(state.parent(2), Some(1));
        assert!(state.is_settled(1));

        let (dist, parents) = state.into_parts();
        assert_eq!(dist, vec![0.0, 5.0, 6.0]);
        assert_eq!(parents, vec![None, Some(0), Some(1)]);
    }
}

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use citypath_core::{Graph, NodeIndex, NO_EDGE};

use crate::paths::ShortestPaths;

/// A priority queue entry for the single-threaded reference.
///
/// Uses reversed ordering so `BinaryHeap` (a max-heap) behaves as a min-heap.
#[derive(Debug, Clone)]
struct State {
    distance: f64,
    node: NodeIndex,
}

impl PartialEq for State {
    fn eq(&self, other: &Self) -> bool {
        self.distance.total_cmp(&other.distance) == Ordering::Equal
    }
}

impl Eq for State {}

impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap behavior
        other.distance.total_cmp(&self.distance)
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Classic heap-based Dijkstra over the same matrix. Used to cross-check the
/// parallel engine.
pub fn sequential_dijkstra(graph: &Graph) -> ShortestPaths {
    let n = graph.node_count();
    let source = graph.source();
    let matrix = graph.matrix();

    let mut dist = vec![NO_EDGE; n];
    let mut parents: Vec<Option<NodeIndex>> = vec![None; n];
    let mut done = vec![false; n];
    let mut heap = BinaryHeap::new();

    dist[source] = 0.0;
    heap.push(State {
        distance: 0.0,
        node: source,
    });

    while let Some(State { distance, node }) = heap.pop() {
        // Skip stale entries
        if done[node] || distance > dist[node] {
            continue;
        }
        done[node] = true;

        for (next, &weight) in matrix.row(node).iter().enumerate() {
            if done[next] || !weight.is_finite() {
                continue;
            }
            let candidate = distance + weight;
            if candidate < dist[next] {
                dist[next] = candidate;
                parents[next] = Some(node);
                heap.push(State {
                    distance: candidate,
                    node: next,
                });
            }
        }
    }

    ShortestPaths {
        source,
        distances: dist,
        parents,
        settlements: Vec::new(),
    }
}

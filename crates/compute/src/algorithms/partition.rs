use std::ops::Range;

use citypath_core::NodeIndex;

/// Contiguous slice `[first, end)` of the node index space owned by one worker
/// for the whole run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Partition {
    pub worker: usize,
    pub first: NodeIndex,
    pub end: NodeIndex,
}

impl Partition {
    /// Slice for `worker` out of `workers`: `N*w/W .. N*(w+1)/W`.
    ///
    /// Panics if `workers == 0` or `worker >= workers`.
    pub fn for_worker(worker: usize, workers: usize, node_count: usize) -> Self {
        assert!(workers >= 1, "partitioning needs at least one worker");
        assert!(worker < workers, "worker {} out of {}", worker, workers);
        Self {
            worker,
            first: node_count * worker / workers,
            end: node_count * (worker + 1) / workers,
        }
    }

    pub fn range(&self) -> Range<NodeIndex> {
        self.first..self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.first
    }

    pub fn is_empty(&self) -> bool {
        self.first == self.end
    }

    pub fn contains(&self, node: NodeIndex) -> bool {
        self.range().contains(&node)
    }
}

/// Split `[0, node_count)` into `workers` disjoint contiguous slices.
///
/// When `workers > node_count` some slices are empty. Panics if `workers == 0`.
pub fn partition(node_count: usize, workers: usize) -> Vec<Partition> {
    assert!(workers >= 1, "partitioning needs at least one worker");
    (0..workers)
        .map(|w| Partition::for_worker(w, workers, node_count))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_exact_cover(node_count: usize, workers: usize) {
        let parts = partition(node_count, workers);
        assert_eq!(parts.len(), workers);

        let mut owner = vec![None; node_count];
        for p in &parts {
            assert!(p.first <= p.end, "inverted range {:?}", p);
            for i in p.range() {
                assert!(
                    owner[i].is_none(),
                    "node {} owned twice (N={}, W={})",
                    i,
                    node_count,
                    workers
                );
                owner[i] = Some(p.worker);
            }
        }
        assert!(
            owner.iter().all(Option::is_some),
            "uncovered node (N={}, W={})",
            node_count,
            workers
        );

        // Contiguous and ordered by worker.
        assert_eq!(parts[0].first, 0);
        assert_eq!(parts[workers - 1].end, node_count);
        for pair in parts.windows(2) {
            assert_eq!(pair[0].end, pair[1].first);
        }
    }

    #[test]
    fn covers_every_combination() {
        for n in 0..=40 {
            for w in 1..=12 {
                assert_exact_cover(n, w);
            }
        }
    }

    #[test]
    fn sizes_differ_by_at_most_one() {
        let parts = partition(10, 4);
        let sizes: Vec<usize> = parts.iter().map(Partition::len).collect();
        assert_eq!(sizes, vec![2, 3, 2, 3]);
    }

    #[test]
    fn more_workers_than_nodes_gives_empty_slices() {
        let parts = partition(2, 5);
        let empty = parts.iter().filter(|p| p.is_empty()).count();
        assert_eq!(empty, 3);
        assert_eq!(parts.iter().map(Partition::len).sum::<usize>(), 2);
    }

    #[test]
    fn single_worker_owns_everything() {
        let p = Partition::for_worker(0, 1, 7);
        assert_eq!(p.range(), 0..7);
        assert!(p.contains(6));
        assert!(!p.contains(7));
    }

    #[test]
    #[should_panic(expected = "at least one worker")]
    fn zero_workers_is_a_defect() {
        partition(3, 0);
    }
}

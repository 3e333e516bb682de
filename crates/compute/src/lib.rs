//! Partitioned parallel Dijkstra over a dense distance matrix.
//!
//! Every worker owns a contiguous slice of the node index space. One node is
//! settled per round; workers meet at three barriers per round and only ever
//! write inside their own slice, so the distance/parent arrays need no locks.

pub mod algorithms;
pub mod barrier;
pub mod engine;
pub mod paths;
pub mod state;

pub use algorithms::local_min::Candidate;
pub use algorithms::partition::{partition, Partition};
pub use algorithms::sequential::sequential_dijkstra;
pub use engine::{ParallelDijkstra, RunStats};
pub use paths::{ShortestPaths, Settlement};

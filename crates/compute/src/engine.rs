use std::panic::{self, AssertUnwindSafe};
use std::time::{Duration, Instant};

use rayon::ThreadPool;
use serde::Serialize;
use tracing::{debug, info, warn};

use citypath_core::{EngineConfig, Graph, SsspError};

use crate::algorithms::local_min::find_local_minimum;
use crate::algorithms::partition::Partition;
use crate::algorithms::reduction::{settle, GlobalMinimum};
use crate::algorithms::relaxation::relax_partition;
use crate::barrier::RoundBarrier;
use crate::paths::{Settlement, ShortestPaths};
use crate::state::RelaxationState;

/// Worker that performs the single-writer steps (accumulator reset, settlement).
const DESIGNATED_WORKER: usize = 0;

/// Summary of one engine run.
#[derive(Debug, Clone, Serialize)]
pub struct RunStats {
    pub nodes: usize,
    pub workers: usize,
    /// Rounds actually executed (N-1 unless early exit kicked in).
    pub rounds: usize,
    /// Nodes settled, the source included.
    pub settled: usize,
    /// Successful tentative-distance improvements across all workers.
    pub relaxations: usize,
    #[serde(skip)]
    pub elapsed: Duration,
}

/// Partitioned parallel Dijkstra.
///
/// A fresh pool of W threads is built per call and every thread runs the same
/// round loop over its own partition (SPMD). One node is settled per round:
///
/// 1. designated worker resets the global minimum; barrier A
/// 2. each worker scans its partition and offers its local minimum
/// 3. barrier B; every worker reads the round's choice
/// 4. designated worker settles the choice; barrier C
/// 5. each worker relaxes its own partition against the settled node
#[derive(Debug, Clone, Default)]
pub struct ParallelDijkstra {
    config: EngineConfig,
}

struct RoundContext<'a> {
    graph: &'a Graph,
    state: &'a RelaxationState,
    global: &'a GlobalMinimum,
    barrier: &'a RoundBarrier,
    rounds: usize,
    early_exit: bool,
}

#[derive(Debug)]
struct WorkerReport {
    partition: Partition,
    rounds: usize,
    relaxations: usize,
    settlements: Vec<Settlement>,
}

impl ParallelDijkstra {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Engine with an explicit worker count (0 = available parallelism).
    pub fn with_workers(workers: usize) -> Self {
        Self::new(EngineConfig {
            worker_threads: workers,
            ..EngineConfig::default()
        })
    }

    pub fn early_exit(mut self, enabled: bool) -> Self {
        self.config.early_exit = enabled;
        self
    }

    pub fn workers(&self) -> usize {
        self.config.resolved_worker_threads()
    }

    /// Shortest distances and parents from `graph.source()` to every node.
    pub fn run(&self, graph: &Graph) -> Result<ShortestPaths, SsspError> {
        self.run_with_stats(graph).map(|(paths, _)| paths)
    }

    pub fn run_with_stats(&self, graph: &Graph) -> Result<(ShortestPaths, RunStats), SsspError> {
        let started = Instant::now();
        let nodes = graph.node_count();
        let workers = self.workers();

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("sssp-worker-{}", i))
            .build()
            .map_err(|e| SsspError::WorkerPool(e.to_string()))?;

        let state = RelaxationState::new(graph);
        let global = GlobalMinimum::new();
        let barrier = RoundBarrier::new(workers);

        let ctx = RoundContext {
            graph,
            state: &state,
            global: &global,
            barrier: &barrier,
            rounds: nodes.saturating_sub(1),
            early_exit: self.config.early_exit,
        };
        let reports = broadcast_workers(&pool, &barrier, |worker, workers| {
            run_worker(&ctx, Partition::for_worker(worker, workers, nodes))
        })?;

        let mut settlements = Vec::new();
        let mut rounds = 0;
        let mut relaxations = 0;
        for report in reports {
            debug!(
                worker = report.partition.worker,
                first = report.partition.first,
                end = report.partition.end,
                rounds = report.rounds,
                relaxations = report.relaxations,
                "worker finished"
            );
            rounds = rounds.max(report.rounds);
            relaxations += report.relaxations;
            settlements.extend(report.settlements);
        }

        let settled = state.settled_count();
        let (distances, parents) = state.into_parts();
        let stats = RunStats {
            nodes,
            workers,
            rounds,
            settled,
            relaxations,
            elapsed: started.elapsed(),
        };

        info!(
            nodes,
            workers,
            rounds,
            settled,
            relaxations,
            "Parallel Dijkstra done in {:.3}ms",
            stats.elapsed.as_secs_f64() * 1000.0
        );

        Ok((
            ShortestPaths {
                source: graph.source(),
                distances,
                parents,
                settlements,
            },
            stats,
        ))
    }
}

/// Run `work(worker, workers)` once on every pool thread.
///
/// A panicking worker poisons `barrier` so its peers leave their waits, and
/// the whole run fails with `WorkerAborted`.
fn broadcast_workers<T, F>(
    pool: &ThreadPool,
    barrier: &RoundBarrier,
    work: F,
) -> Result<Vec<T>, SsspError>
where
    T: Send,
    F: Fn(usize, usize) -> Result<T, SsspError> + Sync,
{
    pool.broadcast(|bc| {
        let worker = bc.index();
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            let _guard = barrier.poison_on_panic();
            work(worker, bc.num_threads())
        }));
        outcome.unwrap_or_else(|_| {
            warn!(worker, "worker panicked, aborting run");
            Err(SsspError::WorkerAborted)
        })
    })
    .into_iter()
    .collect()
}

/// Round loop run by every worker on its own partition.
fn run_worker(ctx: &RoundContext<'_>, partition: Partition) -> Result<WorkerReport, SsspError> {
    let designated = partition.worker == DESIGNATED_WORKER;
    let mut report = WorkerReport {
        partition,
        rounds: 0,
        relaxations: 0,
        settlements: Vec::new(),
    };

    for round in 1..=ctx.rounds {
        if designated {
            ctx.global.reset();
        }
        ctx.barrier.wait()?; // A

        let local = find_local_minimum(&partition, ctx.state);
        ctx.global.offer(local);
        ctx.barrier.wait()?; // B

        // Stable until the next reset, which cannot happen before barrier C.
        let choice = ctx.global.current();
        if designated {
            if let Some(settlement) = settle(round, choice, ctx.state) {
                report.settlements.push(settlement);
            }
        }
        ctx.barrier.wait()?; // C

        report.rounds = round;
        match choice.node() {
            Some(via) => {
                report.relaxations += relax_partition(via, &partition, ctx.graph.matrix(), ctx.state);
            }
            // Every worker saw the same choice, so they all leave together.
            None if ctx.early_exit => break,
            None => {}
        }
    }

    Ok(report)
}

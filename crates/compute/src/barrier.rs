use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};

use citypath_core::SsspError;

/// Reusable rendezvous point for a fixed set of workers.
///
/// Unlike `std::sync::Barrier` it can be poisoned: once a worker panics, every
/// waiting and future `wait` returns `WorkerAborted` instead of blocking on a
/// peer that will never arrive.
#[derive(Debug)]
pub struct RoundBarrier {
    parties: usize,
    state: Mutex<BarrierState>,
    cvar: Condvar,
}

#[derive(Debug, Default)]
struct BarrierState {
    arrived: usize,
    generation: u64,
    poisoned: bool,
}

impl RoundBarrier {
    pub fn new(parties: usize) -> Self {
        assert!(parties >= 1, "barrier needs at least one party");
        Self {
            parties,
            state: Mutex::new(BarrierState::default()),
            cvar: Condvar::new(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, BarrierState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Block until all parties have arrived. Returns `true` for exactly one
    /// party per generation (the last to arrive).
    pub fn wait(&self) -> Result<bool, SsspError> {
        let mut state = self.lock();
        if state.poisoned {
            return Err(SsspError::WorkerAborted);
        }

        let generation = state.generation;
        state.arrived += 1;
        if state.arrived == self.parties {
            state.arrived = 0;
            state.generation = state.generation.wrapping_add(1);
            self.cvar.notify_all();
            return Ok(true);
        }

        while state.generation == generation && !state.poisoned {
            state = self
                .cvar
                .wait(state)
                .unwrap_or_else(PoisonError::into_inner);
        }

        if state.generation == generation {
            Err(SsspError::WorkerAborted)
        } else {
            Ok(false)
        }
    }

    /// Release every waiter with `WorkerAborted`, now and for all later waits.
    pub fn poison(&self) {
        self.lock().poisoned = true;
        self.cvar.notify_all();
    }

    pub fn is_poisoned(&self) -> bool {
        self.lock().poisoned
    }

    /// Guard that poisons the barrier if the current thread unwinds.
    pub fn poison_on_panic(&self) -> PanicGuard<'_> {
        PanicGuard { barrier: self }
    }
}

pub struct PanicGuard<'a> {
    barrier: &'a RoundBarrier,
}

impl Drop for PanicGuard<'_> {
    fn drop(&mut self) {
        if std::thread::panicking() {
            self.barrier.poison();
        }
    }
}

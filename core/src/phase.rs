//! Map -> reduce hand-off.
//!
//! Mappers publish into [`PublishSlots`] and then arrive at the [`PhaseBarrier`].
//! Reducers arrive first and only read the slots after the barrier releases, so every
//! publication happens-before every read. A worker that never arrives stalls the run
//! forever; there is no timeout.
//!
//! Workers first pass a [`StartGate`], which opens only once the whole pool has been
//! spawned. If spawning fails partway the gate is closed instead and the workers that
//! did start return without ever reaching the barrier.

use crate::PartialIndex;
use parking_lot::{Condvar, Mutex};
use std::sync::{Barrier, OnceLock};
use std::time::Instant;

/// One write-once slot per mapper id.
pub struct PublishSlots {
    slots: Vec<OnceLock<PartialIndex>>,
}

impl PublishSlots {
    pub fn new(mappers: usize) -> Self {
        Self { slots: (0..mappers).map(|_| OnceLock::new()).collect() }
    }

    /// Store mapper `id`'s index. Returns the index back if the slot was already filled
    /// or does not exist.
    pub fn publish(&self, id: usize, index: PartialIndex) -> Result<(), PartialIndex> {
        match self.slots.get(id) {
            Some(slot) => slot.set(index),
            None => Err(index),
        }
    }

    /// Published indexes in mapper-id order. Empty slots are skipped.
    pub fn published(&self) -> impl Iterator<Item = &PartialIndex> {
        self.slots.iter().filter_map(OnceLock::get)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GateState {
    Pending,
    Open,
    Closed,
}

/// One-shot go/no-go signal for the worker pool.
pub struct StartGate {
    state: Mutex<GateState>,
    cv: Condvar,
}

impl Default for StartGate {
    fn default() -> Self { Self::new() }
}

impl StartGate {
    pub fn new() -> Self {
        Self { state: Mutex::new(GateState::Pending), cv: Condvar::new() }
    }

    /// Decide the gate: `true` lets workers proceed, `false` sends them home.
    /// Only the first call counts.
    pub fn release(&self, proceed: bool) {
        let mut state = self.state.lock();
        if *state == GateState::Pending {
            *state = if proceed { GateState::Open } else { GateState::Closed };
            self.cv.notify_all();
        }
    }

    /// Block until the gate is decided. Returns whether the worker should run.
    pub fn wait(&self) -> bool {
        let mut state = self.state.lock();
        while *state == GateState::Pending {
            self.cv.wait(&mut state);
        }
        *state == GateState::Open
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Mapper,
    Reducer,
}

/// Single-use barrier sized for every mapper and reducer.
pub struct PhaseBarrier {
    inner: Barrier,
    parties: usize,
}

impl PhaseBarrier {
    pub fn new(mappers: usize, reducers: usize) -> Self {
        let parties = mappers + reducers;
        Self { inner: Barrier::new(parties), parties }
    }

    pub fn parties(&self) -> usize { self.parties }

    /// Block until all parties have arrived.
    pub fn wait(&self, role: Role, worker: usize) {
        let t0 = Instant::now();
        let res = self.inner.wait();
        tracing::debug!(?role, worker, wait_ms = t0.elapsed().as_millis() as u64, "crossed phase barrier");
        if res.is_leader() {
            tracing::info!(parties = self.parties, "map phase complete, reducers released");
        }
    }
}

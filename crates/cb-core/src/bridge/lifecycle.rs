use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use tokio::task::AbortHandle;

use super::BridgeStatus;

/// Lifecycle slot shared between the bridge and its background tasks.
///
/// The generation is bumped on every teardown, including the implicit one
/// when an active bridge is activated again. Reads started under an older
/// generation may still complete, but their effects are discarded.
///
/// Writes are only cut off by an explicit [`teardown`](Self::teardown): a
/// write ticket stays valid across re-activation.
pub(crate) struct Lifecycle {
    generation: AtomicU64,
    slot: Mutex<Slot>,
}

struct Slot {
    status: BridgeStatus,
    poll: Option<AbortHandle>,
    deactivations: u64,
}

impl Lifecycle {
    pub(crate) fn new() -> Self {
        Self {
            generation: AtomicU64::new(0),
            slot: Mutex::new(Slot {
                status: BridgeStatus::Inactive,
                poll: None,
                deactivations: 0,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Slot> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn current(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    pub(crate) fn status(&self) -> BridgeStatus {
        self.lock().status
    }

    /// Enter a new activation with `status`, tearing down a previous one.
    ///
    /// Returns the generation the activation runs under.
    pub(crate) fn begin(&self, status: BridgeStatus) -> u64 {
        let mut slot = self.lock();
        if !matches!(slot.status, BridgeStatus::Inactive | BridgeStatus::Deactivated) {
            self.stop_locked(&mut slot);
        }
        slot.status = status;
        self.current()
    }

    /// Record the outcome of an activation and run `then`, unless it has
    /// been torn down.
    pub(crate) fn settle(
        &self,
        generation: u64,
        status: BridgeStatus,
        then: impl FnOnce(),
    ) -> bool {
        let mut slot = self.lock();
        if self.current() != generation {
            return false;
        }
        slot.status = status;
        then();
        true
    }

    /// Start the poll task under the lock so a concurrent teardown cannot miss it.
    pub(crate) fn start_polling<F>(&self, generation: u64, spawn: F) -> bool
    where
        F: FnOnce() -> AbortHandle,
    {
        let mut slot = self.lock();
        if self.current() != generation {
            return false;
        }
        if let Some(previous) = slot.poll.replace(spawn()) {
            previous.abort();
        }
        slot.status = BridgeStatus::Polling;
        true
    }

    /// Run `f` only while `generation` is still current.
    pub(crate) fn run_if_current<R>(&self, generation: u64, f: impl FnOnce() -> R) -> Option<R> {
        let _slot = self.lock();
        (self.current() == generation).then(f)
    }

    /// Ticket for a write starting now, or `None` once the bridge is deactivated.
    pub(crate) fn write_ticket(&self) -> Option<u64> {
        let slot = self.lock();
        (slot.status != BridgeStatus::Deactivated).then_some(slot.deactivations)
    }

    /// Run `f` only if no deactivation happened since `ticket` was taken.
    pub(crate) fn run_if_writable<R>(
        &self,
        ticket: Option<u64>,
        f: impl FnOnce() -> R,
    ) -> Option<R> {
        let slot = self.lock();
        (ticket == Some(slot.deactivations)).then(f)
    }

    /// Cancel the poll timer and invalidate in-flight reads and writes.
    ///
    /// Returns whether a running poll was cancelled.
    pub(crate) fn teardown(&self) -> bool {
        let mut slot = self.lock();
        let cancelled = self.stop_locked(&mut slot);
        slot.status = BridgeStatus::Deactivated;
        slot.deactivations += 1;
        cancelled
    }

    #[cfg(test)]
    pub(crate) fn poll_is_running(&self) -> bool {
        self.lock()
            .poll
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    fn stop_locked(&self, slot: &mut Slot) -> bool {
        self.generation.fetch_add(1, Ordering::AcqRel);
        match slot.poll.take() {
            Some(handle) => {
                handle.abort();
                true
            }
            None => false,
        }
    }
}

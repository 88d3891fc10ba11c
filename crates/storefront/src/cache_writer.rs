//! Debounced write-through of session state.
//!
//! Cart edits arrive in bursts (clicking "+" five times, typing a
//! quantity). [`DebouncedWriter`] collapses each burst into one persisted
//! write: every call to [`DebouncedWriter::schedule_save`] snapshots the
//! session, cancels whatever write was pending, and arms a fresh timer for
//! the quiescence window. Only the snapshot from the last call of a burst
//! ever reaches storage.
//!
//! A pending write is lost if the process exits before its timer fires,
//! unless the owner calls [`DebouncedWriter::flush`] first.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::AbortHandle;

use shopshifter_core::{Cart, Email};

use crate::persistence::LocalCache;
use crate::session::Session;

/// Default quiescence window before a scheduled save is written.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(1000);

/// The parts of a session that get persisted, frozen at schedule time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveSnapshot {
    pub user: Option<Email>,
    pub cart: Cart,
}

impl SaveSnapshot {
    #[must_use]
    pub fn capture(session: &Session) -> Self {
        Self {
            user: session.user.clone(),
            cart: session.cart.clone(),
        }
    }

    /// Write the snapshot. A snapshot with no user writes nothing.
    fn persist(&self, cache: &LocalCache) {
        let Some(user) = &self.user else {
            return;
        };
        cache.write_session_user(user);
        cache.write_cart(user, &self.cart);
        tracing::debug!(user = %user, lines = self.cart.len(), "Session saved to local cache");
    }
}

struct Pending {
    generation: u64,
    snapshot: SaveSnapshot,
    timer: AbortHandle,
}

type Slot = Arc<Mutex<Option<Pending>>>;

/// Coalesces session saves, keeping at most one write pending.
pub struct DebouncedWriter {
    cache: LocalCache,
    delay: Duration,
    runtime: Handle,
    pending: Slot,
    generation: AtomicU64,
}

impl std::fmt::Debug for DebouncedWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DebouncedWriter")
            .field("delay", &self.delay)
            .field("pending", &self.has_pending())
            .finish_non_exhaustive()
    }
}

impl DebouncedWriter {
    /// Create a writer whose timers run on `runtime`.
    #[must_use]
    pub fn new(cache: LocalCache, delay: Duration, runtime: Handle) -> Self {
        Self {
            cache,
            delay,
            runtime,
            pending: Arc::new(Mutex::new(None)),
            generation: AtomicU64::new(0),
        }
    }

    /// Snapshot `session` and (re)arm the save timer, superseding any
    /// pending save.
    pub fn schedule_save(&self, session: &Session) {
        let snapshot = SaveSnapshot::capture(session);
        let generation = self.generation.fetch_add(1, Ordering::Relaxed) + 1;

        // Hold the slot across the spawn so the timer can never observe the
        // previous occupant.
        let mut slot = lock(&self.pending);
        if let Some(previous) = slot.take() {
            previous.timer.abort();
        }

        let pending = Arc::clone(&self.pending);
        let cache = self.cache.clone();
        let delay = self.delay;
        let task = self.runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            // Persist under the lock: `cancel` and `flush` wait for an
            // in-flight save instead of racing it.
            let mut slot = lock(&pending);
            if slot.as_ref().is_some_and(|p| p.generation == generation)
                && let Some(due) = slot.take()
            {
                due.snapshot.persist(&cache);
            }
        });

        *slot = Some(Pending {
            generation,
            snapshot,
            timer: task.abort_handle(),
        });
    }

    /// Write the pending snapshot now, if there is one.
    ///
    /// Returns whether anything was written.
    pub fn flush(&self) -> bool {
        let mut slot = lock(&self.pending);
        let Some(pending) = slot.take() else {
            return false;
        };
        pending.timer.abort();
        pending.snapshot.persist(&self.cache);
        drop(slot);
        true
    }

    /// Drop the pending snapshot without writing it.
    ///
    /// A save already being written finishes first, so nothing from before
    /// this call reaches storage after it returns.
    pub fn cancel(&self) {
        if let Some(pending) = lock(&self.pending).take() {
            pending.timer.abort();
            tracing::debug!("Pending session save cancelled");
        }
    }

    /// Whether a save is scheduled but not yet written.
    #[must_use]
    pub fn has_pending(&self) -> bool {
        lock(&self.pending).is_some()
    }
}

impl Drop for DebouncedWriter {
    fn drop(&mut self) {
        if let Some(pending) = lock(&self.pending).take() {
            pending.timer.abort();
        }
    }
}

fn lock(slot: &Slot) -> MutexGuard<'_, Option<Pending>> {
    slot.lock().unwrap_or_else(PoisonError::into_inner)
}

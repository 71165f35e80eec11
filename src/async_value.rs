//! The async value primitive.
//!
//! An [`AsyncValue`] is a handle to the eventual outcome of one background
//! computation. Constructing it starts the computation on its own worker and
//! returns immediately; readers block with [`AsyncValue::get`] or wait a
//! bounded time with [`AsyncValue::get_timeout`].
//!
//! # Single Assignment
//!
//! Each value owns a slot behind a read/write lock and a one-shot [`Latch`].
//! The worker writes the slot, then opens the latch, exactly once. Readers
//! wait on the latch, then take the read lock. No lock is held while
//! waiting, and a reader never observes a half-written slot.
//!
//! # Timeouts
//!
//! A timed-out wait only gives up on waiting. The computation keeps running,
//! and its outcome still lands in the slot for any later reader.
//!
//! # Panics
//!
//! A panicking computation completes its value as panicked; every reader
//! re-raises the panic with the original message. A worker that is dropped
//! before running (for example, refused by its spawner) completes its value
//! the same way, so waiters are never stranded.

use crate::combinator;
use crate::error::{SpawnError, TimedError, TimeoutError};
use crate::runtime::{Spawn, StoredTask, default_spawner};
use crate::sync::Latch;
use crate::tracing_compat::{error, trace, warn};
use crate::types::{Outcome, PanicPayload};
use parking_lot::RwLock;
use std::fmt;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;
use std::time::Duration;

/// Panic message recorded when a worker is dropped without running.
pub const WORKER_DROPPED_MESSAGE: &str = "worker dropped before completion";

/// State shared between a worker and every handle to its value.
struct Shared<T, E> {
    slot: RwLock<Option<Outcome<T, E>>>,
    done: Latch,
}

impl<T, E> Shared<T, E> {
    const fn new() -> Self {
        Self {
            slot: RwLock::new(None),
            done: Latch::new(),
        }
    }

    /// Writes the outcome, then opens the latch.
    fn complete(&self, outcome: Outcome<T, E>) {
        {
            let mut slot = self.slot.write();
            debug_assert!(slot.is_none(), "async value completed twice");
            *slot = Some(outcome);
        }
        self.done.open();
    }

    /// Clones the outcome. Callers must have observed the latch open.
    fn read(&self) -> Outcome<T, E>
    where
        T: Clone,
        E: Clone,
    {
        match self.slot.read().as_ref() {
            Some(outcome) => outcome.clone(),
            None => unreachable!("latch opened before the slot was written"),
        }
    }
}

/// Sole writer of a value's slot.
///
/// Consumed by [`Completer::complete`]. Dropping it unconsumed completes the
/// value as panicked.
struct Completer<T, E> {
    shared: Option<Arc<Shared<T, E>>>,
}

impl<T, E> Completer<T, E> {
    fn new(shared: Arc<Shared<T, E>>) -> Self {
        Self {
            shared: Some(shared),
        }
    }

    fn complete(mut self, outcome: Outcome<T, E>) {
        if let Some(shared) = self.shared.take() {
            trace!(outcome = outcome.label(), "async value completed");
            shared.complete(outcome);
        }
    }
}

impl<T, E> Drop for Completer<T, E> {
    fn drop(&mut self) {
        if let Some(shared) = self.shared.take() {
            warn!("worker dropped before completing its async value");
            shared.complete(Outcome::Panicked(PanicPayload::new(WORKER_DROPPED_MESSAGE)));
        }
    }
}

/// A handle to the eventual outcome of a background computation.
///
/// Handles are cheap to clone; every clone observes the same outcome.
///
/// # Example
///
/// ```
/// use asyncval::AsyncValue;
///
/// let value = AsyncValue::new(|| Ok::<_, String>(21));
/// let doubled = value.map(|x| x * 2);
/// assert_eq!(doubled.get(), Ok(42));
/// ```
pub struct AsyncValue<T, E> {
    shared: Arc<Shared<T, E>>,
}

impl<T, E> AsyncValue<T, E>
where
    T: Send + Sync + 'static,
    E: Send + Sync + 'static,
{
    /// Starts `computation` on a new worker from the default spawner.
    ///
    /// Returns immediately with a pending handle. The computation runs at
    /// most once.
    pub fn new<F>(computation: F) -> Self
    where
        F: FnOnce() -> Result<T, E> + Send + 'static,
    {
        Self::spawn_on(default_spawner(), computation)
    }

    /// Starts `computation` on a worker from `spawner`.
    ///
    /// If the spawner refuses the task the failure is logged and the returned
    /// value completes as panicked with [`WORKER_DROPPED_MESSAGE`].
    pub fn spawn_on<S, F>(spawner: &S, computation: F) -> Self
    where
        S: Spawn + ?Sized,
        F: FnOnce() -> Result<T, E> + Send + 'static,
    {
        let (value, spawned) = Self::launch(spawner, computation);
        if let Err(err) = spawned {
            error!(error = %err, "failed to start worker");
        }
        value
    }

    /// Starts `computation` on a worker from `spawner`, reporting refusal.
    pub fn try_spawn_on<S, F>(spawner: &S, computation: F) -> Result<Self, SpawnError>
    where
        S: Spawn + ?Sized,
        F: FnOnce() -> Result<T, E> + Send + 'static,
    {
        let (value, spawned) = Self::launch(spawner, computation);
        spawned.map(|()| value)
    }

    fn launch<S, F>(spawner: &S, computation: F) -> (Self, Result<(), SpawnError>)
    where
        S: Spawn + ?Sized,
        F: FnOnce() -> Result<T, E> + Send + 'static,
    {
        let shared = Arc::new(Shared::new());
        let completer = Completer::new(Arc::clone(&shared));
        let task = StoredTask::new(move || {
            let outcome = match catch_unwind(AssertUnwindSafe(computation)) {
                Ok(result) => Outcome::from(result),
                Err(payload) => Outcome::Panicked(PanicPayload::from_any(&*payload)),
            };
            completer.complete(outcome);
        });
        let spawned = spawner.spawn(task);
        (Self { shared }, spawned)
    }

    /// Applies `f` to the value on a new worker. See [`combinator::map`].
    pub fn map<U, F>(&self, f: F) -> AsyncValue<U, E>
    where
        T: Clone,
        E: Clone,
        U: Send + Sync + 'static,
        F: FnOnce(T) -> U + Send + 'static,
    {
        combinator::map(self, f)
    }

    /// Chains a dependent value. See [`combinator::flat_map`].
    pub fn flat_map<U, F>(&self, f: F) -> AsyncValue<U, E>
    where
        T: Clone,
        E: Clone,
        U: Clone + Send + Sync + 'static,
        F: FnOnce(T) -> AsyncValue<U, E> + Send + 'static,
    {
        combinator::flat_map(self, f)
    }
}

impl<T, E> AsyncValue<T, E> {
    /// Returns `true` once the computation has completed.
    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.shared.done.is_open()
    }

    /// Blocks until the computation completes, without reading the outcome.
    pub fn wait(&self) {
        self.shared.done.wait();
    }

    /// Blocks until completion or until `timeout` elapses.
    ///
    /// Returns `true` if the value completed.
    pub fn wait_timeout(&self, timeout: Duration) -> bool {
        self.shared.done.wait_for(timeout)
    }
}

impl<T: Clone, E: Clone> AsyncValue<T, E> {
    /// Blocks until the computation completes and returns its outcome.
    ///
    /// Every caller, on any thread, receives a clone of the same outcome.
    ///
    /// # Panics
    ///
    /// Re-raises the computation's panic, if it panicked.
    pub fn get(&self) -> Result<T, E> {
        self.shared.done.wait();
        self.shared.read().into_result()
    }

    /// Blocks until the computation completes and returns its [`Outcome`].
    ///
    /// Unlike [`get`](Self::get), a panicked computation is returned as
    /// [`Outcome::Panicked`] instead of being re-raised.
    pub fn outcome(&self) -> Outcome<T, E> {
        self.shared.done.wait();
        self.shared.read()
    }

    /// Blocks until completion or until `timeout` elapses.
    ///
    /// On timeout returns [`TimedError::TimedOut`]; the computation keeps
    /// running and later reads observe its real outcome. A zero timeout on a
    /// completed value returns the outcome.
    ///
    /// # Panics
    ///
    /// Re-raises the computation's panic, if it panicked.
    pub fn get_timeout(&self, timeout: Duration) -> Result<T, TimedError<E>> {
        if self.shared.done.wait_for(timeout) {
            self.shared.read().into_result().map_err(TimedError::Failed)
        } else {
            Err(TimeoutError::new(timeout).into())
        }
    }

    /// Returns the outcome if the computation has completed, without blocking.
    ///
    /// # Panics
    ///
    /// Re-raises the computation's panic, if it panicked.
    #[must_use]
    pub fn try_get(&self) -> Option<Result<T, E>> {
        if self.shared.done.is_open() {
            Some(self.shared.read().into_result())
        } else {
            None
        }
    }
}

impl<T, E> Clone for AsyncValue<T, E> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<T, E> fmt::Debug for AsyncValue<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = if self.is_completed() {
            "completed"
        } else {
            "pending"
        };
        f.debug_struct("AsyncValue").field("state", &state).finish()
    }
}

//! Worker spawning.
//!
//! Every async value runs its computation on a worker obtained from a
//! [`Spawn`] implementation. The default, [`ThreadSpawner`], starts one named
//! OS thread per task with no pooling, queueing, or admission control.
//! Callers who need bounded concurrency can supply their own spawner.
//!
//! # Soft Cancellation
//!
//! There is none. Once a task is handed to a spawner it runs to completion;
//! a waiter that stops waiting does not stop the worker.

use super::config::SpawnConfig;
use super::stored_task::StoredTask;
use crate::error::SpawnError;
use crate::tracing_compat::{trace, warn};
use std::sync::OnceLock;
use std::sync::atomic::{AtomicU64, Ordering};
use std::thread;

/// Starts stored tasks on independent workers.
///
/// Implementations must run each accepted task at most once. A task that is
/// refused (or accepted and later dropped) is simply dropped; the async value
/// that built it completes itself when that happens.
pub trait Spawn: Send + Sync {
    /// Starts `task` on some worker and returns without waiting for it.
    fn spawn(&self, task: StoredTask) -> Result<(), SpawnError>;
}

impl<S: Spawn + ?Sized> Spawn for &S {
    fn spawn(&self, task: StoredTask) -> Result<(), SpawnError> {
        (**self).spawn(task)
    }
}

impl<S: Spawn + ?Sized> Spawn for std::sync::Arc<S> {
    fn spawn(&self, task: StoredTask) -> Result<(), SpawnError> {
        (**self).spawn(task)
    }
}

/// Spawns one OS thread per task.
#[derive(Debug)]
pub struct ThreadSpawner {
    config: SpawnConfig,
    next_id: AtomicU64,
}

impl ThreadSpawner {
    /// Creates a spawner with the given configuration.
    #[must_use]
    pub const fn new(config: SpawnConfig) -> Self {
        Self {
            config,
            next_id: AtomicU64::new(0),
        }
    }

    /// Returns the spawner's configuration.
    #[must_use]
    pub const fn config(&self) -> &SpawnConfig {
        &self.config
    }

    /// Returns how many workers this spawner has started.
    #[must_use]
    pub fn spawned(&self) -> u64 {
        self.next_id.load(Ordering::Relaxed)
    }
}

impl Default for ThreadSpawner {
    fn default() -> Self {
        Self::new(SpawnConfig::default())
    }
}

impl Spawn for ThreadSpawner {
    fn spawn(&self, task: StoredTask) -> Result<(), SpawnError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let mut builder =
            thread::Builder::new().name(format!("{}-{id}", self.config.thread_name_prefix));
        if let Some(size) = self.config.thread_stack_size {
            builder = builder.stack_size(size);
        }

        // Detached: completion is observed through the async value's latch.
        builder.spawn(move || task.run())?;
        trace!(worker = id, "worker spawned");
        Ok(())
    }
}

static DEFAULT_SPAWNER: OnceLock<ThreadSpawner> = OnceLock::new();

/// Returns the process-wide spawner used by [`AsyncValue::new`](crate::AsyncValue::new).
///
/// Built on first use from [`SpawnConfig::from_env`]. An invalid environment
/// is logged and the defaults are used instead.
pub fn default_spawner() -> &'static ThreadSpawner {
    DEFAULT_SPAWNER.get_or_init(|| {
        let config = SpawnConfig::from_env().unwrap_or_else(|err| {
            warn!(error = %err, "invalid spawn config in environment; using defaults");
            SpawnConfig::default()
        });
        ThreadSpawner::new(config)
    })
}

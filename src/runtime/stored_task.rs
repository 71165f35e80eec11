//! Stored task type handed to spawners.
//!
//! `StoredTask` wraps a type-erased closure that a [`Spawn`](super::Spawn)
//! implementation runs exactly once on some worker. The closure already
//! captures where its result goes, so the spawner never sees the value type.

/// A type-erased unit of work.
///
/// Dropping a `StoredTask` without calling [`run`](Self::run) drops the
/// closure. Tasks built by [`AsyncValue`](crate::AsyncValue) complete their
/// handle from the closure's captured state when that happens, so a spawner
/// that discards work never leaves a waiter blocked.
pub struct StoredTask {
    work: Box<dyn FnOnce() + Send + 'static>,
}

impl StoredTask {
    /// Creates a new stored task from a closure.
    pub fn new<F>(work: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        Self {
            work: Box::new(work),
        }
    }

    /// Runs the task on the current thread, consuming it.
    pub fn run(self) {
        (self.work)();
    }
}

impl std::fmt::Debug for StoredTask {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoredTask").finish_non_exhaustive()
    }
}

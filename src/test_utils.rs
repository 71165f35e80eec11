//! Test utilities for asyncval.
//!
//! This module provides shared helpers for unit and integration tests:
//! - Consistent tracing-based logging initialization
//! - Phase/section macros for readable test output
//! - Bounded-wait assertions that fail instead of hanging
//! - Mock spawners for counting or refusing workers
//!
//! # Example
//! ```
//! use asyncval::test_utils::{assert_resolves_within, init_test_logging};
//! use asyncval::successful;
//! use std::time::Duration;
//!
//! init_test_logging();
//! let v = successful::<_, ()>(3);
//! let got = assert_resolves_within(&v, Duration::from_secs(5), "resolved value");
//! assert_eq!(got, Ok(3));
//! ```

use crate::AsyncValue;
use crate::error::{SpawnError, TimedError};
use crate::runtime::{Spawn, StoredTask, ThreadSpawner};
use std::sync::Once;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tracing_subscriber::fmt::format::FmtSpan;

static INIT_LOGGING: Once = Once::new();

/// Upper bound used by tests waiting on values that should resolve quickly.
pub const DEFAULT_TEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Initialize test logging with trace-level output.
///
/// Safe to call multiple times; only initializes once.
pub fn init_test_logging() {
    init_test_logging_with_level(tracing::Level::TRACE);
}

/// Initialize test logging with a custom level.
///
/// The first call wins; later calls are no-ops.
pub fn init_test_logging_with_level(level: tracing::Level) {
    INIT_LOGGING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_max_level(level)
            .with_test_writer()
            .with_file(true)
            .with_line_number(true)
            .with_target(true)
            .with_thread_ids(true)
            .with_thread_names(true)
            .with_span_events(FmtSpan::CLOSE)
            .with_ansi(false)
            .try_init();
    });
}

/// Assert that a value resolves within `timeout` and return its outcome.
///
/// A value that is still pending fails the test instead of hanging it.
pub fn assert_resolves_within<T, E>(
    value: &AsyncValue<T, E>,
    timeout: Duration,
    description: &str,
) -> Result<T, E>
where
    T: Clone,
    E: Clone,
{
    match value.get_timeout(timeout) {
        Ok(v) => {
            tracing::debug!(
                description = %description,
                timeout_ms = timeout.as_millis(),
                "value resolved within timeout"
            );
            Ok(v)
        }
        Err(TimedError::Failed(e)) => Err(e),
        Err(TimedError::TimedOut(_)) => {
            panic!("value '{description}' did not resolve within {timeout:?}")
        }
    }
}

/// Spawner that delegates to a [`ThreadSpawner`] and counts accepted tasks.
#[derive(Debug, Default)]
pub struct CountingSpawner {
    inner: ThreadSpawner,
    spawned: AtomicUsize,
}

impl CountingSpawner {
    /// Creates a counting spawner over a default thread spawner.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns how many tasks were handed to this spawner.
    #[must_use]
    pub fn spawned(&self) -> usize {
        self.spawned.load(Ordering::SeqCst)
    }
}

impl Spawn for CountingSpawner {
    fn spawn(&self, task: StoredTask) -> Result<(), SpawnError> {
        self.spawned.fetch_add(1, Ordering::SeqCst);
        self.inner.spawn(task)
    }
}

/// Spawner that refuses every task.
#[derive(Debug, Default, Clone, Copy)]
pub struct RejectingSpawner;

impl Spawn for RejectingSpawner {
    fn spawn(&self, task: StoredTask) -> Result<(), SpawnError> {
        drop(task);
        Err(SpawnError::Rejected("rejecting spawner".to_string()))
    }
}

/// Spawner that accepts every task and silently discards it.
#[derive(Debug, Default, Clone, Copy)]
pub struct DiscardingSpawner;

impl Spawn for DiscardingSpawner {
    fn spawn(&self, task: StoredTask) -> Result<(), SpawnError> {
        drop(task);
        Ok(())
    }
}

/// Log a test phase transition with a visual separator.
#[macro_export]
macro_rules! test_phase {
    ($name:expr) => {
        tracing::info!(phase = %$name, "========================================");
        tracing::info!(phase = %$name, "TEST PHASE: {}", $name);
        tracing::info!(phase = %$name, "========================================");
    };
}

/// Log a section within a test phase.
#[macro_export]
macro_rules! test_section {
    ($name:expr) => {
        tracing::debug!(section = %$name, "--- {} ---", $name);
    };
}

/// Log test completion with summary.
#[macro_export]
macro_rules! test_complete {
    ($name:expr) => {
        tracing::info!(test = %$name, "test completed successfully: {}", $name);
    };
    ($name:expr, $($key:ident = $value:expr),* $(,)?) => {
        tracing::info!(
            test = %$name,
            $($key = %$value,)*
            "test completed successfully: {}",
            $name
        );
    };
}

/// Log before assertions for context.
#[macro_export]
macro_rules! assert_with_log {
    ($cond:expr, $msg:expr, $expected:expr, $actual:expr) => {
        tracing::debug!(
            expected = ?$expected,
            actual = ?$actual,
            "Asserting: {}",
            $msg
        );
        assert!($cond, "{}: expected {:?}, got {:?}", $msg, $expected, $actual);
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counting_spawner_counts() {
        init_test_logging();
        crate::test_phase!("counting_spawner_counts");
        let spawner = CountingSpawner::new();
        let v = AsyncValue::spawn_on(&spawner, || Ok::<_, ()>(1));
        let got = assert_resolves_within(&v, DEFAULT_TEST_TIMEOUT, "counted value");
        crate::assert_with_log!(got == Ok(1), "value", Ok::<i32, ()>(1), got);
        crate::assert_with_log!(spawner.spawned() == 1, "spawned", 1, spawner.spawned());
        crate::test_complete!("counting_spawner_counts");
    }
}

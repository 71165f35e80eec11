//! Error types for asyncval.
//!
//! Error handling follows these principles:
//!
//! - A computation's own failure type `E` is carried verbatim, never wrapped
//!   by `get` or by any combinator
//! - Errors the crate synthesizes are typed, one enum per concern
//! - A timeout belongs to the waiter and is never stored in a handle
//!
//! # Error Categories
//!
//! - [`TimeoutError`] / [`TimedError`]: bounded waits that ran out of time
//! - [`SpawnError`]: a spawner could not start a worker
//! - [`ConfigError`]: invalid spawn configuration

use std::num::ParseIntError;
use std::time::Duration;
use thiserror::Error;

/// Fixed message reported when a bounded wait expires.
pub const TIMEOUT_MESSAGE: &str = "timed out waiting for async value";

/// Returned when a bounded wait elapses before the value completes.
///
/// The display message is fixed; the waited duration is available through
/// [`TimeoutError::waited`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("timed out waiting for async value")]
pub struct TimeoutError {
    waited: Duration,
}

impl TimeoutError {
    /// Creates a timeout error for a wait of the given length.
    #[must_use]
    pub const fn new(waited: Duration) -> Self {
        Self { waited }
    }

    /// Returns how long the waiter was prepared to wait.
    #[must_use]
    pub const fn waited(&self) -> Duration {
        self.waited
    }
}

/// Error returned by a bounded wait on an async value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimedError<E> {
    /// The computation completed with a failure.
    #[error("{0}")]
    Failed(E),
    /// The wait expired before the computation completed.
    #[error(transparent)]
    TimedOut(#[from] TimeoutError),
}

impl<E> TimedError<E> {
    /// Returns true if the wait expired.
    #[must_use]
    pub const fn is_timed_out(&self) -> bool {
        matches!(self, Self::TimedOut(_))
    }

    /// Returns the timeout error, if the wait expired.
    #[must_use]
    pub const fn timeout(&self) -> Option<&TimeoutError> {
        match self {
            Self::TimedOut(t) => Some(t),
            Self::Failed(_) => None,
        }
    }

    /// Returns the computation's failure, if it completed with one.
    pub fn into_failure(self) -> Option<E> {
        match self {
            Self::Failed(e) => Some(e),
            Self::TimedOut(_) => None,
        }
    }
}

/// A spawner could not start a worker.
#[derive(Debug, Error)]
pub enum SpawnError {
    /// The operating system refused to create a thread.
    #[error("failed to spawn worker thread: {0}")]
    Io(#[from] std::io::Error),
    /// A custom spawner rejected the task.
    #[error("spawner rejected task: {0}")]
    Rejected(String),
}

/// Invalid spawn configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An environment variable was set to an unparseable value.
    #[error("invalid value for {var}: expected unsigned integer, got {value:?} ({source})")]
    InvalidEnv {
        /// The variable name.
        var: &'static str,
        /// The raw value found in the environment.
        value: String,
        /// The parse failure.
        #[source]
        source: ParseIntError,
    },
    /// A setting was present but out of range.
    #[error("invalid value for {field}: {reason}")]
    InvalidValue {
        /// The setting name.
        field: &'static str,
        /// Why it was rejected.
        reason: &'static str,
    },
    /// The config file could not be read.
    #[error("failed to read config file: {0}")]
    Read(#[from] std::io::Error),
    /// The config file was not valid TOML for this schema.
    #[error("failed to parse config file: {0}")]
    Parse(String),
}

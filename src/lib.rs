//! Asyncval: single-assignment async values and their combinators.
//!
//! # Overview
//!
//! An [`AsyncValue`] is the eventual outcome of one background computation.
//! Creating one starts the computation on its own worker and returns a handle
//! at once; readers block on the handle, with or without a timeout.
//! Combinators compose handles into new handles without exposing any of the
//! thread synchronization underneath.
//!
//! # Core Guarantees
//!
//! - **Single assignment**: each value completes exactly once; every reader
//!   observes the same outcome
//! - **No lost wake-ups**: readers arriving before or after completion are
//!   all released
//! - **Timeouts belong to the waiter**: a timed-out wait never cancels or
//!   alters the computation
//! - **Failures are data**: a computation's error is carried verbatim through
//!   every combinator; nothing is logged, retried, or swallowed
//! - **No stranded waiters**: a panicking or dropped worker completes its
//!   value as panicked, and readers re-raise the panic
//!
//! # Module Structure
//!
//! - [`async_value`]: The [`AsyncValue`] primitive
//! - [`combinator`]: `successful`, `failed`, `map`, `flat_map`, `sequence`
//! - [`runtime`]: Worker spawning and spawn configuration
//! - [`sync`]: One-shot completion latch
//! - [`types`]: Outcome and panic payload types
//! - [`error`](mod@error): Error types
//! - [`tracing_compat`]: Optional tracing integration (requires `tracing-integration` feature)
//!
//! # Example
//!
//! ```
//! use asyncval::{AsyncValue, sequence, successful};
//! use std::time::Duration;
//!
//! let slow = AsyncValue::new(|| {
//!     std::thread::sleep(Duration::from_millis(10));
//!     Ok::<_, String>(1)
//! });
//! let all = sequence([slow, successful(2)]).map(|xs| xs.iter().sum::<i32>());
//! assert_eq!(all.get(), Ok(3));
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::doc_markdown)]

pub mod async_value;
pub mod combinator;
pub mod error;
pub mod runtime;
pub mod sync;
pub mod tracing_compat;
pub mod types;

// ── Test-only modules ───────────────────────────────────────────────────
#[cfg(any(test, feature = "test-internals"))]
pub mod test_utils;

// Re-exports for convenient access to core types
pub use async_value::{AsyncValue, WORKER_DROPPED_MESSAGE};
pub use combinator::{failed, flat_map, map, sequence, successful};
pub use error::{ConfigError, SpawnError, TIMEOUT_MESSAGE, TimedError, TimeoutError};
pub use runtime::{Spawn, SpawnConfig, StoredTask, ThreadSpawner};
pub use types::{Outcome, PanicPayload};

//! Tracing compatibility layer for worker lifecycle logging.
//!
//! Works whether or not the `tracing-integration` feature is enabled:
//!
//! - **With feature enabled**: re-exports the `tracing` event macros.
//! - **Without feature**: no-op macros of the same names that expand to nothing.
//!
//! Only worker lifecycle events go through here. Computation failures are
//! values returned to callers and are never logged.
//!
//! # Usage
//!
//! ```rust,ignore
//! use asyncval::tracing_compat::{error, trace};
//!
//! trace!(worker = id, "worker spawned");
//! error!(error = %err, "failed to start worker");
//! ```
//!
//! # Feature Flag
//!
//! ```toml
//! asyncval = { version = "0.1", features = ["tracing-integration"] }
//! ```

#[cfg(feature = "tracing-integration")]
pub use tracing::{debug, error, trace, warn};

#[cfg(not(feature = "tracing-integration"))]
mod noop {
    //! No-op event macros used when tracing is disabled.

    /// No-op trace-level logging macro.
    #[macro_export]
    macro_rules! trace {
        ($($arg:tt)*) => {};
    }

    /// No-op debug-level logging macro.
    #[macro_export]
    macro_rules! debug {
        ($($arg:tt)*) => {};
    }

    /// No-op warn-level logging macro.
    #[macro_export]
    macro_rules! warn {
        ($($arg:tt)*) => {};
    }

    /// No-op error-level logging macro.
    #[macro_export]
    macro_rules! error {
        ($($arg:tt)*) => {};
    }

    pub use crate::{debug, error, trace, warn};
}

#[cfg(not(feature = "tracing-integration"))]
pub use noop::*;

//! Outcome type for a single background computation.
//!
//! An [`Outcome`] is what a worker writes into an async value's slot when it
//! finishes:
//!
//! - `Ok(T)`: the computation returned a value
//! - `Err(E)`: the computation returned a failure
//! - `Panicked(PanicPayload)`: the computation panicked, or its worker was
//!   dropped before it could run
//!
//! Failures are carried verbatim. Panics are not failures: they are re-raised
//! in every thread that reads the outcome as a `Result`.

use core::fmt;
use std::any::Any;

/// Payload from a caught panic.
///
/// This wraps the panic message for safe transport across worker boundaries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanicPayload {
    message: String,
}

impl PanicPayload {
    /// Creates a new panic payload with the given message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Extracts the message from a payload caught by `catch_unwind`.
    #[must_use]
    pub fn from_any(payload: &(dyn Any + Send)) -> Self {
        if let Some(msg) = payload.downcast_ref::<&'static str>() {
            Self::new(*msg)
        } else if let Some(msg) = payload.downcast_ref::<String>() {
            Self::new(msg.clone())
        } else if let Some(inner) = payload.downcast_ref::<Self>() {
            inner.clone()
        } else {
            Self::new("unknown panic payload")
        }
    }

    /// Returns the panic message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Re-raises this panic on the current thread.
    ///
    /// The re-raised payload is a `String` holding the original message, so a
    /// `catch_unwind` further down a combinator chain recovers the same text.
    pub fn resume(&self) -> ! {
        std::panic::panic_any(self.message.clone())
    }
}

impl fmt::Display for PanicPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "panic: {}", self.message)
    }
}

/// The three-valued outcome of a background computation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T, E> {
    /// Success with a value.
    Ok(T),
    /// The computation returned a failure.
    Err(E),
    /// The computation panicked.
    Panicked(PanicPayload),
}

impl<T, E> Outcome<T, E> {
    /// Returns true if this outcome is `Ok`.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        matches!(self, Self::Ok(_))
    }

    /// Returns true if this outcome is `Err`.
    #[must_use]
    pub const fn is_err(&self) -> bool {
        matches!(self, Self::Err(_))
    }

    /// Returns true if this outcome is `Panicked`.
    #[must_use]
    pub const fn is_panicked(&self) -> bool {
        matches!(self, Self::Panicked(_))
    }

    /// Returns a reference to the panic payload, if any.
    #[must_use]
    pub const fn panic_payload(&self) -> Option<&PanicPayload> {
        match self {
            Self::Panicked(p) => Some(p),
            _ => None,
        }
    }

    /// Converts to a `Result`, re-raising a captured panic.
    ///
    /// # Panics
    ///
    /// Panics with the captured message if the outcome is `Panicked`.
    pub fn into_result(self) -> Result<T, E> {
        match self {
            Self::Ok(v) => Ok(v),
            Self::Err(e) => Err(e),
            Self::Panicked(p) => p.resume(),
        }
    }

    /// Short label for logging; never includes the value or failure itself.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Ok(_) => "ok",
            Self::Err(_) => "err",
            Self::Panicked(_) => "panicked",
        }
    }
}

impl<T, E> From<Result<T, E>> for Outcome<T, E> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(v) => Self::Ok(v),
            Err(e) => Self::Err(e),
        }
    }
}

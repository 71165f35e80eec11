//! Core types for asyncval.
//!
//! - [`outcome`]: Three-valued outcome of a background computation

pub mod outcome;

pub use outcome::{Outcome, PanicPayload};

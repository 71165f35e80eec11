//! Combinators over async values.
//!
//! Every combinator is built on the public contract of
//! [`AsyncValue`](crate::AsyncValue) alone: it starts a new value whose
//! computation calls `get` on its inputs. None of them touch another value's
//! internal state, and each call starts exactly one new worker.
//!
//! - [`successful`] / [`failed`]: values that resolve immediately
//! - [`map`](fn@map): transform a success, pass failures through
//! - [`flat_map`](fn@flat_map): chain a dependent value, adopting its outcome
//! - [`sequence`](fn@sequence): collect many values in argument order
//!
//! Failures short-circuit: once an input fails, the transform is skipped and
//! the failure is propagated unchanged.

pub mod flat_map;
pub mod map;
pub mod resolved;
pub mod sequence;

pub use flat_map::flat_map;
pub use map::map;
pub use resolved::{failed, successful};
pub use sequence::sequence;

//! Synchronization primitives.
//!
//! - [`Latch`]: one-shot completion signal releasing every waiter

pub mod latch;

pub use latch::Latch;

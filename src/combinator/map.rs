//! Map combinator: transform a value once it resolves.
//!
//! `map(v, f)` starts a new worker that waits on `v`. A failure passes
//! through unchanged and `f` is never called; a success becomes `f(value)`.
//! `f` runs on the new worker, never on the caller's thread.
//!
//! # Algebraic Laws
//!
//! ```text
//! map(v, id)          ≃ v
//! map(map(v, f), g)   ≃ map(v, g ∘ f)
//! ```

use crate::AsyncValue;

/// Applies `f` to the resolved value of `source` on a new worker.
///
/// # Example
///
/// ```
/// use asyncval::{map, successful};
///
/// let doubled = map(&successful::<_, ()>(21), |x| x * 2);
/// assert_eq!(doubled.get(), Ok(42));
/// ```
pub fn map<T, U, E, F>(source: &AsyncValue<T, E>, f: F) -> AsyncValue<U, E>
where
    T: Clone + Send + Sync + 'static,
    U: Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
    F: FnOnce(T) -> U + Send + 'static,
{
    let source = source.clone();
    AsyncValue::new(move || source.get().map(f))
}

//! FlatMap combinator: chain a dependent async value.
//!
//! `flat_map(v, f)` starts a new worker that waits on `v`. A failure passes
//! through unchanged and `f` is never called. On success `f(value)` builds an
//! inner value; the outer value completes only when the inner one does, and
//! adopts its outcome verbatim.
//!
//! # Algebraic Laws
//!
//! ```text
//! flat_map(successful(x), f)  ≃ f(x)
//! flat_map(v, successful)     ≃ v
//! ```

use crate::AsyncValue;

/// Chains `f` onto `source`, adopting the outcome of the value `f` returns.
///
/// # Example
///
/// ```
/// use asyncval::{flat_map, successful};
///
/// let next = flat_map(&successful::<_, ()>(5), |n| successful(n + 1));
/// assert_eq!(next.get(), Ok(6));
/// ```
pub fn flat_map<T, U, E, F>(source: &AsyncValue<T, E>, f: F) -> AsyncValue<U, E>
where
    T: Clone + Send + Sync + 'static,
    U: Clone + Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
    F: FnOnce(T) -> AsyncValue<U, E> + Send + 'static,
{
    let source = source.clone();
    AsyncValue::new(move || source.get().and_then(|value| f(value).get()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combinator::{failed, successful};
    use crate::test_utils::init_test_logging;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::mpsc;

    fn init_test(name: &str) {
        init_test_logging();
        crate::test_phase!(name);
    }

    #[test]
    fn flat_map_chains_success() {
        init_test("flat_map_chains_success");
        let next = flat_map(&successful::<_, ()>(5), |n| successful(n + 1));
        assert_eq!(next.get(), Ok(6));
        crate::test_complete!("flat_map_chains_success");
    }

    #[test]
    fn inner_failure_is_adopted_verbatim() {
        init_test("inner_failure_is_adopted_verbatim");
        let next = flat_map(&successful::<i32, String>(5), |_| {
            failed::<i32, _>("inner failed".to_string())
        });
        assert_eq!(next.get(), Err("inner failed".to_string()));
        crate::test_complete!("inner_failure_is_adopted_verbatim");
    }

    #[test]
    fn outer_failure_skips_bind() {
        init_test("outer_failure_skips_bind");
        let called = Arc::new(AtomicBool::new(false));
        let c = Arc::clone(&called);
        let next = flat_map(&failed::<i32, _>("outer"), move |n| {
            c.store(true, Ordering::SeqCst);
            successful(n)
        });
        assert_eq!(next.get(), Err("outer"));
        assert!(!called.load(Ordering::SeqCst), "bind must not run");
        crate::test_complete!("outer_failure_skips_bind");
    }

    #[test]
    fn outer_waits_for_inner() {
        init_test("outer_waits_for_inner");
        let (release_tx, release_rx) = mpsc::channel::<()>();
        let next = flat_map(&successful::<_, ()>(1), move |n| {
            AsyncValue::new(move || {
                let _ = release_rx.recv();
                Ok(n + 10)
            })
        });
        assert!(!next.wait_timeout(std::time::Duration::from_millis(20)));
        release_tx.send(()).expect("inner worker alive");
        assert_eq!(next.get(), Ok(11));
        crate::test_complete!("outer_waits_for_inner");
    }
}

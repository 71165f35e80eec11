//! Sequence combinator: collect many values into one, in argument order.
//!
//! The output's index `i` always holds input `i`, whatever order the inputs
//! complete in. The first failure in argument order fails the output with that
//! same error and no partial vector; a panicked input counts as a failure and
//! is re-raised to readers of the output. Later inputs are still awaited so
//! their workers finish before the output completes; their outcomes, panics
//! included, are discarded.

use crate::AsyncValue;
use crate::types::Outcome;

/// Waits on every value in argument order and collects the results.
///
/// Zero inputs produce an empty vector.
///
/// # Example
///
/// ```
/// use asyncval::{sequence, successful};
///
/// let all = sequence([successful::<_, ()>(1), successful(2), successful(3)]);
/// assert_eq!(all.get(), Ok(vec![1, 2, 3]));
/// ```
pub fn sequence<T, E, I>(values: I) -> AsyncValue<Vec<T>, E>
where
    T: Clone + Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
    I: IntoIterator<Item = AsyncValue<T, E>>,
{
    let values: Vec<AsyncValue<T, E>> = values.into_iter().collect();
    AsyncValue::new(move || {
        let mut results = Vec::with_capacity(values.len());
        let mut first_failure: Option<Outcome<Vec<T>, E>> = None;
        for value in &values {
            if first_failure.is_some() {
                value.wait();
                continue;
            }
            match value.outcome() {
                Outcome::Ok(v) => results.push(v),
                Outcome::Err(e) => first_failure = Some(Outcome::Err(e)),
                Outcome::Panicked(p) => first_failure = Some(Outcome::Panicked(p)),
            }
        }
        first_failure.map_or(Ok(results), Outcome::into_result)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combinator::{failed, successful};
    use crate::test_utils::init_test_logging;
    use crate::types::PanicPayload;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::thread;
    use std::time::Duration;

    fn init_test(name: &str) {
        init_test_logging();
        crate::test_phase!(name);
    }

    #[test]
    fn sequence_preserves_order() {
        init_test("sequence_preserves_order");
        let all = sequence([successful::<_, ()>(1), successful(2), successful(3)]);
        assert_eq!(all.get(), Ok(vec![1, 2, 3]));
        crate::test_complete!("sequence_preserves_order");
    }

    #[test]
    fn order_is_by_argument_not_completion() {
        init_test("order_is_by_argument_not_completion");
        let slow = AsyncValue::new(|| {
            thread::sleep(Duration::from_millis(60));
            Ok::<_, ()>("slow")
        });
        let fast = AsyncValue::new(|| Ok::<_, ()>("fast"));
        let all = sequence([slow, fast]);
        assert_eq!(all.get(), Ok(vec!["slow", "fast"]));
        crate::test_complete!("order_is_by_argument_not_completion");
    }

    #[test]
    fn first_failure_short_circuits() {
        init_test("first_failure_short_circuits");
        let all = sequence([successful(1), failed("E"), successful(3)]);
        assert_eq!(all.get(), Err("E"));
        crate::test_complete!("first_failure_short_circuits");
    }

    #[test]
    fn earliest_failure_in_argument_order_wins() {
        init_test("earliest_failure_in_argument_order_wins");
        let late_first = AsyncValue::new(|| {
            thread::sleep(Duration::from_millis(40));
            Err::<i32, _>("first")
        });
        let all = sequence([late_first, failed("second")]);
        assert_eq!(all.get(), Err("first"));
        crate::test_complete!("earliest_failure_in_argument_order_wins");
    }

    #[test]
    fn later_inputs_are_still_awaited() {
        init_test("later_inputs_are_still_awaited");
        let finished = Arc::new(AtomicBool::new(false));
        let f = Arc::clone(&finished);
        let trailing = AsyncValue::new(move || {
            thread::sleep(Duration::from_millis(40));
            f.store(true, Ordering::SeqCst);
            Ok::<_, &str>(3)
        });
        let all = sequence([failed("E"), trailing]);
        assert_eq!(all.get(), Err("E"));
        assert!(
            finished.load(Ordering::SeqCst),
            "trailing input completes before the sequence does"
        );
        crate::test_complete!("later_inputs_are_still_awaited");
    }

    #[test]
    fn later_panic_does_not_replace_first_failure() {
        init_test("later_panic_does_not_replace_first_failure");
        let panicking: AsyncValue<i32, &str> = AsyncValue::new(|| panic!("later input panicked"));
        let all = sequence([failed("E"), panicking]);
        assert_eq!(all.get(), Err("E"));
        crate::test_complete!("later_panic_does_not_replace_first_failure");
    }

    #[test]
    fn panicked_input_still_awaits_later_inputs() {
        init_test("panicked_input_still_awaits_later_inputs");
        let finished = Arc::new(AtomicBool::new(false));
        let f = Arc::clone(&finished);
        let panicking: AsyncValue<i32, ()> = AsyncValue::new(|| panic!("first input panicked"));
        let slow = AsyncValue::new(move || {
            thread::sleep(Duration::from_millis(60));
            f.store(true, Ordering::SeqCst);
            Ok::<_, ()>(2)
        });
        let all = sequence([panicking, slow]);
        all.wait();
        assert!(
            finished.load(Ordering::SeqCst),
            "later input completes before the sequence does"
        );

        let outcome = all.outcome();
        assert_eq!(
            outcome.panic_payload().map(PanicPayload::message),
            Some("first input panicked")
        );
        crate::test_complete!("panicked_input_still_awaits_later_inputs");
    }

    #[test]
    fn empty_sequence_succeeds() {
        init_test("empty_sequence_succeeds");
        let all = sequence(Vec::<AsyncValue<i32, ()>>::new());
        assert_eq!(all.get(), Ok(Vec::new()));
        crate::test_complete!("empty_sequence_succeeds");
    }
}

//! Algebraic law property tests for asyncval combinators.
//!
//! # Laws Tested
//!
//! ## Map (functor) laws
//! - identity: `map(v, id) ≃ v`
//! - composition: `map(map(v, f), g) ≃ map(v, g ∘ f)`
//!
//! ## FlatMap (monad) laws
//! - left identity: `flat_map(successful(x), f) ≃ f(x)`
//! - right identity: `flat_map(v, successful) ≃ v`
//!
//! ## Sequence laws
//! - output index `i` holds input `i` for any completion timing
//! - the first failure in argument order wins

mod common;

use asyncval::{AsyncValue, flat_map, map, sequence, successful};
use common::{init_test_logging, test_proptest_config};
use proptest::prelude::*;
use std::thread;
use std::time::Duration;

fn resolved(outcome: Result<i32, u8>) -> AsyncValue<i32, u8> {
    AsyncValue::new(move || outcome)
}

fn delayed(outcome: Result<i32, u8>, delay_ms: u64) -> AsyncValue<i32, u8> {
    AsyncValue::new(move || {
        thread::sleep(Duration::from_millis(delay_ms));
        outcome
    })
}

fn arb_outcome() -> impl Strategy<Value = Result<i32, u8>> {
    prop_oneof![
        3 => (-1000i32..1000).prop_map(Ok),
        1 => any::<u8>().prop_map(Err),
    ]
}

proptest! {
    #![proptest_config(test_proptest_config(32))]

    #[test]
    fn map_identity(outcome in arb_outcome()) {
        init_test_logging();
        let v = resolved(outcome);
        prop_assert_eq!(map(&v, |x| x).get(), v.get());
    }

    #[test]
    fn map_composition(outcome in arb_outcome(), a in -50i32..50, b in -50i32..50) {
        init_test_logging();
        let v = resolved(outcome);
        let f = move |x: i32| x.wrapping_add(a);
        let g = move |x: i32| x.wrapping_mul(b);
        let chained = map(&map(&v, f), g);
        let fused = map(&v, move |x| g(f(x)));
        prop_assert_eq!(chained.get(), fused.get());
    }

    #[test]
    fn flat_map_left_identity(x in -1000i32..1000, fail in any::<bool>()) {
        init_test_logging();
        let f = move |n: i32| resolved(if fail { Err(7) } else { Ok(n + 1) });
        prop_assert_eq!(flat_map(&successful(x), f).get(), f(x).get());
    }

    #[test]
    fn flat_map_right_identity(outcome in arb_outcome()) {
        init_test_logging();
        let v = resolved(outcome);
        prop_assert_eq!(flat_map(&v, successful).get(), v.get());
    }

    #[test]
    fn sequence_preserves_index_under_any_timing(
        inputs in prop::collection::vec((arb_outcome(), 0u64..15), 0..6)
    ) {
        init_test_logging();
        let values: Vec<_> = inputs
            .iter()
            .map(|(outcome, delay)| delayed(*outcome, *delay))
            .collect();
        let expected: Result<Vec<i32>, u8> = inputs.iter().map(|(o, _)| *o).collect();
        prop_assert_eq!(sequence(values).get(), expected);
    }
}

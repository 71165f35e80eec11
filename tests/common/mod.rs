#![allow(dead_code)]
#![allow(unused_imports)]
//! Shared integration test utilities.
//!
//! Import with:
//! ```ignore
//! mod common;
//! use common::*;
//! ```

pub use asyncval::test_utils::{
    CountingSpawner, DEFAULT_TEST_TIMEOUT, assert_resolves_within, init_test_logging,
};

use proptest::prelude::ProptestConfig;
use proptest::test_runner::RngSeed;

/// Default seed for property tests when running under CI.
pub const DEFAULT_PROPTEST_SEED: u64 = 0x5EED_5EED;

const PROPTEST_SEED_ENV: &str = "ASYNCVAL_PROPTEST_SEED";

/// Build a ProptestConfig with deterministic seed support for CI.
#[must_use]
pub fn test_proptest_config(cases: u32) -> ProptestConfig {
    let mut config = ProptestConfig::with_cases(cases);

    // Honor an existing PROPTEST_RNG_SEED, otherwise apply our own.
    if matches!(config.rng_seed, RngSeed::Random) {
        if let Some(seed) = read_proptest_seed() {
            config.rng_seed = RngSeed::Fixed(seed);
        }
    }
    config
}

fn read_proptest_seed() -> Option<u64> {
    if let Ok(value) = std::env::var(PROPTEST_SEED_ENV) {
        return value.parse::<u64>().ok();
    }

    // If CI is set and no explicit seed is provided, use a fixed seed.
    if std::env::var("CI").is_ok() {
        return Some(DEFAULT_PROPTEST_SEED);
    }

    None
}

/// Common per-test setup: logging plus a phase banner.
pub fn init_test(name: &str) {
    init_test_logging();
    asyncval::test_phase!(name);
}

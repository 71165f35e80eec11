//! Already-resolved values.
//!
//! [`successful`] and [`failed`] behave exactly like [`AsyncValue::new`] with
//! a computation that returns at once. They still go through a worker so that
//! every value, resolved or not, follows one completion path.

use crate::AsyncValue;

/// Returns a value that resolves to `Ok(value)`.
pub fn successful<T, E>(value: T) -> AsyncValue<T, E>
where
    T: Send + Sync + 'static,
    E: Send + Sync + 'static,
{
    AsyncValue::new(move || Ok(value))
}

/// Returns a value that resolves to `Err(error)`.
pub fn failed<T, E>(error: E) -> AsyncValue<T, E>
where
    T: Send + Sync + 'static,
    E: Send + Sync + 'static,
{
    AsyncValue::new(move || Err(error))
}

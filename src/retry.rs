//! Bounded retry wrapper for upstream calls
//!
//! The wrapper knows nothing about what an operation means; each failure
//! carries its own retry disposition, decided at the point the failure is
//! detected.

use std::future::Future;

use crate::error::AppError;

/// Outcome of one failed fetch attempt, tagged with its retry disposition.
#[derive(Debug)]
pub enum FetchFailure {
    /// Definitive failure; surfaced immediately, never retried
    Abort(AppError),
    /// Failure eligible for another attempt
    Transient(AppError),
}

impl FetchFailure {
    /// Unwrap the underlying application error
    #[must_use]
    pub fn into_inner(self) -> AppError {
        match self {
            FetchFailure::Abort(error) | FetchFailure::Transient(error) => error,
        }
    }
}

/// Run `operation` up to `retries + 1` times.
///
/// An [`FetchFailure::Abort`] stops immediately and surfaces its error.
/// A [`FetchFailure::Transient`] invokes `on_retry(attempt, &error,
/// retries_left)` — including on the exhausting attempt, where
/// `retries_left` is 0 — and the last transient error is surfaced
/// unchanged once the budget runs out. No delay is inserted between
/// attempts; the policy is attempt-count based.
///
/// # Errors
///
/// Returns the aborting error, or the last transient error after
/// exhaustion.
pub async fn fetch_with_retry<T, F, Fut, R>(
    mut operation: F,
    retries: u32,
    mut on_retry: R,
) -> Result<T, AppError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, FetchFailure>>,
    R: FnMut(u32, &AppError, u32),
{
    let mut attempt = 1u32;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(FetchFailure::Abort(error)) => return Err(error),
            Err(FetchFailure::Transient(error)) => {
                let retries_left = retries + 1 - attempt;
                on_retry(attempt, &error, retries_left);
                if retries_left == 0 {
                    return Err(error);
                }
                attempt += 1;
            }
        }
    }
}

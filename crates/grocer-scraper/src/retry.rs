//! Bounded retry for catalog HTTP calls.
//!
//! Every request (list page, product detail, image) goes through
//! [`retry_with_backoff`]. Transport failures and non-2xx statuses are
//! re-attempted until the attempt ceiling is reached, at which point the
//! last error is wrapped in [`ScraperError::RetryExhausted`]. Whether that is
//! fatal is up to the caller: detail fetches propagate it, image downloads
//! log it and move on.

use std::future::Future;
use std::time::Duration;

use crate::error::ScraperError;

/// Upper bound on a single backoff sleep.
const MAX_DELAY_MS: u64 = 60_000;

/// Attempt ceiling and backoff base shared by every request a client makes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, the first one included. Values below 1 are treated as 1.
    pub max_attempts: u32,
    /// Base for `base * 2^(attempt - 1)` backoff, ±25 % jitter. `0` re-attempts immediately.
    pub backoff_base_ms: u64,
}

impl RetryPolicy {
    #[must_use]
    pub fn new(max_attempts: u32, backoff_base_ms: u64) -> Self {
        Self {
            max_attempts,
            backoff_base_ms,
        }
    }

    fn delay_after(&self, attempt: u32) -> Duration {
        if self.backoff_base_ms == 0 {
            return Duration::ZERO;
        }
        let computed = self
            .backoff_base_ms
            .saturating_mul(1u64 << attempt.saturating_sub(1).min(10));
        let capped = computed.min(MAX_DELAY_MS);
        #[allow(
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            clippy::cast_precision_loss
        )]
        let jittered = (capped as f64 * (rand::random::<f64>() * 0.5 + 0.75)) as u64;
        Duration::from_millis(jittered)
    }
}

/// Returns `true` for failures worth another attempt.
///
/// Retriable: [`ScraperError::Http`] (no usable response) and
/// [`ScraperError::UnexpectedStatus`] (any non-2xx). Everything else, such as
/// a body that does not parse or a local file error, fails immediately.
pub(crate) fn is_retriable(err: &ScraperError) -> bool {
    matches!(
        err,
        ScraperError::Http(_) | ScraperError::UnexpectedStatus { .. }
    )
}

/// Runs `operation` until it succeeds, fails with a non-retriable error, or
/// `policy.max_attempts` attempts have been made.
///
/// Each failed attempt is logged with its attempt number.
///
/// # Errors
///
/// - The operation's own error if it is not retriable.
/// - [`ScraperError::RetryExhausted`] wrapping the last error once the
///   ceiling is reached.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    policy: RetryPolicy,
    url: &str,
    mut operation: F,
) -> Result<T, ScraperError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ScraperError>>,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 0u32;

    loop {
        attempt += 1;
        let err = match operation().await {
            Ok(value) => return Ok(value),
            Err(err) if !is_retriable(&err) => return Err(err),
            Err(err) => err,
        };

        tracing::warn!(attempt, max_attempts, url, error = %err, "request failed");

        if attempt >= max_attempts {
            return Err(ScraperError::RetryExhausted {
                url: url.to_owned(),
                attempts: attempt,
                last: Box::new(err),
            });
        }

        let delay = policy.delay_after(attempt);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}

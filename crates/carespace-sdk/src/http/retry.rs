/*
[INPUT]:  Retry settings from CarespaceConfig, fallible async operations
[OUTPUT]: Exponential backoff executor for transient failures
[POS]:    HTTP layer - wraps each request attempt issued by the transport
[UPDATE]: When the retryable error set or backoff curve changes
*/

use std::future::Future;
use std::time::Duration;

use tracing::warn;

use super::error::{CarespaceError, Result};

/// Exponential backoff: `base_delay * 2^n`, capped at `max_delay`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    pub enabled: bool,
    /// Retries after the first attempt
    pub max_retries: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            enabled: true,
            max_retries: 3,
            base_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(30),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_retries: u32, base_delay: Duration, max_delay: Duration) -> Self {
        Self {
            enabled: true,
            max_retries,
            base_delay,
            max_delay,
        }
    }

    /// Single attempt, no retries.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    /// Delay before retry number `retry` (zero-based).
    pub fn delay_for_retry(&self, retry: u32) -> Duration {
        let factor = 2u32.checked_pow(retry).unwrap_or(u32::MAX);
        self.base_delay
            .checked_mul(factor)
            .unwrap_or(self.max_delay)
            .min(self.max_delay)
    }

    pub fn should_retry(&self, error: &CarespaceError, retries_done: u32) -> bool {
        self.enabled && retries_done < self.max_retries && error.is_retryable()
    }

    /// Run `operation` until it succeeds, fails permanently, or retries run out.
    ///
    /// The last error is returned unchanged once attempts are exhausted.
    pub async fn execute<T, F, Fut>(&self, mut operation: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let mut retries_done = 0;
        loop {
            match operation().await {
                Ok(value) => return Ok(value),
                Err(err) if self.should_retry(&err, retries_done) => {
                    let delay = self.delay_for_retry(retries_done);
                    retries_done += 1;
                    warn!(
                        attempt = retries_done,
                        max_attempts = self.max_retries.saturating_add(1),
                        delay_ms = delay.as_millis() as u64,
                        error = %err,
                        "Request failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(err) => return Err(err),
            }
        }
    }
}

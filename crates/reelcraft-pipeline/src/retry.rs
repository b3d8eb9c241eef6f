//! Retry logic with configurable backoff for generative calls.

use std::time::Duration;

use reelcraft_types::{ReelcraftError, Result};

/// Backoff policy controlling the delay between retry attempts.
#[derive(Debug, Clone)]
pub enum BackoffPolicy {
    /// Fixed delay between retries.
    Fixed(Duration),
    /// Exponential backoff: base * 2^attempt, capped at max.
    Exponential { base: Duration, max: Duration },
    /// No delay between retries.
    None,
}

impl BackoffPolicy {
    /// Compute the delay for a given attempt number (0-indexed).
    pub fn delay_for_attempt(&self, attempt: usize) -> Duration {
        match self {
            BackoffPolicy::Fixed(d) => *d,
            BackoffPolicy::Exponential { base, max } => {
                let millis = base.as_millis() as u64 * 2u64.saturating_pow(attempt as u32);
                Duration::from_millis(millis).min(*max)
            }
            BackoffPolicy::None => Duration::ZERO,
        }
    }
}

impl Default for BackoffPolicy {
    fn default() -> Self {
        BackoffPolicy::Exponential {
            base: Duration::from_millis(500),
            max: Duration::from_secs(30),
        }
    }
}

/// Run a generative call with retry.
///
/// The closure `f` must reissue an identical request each time it is called.
/// It runs up to `max_attempts` times; a retryable error
/// ([`ReelcraftError::is_retryable`]) triggers another attempt after the
/// policy delay, any other error aborts immediately, and burning every
/// attempt surfaces as the fatal [`ReelcraftError::RetriesExhausted`].
pub async fn generate_with_retry<T, F, Fut>(
    f: F,
    max_attempts: usize,
    policy: &BackoffPolicy,
    stage: &str,
) -> Result<T>
where
    F: Fn() -> Fut,
    Fut: std::future::Future<Output = Result<T>>,
{
    for attempt in 0..max_attempts {
        match f().await {
            Ok(value) => return Ok(value),
            Err(e) if e.is_retryable() => {
                if attempt + 1 < max_attempts {
                    let delay = policy.delay_for_attempt(attempt);
                    tracing::warn!(
                        stage,
                        attempt,
                        delay_ms = %delay.as_millis(),
                        error = %e,
                        "Retryable generative failure, retrying"
                    );
                    tokio::time::sleep(delay).await;
                } else {
                    tracing::error!(stage, attempts = max_attempts, error = %e, "Retries exhausted");
                    return Err(ReelcraftError::RetriesExhausted {
                        stage: stage.to_string(),
                        attempts: max_attempts,
                    });
                }
            }
            Err(e) => return Err(e),
        }
    }
    // Only reachable with max_attempts == 0, which is still exhaustion.
    Err(ReelcraftError::RetriesExhausted {
        stage: stage.to_string(),
        attempts: max_attempts,
    })
}

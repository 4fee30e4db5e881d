//! Exponential backoff for fallible async operations.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use serde::Deserialize;
use tracing::warn;

/// How often and how patiently to retry.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RetryPolicy {
    /// Delay before the first retry, in milliseconds.
    pub initial_interval_ms: u64,
    /// Factor applied to the delay after each retry.
    pub backoff_coefficient: f64,
    /// Upper bound on any single delay, in milliseconds.
    pub max_interval_ms: u64,
    /// Total attempts including the first. Zero is treated as one.
    pub max_attempts: u32,
}

impl RetryPolicy {
    /// Policy for queries against a sibling actor: 500ms doubling to 10s,
    /// five attempts.
    pub const fn query() -> Self {
        Self {
            initial_interval_ms: 500,
            backoff_coefficient: 2.0,
            max_interval_ms: 10_000,
            max_attempts: 5,
        }
    }

    /// Policy for generation calls: 1s doubling to 10s, three attempts.
    pub const fn generation() -> Self {
        Self {
            initial_interval_ms: 1_000,
            backoff_coefficient: 2.0,
            max_interval_ms: 10_000,
            max_attempts: 3,
        }
    }

    /// Delay to wait after the `retry`-th failure (1-based).
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    pub fn delay(&self, retry: u32) -> Duration {
        let exponent = i32::try_from(retry.saturating_sub(1)).unwrap_or(i32::MAX);
        let factor = self.backoff_coefficient.max(1.0).powi(exponent);
        let millis = (self.initial_interval_ms as f64 * factor).min(self.max_interval_ms as f64);
        Duration::from_millis(millis.max(0.0) as u64)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::query()
    }
}

/// Run `attempt` until it succeeds or the policy's attempts are used up.
///
/// Each failure before the last is logged with `operation` and followed
/// by the policy's delay. The final error is returned unchanged.
pub async fn with_backoff<T, E, F, Fut>(
    policy: &RetryPolicy,
    operation: &str,
    mut attempt: F,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut tried = 1_u32;
    loop {
        match attempt().await {
            Ok(value) => return Ok(value),
            Err(e) if tried < max_attempts => {
                let delay = policy.delay(tried);
                warn!(
                    operation,
                    attempt = tried,
                    max_attempts,
                    delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                    error = %e,
                    "attempt failed, retrying"
                );
                tokio::time::sleep(delay).await;
                tried = tried.saturating_add(1);
            }
            Err(e) => return Err(e),
        }
    }
}

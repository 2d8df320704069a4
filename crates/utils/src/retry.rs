// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{future::Future, time::Duration};
use tokio::time::sleep;
use tracing::{error, warn};

pub enum RetryError {
    Failure(anyhow::Error),
    Retry(anyhow::Error),
}

pub const BACKOFF_MAX_RETRIES: u32 = 10;
pub const BACKOFF_BASE_DELAY_MS: u64 = 1000;
pub const BACKOFF_FACTOR: f64 = 1.5;

/// Exponential backoff policy.
///
/// `max_retries` counts retries after the first attempt, so an operation is
/// tried at most `max_retries + 1` times. The delay before retry `n`
/// (1-based) is `base_delay_ms * backoff_factor^(n - 1)`.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct BackoffConfig {
    pub max_retries: u32,
    pub base_delay_ms: u64,
    pub backoff_factor: f64,
}

impl Default for BackoffConfig {
    fn default() -> Self {
        Self {
            max_retries: BACKOFF_MAX_RETRIES,
            base_delay_ms: BACKOFF_BASE_DELAY_MS,
            backoff_factor: BACKOFF_FACTOR,
        }
    }
}

impl BackoffConfig {
    /// A policy that never retries
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            ..Self::default()
        }
    }

    pub fn delay_for(&self, retry: u32) -> Duration {
        // A factor below one would shrink the delay on every retry
        let factor = self.backoff_factor.max(1.0);
        let scaled = self.base_delay_ms as f64 * factor.powi(retry.saturating_sub(1) as i32);
        Duration::from_millis(scaled.round() as u64)
    }
}

/// Retries an async operation with exponential backoff
///
/// # Arguments
/// * `operation_name` - Name used in log lines and in the final error
/// * `config` - Retry ceiling and delay schedule
/// * `operation` - Async function to retry. Returning `RetryError::Failure`
///   stops immediately, `RetryError::Retry` is retried until the ceiling.
pub async fn retry_with_backoff<F, Fut, T>(
    operation_name: &str,
    config: &BackoffConfig,
    mut operation: F,
) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, RetryError>>,
{
    let max_attempts = config.max_retries.saturating_add(1);
    let mut current_attempt = 1;

    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(RetryError::Retry(e)) => {
                if current_attempt >= max_attempts {
                    error!(
                        "{}: giving up after {} attempts: {}",
                        operation_name, max_attempts, e
                    );
                    return Err(e.context(format!(
                        "{} failed after {} attempts",
                        operation_name, max_attempts
                    )));
                }

                let delay = config.delay_for(current_attempt);
                warn!(
                    "{}: attempt {}/{} failed, retrying in {}ms: {}",
                    operation_name,
                    current_attempt,
                    max_attempts,
                    delay.as_millis(),
                    e
                );
                sleep(delay).await;
                current_attempt += 1;
            }
            Err(RetryError::Failure(e)) => {
                error!("{}: FAILURE! returning to caller.", operation_name);
                return Err(e);
            }
        }
    }
}

/// Like [`retry_with_backoff`] but every error is treated as retryable.
pub async fn retry_any_error<F, Fut, T>(
    operation_name: &str,
    config: &BackoffConfig,
    mut operation: F,
) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    retry_with_backoff(operation_name, config, || {
        let fut = operation();
        async move { fut.await.map_err(RetryError::Retry) }
    })
    .await
}

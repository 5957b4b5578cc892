//! Bounded retry for outbound calls whose failure has outsized effect

use std::future::Future;
use std::time::Duration;

/// Retry configuration for an operation
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of attempts, including the first
    pub max_attempts: u32,
    /// Delay before the first retry
    pub initial_delay: Duration,
    /// Multiplier applied to the delay after each retry
    pub backoff_multiplier: f64,
}

impl Default for RetryConfig {
    /// One retry after two seconds
    fn default() -> Self {
        Self {
            max_attempts: 2,
            initial_delay: Duration::from_secs(2),
            backoff_multiplier: 2.0,
        }
    }
}

impl RetryConfig {
    /// Single attempt, no retry
    pub fn none() -> Self {
        Self {
            max_attempts: 1,
            ..Self::default()
        }
    }
}

/// Execute an async operation, retrying failures with backoff.
///
/// Returns the last error once all attempts are used.
pub async fn with_retry<T, E, F, Fut>(
    config: &RetryConfig,
    operation_name: &str,
    mut f: F,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    let max_attempts = config.max_attempts.max(1);
    let mut attempt = 0;
    let mut delay = config.initial_delay;

    loop {
        attempt += 1;
        match f().await {
            Ok(result) => return Ok(result),
            Err(e) if attempt >= max_attempts => return Err(e),
            Err(e) => {
                tracing::warn!(
                    "{operation_name} failed (attempt {attempt}/{max_attempts}): {e}. Retrying in {delay:?}"
                );
                tokio::time::sleep(delay).await;
                delay = delay.mul_f64(config.backoff_multiplier);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn fast(max_attempts: u32) -> RetryConfig {
        RetryConfig {
            max_attempts,
            initial_delay: Duration::from_millis(1),
            backoff_multiplier: 2.0,
        }
    }

    #[tokio::test]
    async fn test_succeeds_after_one_retry() {
        let calls = AtomicU32::new(0);
        let counter = &calls;

        let result: Result<u32, String> = with_retry(&fast(2), "op", move || async move {
            let n = counter.fetch_add(1, Ordering::SeqCst);
            if n == 0 {
                Err("transient".to_string())
            } else {
                Ok(n)
            }
        })
        .await;

        assert_eq!(result, Ok(1));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_gives_up_with_last_error() {
        let calls = AtomicU32::new(0);
        let counter = &calls;

        let result: Result<(), String> = with_retry(&fast(2), "op", move || async move {
            let n = counter.fetch_add(1, Ordering::SeqCst);
            Err(format!("failure {n}"))
        })
        .await;

        assert_eq!(result, Err("failure 1".to_string()));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_none_runs_once() {
        let calls = AtomicU32::new(0);
        let counter = &calls;

        let result: Result<(), &str> = with_retry(&RetryConfig::none(), "op", move || async move {
            counter.fetch_add(1, Ordering::SeqCst);
            Err("down")
        })
        .await;

        tokio_test::assert_err!(result);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}

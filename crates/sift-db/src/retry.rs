//! Bounded retry with a fixed delay for store initialization.

use std::future::Future;
use std::time::Duration;

use sift_config::DatabaseConfig;

use crate::error::DatabaseError;

/// How many times to try, and how long to wait between tries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryConfig {
    /// Maximum number of attempts (including the initial one).
    pub max_attempts: u32,
    /// Pause between consecutive attempts.
    pub delay: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            delay: Duration::from_secs(2),
        }
    }
}

impl From<&DatabaseConfig> for RetryConfig {
    fn from(config: &DatabaseConfig) -> Self {
        Self {
            max_attempts: config.retry_attempts.max(1),
            delay: config.retry_delay(),
        }
    }
}

/// Run `op` until it succeeds, fails with a non-transient error, or the
/// attempts run out. Exhaustion becomes `DatabaseError::Unavailable`.
///
/// # Errors
///
/// The first non-transient error, or `Unavailable` carrying the last
/// transient error's message.
pub async fn with_retry<T, F, Fut>(config: &RetryConfig, mut op: F) -> Result<T, DatabaseError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, DatabaseError>>,
{
    let max_attempts = config.max_attempts.max(1);
    let mut attempt = 1;
    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(error) if !error.is_transient() => return Err(error),
            Err(error) if attempt >= max_attempts => {
                tracing::error!(attempts = attempt, %error, "dataset store unavailable");
                return Err(DatabaseError::Unavailable {
                    attempts: attempt,
                    reason: error.to_string(),
                });
            }
            Err(error) => {
                tracing::warn!(
                    attempt,
                    max_attempts,
                    delay = ?config.delay,
                    %error,
                    "dataset store connection failed, retrying"
                );
                tokio::time::sleep(config.delay).await;
                attempt += 1;
            }
        }
    }
}

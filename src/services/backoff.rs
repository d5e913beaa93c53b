//! Retry helper for external-service calls
//!
//! Transient failures (network errors, 5xx, 429) are retried with
//! exponential backoff; anything else surfaces immediately.

use std::future::Future;
use std::time::Duration;

/// Outcome classification for one attempt
pub enum Attempt<T> {
    Ok(T),
    /// Worth retrying (timeout, connection reset, 5xx, 429)
    Transient(String),
    /// Not worth retrying (4xx, malformed response)
    Fatal(String),
}

/// Run `call` up to `max_attempts` times, doubling the delay after each
/// transient failure. Returns the last failure message on exhaustion.
pub async fn retry_with_backoff<T, F, Fut>(
    label: &'static str,
    max_attempts: u32,
    initial_delay: Duration,
    mut call: F,
) -> Result<T, String>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Attempt<T>>,
{
    let mut delay = initial_delay;
    let mut last_error = String::new();

    for attempt in 1..=max_attempts {
        match call().await {
            Attempt::Ok(value) => return Ok(value),
            Attempt::Fatal(message) => return Err(message),
            Attempt::Transient(message) => {
                tracing::warn!(
                    "[{}] attempt {}/{} failed: {}",
                    label,
                    attempt,
                    max_attempts,
                    message
                );
                last_error = message;
                if attempt < max_attempts {
                    tokio::time::sleep(delay).await;
                    delay *= 2;
                }
            }
        }
    }

    Err(last_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[tokio::test]
    async fn succeeds_after_transient_failures() {
        let calls = AtomicU32::new(0);
        let result = retry_with_backoff("test", 3, Duration::from_millis(1), || {
            let n = calls.fetch_add(1, Ordering::SeqCst);
            async move {
                if n < 2 {
                    Attempt::Transient("timeout".to_string())
                } else {
                    Attempt::Ok(n)
                }
            }
        })
        .await;
        assert_eq!(result.unwrap(), 2);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn fatal_errors_do_not_retry() {
        let calls = AtomicU32::new(0);
        let result: Result<(), _> = retry_with_backoff("test", 5, Duration::from_millis(1), || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Attempt::Fatal("bad request".to_string()) }
        })
        .await;
        assert_eq!(result.unwrap_err(), "bad request");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn exhaustion_returns_last_error() {
        let result: Result<(), _> = retry_with_backoff("test", 2, Duration::from_millis(1), || {
            async { Attempt::Transient("503".to_string()) }
        })
        .await;
        assert_eq!(result.unwrap_err(), "503");
    }
}

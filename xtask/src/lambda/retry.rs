//! Bounded retry with linear backoff (Functional Core).

use std::future::Future;
use std::time::Duration;

/// How often, and how patiently, an operation is retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            base_delay: Duration::from_secs(5),
        }
    }
}

impl RetryPolicy {
    /// Delay after the given failed attempt (1-based): `base_delay * attempt`.
    pub fn delay_after(&self, attempt: u32) -> Duration {
        self.base_delay.saturating_mul(attempt)
    }
}

/// Why a retried operation gave up.
#[derive(Debug, PartialEq, Eq)]
pub enum RetryError<E> {
    /// Every attempt failed with a retryable error.
    Exhausted { attempts: u32, last: E },
    /// An attempt failed with an error that is not retried.
    Fatal(E),
}

/// Runs `operation` until it succeeds, fails with a non-retryable error, or
/// `policy.max_attempts` attempts have failed. `on_retry` is called with the
/// failed attempt number and the upcoming delay before each sleep.
pub async fn retry<T, E, Op, Fut, Retryable, OnRetry>(
    policy: RetryPolicy,
    mut operation: Op,
    is_retryable: Retryable,
    mut on_retry: OnRetry,
) -> Result<T, RetryError<E>>
where
    Op: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    Retryable: Fn(&E) -> bool,
    OnRetry: FnMut(u32, Duration),
{
    let mut attempt = 0;
    loop {
        attempt += 1;
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) if !is_retryable(&err) => return Err(RetryError::Fatal(err)),
            Err(err) if attempt >= policy.max_attempts => {
                return Err(RetryError::Exhausted {
                    attempts: attempt,
                    last: err,
                })
            }
            Err(_) => {
                let delay = policy.delay_after(attempt);
                on_retry(attempt, delay);
                tokio::time::sleep(delay).await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[derive(Debug, PartialEq, Eq)]
    enum Failure {
        Conflict,
        Denied,
    }

    fn fast(max_attempts: u32) -> RetryPolicy {
        RetryPolicy {
            max_attempts,
            base_delay: Duration::from_millis(1),
        }
    }

    fn is_conflict(err: &Failure) -> bool {
        *err == Failure::Conflict
    }

    #[test]
    fn test_default_policy() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_attempts, 5);
        assert_eq!(policy.delay_after(1), Duration::from_secs(5));
        assert_eq!(policy.delay_after(4), Duration::from_secs(20));
    }

    #[tokio::test]
    async fn test_succeeds_first_try() {
        let calls = Cell::new(0);
        let result = retry(
            fast(5),
            || {
                calls.set(calls.get() + 1);
                async { Ok::<_, Failure>("done") }
            },
            is_conflict,
            |_, _| {},
        )
        .await;

        assert_eq!(result, Ok("done"));
        assert_eq!(calls.get(), 1);
    }

    #[tokio::test]
    async fn test_retries_conflicts_until_success() {
        let calls = Cell::new(0);
        let mut delays = Vec::new();
        let result = retry(
            fast(5),
            || {
                calls.set(calls.get() + 1);
                let n = calls.get();
                async move {
                    if n < 3 {
                        Err(Failure::Conflict)
                    } else {
                        Ok(n)
                    }
                }
            },
            is_conflict,
            |attempt, delay| delays.push((attempt, delay)),
        )
        .await;

        assert_eq!(result, Ok(3));
        assert_eq!(
            delays,
            vec![(1, Duration::from_millis(1)), (2, Duration::from_millis(2))]
        );
    }

    #[tokio::test]
    async fn test_gives_up_after_max_attempts() {
        let calls = Cell::new(0);
        let mut retries = 0;
        let result: Result<(), _> = retry(
            fast(5),
            || {
                calls.set(calls.get() + 1);
                async { Err(Failure::Conflict) }
            },
            is_conflict,
            |_, _| retries += 1,
        )
        .await;

        assert_eq!(
            result,
            Err(RetryError::Exhausted {
                attempts: 5,
                last: Failure::Conflict
            })
        );
        assert_eq!(calls.get(), 5);
        assert_eq!(retries, 4);
    }

    #[tokio::test]
    async fn test_non_retryable_error_fails_immediately() {
        let calls = Cell::new(0);
        let result: Result<(), _> = retry(
            fast(5),
            || {
                calls.set(calls.get() + 1);
                async { Err(Failure::Denied) }
            },
            is_conflict,
            |_, _| {},
        )
        .await;

        assert_eq!(result, Err(RetryError::Fatal(Failure::Denied)));
        assert_eq!(calls.get(), 1);
    }
}

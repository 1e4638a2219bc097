//! `gleaner-retry` — fixed-count, fixed-delay retry for fallible async
//! operations.
//!
//! An operation is invoked up to [`RetryPolicy::max_attempts`] times with
//! [`RetryPolicy::wait`] between invocations. No exponential backoff, no
//! jitter. When every attempt has failed, the last error is surfaced as
//! [`RetriesExhausted`].
//!
//! The inter-attempt wait is a plain sleep on the calling task. It is not
//! raced against a shutdown signal, so a retry in flight always finishes
//! its waits unless the whole task is dropped.

use std::future::Future;
use std::time::Duration;

use thiserror::Error;
use tracing::{debug, warn};

/// How often and how patiently to re-attempt a fallible operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    wait: Duration,
}

impl RetryPolicy {
    /// `max_attempts` is clamped to at least 1: a policy that never invokes
    /// the operation is not expressible. `max_attempts == 1` means a single
    /// attempt with no retry.
    pub fn new(max_attempts: u32, wait: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            wait,
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn wait(&self) -> Duration {
        self.wait
    }
}

/// Final failure of a retried operation: every attempt failed.
#[derive(Debug, Error)]
#[error("retries exhausted after {attempts} attempts: {error}")]
pub struct RetriesExhausted<E> {
    /// Invocations made. Always equals the policy's `max_attempts`.
    pub attempts: u32,
    /// The error returned by the last attempt.
    pub error: E,
}

/// Invoke `op` until it succeeds or the policy's attempt limit is reached.
///
/// Each failed attempt is logged at WARN; a success after at least one
/// failure is logged at DEBUG with the attempt number that succeeded.
pub async fn retry<T, E, F, Fut>(policy: &RetryPolicy, mut op: F) -> Result<T, RetriesExhausted<E>>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    let mut attempt = 0u32;
    loop {
        attempt += 1;
        match op().await {
            Ok(value) => {
                if attempt > 1 {
                    debug!(attempt, "operation succeeded after retry");
                }
                return Ok(value);
            }
            Err(e) => {
                warn!(attempt, max = policy.max_attempts, err = %e, "attempt failed");
                if attempt >= policy.max_attempts {
                    return Err(RetriesExhausted {
                        attempts: attempt,
                        error: e,
                    });
                }
                tokio::time::sleep(policy.wait).await;
            }
        }
    }
}

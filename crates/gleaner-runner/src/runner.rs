use std::fs::OpenOptions;
use std::io::Write;
use std::time::Instant;

use tracing::{debug, warn};

use gleaner_core::RunResult;
use gleaner_retry::{retry, RetryPolicy};

use crate::error::Result;
use crate::source::ItemSource;

/// Executes one cycle: every item in the batch is attempted exactly once
/// through the retry-wrapped source, and the outcome of each item is
/// captured in the tallies.
pub struct JobRunner<S: ItemSource> {
    source: S,
    batch_size: u32,
    policy: RetryPolicy,
}

impl<S: ItemSource> JobRunner<S> {
    pub fn new(source: S, batch_size: u32, policy: RetryPolicy) -> Self {
        Self {
            source,
            batch_size,
            policy,
        }
    }

    pub fn batch_size(&self) -> u32 {
        self.batch_size
    }

    /// Run one cycle and report the tallies and elapsed wall time.
    ///
    /// Payloads accumulate in a scratch file under a fresh temp directory.
    /// The directory is removed when this function returns, whatever the
    /// outcome. An item that exhausts its retries is counted as failed and
    /// the loop moves on; only scratch I/O errors abort the cycle.
    pub async fn run_cycle(&self) -> Result<RunResult> {
        let started = Instant::now();
        let mut processed = 0u32;
        let mut failed = 0u32;

        let scratch = tempfile::tempdir()?;
        let scratch_path = scratch.path().join("processed_data.txt");
        debug!(dir = %scratch.path().display(), "using scratch dir");

        for index in 0..self.batch_size as usize {
            match retry(&self.policy, || self.source.fetch(index)).await {
                Ok(payload) => {
                    let mut file = OpenOptions::new()
                        .create(true)
                        .append(true)
                        .open(&scratch_path)?;
                    writeln!(file, "{payload}")?;
                    processed += 1;
                    debug!(index, "item processed");
                }
                Err(e) => {
                    warn!(index, err = %e, "item failed after retries");
                    failed += 1;
                }
            }
        }

        Ok(RunResult::new(processed, failed, started.elapsed()))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::time::Duration;

    use async_trait::async_trait;

    use super::*;
    use crate::source::SourceError;

    /// Deterministic source: the listed indices always fail, everything
    /// else succeeds.
    struct ScriptedSource {
        bad_indices: HashSet<usize>,
    }

    impl ScriptedSource {
        fn failing(indices: &[usize]) -> Self {
            Self {
                bad_indices: indices.iter().copied().collect(),
            }
        }
    }

    #[async_trait]
    impl ItemSource for ScriptedSource {
        async fn fetch(&self, index: usize) -> std::result::Result<String, SourceError> {
            if self.bad_indices.contains(&index) {
                Err(SourceError::Unavailable { index })
            } else {
                Ok(format!("data_chunk_{index}"))
            }
        }
    }

    /// Source that takes a fixed time per fetch.
    struct SlowSource {
        delay: Duration,
    }

    #[async_trait]
    impl ItemSource for SlowSource {
        async fn fetch(&self, _index: usize) -> std::result::Result<String, SourceError> {
            tokio::time::sleep(self.delay).await;
            Ok("slow_chunk".to_string())
        }
    }

    fn no_retry() -> RetryPolicy {
        RetryPolicy::new(1, Duration::ZERO)
    }

    #[tokio::test]
    async fn every_item_is_accounted_for() {
        let runner = JobRunner::new(ScriptedSource::failing(&[2, 5, 7]), 10, no_retry());
        let result = runner.run_cycle().await.unwrap();

        assert_eq!(result.processed, 7);
        assert_eq!(result.failed, 3);
        assert_eq!(result.total(), 10);
    }

    #[tokio::test]
    async fn empty_batch_yields_empty_tallies() {
        let runner = JobRunner::new(ScriptedSource::failing(&[]), 0, no_retry());
        let result = runner.run_cycle().await.unwrap();

        assert_eq!(result.processed, 0);
        assert_eq!(result.failed, 0);
        assert!(result.duration_sec >= 0.0);
    }

    #[tokio::test]
    async fn all_failures_never_abort_the_cycle() {
        let runner = JobRunner::new(
            ScriptedSource::failing(&[0, 1, 2, 3, 4]),
            5,
            RetryPolicy::new(2, Duration::ZERO),
        );
        let result = runner.run_cycle().await.unwrap();

        assert_eq!(result.processed, 0);
        assert_eq!(result.failed, 5);
    }

    #[tokio::test]
    async fn duration_reflects_serial_item_time() {
        let delay = Duration::from_millis(10);
        let runner = JobRunner::new(SlowSource { delay }, 3, no_retry());
        let result = runner.run_cycle().await.unwrap();

        // Three serial fetches of 10ms each: at least 30ms on the clock.
        assert!(result.duration_sec >= 0.030);
    }
}

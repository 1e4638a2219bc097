use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Outcome of one job cycle. Immutable once constructed; relevant only for
/// the cycle that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RunResult {
    /// Items fetched and written to the scratch buffer.
    pub processed: u32,
    /// Items that exhausted their retries.
    pub failed: u32,
    /// Wall-clock cycle duration in seconds.
    pub duration_sec: f64,
}

impl RunResult {
    pub fn new(processed: u32, failed: u32, elapsed: Duration) -> Self {
        Self {
            processed,
            failed,
            duration_sec: elapsed.as_secs_f64(),
        }
    }

    /// Total items attempted this cycle. Always equals the batch size.
    pub fn total(&self) -> u32 {
        self.processed + self.failed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_sums_both_tallies() {
        let result = RunResult::new(7, 3, Duration::from_millis(1230));
        assert_eq!(result.total(), 10);
        assert!((result.duration_sec - 1.23).abs() < 1e-9);
    }

    #[test]
    fn zero_elapsed_is_zero_duration() {
        let result = RunResult::new(0, 0, Duration::ZERO);
        assert_eq!(result.duration_sec, 0.0);
        assert_eq!(result.total(), 0);
    }
}

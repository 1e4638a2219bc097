use async_trait::async_trait;
use rand::Rng;
use thiserror::Error;

/// A single fetch attempt failed.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("fetch failed for item {index}")]
    Unavailable { index: usize },
}

/// Where work items come from. Invoked once per item index per attempt;
/// the retry wrapper decides how often a failing index is re-asked.
#[async_trait]
pub trait ItemSource {
    async fn fetch(&self, index: usize) -> Result<String, SourceError>;
}

/// Stand-in for a real data source: returns `data_chunk_{index}` payloads
/// and fails randomly at the configured rate, like an unstable external
/// API or flaky network share.
pub struct SimulatedSource {
    failure_rate: f64,
}

impl SimulatedSource {
    pub fn new(failure_rate: f64) -> Self {
        Self {
            failure_rate: failure_rate.clamp(0.0, 1.0),
        }
    }
}

#[async_trait]
impl ItemSource for SimulatedSource {
    async fn fetch(&self, index: usize) -> Result<String, SourceError> {
        if rand::thread_rng().gen::<f64>() < self.failure_rate {
            return Err(SourceError::Unavailable { index });
        }
        Ok(format!("data_chunk_{index}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn zero_rate_always_succeeds() {
        let source = SimulatedSource::new(0.0);
        for index in 0..20 {
            let payload = source.fetch(index).await.unwrap();
            assert_eq!(payload, format!("data_chunk_{index}"));
        }
    }

    #[tokio::test]
    async fn full_rate_always_fails() {
        let source = SimulatedSource::new(1.0);
        for index in 0..20 {
            let err = source.fetch(index).await.unwrap_err();
            assert_eq!(err.to_string(), format!("fetch failed for item {index}"));
        }
    }

    #[test]
    fn rate_is_clamped_to_unit_interval() {
        // Out-of-range rates behave like the nearest bound.
        let source = SimulatedSource::new(7.5);
        assert_eq!(source.failure_rate, 1.0);
        let source = SimulatedSource::new(-1.0);
        assert_eq!(source.failure_rate, 0.0);
    }
}

use thiserror::Error;

/// Errors that end the scheduler loop early.
#[derive(Debug, Error)]
pub enum SchedulerError {
    /// A task returned a fatal error; the loop stops and surfaces it.
    #[error("Scheduled task failed: {0}")]
    Task(String),
}

pub type Result<T> = std::result::Result<T, SchedulerError>;

use thiserror::Error;

/// Errors that abort a whole cycle (item failures never do).
#[derive(Debug, Error)]
pub enum CycleError {
    #[error("Scratch I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CycleError>;

//! `gleaner-core` — configuration, shared types and the top-level error.

pub mod config;
pub mod error;
pub mod types;

pub use config::GleanerConfig;
pub use error::{GleanerError, Result};
pub use types::RunResult;

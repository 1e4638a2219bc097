//! `gleaner-runner` — one fetch-process cycle over a fixed batch of items.
//!
//! The [`JobRunner`] drives a retry-wrapped [`ItemSource`] across every item
//! index in the batch, accumulates payloads in a self-cleaning scratch
//! directory, and produces a [`gleaner_core::RunResult`] tally. Item
//! failures are contained per item; only scratch I/O aborts a cycle.

pub mod error;
pub mod report;
pub mod runner;
pub mod source;

pub use error::{CycleError, Result};
pub use runner::JobRunner;
pub use source::{ItemSource, SimulatedSource, SourceError};

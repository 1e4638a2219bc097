use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::Instant;
use tracing::{debug, info};

use crate::error::{Result, SchedulerError};

/// What a task wants the scheduler to do with it after a firing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskOutcome {
    /// Fire again after the given delay.
    Reschedule(Duration),
    /// Finished; drop the task.
    Done,
}

/// A unit of work the scheduler can fire.
///
/// Tasks run inline on the scheduler's thread, one at a time, to
/// completion. A returned `Err` is fatal to the whole loop.
#[async_trait(?Send)]
pub trait ScheduledTask {
    async fn run(&mut self) -> std::result::Result<TaskOutcome, String>;
}

struct Entry {
    due: Instant,
    seq: u64,
    task: Box<dyn ScheduledTask>,
}

// Min-ordering on a max-heap: earliest due wins, seq breaks ties FIFO.
impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .due
            .cmp(&self.due)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.due == other.due && self.seq == other.seq
    }
}

impl Eq for Entry {}

/// Single-threaded cooperative scheduler over a min-ordered set of
/// (fire-time, task) entries.
pub struct Scheduler {
    queue: BinaryHeap<Entry>,
    next_seq: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self {
            queue: BinaryHeap::new(),
            next_seq: 0,
        }
    }

    /// Register `task` to fire `delay` from now (monotonic clock, relative
    /// to this call).
    pub fn schedule(&mut self, delay: Duration, task: Box<dyn ScheduledTask>) {
        let due = Instant::now() + delay;
        let seq = self.next_seq;
        self.next_seq += 1;
        debug!(seq, delay_ms = delay.as_millis() as u64, "task scheduled");
        self.queue.push(Entry { due, seq, task });
    }

    /// No entries pending.
    pub fn is_idle(&self) -> bool {
        self.queue.is_empty()
    }

    /// Number of pending entries.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Fire entries in due order until none remain.
    ///
    /// The wait for each fire time is a sleep on the calling task; a fired
    /// task that returns [`TaskOutcome::Reschedule`] is pushed back with a
    /// fresh fire time. A task error aborts the loop immediately.
    pub async fn run(&mut self) -> Result<()> {
        info!("scheduler started");
        while let Some(mut entry) = self.queue.pop() {
            tokio::time::sleep_until(entry.due).await;
            match entry.task.run().await {
                Ok(TaskOutcome::Reschedule(delay)) => self.schedule(delay, entry.task),
                Ok(TaskOutcome::Done) => debug!(seq = entry.seq, "task finished"),
                Err(msg) => return Err(SchedulerError::Task(msg)),
            }
        }
        info!("scheduler idle, no pending tasks");
        Ok(())
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

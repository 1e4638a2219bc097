use std::path::PathBuf;
use std::rc::Rc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, info};

use gleaner_history::RunHistory;
use gleaner_runner::{report, ItemSource, JobRunner};
use gleaner_scheduler::{ScheduledTask, TaskOutcome};

/// The recurring job: one firing is one fetch-report-persist cycle.
///
/// Owns the cycle counter and shares the history handle with `main`; there
/// is no global state. Order per firing: check the run limit, then
/// increment the counter, then execute. The counter therefore only ever
/// counts executed cycles, and with a limit of `k` the driver fires `k + 1`
/// times: `k` working cycles plus one final check that returns
/// [`TaskOutcome::Done`] without rescheduling, letting the scheduler go
/// idle.
pub struct Driver<S: ItemSource> {
    runner: JobRunner<S>,
    history: Rc<RunHistory>,
    report_path: PathBuf,
    interval: Duration,
    max_runs: Option<u32>,
    completed: u32,
}

impl<S: ItemSource> Driver<S> {
    pub fn new(
        runner: JobRunner<S>,
        history: Rc<RunHistory>,
        report_path: PathBuf,
        interval: Duration,
        max_runs: Option<u32>,
    ) -> Self {
        Self {
            runner,
            history,
            report_path,
            interval,
            max_runs,
            completed: 0,
        }
    }
}

#[async_trait(?Send)]
impl<S: ItemSource> ScheduledTask for Driver<S> {
    async fn run(&mut self) -> Result<TaskOutcome, String> {
        if let Some(max) = self.max_runs {
            if self.completed >= max {
                info!(max_runs = max, "max runs reached, exiting scheduler");
                return Ok(TaskOutcome::Done);
            }
        }
        self.completed += 1;
        let run = self.completed;
        info!(run, "starting job run");

        let result = self
            .runner
            .run_cycle()
            .await
            .map_err(|e| format!("cycle failed: {e}"))?;

        info!(
            run,
            processed = result.processed,
            failed = result.failed,
            duration = %format!("{:.2}s", result.duration_sec),
            "job run completed"
        );

        let text = format!("Run #{run}\n{}", report::render(&result));
        report::write_report(&self.report_path, &text)
            .map_err(|e| format!("failed to write report: {e}"))?;
        info!(path = %self.report_path.display(), "report written");

        // A failed append is fatal on purpose: there is no compensating
        // action for a lost history row, unlike a failed fetch.
        let row_id = self
            .history
            .append(&result)
            .map_err(|e| format!("failed to persist run result: {e}"))?;
        debug!(row_id, "run result persisted");

        info!(next_run_secs = self.interval.as_secs(), "next run scheduled");
        Ok(TaskOutcome::Reschedule(self.interval))
    }
}

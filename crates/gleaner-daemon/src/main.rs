use std::path::PathBuf;
use std::rc::Rc;
use std::time::Duration;

use tracing::{info, warn};

mod driver;

use driver::Driver;
use gleaner_core::GleanerConfig;
use gleaner_history::RunHistory;
use gleaner_retry::RetryPolicy;
use gleaner_runner::{JobRunner, SimulatedSource};
use gleaner_scheduler::Scheduler;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gleaner=info".into()),
        )
        .init();

    // load config: GLEANER_CONFIG env > ./gleaner.toml
    let config_path = std::env::var("GLEANER_CONFIG").ok();
    let config = GleanerConfig::load(config_path.as_deref()).unwrap_or_else(|e| {
        warn!("Config load failed ({}), using defaults", e);
        GleanerConfig::default()
    });

    // The store is opened before anything is scheduled and released by
    // scope at the end of main, on both the clean and interrupted paths.
    let history = Rc::new(RunHistory::open(&config.database.path)?);

    let source = SimulatedSource::new(config.job.failure_rate);
    let policy = RetryPolicy::new(
        config.retry.max_attempts,
        Duration::from_secs(config.retry.wait_secs),
    );
    let runner = JobRunner::new(source, config.job.batch_size, policy);

    let report_path = PathBuf::from(&config.report.output_dir).join(&config.report.filename);
    let driver = Driver::new(
        runner,
        Rc::clone(&history),
        report_path.clone(),
        Duration::from_secs(config.schedule.run_interval_secs),
        config.schedule.run_limit(),
    );

    let mut scheduler = Scheduler::new();
    let first_delay = Duration::from_secs(config.schedule.first_run_delay_secs);
    info!(
        first_run_secs = first_delay.as_secs(),
        "automation started, first job scheduled"
    );
    scheduler.schedule(first_delay, Box::new(driver));

    // An interrupt aborts whatever is in flight: a pending wait, a retry
    // sleep, or a half-done cycle whose tallies are then never persisted.
    tokio::select! {
        res = scheduler.run() => res?,
        _ = tokio::signal::ctrl_c() => {
            info!("interrupt received, shutting down gracefully");
        }
    }

    let total_runs = history.run_count().unwrap_or(0);
    info!(
        total_runs,
        db = %config.database.path,
        report = %report_path.display(),
        "shutdown complete"
    );
    Ok(())
}

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

// Demo-friendly defaults. A first gleaner.toml would set the same values.
pub const DEFAULT_DB_PATH: &str = "gleaner.db";
pub const DEFAULT_FIRST_RUN_DELAY_SECS: u64 = 5;
pub const DEFAULT_RUN_INTERVAL_SECS: u64 = 10;
pub const DEFAULT_MAX_RUNS: u32 = 3; // 0 disables the cap
pub const DEFAULT_RETRY_ATTEMPTS: u32 = 3;
pub const DEFAULT_RETRY_WAIT_SECS: u64 = 2;
pub const DEFAULT_BATCH_SIZE: u32 = 10;
pub const DEFAULT_FAILURE_RATE: f64 = 0.3;
pub const DEFAULT_OUTPUT_DIR: &str = "output";
pub const DEFAULT_REPORT_FILENAME: &str = "summary.txt";

/// Top-level config (gleaner.toml + GLEANER_* env overrides).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GleanerConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub schedule: ScheduleConfig,
    #[serde(default)]
    pub retry: RetryConfig,
    #[serde(default)]
    pub job: JobConfig,
    #[serde(default)]
    pub report: ReportConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_db_path")]
    pub path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleConfig {
    /// Seconds before the first cycle fires.
    #[serde(default = "default_first_run_delay")]
    pub first_run_delay_secs: u64,
    /// Seconds between cycle starts.
    #[serde(default = "default_run_interval")]
    pub run_interval_secs: u64,
    /// Stop after this many cycles; 0 means run forever.
    #[serde(default = "default_max_runs")]
    pub max_runs: u32,
}

impl ScheduleConfig {
    /// The cycle cap, if any (`max_runs = 0` disables it).
    pub fn run_limit(&self) -> Option<u32> {
        if self.max_runs == 0 {
            None
        } else {
            Some(self.max_runs)
        }
    }
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            first_run_delay_secs: default_first_run_delay(),
            run_interval_secs: default_run_interval(),
            max_runs: default_max_runs(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Invocations per item before it counts as failed. At least 1.
    #[serde(default = "default_retry_attempts")]
    pub max_attempts: u32,
    /// Fixed wait between attempts. No backoff, no jitter.
    #[serde(default = "default_retry_wait")]
    pub wait_secs: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_retry_attempts(),
            wait_secs: default_retry_wait(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobConfig {
    /// Items attempted per cycle.
    #[serde(default = "default_batch_size")]
    pub batch_size: u32,
    /// Simulated per-attempt fetch failure probability, 0.0..=1.0.
    #[serde(default = "default_failure_rate")]
    pub failure_rate: f64,
}

impl Default for JobConfig {
    fn default() -> Self {
        Self {
            batch_size: default_batch_size(),
            failure_rate: default_failure_rate(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
    #[serde(default = "default_report_filename")]
    pub filename: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            filename: default_report_filename(),
        }
    }
}

fn default_db_path() -> String {
    DEFAULT_DB_PATH.to_string()
}
fn default_first_run_delay() -> u64 {
    DEFAULT_FIRST_RUN_DELAY_SECS
}
fn default_run_interval() -> u64 {
    DEFAULT_RUN_INTERVAL_SECS
}
fn default_max_runs() -> u32 {
    DEFAULT_MAX_RUNS
}
fn default_retry_attempts() -> u32 {
    DEFAULT_RETRY_ATTEMPTS
}
fn default_retry_wait() -> u64 {
    DEFAULT_RETRY_WAIT_SECS
}
fn default_batch_size() -> u32 {
    DEFAULT_BATCH_SIZE
}
fn default_failure_rate() -> f64 {
    DEFAULT_FAILURE_RATE
}
fn default_output_dir() -> String {
    DEFAULT_OUTPUT_DIR.to_string()
}
fn default_report_filename() -> String {
    DEFAULT_REPORT_FILENAME.to_string()
}

impl GleanerConfig {
    /// Load config from a TOML file with GLEANER_* env var overrides.
    ///
    /// Falls back to `./gleaner.toml` when no path is given. A missing file
    /// is not an error: every field has a default.
    pub fn load(config_path: Option<&str>) -> crate::error::Result<Self> {
        let path = config_path
            .map(String::from)
            .unwrap_or_else(default_config_path);

        let config: GleanerConfig = Figment::new()
            .merge(Toml::file(&path))
            .merge(Env::prefixed("GLEANER_").split("__"))
            .extract()
            .map_err(|e| crate::error::GleanerError::Config(e.to_string()))?;

        Ok(config)
    }
}

fn default_config_path() -> String {
    "gleaner.toml".to_string()
}

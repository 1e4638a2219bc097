use std::path::Path;

use rusqlite::Connection;
use tracing::info;

use gleaner_core::RunResult;

use crate::db::init_db;
use crate::error::Result;
use crate::types::RunRecord;

/// Status recorded for every persisted cycle.
const STATUS_COMPLETED: &str = "completed";

/// Append-only log of completed cycles, one row per run.
///
/// Owns its SQLite connection. Gleaner runs on a single execution context,
/// so no lock wraps the connection.
pub struct RunHistory {
    conn: Connection,
}

impl RunHistory {
    /// Open (or create) the history database at `path` and ensure the
    /// schema exists. Missing parent directories are created.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        init_db(&conn)?;
        info!(path = %path.display(), "run history store initialized");
        Ok(Self { conn })
    }

    /// In-memory store, for tests.
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        init_db(&conn)?;
        Ok(Self { conn })
    }

    /// Append one completed cycle and return the fresh row id.
    ///
    /// Autocommits: the row is durably visible once this returns.
    pub fn append(&self, result: &RunResult) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO runs (status, processed, failed, duration_sec)
             VALUES (?1, ?2, ?3, ?4)",
            rusqlite::params![
                STATUS_COMPLETED,
                result.processed,
                result.failed,
                result.duration_sec,
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Total number of recorded runs.
    pub fn run_count(&self) -> Result<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM runs", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    /// The most recent `limit` runs, newest first.
    pub fn recent(&self, limit: usize) -> Result<Vec<RunRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, status, processed, failed, duration_sec
             FROM runs ORDER BY id DESC LIMIT ?1",
        )?;
        let records = stmt
            .query_map([limit], |row| {
                Ok(RunRecord {
                    id: row.get(0)?,
                    status: row.get(1)?,
                    processed: row.get(2)?,
                    failed: row.get(3)?,
                    duration_sec: row.get(4)?,
                })
            })?
            .filter_map(|r| r.ok())
            .collect();
        Ok(records)
    }
}

// The run log is append-only: one row per completed cycle, ids strictly
// increasing, status always "completed".

use std::time::Duration;

use gleaner_core::RunResult;
use gleaner_history::RunHistory;

fn sample(processed: u32, failed: u32) -> RunResult {
    RunResult::new(processed, failed, Duration::from_millis(1230))
}

#[test]
fn one_row_per_append() {
    let history = RunHistory::in_memory().unwrap();
    assert_eq!(history.run_count().unwrap(), 0);

    for k in 1..=5u64 {
        history.append(&sample(9, 1)).unwrap();
        assert_eq!(history.run_count().unwrap(), k);
    }
}

#[test]
fn ids_strictly_increase() {
    let history = RunHistory::in_memory().unwrap();
    let first = history.append(&sample(10, 0)).unwrap();
    let second = history.append(&sample(8, 2)).unwrap();
    let third = history.append(&sample(0, 10)).unwrap();

    assert!(first < second && second < third);
}

#[test]
fn rows_round_trip_with_completed_status() {
    let history = RunHistory::in_memory().unwrap();
    history.append(&sample(7, 3)).unwrap();

    let records = history.recent(10).unwrap();
    assert_eq!(records.len(), 1);

    let record = &records[0];
    assert_eq!(record.status, "completed");
    assert_eq!(record.processed, 7);
    assert_eq!(record.failed, 3);
    assert!((record.duration_sec - 1.23).abs() < 1e-9);
}

#[test]
fn recent_returns_newest_first_up_to_limit() {
    let history = RunHistory::in_memory().unwrap();
    for processed in 0..4 {
        history.append(&sample(processed, 0)).unwrap();
    }

    let records = history.recent(2).unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].processed, 3);
    assert_eq!(records[1].processed, 2);
}

#[test]
fn open_creates_parent_dirs_and_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state").join("gleaner.db");

    {
        let history = RunHistory::open(&path).unwrap();
        history.append(&sample(5, 5)).unwrap();
    }

    // Schema init is idempotent and earlier rows are still there.
    let history = RunHistory::open(&path).unwrap();
    assert_eq!(history.run_count().unwrap(), 1);
}

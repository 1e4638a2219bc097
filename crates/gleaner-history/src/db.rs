use rusqlite::Connection;

use crate::error::Result;

/// Initialise the run-history schema in `conn`.
///
/// Creates the `runs` table if absent. The schema is fixed; there are no
/// migrations.
pub fn init_db(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS runs (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            status       TEXT    NOT NULL,
            processed    INTEGER NOT NULL,
            failed       INTEGER NOT NULL,
            duration_sec REAL    NOT NULL
        ) STRICT;
        ",
    )?;
    Ok(())
}

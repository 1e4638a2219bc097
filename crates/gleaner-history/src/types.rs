/// One persisted row of the append-only run log.
#[derive(Debug, Clone, PartialEq)]
pub struct RunRecord {
    /// Auto-assigned rowid; strictly increasing across appends.
    pub id: i64,
    /// Always "completed". Partial cycles are never persisted.
    pub status: String,
    pub processed: u32,
    pub failed: u32,
    pub duration_sec: f64,
}

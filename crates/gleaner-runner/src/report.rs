use std::fs;
use std::io;
use std::path::Path;

use gleaner_core::RunResult;

/// Render the fixed one-line summary for a cycle result.
pub fn render(result: &RunResult) -> String {
    format!(
        "Processed: {}, Failed: {}, Duration: {:.2}s\n",
        result.processed, result.failed, result.duration_sec
    )
}

/// Overwrite `path` with `text`, creating missing parent directories first.
///
/// Overwrites, never appends: only the most recent report is kept, and
/// writing the same text twice leaves the file byte-identical.
pub fn write_report(path: &Path, text: &str) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, text)
}

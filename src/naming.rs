//! The archive filename convention.
//!
//! `<taskName>-YYYY-MM-DD--HH-MM-SS.zip` (sidecar logs append `.log`) is
//! the only persisted link between a backup run and its retention
//! bookkeeping: the pruner reconstructs each backup's timestamp by parsing
//! the filename with the same layout used to format it.

use chrono::NaiveDateTime;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d--%H-%M-%S";

pub const ARCHIVE_SUFFIX: &str = ".zip";
pub const LOG_SUFFIX: &str = ".zip.log";

/// Archive filename for a task run at `timestamp`.
pub fn archive_file_name(task_name: &str, timestamp: NaiveDateTime) -> String {
    format!(
        "{}-{}{}",
        task_name,
        timestamp.format(TIMESTAMP_FORMAT),
        ARCHIVE_SUFFIX
    )
}

/// Parse an archive or sidecar-log filename back into its timestamp.
///
/// Returns `None` unless the whole name is exactly
/// `<task_name>-<timestamp><suffix>`.
pub fn parse_backup_file_name(task_name: &str, file_name: &str) -> Option<NaiveDateTime> {
    let stem = file_name
        .strip_suffix(LOG_SUFFIX)
        .or_else(|| file_name.strip_suffix(ARCHIVE_SUFFIX))?;
    let stamp = stem.strip_prefix(task_name)?.strip_prefix('-')?;
    NaiveDateTime::parse_from_str(stamp, TIMESTAMP_FORMAT).ok()
}

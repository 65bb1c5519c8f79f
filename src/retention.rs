//! Retention pruning of aged-out archives.
//!
//! Ages are measured against the newest backup in the destination rather
//! than wall-clock now, so a long gap between successful runs does not
//! wipe the whole retained set on the next execution.

use crate::config::BackupTask;
use crate::naming;
use crate::utils::errors::Result;
use chrono::{Duration, NaiveDateTime};
use std::io;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// One recognized backup file in the destination directory.
#[derive(Debug)]
struct BackupFileRecord {
    path: PathBuf,
    timestamp: NaiveDateTime,
}

/// Outcome of a pruning pass.
#[derive(Debug, Default)]
pub struct PruneReport {
    pub deleted: Vec<PathBuf>,
    pub failed: Vec<PathBuf>,
}

/// Delete every archive (and sidecar log) of `task` in `dest_dir` that is
/// at least `retention_days` older than the newest one.
///
/// No-op when the task is in sync mode or has pruning disabled, and when
/// the destination is missing or not a directory. Filenames that do not
/// match the naming template are logged and left alone. Deletion failures
/// are logged and collected; every candidate is attempted.
pub fn prune(dest_dir: &Path, task: &BackupTask) -> Result<PruneReport> {
    let mut report = PruneReport::default();

    if task.sync || task.retention_days <= 0 {
        return Ok(report);
    }

    let metadata = match std::fs::metadata(dest_dir) {
        Ok(m) => m,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(report),
        Err(e) => return Err(e.into()),
    };
    if !metadata.is_dir() {
        return Ok(report);
    }

    let records = list_backup_files(dest_dir, &task.name)?;

    let Some(most_recent) = records.iter().map(|r| r.timestamp).max() else {
        return Ok(report);
    };

    let window = Duration::days(task.retention_days);
    for record in &records {
        if most_recent - record.timestamp < window {
            continue;
        }

        match std::fs::remove_file(&record.path) {
            Ok(()) => {
                info!("pruned stale backup file [{}]", record.path.display());
                report.deleted.push(record.path.clone());
            }
            Err(e) => {
                warn!("failed to prune [{}]: {}", record.path.display(), e);
                report.failed.push(record.path.clone());
            }
        }
    }

    Ok(report)
}

/// Immediate directory entries that parse against the naming template.
fn list_backup_files(dir: &Path, task_name: &str) -> Result<Vec<BackupFileRecord>> {
    let mut records = Vec::new();

    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            continue;
        }

        let file_name = entry.file_name();
        let name = file_name.to_string_lossy();
        if !name.ends_with(naming::ARCHIVE_SUFFIX) && !name.ends_with(naming::LOG_SUFFIX) {
            continue;
        }

        match naming::parse_backup_file_name(task_name, &name) {
            Some(timestamp) => records.push(BackupFileRecord {
                path: entry.path(),
                timestamp,
            }),
            None => warn!("ignoring unrecognized backup file name [{}]", name),
        }
    }

    Ok(records)
}

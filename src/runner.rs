//! Sequential task orchestration.
//!
//! Tasks run strictly in configuration order; within a task the walk,
//! copy, and prune phases are sequential with no overlap. A failed task is
//! reported and the remaining tasks still run.

use crate::archive;
use crate::config::BackupTask;
use crate::naming;
use crate::retention;
use crate::utils::errors::{BackupError, Result};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

/// Run every task in configuration order.
pub fn run_all(tasks: &[BackupTask]) {
    for (idx, task) in tasks.iter().enumerate() {
        if let Err(e) = run_task(task) {
            error!("task [{}] ({}) failed: {}", idx, task.name, e);
        }
    }
}

/// Execute one backup task: resolve the destination, build the timestamped
/// archive, then prune aged-out backups.
pub fn run_task(task: &BackupTask) -> Result<()> {
    if task.name.is_empty() {
        return Err(BackupError::InvalidConfig("task name is empty".to_string()));
    }
    if task.source.is_empty() {
        return Err(BackupError::InvalidConfig(format!(
            "task [{}]: src path is empty",
            task.name
        )));
    }
    if task.dest.is_empty() {
        return Err(BackupError::InvalidConfig(format!(
            "task [{}]: dest path is empty",
            task.name
        )));
    }

    info!("start task [{}]", task.name);

    let dest_dir = PathBuf::from(&task.dest);
    ensure_dest_dir(&dest_dir)?;

    let timestamp = chrono::Local::now().naive_local();
    let archive_path = dest_dir.join(naming::archive_file_name(&task.name, timestamp));

    let mut run_log = if task.log_to_file {
        RunLog::create(&archive_path)
    } else {
        RunLog::disabled()
    };
    run_log.record(&format!("start task [{}]", task.name));

    match archive::build(task, &archive_path) {
        Ok(summary) => {
            info!(
                "task [{}]: archived {} files ({} bytes) into [{}]",
                task.name,
                summary.files,
                summary.bytes,
                archive_path.display()
            );
            run_log.record(&format!(
                "archived {} files ({} bytes)",
                summary.files, summary.bytes
            ));
        }
        Err(e) => {
            run_log.record(&format!("archive build failed: {}", e));
            return Err(e);
        }
    }

    let report = retention::prune(&dest_dir, task)?;
    if !report.deleted.is_empty() || !report.failed.is_empty() {
        info!(
            "task [{}]: pruned {} stale backup files ({} failed)",
            task.name,
            report.deleted.len(),
            report.failed.len()
        );
        run_log.record(&format!(
            "pruned {} stale backup files ({} failed)",
            report.deleted.len(),
            report.failed.len()
        ));
    }

    info!("task [{}] done", task.name);
    Ok(())
}

/// Create the destination directory tree if it does not exist yet.
fn ensure_dest_dir(dest: &Path) -> Result<()> {
    match std::fs::metadata(dest) {
        Ok(m) if m.is_dir() => Ok(()),
        Ok(_) => Err(BackupError::DestinationNotDir(dest.to_path_buf())),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => std::fs::create_dir_all(dest)
            .map_err(|source| BackupError::DestinationCreate {
                path: dest.to_path_buf(),
                source,
            }),
        Err(e) => Err(BackupError::DestinationCreate {
            path: dest.to_path_buf(),
            source: e,
        }),
    }
}

/// Sidecar run log written next to the archive when `log2file` is set.
///
/// Shares the archive's filename stem so the pruner ages it out together
/// with its archive. Failing to open or write it never fails the task.
struct RunLog {
    file: Option<std::fs::File>,
}

impl RunLog {
    fn disabled() -> Self {
        Self { file: None }
    }

    fn create(archive_path: &Path) -> Self {
        let mut os = archive_path.as_os_str().to_os_string();
        os.push(".log");
        let log_path = PathBuf::from(os);

        let file = match std::fs::File::create(&log_path) {
            Ok(f) => Some(f),
            Err(e) => {
                warn!("failed to create run log [{}]: {}", log_path.display(), e);
                None
            }
        };
        Self { file }
    }

    fn record(&mut self, line: &str) {
        let Some(file) = &mut self.file else { return };
        let stamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
        if let Err(e) = writeln!(file, "[{}] {}", stamp, line) {
            warn!("failed to write run log: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn task_for(source: &Path, dest: &Path) -> BackupTask {
        BackupTask {
            name: "unit".to_string(),
            source: source.to_string_lossy().into_owned(),
            dest: dest.to_string_lossy().into_owned(),
            skip: Vec::new(),
            content_root: true,
            sync: false,
            log_to_file: false,
            retention_days: 0,
        }
    }

    fn archives_in(dir: &Path, task_name: &str) -> Vec<PathBuf> {
        fs::read_dir(dir)
            .unwrap()
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| {
                p.file_name()
                    .map(|n| n.to_string_lossy().ends_with(naming::ARCHIVE_SUFFIX))
                    .unwrap_or(false)
                    && naming::parse_backup_file_name(
                        task_name,
                        &p.file_name().unwrap().to_string_lossy(),
                    )
                    .is_some()
            })
            .collect()
    }

    #[test]
    fn test_empty_fields_are_rejected() {
        let source = TempDir::new().unwrap();
        let dest = TempDir::new().unwrap();

        let mut task = task_for(source.path(), dest.path());
        task.name = String::new();
        assert!(matches!(
            run_task(&task),
            Err(BackupError::InvalidConfig(_))
        ));

        let mut task = task_for(source.path(), dest.path());
        task.source = String::new();
        assert!(matches!(
            run_task(&task),
            Err(BackupError::InvalidConfig(_))
        ));

        let mut task = task_for(source.path(), dest.path());
        task.dest = String::new();
        assert!(matches!(
            run_task(&task),
            Err(BackupError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_run_task_produces_named_archive() {
        let source = TempDir::new().unwrap();
        fs::write(source.path().join("a.txt"), b"alpha").unwrap();

        let dest_root = TempDir::new().unwrap();
        // a destination that does not exist yet gets created
        let dest = dest_root.path().join("nested/backups");

        let task = task_for(source.path(), &dest);
        run_task(&task).unwrap();

        let archives = archives_in(&dest, "unit");
        assert_eq!(archives.len(), 1);
    }

    #[test]
    fn test_sidecar_log_written_when_enabled() {
        let source = TempDir::new().unwrap();
        fs::write(source.path().join("a.txt"), b"alpha").unwrap();

        let dest = TempDir::new().unwrap();
        let mut task = task_for(source.path(), dest.path());
        task.log_to_file = true;
        run_task(&task).unwrap();

        let archive = archives_in(dest.path(), "unit").remove(0);
        let mut log_path = archive.into_os_string();
        log_path.push(".log");
        let log_path = PathBuf::from(log_path);

        assert!(log_path.exists());
        let content = fs::read_to_string(&log_path).unwrap();
        assert!(content.contains("start task [unit]"));
        assert!(content.contains("archived 1 files"));
    }

    #[test]
    fn test_destination_that_is_a_file_fails() {
        let source = TempDir::new().unwrap();
        fs::write(source.path().join("a.txt"), b"alpha").unwrap();

        let dest_root = TempDir::new().unwrap();
        let dest_file = dest_root.path().join("occupied");
        fs::write(&dest_file, b"in the way").unwrap();

        let task = task_for(source.path(), &dest_file);
        assert!(matches!(
            run_task(&task),
            Err(BackupError::DestinationNotDir(_))
        ));
    }

    #[test]
    fn test_missing_source_fails_and_leaves_destination_empty() {
        let source_root = TempDir::new().unwrap();
        let missing = source_root.path().join("gone");
        let dest = TempDir::new().unwrap();

        let task = task_for(&missing, dest.path());
        assert!(matches!(run_task(&task), Err(BackupError::Walk(_))));
        assert!(archives_in(dest.path(), "unit").is_empty());
    }

    #[test]
    fn test_failed_task_does_not_stop_the_run() {
        let source = TempDir::new().unwrap();
        fs::write(source.path().join("a.txt"), b"alpha").unwrap();
        let dest = TempDir::new().unwrap();

        let broken = BackupTask {
            name: "broken".to_string(),
            source: source
                .path()
                .join("missing")
                .to_string_lossy()
                .into_owned(),
            dest: dest.path().to_string_lossy().into_owned(),
            skip: Vec::new(),
            content_root: true,
            sync: false,
            log_to_file: false,
            retention_days: 0,
        };
        let mut healthy = task_for(source.path(), dest.path());
        healthy.name = "healthy".to_string();

        run_all(&[broken, healthy]);

        assert!(archives_in(dest.path(), "broken").is_empty());
        assert_eq!(archives_in(dest.path(), "healthy").len(), 1);
    }
}

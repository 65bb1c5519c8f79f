//! Archive builds: walk a source tree and stream the admitted files into
//! a single zip archive.

use crate::archive::copier;
use crate::config::BackupTask;
use crate::fs::skip::SkipList;
use crate::fs::walker::{walk_source, FileInfo};
use crate::utils::errors::{BackupError, Result};
use std::fs::File;
use std::path::Path;
use tracing::{error, info};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Counters for a completed archive build.
#[derive(Debug, Default)]
pub struct ArchiveSummary {
    pub files: usize,
    pub bytes: u64,
}

/// Trim a single trailing path separator of either slash style.
fn normalize_root(source: &str) -> &str {
    source
        .strip_suffix('/')
        .or_else(|| source.strip_suffix('\\'))
        .unwrap_or(source)
}

/// Final path component of a forward-slash-normalized root.
fn base_name(source: &str) -> &str {
    source.rsplit(['/', '\\']).next().unwrap_or(source)
}

/// Build the archive at `archive_path` from the task's source tree.
///
/// The walk runs to completion before the archive file is created, so a
/// failed walk leaves nothing behind at the destination. Directories are
/// never stored explicitly; they are implied by the entry paths, and a
/// tree holding only empty directories yields an empty archive.
pub fn build(task: &BackupTask, archive_path: &Path) -> Result<ArchiveSummary> {
    let source = normalize_root(&task.source);
    let skip = SkipList::new(&task.skip);

    let files = walk_source(Path::new(source), &skip)?;

    // Entries sit under the source directory's name unless the task asks
    // for its bare content.
    let prefix = if task.content_root {
        ""
    } else {
        base_name(source)
    };

    let archive = File::create(archive_path)?;
    let mut writer = ZipWriter::new(archive);
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .large_file(true);

    let mut summary = ArchiveSummary::default();

    for FileInfo {
        path,
        relative_path,
        ..
    } in &files
    {
        let entry_name = if prefix.is_empty() {
            relative_path.clone()
        } else {
            format!("{}/{}", prefix, relative_path)
        };

        info!("adding [{}]", entry_name);

        let mut file = File::open(path)?;
        writer.start_file(entry_name, options)?;
        summary.bytes += match copier::copy(&mut file, &mut writer) {
            Ok(copied) => copied,
            Err(err) => {
                if let BackupError::FileTooLarge { .. } = err {
                    error!("file [{}] exceeds the single-file limit", path.display());
                }
                return Err(err);
            }
        };
        summary.files += 1;
    }

    writer
        .finish()
        .map_err(|e| BackupError::ArchiveFinalize {
            path: archive_path.to_path_buf(),
            source: e,
        })?;

    Ok(summary)
}

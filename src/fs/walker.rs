//! Source-tree traversal for archive builds.

use crate::fs::skip::SkipList;
use std::path::{Path, PathBuf};
use tracing::info;
use walkdir::WalkDir;

/// A regular file admitted to the archive during a walk.
#[derive(Debug, Clone)]
pub struct FileInfo {
    /// Full path to the file.
    pub path: PathBuf,

    /// Forward-slash path relative to the source root.
    pub relative_path: String,

    /// File size in bytes.
    pub size: u64,
}

/// Walk `root` depth-first and collect every admitted file.
///
/// `root` must already be normalized (no trailing separator). Each visited
/// path is normalized to forward slashes and made relative to the root
/// before the skip filter sees it. Only regular files with size greater
/// than zero are admitted; directories and symlinks produce no entry.
/// Skipping a directory path excludes that exact path only — the walk
/// still descends into it.
///
/// The first traversal error aborts the walk.
pub fn walk_source(root: &Path, skip: &SkipList) -> Result<Vec<FileInfo>, walkdir::Error> {
    let root_prefix = format!("{}/", root.to_string_lossy().replace('\\', "/"));
    let mut files = Vec::new();

    for entry in WalkDir::new(root) {
        let entry = entry?;
        let metadata = entry.metadata()?;

        let path = entry.path().to_string_lossy().replace('\\', "/");
        let relative_path = match path.strip_prefix(&root_prefix) {
            Some(rel) => rel.to_string(),
            // the root itself
            None => continue,
        };

        if skip.should_skip(&relative_path) {
            info!("skip file [{}]", relative_path);
            continue;
        }

        if !entry.file_type().is_file() || metadata.len() == 0 {
            continue;
        }

        files.push(FileInfo {
            path: entry.path().to_path_buf(),
            relative_path,
            size: metadata.len(),
        });
    }

    Ok(files)
}

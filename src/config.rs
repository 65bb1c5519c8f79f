//! Task configuration for the backup runner.
//!
//! Loads an ordered list of backup tasks from a TOML file. The TOML keys
//! (`src`, `dest`, `files`, `content`, `sync`, `log2file`, `count`) match
//! the long-standing `backup.toml` layout, so configuration files written
//! for earlier deployments keep working unchanged.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One configured backup job mapping a source directory to a destination
/// directory with its own retention policy.
///
/// Constructed once from configuration and read-only for the duration of a
/// run. `name`, `source`, and `dest` are validated at task-run time, not at
/// parse time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackupTask {
    /// Task name; used as the archive filename prefix.
    #[serde(default)]
    pub name: String,

    /// Source directory to back up.
    #[serde(default, rename = "src")]
    pub source: String,

    /// Destination directory receiving the archives.
    #[serde(default, rename = "dest")]
    pub dest: String,

    /// Relative-path prefixes excluded from the archive.
    #[serde(default, rename = "files")]
    pub skip: Vec<String>,

    /// Store entries relative to the source root instead of nesting them
    /// under the source directory's name.
    #[serde(default, rename = "content")]
    pub content_root: bool,

    /// Mirror mode: retention pruning is disabled for this task.
    #[serde(default)]
    pub sync: bool,

    /// Write a sidecar `.zip.log` run log next to each archive.
    #[serde(default, rename = "log2file")]
    pub log_to_file: bool,

    /// Retention window in days, measured from the newest backup.
    /// Zero or negative disables pruning.
    #[serde(default, rename = "count")]
    pub retention_days: i64,
}

/// Ordered task list, deserialized from `[[task]]` tables.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default, rename = "task")]
    pub tasks: Vec<BackupTask>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("failed to parse config file {}", path.display()))?;
        if config.tasks.is_empty() {
            anyhow::bail!("no tasks configured in {}", path.display());
        }
        Ok(config)
    }
}

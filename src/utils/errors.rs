//! Custom error types for the backup runner.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackupError {
    #[error("invalid task configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to create destination directory {}: {source}", path.display())]
    DestinationCreate {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("destination {} exists but is not a directory", .0.display())]
    DestinationNotDir(PathBuf),

    #[error("directory walk failed: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("file exceeds the {limit} byte single-file limit")]
    FileTooLarge { limit: u64 },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("archive write failed: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("failed to finalize archive {}: {source}", path.display())]
    ArchiveFinalize {
        path: PathBuf,
        source: zip::result::ZipError,
    },
}

pub type Result<T> = std::result::Result<T, BackupError>;

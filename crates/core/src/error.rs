use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Setup failures that stop a run before any plan executes.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Source directory not found: {}", .0.display())]
    SourceNotFound(PathBuf),
    #[error("Source path is not a directory: {}", .0.display())]
    SourceNotDirectory(PathBuf),
}

/// Per-plan I/O failure. Recorded in the run result; never aborts sibling plans.
#[derive(Debug, Error)]
pub enum CopyError {
    #[error("failed to create directory {}: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to copy to {}: {source}", .path.display())]
    Copy {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to apply metadata to {}: {source}", .path.display())]
    Metadata {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

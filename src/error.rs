//! Error types for discovery and consolidation

use std::io;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SetupError>;

/// Errors that abort a whole run before (or while) the audit log is written
#[derive(Error, Debug)]
pub enum SetupError {
    /// Source root does not exist
    #[error("source folder not found: {0}")]
    SourceNotFound(PathBuf),

    /// Source root exists but is not a directory
    #[error("source path is not a directory: {0}")]
    SourceNotDirectory(PathBuf),

    /// Source root could not be resolved to an absolute path
    #[error("cannot resolve source folder {path}: {source}")]
    ResolveSource {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The extension allow-list is empty
    #[error("no file extensions configured")]
    NoExtensions,

    /// The output directory could not be created
    #[error("cannot create destination folder {path}: {source}")]
    CreateOutputDirectory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The audit log could not be opened or written
    #[error("cannot write audit log {path}: {source}")]
    AuditLog {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// Failure to copy a single item; recorded in the audit log, never propagated
#[derive(Error, Debug)]
pub enum ItemCopyError {
    #[error("cannot read source file {path}: {source}")]
    OpenSource {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("source and destination are the same file: {path}")]
    SameFile { path: PathBuf },

    #[error("cannot create destination file {path}: {source}")]
    CreateDestination {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("copy interrupted for {path}: {source}")]
    CopyContents {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

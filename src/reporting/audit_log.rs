//! CSV audit log written incrementally during a run

use csv::{Terminator, Writer, WriterBuilder};
use serde::Serialize;
use std::fs::File;
use std::path::{Path, PathBuf};

use crate::core::consolidator::{ItemStatus, OutputRecord};
use crate::error::{Result, SetupError};

/// Header row of the audit log
pub const AUDIT_HEADER: [&str; 6] = [
    "Serial No",
    "New File Name",
    "Original File Name",
    "Original Folder Path",
    "File Extension",
    "Status",
];

/// Value written in the New File Name column for failed items
pub const FAILED_SENTINEL: &str = "FAILED";

/// One CSV row, in header order
#[derive(Debug, Serialize)]
struct AuditRow<'a> {
    serial: usize,
    new_file_name: &'a str,
    original_file_name: &'a str,
    original_folder_path: String,
    file_extension: &'a str,
    status: String,
}

impl<'a> From<&'a OutputRecord> for AuditRow<'a> {
    fn from(record: &'a OutputRecord) -> Self {
        let (new_file_name, status) = match &record.status {
            ItemStatus::Success { new_file_name } => (new_file_name.as_str(), "SUCCESS".to_string()),
            ItemStatus::Failed { error } => (FAILED_SENTINEL, format!("ERROR: {}", error)),
        };

        Self {
            serial: record.serial,
            new_file_name,
            original_file_name: &record.original_file_name,
            original_folder_path: record.original_folder_path.display().to_string(),
            file_extension: &record.extension,
            status,
        }
    }
}

/// Append-only audit log; every row is flushed as soon as it is written
pub struct AuditLog {
    path: PathBuf,
    writer: Writer<File>,
    rows: usize,
}

impl AuditLog {
    /// Create (or truncate) the log at `path` and write the header row
    pub fn create(path: &Path) -> Result<Self> {
        let audit_error = |source| SetupError::AuditLog {
            path: path.to_path_buf(),
            source,
        };

        let mut writer = WriterBuilder::new()
            .has_headers(false)
            .terminator(Terminator::Any(b'\n'))
            .from_path(path)
            .map_err(audit_error)?;
        writer.write_record(AUDIT_HEADER).map_err(audit_error)?;

        let mut log = Self {
            path: path.to_path_buf(),
            writer,
            rows: 0,
        };
        log.flush()?;
        Ok(log)
    }

    /// Append one record and flush it to disk
    pub fn append(&mut self, record: &OutputRecord) -> Result<()> {
        self.writer
            .serialize(AuditRow::from(record))
            .map_err(|source| SetupError::AuditLog {
                path: self.path.clone(),
                source,
            })?;
        self.rows += 1;
        self.flush()
    }

    /// Number of data rows written so far
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Flush and close the log, returning its path
    pub fn finish(mut self) -> Result<PathBuf> {
        self.flush()?;
        Ok(self.path)
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush().map_err(|e| SetupError::AuditLog {
            path: self.path.clone(),
            source: e.into(),
        })
    }
}

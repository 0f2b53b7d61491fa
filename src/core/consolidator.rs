//! Copy discovered files into one flat, serially numbered folder

use log::{debug, info, warn};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use super::copy::copy_preserving;
use super::naming::{new_file_name, serial_digits};
use crate::config::ConsolidateOptions;
use crate::error::{Result, SetupError};
use crate::reporting::audit_log::AuditLog;
use crate::scanner::file_scanner::SourceItem;

/// Outcome of one item
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemStatus {
    Success { new_file_name: String },
    Failed { error: String },
}

impl ItemStatus {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

/// One audit log row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputRecord {
    pub serial: usize,
    pub original_file_name: String,
    pub original_folder_path: PathBuf,
    pub extension: String,
    pub status: ItemStatus,
}

/// Progress notification sent after every item
#[derive(Debug, Clone, Copy)]
pub struct ItemProgress<'a> {
    pub serial: usize,
    pub total: usize,
    pub record: &'a OutputRecord,
}

/// Aggregate outcome of one run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunResult {
    pub total_found: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub output_directory: PathBuf,
    pub audit_log_path: PathBuf,
    /// Set when a cancel request stopped the run before every item was attempted
    pub cancelled: bool,
}

impl RunResult {
    /// Items that were actually copied or failed
    pub fn attempted(&self) -> usize {
        self.succeeded + self.failed
    }

    pub fn is_complete(&self) -> bool {
        !self.cancelled && self.attempted() == self.total_found
    }
}

/// Sequential consolidation with an optional cancel flag
pub struct Consolidator {
    options: ConsolidateOptions,
    cancel_flag: Option<Arc<AtomicBool>>,
}

impl Consolidator {
    pub fn new(options: ConsolidateOptions) -> Self {
        Self {
            options,
            cancel_flag: None,
        }
    }

    /// Stop before the next item once `flag` is set
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel_flag = Some(flag);
        self
    }

    fn cancel_requested(&self) -> bool {
        self.cancel_flag
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::SeqCst))
    }

    /// Copy `items` in order into `<destination_root>/<output folder>` and record each one
    ///
    /// # Arguments
    /// * `items` - Discovered files, in the order serials are assigned
    /// * `destination_root` - Existing, writable directory
    /// * `on_progress` - Called once per attempted item
    ///
    /// # Returns
    /// Counts and paths for the run. Per-item copy failures are recorded in
    /// the audit log; only setup and audit log failures are returned as `Err`.
    pub fn run<F>(&self, items: &[SourceItem], destination_root: &Path, mut on_progress: F) -> Result<RunResult>
    where
        F: FnMut(&ItemProgress),
    {
        let output_directory = destination_root.join(&self.options.output_folder_name);
        fs::create_dir_all(&output_directory).map_err(|source| SetupError::CreateOutputDirectory {
            path: output_directory.clone(),
            source,
        })?;
        let output_directory = fs::canonicalize(&output_directory).unwrap_or(output_directory);

        let mut audit_log = AuditLog::create(&output_directory.join(&self.options.audit_file_name))?;

        let total = items.len();
        let digits = serial_digits(self.options.serial_width, total);
        let mut succeeded = 0;
        let mut failed = 0;
        let mut cancelled = false;

        info!("Consolidating {} file(s) into {}", total, output_directory.display());

        for (idx, item) in items.iter().enumerate() {
            if self.cancel_requested() {
                warn!("Cancelled after {} of {} file(s)", idx, total);
                cancelled = true;
                break;
            }

            let serial = idx + 1;
            let name = new_file_name(&self.options.name_prefix, serial, digits, &item.extension);
            let destination = output_directory.join(&name);

            let status = match copy_preserving(&item.absolute_path, &destination) {
                Ok(bytes) => {
                    debug!("{} -> {} ({} bytes)", item.absolute_path.display(), name, bytes);
                    succeeded += 1;
                    ItemStatus::Success { new_file_name: name }
                }
                Err(e) => {
                    warn!("Failed to copy {}: {}", item.absolute_path.display(), e);
                    failed += 1;
                    ItemStatus::Failed { error: e.to_string() }
                }
            };

            let record = OutputRecord {
                serial,
                original_file_name: item.file_name.clone(),
                original_folder_path: item.parent_directory.clone(),
                extension: item.extension.clone(),
                status,
            };
            audit_log.append(&record)?;

            on_progress(&ItemProgress {
                serial,
                total,
                record: &record,
            });
        }

        let audit_log_path = audit_log.finish()?;
        info!("Run finished: {} succeeded, {} failed", succeeded, failed);

        Ok(RunResult {
            total_found: total,
            succeeded,
            failed,
            output_directory,
            audit_log_path,
            cancelled,
        })
    }
}

/// Consolidate with default options and no cancellation
pub fn consolidate<F>(items: &[SourceItem], destination_root: &Path, on_progress: F) -> Result<RunResult>
where
    F: FnMut(&ItemProgress),
{
    Consolidator::new(ConsolidateOptions::default()).run(items, destination_root, on_progress)
}

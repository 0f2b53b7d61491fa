//! Photo Consolidator Library
//!
//! Collects image files from a nested folder tree into one flat folder with
//! serial-numbered names and a CSV audit log of every copy.

pub mod config;
pub mod core;
pub mod error;
pub mod reporting;
pub mod scanner;

pub use crate::core::consolidator;
pub use crate::reporting::audit_log;
pub use crate::scanner::file_scanner;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::{default_extensions, normalize_extension, ConsolidateOptions, SerialWidth};
    pub use crate::core::consolidator::{
        consolidate, Consolidator, ItemProgress, ItemStatus, OutputRecord, RunResult,
    };
    pub use crate::core::naming::new_file_name;
    pub use crate::error::{ItemCopyError, SetupError};
    pub use crate::reporting::{summary_json, write_summary, AuditLog};
    pub use crate::scanner::file_scanner::{discover, discover_with, DiscoveryOptions, SourceItem};
}

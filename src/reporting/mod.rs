//! Audit log and run summaries

pub mod audit_log;
pub mod summary;

pub use audit_log::AuditLog;
pub use summary::{summary_json, write_summary};

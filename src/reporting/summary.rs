//! End-of-run summary output

use anyhow::Result;
use std::io::Write;

use crate::core::consolidator::RunResult;

/// Write a human-readable summary of a run
///
/// # Arguments
/// * `out` - Destination, usually stdout
/// * `result` - Outcome of the run
pub fn write_summary<W: Write>(out: &mut W, result: &RunResult) -> Result<()> {
    writeln!(out, "==================================================")?;
    if result.cancelled {
        writeln!(out, "CONSOLIDATION CANCELLED")?;
    } else {
        writeln!(out, "CONSOLIDATION COMPLETE")?;
    }
    writeln!(out, "==================================================")?;
    writeln!(out, "Total images found: {}", result.total_found)?;
    writeln!(out, "Successfully copied: {}", result.succeeded)?;
    writeln!(out, "Failed: {}", result.failed)?;
    if result.cancelled {
        writeln!(out, "Not attempted: {}", result.total_found - result.attempted())?;
    }
    writeln!(out)?;
    writeln!(out, "Output folder: {}", result.output_directory.display())?;
    writeln!(out, "Audit log: {}", result.audit_log_path.display())?;

    Ok(())
}

/// Render a run as pretty-printed JSON
pub fn summary_json(result: &RunResult) -> Result<String> {
    Ok(serde_json::to_string_pretty(result)?)
}

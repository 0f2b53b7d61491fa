//! Run configuration and defaults

use std::collections::BTreeSet;

/// Folder created under the destination root for every run
pub const DEFAULT_OUTPUT_FOLDER: &str = "SSIV ALL SUBMISSIONS";

/// Audit log file name inside the output folder
pub const DEFAULT_AUDIT_FILE: &str = "photo_tracking.csv";

/// Prefix of every renamed file
pub const DEFAULT_NAME_PREFIX: &str = "UIUPC_SI_";

/// Minimum number of digits in a rendered serial
pub const MIN_SERIAL_DIGITS: usize = 3;

const DEFAULT_EXTENSIONS: [&str; 7] = [".jpg", ".jpeg", ".png", ".gif", ".bmp", ".tiff", ".webp"];

/// How serial numbers are padded in output file names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SerialWidth {
    /// At least three digits; larger serials keep their natural width
    #[default]
    Minimum,

    /// Every name padded to the digit count of the run's item total
    FitTotal,
}

/// Configuration for one consolidation run
#[derive(Debug, Clone)]
pub struct ConsolidateOptions {
    /// Name of the folder created under the destination root
    pub output_folder_name: String,

    /// Name of the CSV audit log inside the output folder
    pub audit_file_name: String,

    /// Prefix placed before the serial in every new file name
    pub name_prefix: String,

    /// Serial padding policy
    pub serial_width: SerialWidth,
}

impl Default for ConsolidateOptions {
    fn default() -> Self {
        Self {
            output_folder_name: DEFAULT_OUTPUT_FOLDER.to_string(),
            audit_file_name: DEFAULT_AUDIT_FILE.to_string(),
            name_prefix: DEFAULT_NAME_PREFIX.to_string(),
            serial_width: SerialWidth::Minimum,
        }
    }
}

/// The image extensions collected when none are configured
pub fn default_extensions() -> BTreeSet<String> {
    DEFAULT_EXTENSIONS.iter().map(|ext| ext.to_string()).collect()
}

/// Turn user input like `JPG`, `.Jpg` or ` jpg ` into `.jpg`
///
/// Returns `None` for input that is empty after trimming.
pub fn normalize_extension(raw: &str) -> Option<String> {
    let trimmed = raw.trim().trim_start_matches('.');
    if trimmed.is_empty() {
        return None;
    }
    Some(format!(".{}", trimmed.to_lowercase()))
}

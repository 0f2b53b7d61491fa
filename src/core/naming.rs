//! Serial-based output file names

use crate::config::{SerialWidth, MIN_SERIAL_DIGITS};

/// Number of digits every serial is padded to for a run of `total` items
pub fn serial_digits(width: SerialWidth, total: usize) -> usize {
    match width {
        SerialWidth::Minimum => MIN_SERIAL_DIGITS,
        SerialWidth::FitTotal => MIN_SERIAL_DIGITS.max(total.to_string().len()),
    }
}

/// Build the output name for `serial`
///
/// Serials wider than `digits` keep their natural width, so names never collide.
///
/// # Arguments
/// * `prefix` - Text before the serial, e.g. `UIUPC_SI_`
/// * `serial` - 1-based position in discovery order
/// * `digits` - Minimum width of the zero-padded serial
/// * `extension` - Lower-case extension with leading dot
pub fn new_file_name(prefix: &str, serial: usize, digits: usize, extension: &str) -> String {
    format!("{}{:0width$}{}", prefix, serial, extension, width = digits)
}

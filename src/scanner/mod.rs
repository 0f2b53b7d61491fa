//! File scanning and collection functionality

pub mod file_scanner;

pub use file_scanner::{discover, discover_with, DiscoveryOptions, SourceItem};

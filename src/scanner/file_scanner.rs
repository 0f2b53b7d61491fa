//! Image file discovery

use log::{debug, warn};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

use crate::error::{Result, SetupError};

/// One discovered file, consumed once by the consolidator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceItem {
    pub absolute_path: PathBuf,
    pub file_name: String,
    pub parent_directory: PathBuf,
    /// Lower-cased, with leading dot
    pub extension: String,
}

impl SourceItem {
    /// Build an item from a file path, if the path has a usable name and extension
    pub fn from_path(path: &Path) -> Option<Self> {
        let file_name = path.file_name()?.to_string_lossy().into_owned();
        let extension = format!(".{}", path.extension()?.to_string_lossy().to_lowercase());
        let parent_directory = path.parent()?.to_path_buf();

        Some(Self {
            absolute_path: path.to_path_buf(),
            file_name,
            parent_directory,
            extension,
        })
    }
}

/// Traversal tweaks for discovery
#[derive(Debug, Clone, Copy, Default)]
pub struct DiscoveryOptions {
    /// Sort each directory's entries by file name instead of filesystem order
    pub sort_by_name: bool,
}

/// Collect all files under `source_root` whose extension is allowed
///
/// # Arguments
/// * `source_root` - Existing directory to scan recursively
/// * `allowed_extensions` - Lower-case, dot-prefixed suffixes
///
/// # Returns
/// Items in top-down depth-first order (a directory's files before its
/// subdirectories, filesystem order otherwise); empty when nothing matches
pub fn discover(source_root: &Path, allowed_extensions: &BTreeSet<String>) -> Result<Vec<SourceItem>> {
    discover_with(source_root, allowed_extensions, &DiscoveryOptions::default())
}

/// Same as [`discover`], with explicit traversal options
pub fn discover_with(
    source_root: &Path,
    allowed_extensions: &BTreeSet<String>,
    options: &DiscoveryOptions,
) -> Result<Vec<SourceItem>> {
    if allowed_extensions.is_empty() {
        return Err(SetupError::NoExtensions);
    }
    if !source_root.exists() {
        return Err(SetupError::SourceNotFound(source_root.to_path_buf()));
    }
    if !source_root.is_dir() {
        return Err(SetupError::SourceNotDirectory(source_root.to_path_buf()));
    }

    let root = fs::canonicalize(source_root).map_err(|source| SetupError::ResolveSource {
        path: source_root.to_path_buf(),
        source,
    })?;

    // Files of a directory come before anything in its subdirectories
    let sort_by_name = options.sort_by_name;
    let walker = WalkDir::new(&root)
        .follow_links(false)
        .sort_by(move |a, b| {
            let order = a.file_type().is_dir().cmp(&b.file_type().is_dir());
            if sort_by_name {
                order.then_with(|| a.file_name().cmp(b.file_name()))
            } else {
                order
            }
        });

    let mut items = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                // Unreadable subtrees are left out of the result
                let path = e.path().map(|p| p.display().to_string()).unwrap_or_default();
                warn!("Skipping unreadable path {}: {}", path, e);
                continue;
            }
        };

        if !is_file_entry(&entry) {
            continue;
        }

        if is_allowed(&entry, allowed_extensions) {
            if let Some(item) = SourceItem::from_path(entry.path()) {
                items.push(item);
            }
        }
    }

    debug!("Discovered {} eligible file(s) under {}", items.len(), root.display());
    Ok(items)
}

/// Regular files, and symlinks that resolve to one; linked directories are not entered
fn is_file_entry(entry: &DirEntry) -> bool {
    entry.file_type().is_file() || (entry.path_is_symlink() && entry.path().is_file())
}

fn is_allowed(entry: &DirEntry, allowed_extensions: &BTreeSet<String>) -> bool {
    match entry.path().extension() {
        Some(ext) => {
            let ext = format!(".{}", ext.to_string_lossy().to_lowercase());
            allowed_extensions.contains(&ext)
        }
        None => false,
    }
}

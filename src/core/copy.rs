//! Copy a file while keeping its modification time and permission bits

use log::debug;
use std::fs::{self, File};
use std::io;
use std::path::Path;

use crate::error::ItemCopyError;

/// Copy `source` to `destination`, overwriting any existing file
///
/// Content is copied byte for byte. Timestamps and permissions are applied
/// where the platform allows it; failing to apply them does not fail the copy.
/// A partially written destination is removed on error.
pub fn copy_preserving(source: &Path, destination: &Path) -> Result<u64, ItemCopyError> {
    let mut reader = File::open(source).map_err(|e| ItemCopyError::OpenSource {
        path: source.to_path_buf(),
        source: e,
    })?;
    let metadata = reader.metadata().map_err(|e| ItemCopyError::OpenSource {
        path: source.to_path_buf(),
        source: e,
    })?;

    // Creating the destination would truncate the source
    if is_same_file(source, destination) {
        return Err(ItemCopyError::SameFile {
            path: destination.to_path_buf(),
        });
    }

    let mut writer = File::create(destination).map_err(|e| ItemCopyError::CreateDestination {
        path: destination.to_path_buf(),
        source: e,
    })?;

    let bytes = match io::copy(&mut reader, &mut writer) {
        Ok(bytes) => bytes,
        Err(e) => {
            drop(writer);
            let _ = fs::remove_file(destination);
            return Err(ItemCopyError::CopyContents {
                path: source.to_path_buf(),
                source: e,
            });
        }
    };

    if let Ok(modified) = metadata.modified() {
        if let Err(e) = writer.set_modified(modified) {
            debug!("Could not keep mtime on {}: {}", destination.display(), e);
        }
    }
    drop(writer);

    if let Err(e) = fs::set_permissions(destination, metadata.permissions()) {
        debug!("Could not keep permissions on {}: {}", destination.display(), e);
    }

    Ok(bytes)
}

/// Whether both paths name the same file, through symlinks or hard links
fn is_same_file(a: &Path, b: &Path) -> bool {
    let (Ok(meta_a), Ok(meta_b)) = (fs::metadata(a), fs::metadata(b)) else {
        return false;
    };

    #[cfg(unix)]
    {
        use std::os::unix::fs::MetadataExt;
        if meta_a.dev() == meta_b.dev() && meta_a.ino() == meta_b.ino() {
            return true;
        }
    }
    #[cfg(not(unix))]
    let _ = (meta_a, meta_b);

    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

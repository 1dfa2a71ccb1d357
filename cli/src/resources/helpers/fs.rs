//! File-system resource helpers.
use std::path::Path;

use crate::error::PlacementError;

/// Ensure the parent directory of `path` exists, creating it (and any
/// ancestors) if necessary.
///
/// # Errors
///
/// Returns an error if the directory cannot be created.
pub fn ensure_parent_dir(path: &Path) -> Result<(), PlacementError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|source| PlacementError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    Ok(())
}

/// Whether any directory entry exists at `path`, including a dangling symlink.
#[must_use]
pub fn entry_exists(path: &Path) -> bool {
    path.symlink_metadata().is_ok()
}

/// Whether `path` itself is a symlink (or junction), without following it.
#[must_use]
pub fn is_link(path: &Path) -> bool {
    path.symlink_metadata().is_ok_and(|m| m.is_symlink())
}

/// Whether `path` is a real directory (not a link to one).
#[must_use]
pub fn is_real_dir(path: &Path) -> bool {
    path.symlink_metadata()
        .is_ok_and(|m| m.is_dir() && !m.is_symlink())
}

/// Remove whatever entry exists at `path` without following links.
///
/// Real directories are removed recursively; files and symlinks (including
/// directory symlinks and broken links) are unlinked.  Does nothing if
/// `path` does not exist.
///
/// # Errors
///
/// Returns an error if the path exists but cannot be removed.
pub fn remove_existing(path: &Path) -> Result<(), PlacementError> {
    let Ok(meta) = std::fs::symlink_metadata(path) else {
        return Ok(());
    };
    let result = if meta.is_dir() && !meta.is_symlink() {
        std::fs::remove_dir_all(path)
    } else if is_dir_like(&meta) {
        std::fs::remove_dir(path)
    } else {
        std::fs::remove_file(path)
    };
    result.map_err(|source| PlacementError::RemoveExisting {
        path: path.to_path_buf(),
        source,
    })
}

/// Check if a symlink's metadata represents a directory link.
///
/// On Windows, `symlink_metadata().is_dir()` returns `false` for directory
/// symlinks, so the raw `FILE_ATTRIBUTE_DIRECTORY` bit is checked instead.
fn is_dir_like(meta: &std::fs::Metadata) -> bool {
    #[cfg(windows)]
    {
        use std::os::windows::fs::MetadataExt;
        meta.file_attributes() & 0x10 != 0 // FILE_ATTRIBUTE_DIRECTORY
    }
    #[cfg(not(windows))]
    {
        meta.is_dir()
    }
}

/// Copy a regular file, preserving permissions and access/modification times.
///
/// # Errors
///
/// Returns an error if the content cannot be copied or the timestamps cannot
/// be applied to the destination.
pub fn copy_with_metadata(source: &Path, dest: &Path) -> std::io::Result<()> {
    std::fs::copy(source, dest)?;

    let meta = std::fs::metadata(source)?;
    let mut times = std::fs::FileTimes::new().set_modified(meta.modified()?);
    if let Ok(accessed) = meta.accessed() {
        times = times.set_accessed(accessed);
    }

    // Copied permissions may be read-only; owners can still set times
    // through a read handle on Unix.
    let file = std::fs::File::options()
        .write(true)
        .open(dest)
        .or_else(|_| std::fs::File::open(dest))?;
    file.set_times(times)
}

//! `.cursorignore` marker resource.
use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};

use super::ResourceChange;

/// File name of the ignore marker at the target root.
pub const MARKER_FILE: &str = ".cursorignore";

const FILE_MODE_COMMENT: &str = "# Cursor rules directory (if using symlinks/hardlinks)";
const DIRECTORY_MODE_COMMENT: &str = "# Cursor rules directory (symlinked to source)";

/// The ignore marker that keeps `.cursor/` out of Cursor's indexing.
///
/// The marker is only ever created; an existing file is never rewritten.
#[derive(Debug, Clone)]
pub struct IgnoreMarker {
    /// Path of the marker file.
    pub path: PathBuf,
    directory_mode: bool,
}

impl IgnoreMarker {
    /// Marker for `target_root`, with the comment matching the import mode.
    #[must_use]
    pub fn for_mode(target_root: &Path, directory_mode: bool) -> Self {
        Self {
            path: target_root.join(MARKER_FILE),
            directory_mode,
        }
    }

    /// Contents written when the marker is created.
    #[must_use]
    pub fn contents(&self) -> String {
        let comment = if self.directory_mode {
            DIRECTORY_MODE_COMMENT
        } else {
            FILE_MODE_COMMENT
        };
        format!("{comment}\n.cursor/\n\n")
    }

    /// Whether anything already exists at the marker path.
    #[must_use]
    pub fn exists(&self) -> bool {
        self.path.symlink_metadata().is_ok()
    }

    /// Create the marker if it is absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn apply(&self, dry_run: bool) -> Result<ResourceChange> {
        if self.exists() {
            return Ok(ResourceChange::AlreadyPresent);
        }
        if dry_run {
            return Ok(ResourceChange::WouldApply);
        }
        std::fs::write(&self.path, self.contents())
            .with_context(|| format!("writing {}", self.path.display()))?;
        Ok(ResourceChange::Applied)
    }
}

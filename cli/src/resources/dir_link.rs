//! Whole-directory link resource (`.cursor/rules` -> source rules directory).
use std::path::PathBuf;

use super::helpers::fs::{ensure_parent_dir, remove_existing};
use super::{LinkType, PlacementOutcome};
use crate::error::PlacementError;
use crate::operations::LinkOps;

/// What currently occupies the link path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirLinkState {
    /// Nothing exists at the link path.
    Missing,
    /// A symlink (possibly dangling) with the given stored target.
    Link(PathBuf),
    /// A real directory.
    Directory,
    /// A regular file or other non-directory entry.
    File,
}

/// A directory symlink that makes the whole rule collection visible at once.
#[derive(Debug, Clone)]
pub struct DirectoryLink {
    /// Source rules directory (what the link points to, once resolved).
    pub source_dir: PathBuf,
    /// Path of the link, normally `<target>/.cursor/rules`.
    pub link: PathBuf,
    /// Replace whatever exists at `link`.
    pub force: bool,
}

impl DirectoryLink {
    /// Create a new directory link resource.
    #[must_use]
    pub const fn new(source_dir: PathBuf, link: PathBuf, force: bool) -> Self {
        Self {
            source_dir,
            link,
            force,
        }
    }

    /// Human-readable description of this link.
    #[must_use]
    pub fn description(&self) -> String {
        format!("{} -> {}", self.link.display(), self.source_dir.display())
    }

    /// Inspect the link path without following it.
    #[must_use]
    pub fn current_state(&self) -> DirLinkState {
        let Ok(meta) = self.link.symlink_metadata() else {
            return DirLinkState::Missing;
        };
        if meta.is_symlink() {
            // An unreadable link target is still a link for conflict purposes.
            let target = std::fs::read_link(&self.link).unwrap_or_default();
            DirLinkState::Link(target)
        } else if meta.is_dir() {
            DirLinkState::Directory
        } else {
            DirLinkState::File
        }
    }

    /// Create the link, honouring the conflict policy.
    ///
    /// # Errors
    ///
    /// Returns an error if the existing entry cannot be removed or the link
    /// cannot be created. The caller decides whether to fall back to copies.
    pub fn apply(
        &self,
        ops: &dyn LinkOps,
        dry_run: bool,
    ) -> Result<PlacementOutcome, PlacementError> {
        let state = self.current_state();
        let occupied = state != DirLinkState::Missing;

        if occupied && !self.force {
            return Ok(PlacementOutcome::SkippedExisting);
        }
        if dry_run {
            return Ok(PlacementOutcome::WouldPlace(LinkType::DirSymlink));
        }
        if occupied {
            remove_existing(&self.link)?;
        }
        ensure_parent_dir(&self.link)?;

        ops.canonicalize(&self.source_dir)
            .and_then(|resolved| ops.symlink_dir(&resolved, &self.link))
            .map_err(|source| PlacementError::Link {
                link: self.link.clone(),
                target: self.source_dir.clone(),
                source,
            })?;

        Ok(PlacementOutcome::Placed(LinkType::DirSymlink))
    }
}

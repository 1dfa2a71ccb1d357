//! Idempotent placement primitives (check + apply pattern).
pub mod dir_link;
pub mod file_placement;
pub mod helpers;
pub mod ignore_marker;

use std::fmt;

use serde::Deserialize;

/// How rule files are made to appear under the target project.
///
/// # Examples
///
/// ```
/// use cursor_rules_cli::resources::LinkType;
///
/// assert_eq!(LinkType::default(), LinkType::Copy);
/// assert_eq!(LinkType::DirSymlink.to_string(), "dirsymlink");
/// assert!(LinkType::DirSymlink.is_directory_level());
/// assert!(!LinkType::Hardlink.is_directory_level());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, clap::ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkType {
    /// Independent copies (content and metadata).
    #[default]
    Copy,
    /// One symlink per file, pointing at the resolved source path.
    Symlink,
    /// One hardlink per file, sharing the source file's data.
    Hardlink,
    /// A single symlink replacing the whole rules directory.
    #[value(name = "dirsymlink")]
    DirSymlink,
}

impl LinkType {
    /// Command-line spelling of the link type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Copy => "copy",
            Self::Symlink => "symlink",
            Self::Hardlink => "hardlink",
            Self::DirSymlink => "dirsymlink",
        }
    }

    /// Past-tense verb used in per-file progress lines.
    #[must_use]
    pub const fn past_tense(self) -> &'static str {
        match self {
            Self::Copy => "Copied",
            Self::Symlink => "Symlinked",
            Self::Hardlink => "Hardlinked",
            Self::DirSymlink => "Linked",
        }
    }

    /// Whether the whole rules directory is placed as one link.
    #[must_use]
    pub const fn is_directory_level(self) -> bool {
        matches!(self, Self::DirSymlink)
    }

    /// Whether edits to the source rules show up in the project.
    #[must_use]
    pub const fn tracks_source(self) -> bool {
        !matches!(self, Self::Copy)
    }
}

impl fmt::Display for LinkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of placing one file (or the whole-directory link).
///
/// # Examples
///
/// ```
/// use cursor_rules_cli::resources::{LinkType, PlacementOutcome};
///
/// let copied = PlacementOutcome::Placed(LinkType::Copy);
/// let fallback = PlacementOutcome::FellBack {
///     attempted: LinkType::Symlink,
///     reason: "operation not permitted".into(),
/// };
/// assert!(copied.is_placed());
/// assert!(fallback.is_placed());
/// assert!(!PlacementOutcome::SkippedExisting.is_placed());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlacementOutcome {
    /// The entry was created with the requested strategy.
    Placed(LinkType),
    /// Linking failed and the file was copied instead.
    FellBack {
        /// Strategy that was attempted first.
        attempted: LinkType,
        /// Why the link could not be created.
        reason: String,
    },
    /// The destination already existed and force was not set.
    SkippedExisting,
    /// Dry run: the entry would have been placed with this strategy.
    WouldPlace(LinkType),
    /// Placement failed; the run continued with the next entry.
    Failed {
        /// Error description.
        reason: String,
    },
}

impl PlacementOutcome {
    /// Whether something now exists at the destination because of this run.
    #[must_use]
    pub const fn is_placed(&self) -> bool {
        matches!(self, Self::Placed(_) | Self::FellBack { .. })
    }
}

/// Result of applying a single-object resource such as the ignore marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceChange {
    /// Resource was created.
    Applied,
    /// Resource was already present and left untouched.
    AlreadyPresent,
    /// Dry run: resource would have been created.
    WouldApply,
}

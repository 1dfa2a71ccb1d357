//! Settings, rule selection, and the resolved plan for one import run.
pub mod selection;
pub mod settings;
pub mod source;
pub mod toml_loader;

use std::path::PathBuf;

use crate::resources::LinkType;
use crate::resources::ignore_marker::MARKER_FILE;
use selection::RuleSelection;

/// Everything an import run needs, with command-line values, settings, and
/// built-in defaults already merged.
#[derive(Debug, Clone)]
pub struct ImportPlan {
    /// Canonical source rules directory.
    pub source_dir: PathBuf,
    /// Absolute target project directory.
    pub target_dir: PathBuf,
    /// Requested placement strategy.
    pub link_type: LinkType,
    /// Rule sets to import in file-level mode.
    pub selection: RuleSelection,
    /// Replace existing entries instead of skipping them.
    pub force: bool,
    /// Report actions without touching the filesystem.
    pub dry_run: bool,
}

impl ImportPlan {
    /// `<target>/.cursor`
    #[must_use]
    pub fn cursor_dir(&self) -> PathBuf {
        self.target_dir.join(".cursor")
    }

    /// `<target>/.cursor/rules`
    #[must_use]
    pub fn rules_dir(&self) -> PathBuf {
        self.cursor_dir().join("rules")
    }

    /// `<target>/.cursorignore`
    #[must_use]
    pub fn marker_path(&self) -> PathBuf {
        self.target_dir.join(MARKER_FILE)
    }
}

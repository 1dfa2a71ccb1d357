//! Per-run record of what happened to every placed entry.
use std::path::PathBuf;

use crate::resources::{LinkType, PlacementOutcome, ResourceChange};

/// Outcome for one file of one rule set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    /// Rule set the file belongs to.
    pub rule_set: String,
    /// Path relative to the rule set directory.
    pub relative: PathBuf,
    /// What happened at the destination.
    pub outcome: PlacementOutcome,
}

/// Everything an import run did, returned to the caller once all tasks ran.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportReport {
    /// Per-file outcomes in processing order.
    pub files: Vec<FileRecord>,
    /// Rule sets that were processed (existing source directories).
    pub imported_rule_sets: Vec<String>,
    /// Requested rule sets with no matching source directory.
    pub missing_rule_sets: Vec<String>,
    /// Outcome of the whole-directory link, when directory mode was requested.
    pub directory_link: Option<PlacementOutcome>,
    /// The directory link failed and files were copied instead.
    pub fell_back_to_copy: bool,
    /// Outcome of the `.cursorignore` marker.
    pub ignore_marker: Option<ResourceChange>,
}

impl ImportReport {
    /// Number of files placed by this run (including fallback copies).
    #[must_use]
    pub fn placed_count(&self) -> usize {
        self.files.iter().filter(|f| f.outcome.is_placed()).count()
    }

    /// Number of files left alone because the destination already existed.
    #[must_use]
    pub fn skipped_count(&self) -> usize {
        self.count(|o| matches!(o, PlacementOutcome::SkippedExisting))
    }

    /// Number of files that could not be placed.
    #[must_use]
    pub fn failed_count(&self) -> usize {
        self.count(|o| matches!(o, PlacementOutcome::Failed { .. }))
    }

    /// Strategy that ended up in effect for the run.
    #[must_use]
    pub const fn effective_link_type(&self, requested: LinkType) -> LinkType {
        if self.fell_back_to_copy {
            LinkType::Copy
        } else {
            requested
        }
    }

    /// Outcome recorded for `rule_set/relative`, if the file was visited.
    #[must_use]
    pub fn outcome_for(&self, rule_set: &str, relative: &str) -> Option<&PlacementOutcome> {
        self.files
            .iter()
            .find(|f| f.rule_set == rule_set && f.relative == PathBuf::from(relative))
            .map(|f| &f.outcome)
    }

    fn count(&self, pred: impl Fn(&PlacementOutcome) -> bool) -> usize {
        self.files.iter().filter(|f| pred(&f.outcome)).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(rule_set: &str, relative: &str, outcome: PlacementOutcome) -> FileRecord {
        FileRecord {
            rule_set: rule_set.into(),
            relative: relative.into(),
            outcome,
        }
    }

    #[test]
    fn counts_by_outcome() {
        let report = ImportReport {
            files: vec![
                record("general", "a.md", PlacementOutcome::Placed(LinkType::Copy)),
                record(
                    "general",
                    "b.md",
                    PlacementOutcome::FellBack {
                        attempted: LinkType::Hardlink,
                        reason: "cross-device".into(),
                    },
                ),
                record("python", "c.md", PlacementOutcome::SkippedExisting),
                record(
                    "python",
                    "d.md",
                    PlacementOutcome::Failed {
                        reason: "denied".into(),
                    },
                ),
            ],
            ..ImportReport::default()
        };

        assert_eq!(report.placed_count(), 2);
        assert_eq!(report.skipped_count(), 1);
        assert_eq!(report.failed_count(), 1);
        assert_eq!(
            report.outcome_for("python", "c.md"),
            Some(&PlacementOutcome::SkippedExisting)
        );
        assert_eq!(report.outcome_for("python", "zzz.md"), None);
    }

    #[test]
    fn fallback_switches_effective_link_type() {
        let mut report = ImportReport::default();
        assert_eq!(
            report.effective_link_type(LinkType::DirSymlink),
            LinkType::DirSymlink
        );
        report.fell_back_to_copy = true;
        assert_eq!(
            report.effective_link_type(LinkType::DirSymlink),
            LinkType::Copy
        );
    }
}

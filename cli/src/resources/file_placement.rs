//! Per-file placement resource.
use std::io;
use std::path::{Path, PathBuf};

use super::helpers::fs::{ensure_parent_dir, entry_exists, remove_existing};
use super::{LinkType, PlacementOutcome};
use crate::error::PlacementError;
use crate::operations::LinkOps;

/// One source file to be mirrored at a destination path.
#[derive(Debug, Clone)]
pub struct FilePlacement {
    /// File inside a source rule set.
    pub source: PathBuf,
    /// Mirrored path under `.cursor/rules/<rule-set>/`.
    pub dest: PathBuf,
    /// Requested strategy.
    pub link_type: LinkType,
    /// Replace an existing destination entry instead of skipping it.
    pub force: bool,
}

impl FilePlacement {
    /// Create a new placement.
    #[must_use]
    pub const fn new(source: PathBuf, dest: PathBuf, link_type: LinkType, force: bool) -> Self {
        Self {
            source,
            dest,
            link_type,
            force,
        }
    }

    /// Human-readable description of this placement.
    #[must_use]
    pub fn description(&self) -> String {
        format!(
            "{} -> {} ({})",
            self.source.display(),
            self.dest.display(),
            self.link_type
        )
    }

    /// Strategy used per file. Directory mode only reaches here after its
    /// link failed, so it degrades to copy.
    const fn file_link_type(&self) -> LinkType {
        match self.link_type {
            LinkType::DirSymlink => LinkType::Copy,
            other => other,
        }
    }

    /// Place the file, honouring the conflict policy.
    ///
    /// Symlink and hardlink failures fall back to a copy and report
    /// [`PlacementOutcome::FellBack`].
    ///
    /// # Errors
    ///
    /// Returns an error if an existing entry cannot be removed, the parent
    /// directory cannot be created, or the (fallback) copy fails.
    pub fn apply(
        &self,
        ops: &dyn LinkOps,
        dry_run: bool,
    ) -> Result<PlacementOutcome, PlacementError> {
        let link_type = self.file_link_type();

        if entry_exists(&self.dest) {
            if !self.force {
                return Ok(PlacementOutcome::SkippedExisting);
            }
            if dry_run {
                return Ok(PlacementOutcome::WouldPlace(link_type));
            }
            remove_existing(&self.dest)?;
        } else if dry_run {
            return Ok(PlacementOutcome::WouldPlace(link_type));
        }

        ensure_parent_dir(&self.dest)?;

        match link_type {
            LinkType::Symlink => {
                let linked = ops
                    .canonicalize(&self.source)
                    .and_then(|resolved| ops.symlink_file(&resolved, &self.dest));
                match linked {
                    Ok(()) => Ok(PlacementOutcome::Placed(LinkType::Symlink)),
                    Err(e) => self.fall_back_to_copy(ops, LinkType::Symlink, &e),
                }
            }
            LinkType::Hardlink => {
                // Hard-linking a symlink links the link itself, not its file.
                let linked = ops
                    .canonicalize(&self.source)
                    .and_then(|resolved| ops.hard_link(&resolved, &self.dest));
                match linked {
                    Ok(()) => Ok(PlacementOutcome::Placed(LinkType::Hardlink)),
                    Err(e) => self.fall_back_to_copy(ops, LinkType::Hardlink, &e),
                }
            }
            LinkType::Copy | LinkType::DirSymlink => {
                copy(ops, &self.source, &self.dest)?;
                Ok(PlacementOutcome::Placed(LinkType::Copy))
            }
        }
    }

    fn fall_back_to_copy(
        &self,
        ops: &dyn LinkOps,
        attempted: LinkType,
        cause: &io::Error,
    ) -> Result<PlacementOutcome, PlacementError> {
        // A half-created link would make the copy fail with AlreadyExists.
        remove_existing(&self.dest)?;
        copy(ops, &self.source, &self.dest)?;
        Ok(PlacementOutcome::FellBack {
            attempted,
            reason: cause.to_string(),
        })
    }
}

fn copy(ops: &dyn LinkOps, from: &Path, to: &Path) -> Result<(), PlacementError> {
    ops.copy_file(from, to)
        .map_err(|source| PlacementError::Copy {
            from: from.to_path_buf(),
            to: to.to_path_buf(),
            source,
        })
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::operations::{MockLinkOps, SystemLinkOps};

    struct Scratch {
        _dir: tempfile::TempDir,
        source: PathBuf,
        dest: PathBuf,
    }

    fn scratch() -> Scratch {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("rules").join("general").join("a.md");
        std::fs::create_dir_all(source.parent().unwrap()).unwrap();
        std::fs::write(&source, "source body").unwrap();
        let dest = dir
            .path()
            .join("project")
            .join(".cursor")
            .join("rules")
            .join("general")
            .join("a.md");
        Scratch {
            _dir: dir,
            source,
            dest,
        }
    }

    fn placement(s: &Scratch, link_type: LinkType, force: bool) -> FilePlacement {
        FilePlacement::new(s.source.clone(), s.dest.clone(), link_type, force)
    }

    #[test]
    fn copy_creates_parents_and_content() {
        let s = scratch();
        let outcome = placement(&s, LinkType::Copy, false)
            .apply(&SystemLinkOps, false)
            .unwrap();
        assert_eq!(outcome, PlacementOutcome::Placed(LinkType::Copy));
        assert_eq!(std::fs::read_to_string(&s.dest).unwrap(), "source body");
    }

    #[test]
    fn existing_destination_is_skipped_without_force() {
        let s = scratch();
        std::fs::create_dir_all(s.dest.parent().unwrap()).unwrap();
        std::fs::write(&s.dest, "local edits").unwrap();

        let outcome = placement(&s, LinkType::Copy, false)
            .apply(&MockLinkOps::new(), false)
            .unwrap();

        assert_eq!(outcome, PlacementOutcome::SkippedExisting);
        assert_eq!(std::fs::read_to_string(&s.dest).unwrap(), "local edits");
    }

    #[test]
    fn existing_destination_is_replaced_with_force() {
        let s = scratch();
        std::fs::create_dir_all(s.dest.parent().unwrap()).unwrap();
        std::fs::write(&s.dest, "local edits").unwrap();

        let outcome = placement(&s, LinkType::Copy, true)
            .apply(&SystemLinkOps, false)
            .unwrap();

        assert_eq!(outcome, PlacementOutcome::Placed(LinkType::Copy));
        assert_eq!(std::fs::read_to_string(&s.dest).unwrap(), "source body");
    }

    #[cfg(unix)]
    #[test]
    fn dangling_symlink_counts_as_existing() {
        let s = scratch();
        std::fs::create_dir_all(s.dest.parent().unwrap()).unwrap();
        std::os::unix::fs::symlink("/nonexistent/a.md", &s.dest).unwrap();

        let outcome = placement(&s, LinkType::Copy, false)
            .apply(&MockLinkOps::new(), false)
            .unwrap();

        assert_eq!(outcome, PlacementOutcome::SkippedExisting);
    }

    #[test]
    fn dry_run_touches_nothing() {
        let s = scratch();
        // No expectations: any call on the mock panics.
        let outcome = placement(&s, LinkType::Hardlink, false)
            .apply(&MockLinkOps::new(), true)
            .unwrap();
        assert_eq!(outcome, PlacementOutcome::WouldPlace(LinkType::Hardlink));
        assert!(!s.dest.parent().unwrap().exists());
    }

    #[test]
    fn dry_run_with_force_keeps_existing_entry() {
        let s = scratch();
        std::fs::create_dir_all(s.dest.parent().unwrap()).unwrap();
        std::fs::write(&s.dest, "local edits").unwrap();

        let outcome = placement(&s, LinkType::Copy, true)
            .apply(&MockLinkOps::new(), true)
            .unwrap();

        assert_eq!(outcome, PlacementOutcome::WouldPlace(LinkType::Copy));
        assert_eq!(std::fs::read_to_string(&s.dest).unwrap(), "local edits");
    }

    #[test]
    fn symlink_targets_canonical_source() {
        let s = scratch();
        let resolved = PathBuf::from("/resolved/general/a.md");
        let expected_link = s.dest.clone();
        let mut ops = MockLinkOps::new();
        let canon = resolved.clone();
        ops.expect_canonicalize()
            .times(1)
            .returning(move |_| Ok(canon.clone()));
        ops.expect_symlink_file()
            .withf(move |target, link| target == resolved && link == expected_link)
            .times(1)
            .returning(|_, _| Ok(()));

        let outcome = placement(&s, LinkType::Symlink, false)
            .apply(&ops, false)
            .unwrap();

        assert_eq!(outcome, PlacementOutcome::Placed(LinkType::Symlink));
    }

    #[test]
    fn symlink_failure_falls_back_to_copy() {
        let s = scratch();
        let mut ops = MockLinkOps::new();
        ops.expect_canonicalize()
            .returning(|p| Ok(p.to_path_buf()));
        ops.expect_symlink_file()
            .returning(|_, _| Err(io::Error::new(io::ErrorKind::PermissionDenied, "no privilege")));
        ops.expect_copy_file()
            .times(1)
            .returning(|from, to| std::fs::copy(from, to).map(|_| ()));

        let outcome = placement(&s, LinkType::Symlink, false)
            .apply(&ops, false)
            .unwrap();

        match outcome {
            PlacementOutcome::FellBack { attempted, reason } => {
                assert_eq!(attempted, LinkType::Symlink);
                assert!(reason.contains("no privilege"));
            }
            other => panic!("expected fallback, got {other:?}"),
        }
        assert_eq!(std::fs::read_to_string(&s.dest).unwrap(), "source body");
    }

    #[test]
    fn hardlink_failure_falls_back_to_copy() {
        let s = scratch();
        let mut ops = MockLinkOps::new();
        ops.expect_canonicalize()
            .returning(|p| Ok(p.to_path_buf()));
        ops.expect_hard_link()
            .returning(|_, _| Err(io::Error::from(io::ErrorKind::CrossesDevices)));
        ops.expect_copy_file()
            .times(1)
            .returning(|from, to| std::fs::copy(from, to).map(|_| ()));

        let outcome = placement(&s, LinkType::Hardlink, false)
            .apply(&ops, false)
            .unwrap();

        assert!(matches!(
            outcome,
            PlacementOutcome::FellBack {
                attempted: LinkType::Hardlink,
                ..
            }
        ));
        assert!(s.dest.exists());
    }

    #[test]
    fn hardlink_links_canonical_source() {
        let s = scratch();
        let resolved = PathBuf::from("/resolved/shared.md");
        let expected_link = s.dest.clone();
        let mut ops = MockLinkOps::new();
        let canon = resolved.clone();
        ops.expect_canonicalize()
            .times(1)
            .returning(move |_| Ok(canon.clone()));
        ops.expect_hard_link()
            .withf(move |source, link| source == resolved && link == expected_link)
            .times(1)
            .returning(|_, _| Ok(()));

        let outcome = placement(&s, LinkType::Hardlink, false)
            .apply(&ops, false)
            .unwrap();

        assert_eq!(outcome, PlacementOutcome::Placed(LinkType::Hardlink));
    }

    #[test]
    fn unresolvable_hardlink_source_falls_back_to_copy() {
        let s = scratch();
        let mut ops = MockLinkOps::new();
        ops.expect_canonicalize()
            .returning(|_| Err(io::Error::from(io::ErrorKind::NotFound)));
        ops.expect_copy_file()
            .times(1)
            .returning(|from, to| std::fs::copy(from, to).map(|_| ()));

        let outcome = placement(&s, LinkType::Hardlink, false)
            .apply(&ops, false)
            .unwrap();

        assert!(matches!(
            outcome,
            PlacementOutcome::FellBack {
                attempted: LinkType::Hardlink,
                ..
            }
        ));
        assert_eq!(std::fs::read_to_string(&s.dest).unwrap(), "source body");
    }

    #[cfg(unix)]
    #[test]
    fn hardlink_through_relative_symlink_shares_target_file() {
        let s = scratch();
        let rules = s.source.parent().unwrap().parent().unwrap();
        let shared = rules.parent().unwrap().join("shared.md");
        std::fs::write(&shared, "shared body").unwrap();
        let alias = s.source.with_file_name("alias.md");
        std::os::unix::fs::symlink("../../shared.md", &alias).unwrap();
        let dest = s.dest.with_file_name("alias.md");

        let outcome = FilePlacement::new(alias, dest.clone(), LinkType::Hardlink, false)
            .apply(&SystemLinkOps, false)
            .unwrap();

        if outcome == PlacementOutcome::Placed(LinkType::Hardlink) {
            assert!(!dest.symlink_metadata().unwrap().is_symlink());
        }
        assert_eq!(std::fs::read_to_string(&dest).unwrap(), "shared body");
    }

    #[test]
    fn copy_failure_is_reported() {
        let s = scratch();
        let mut ops = MockLinkOps::new();
        ops.expect_copy_file()
            .returning(|_, _| Err(io::Error::other("disk full")));

        let err = placement(&s, LinkType::Copy, false)
            .apply(&ops, false)
            .unwrap_err();

        assert!(matches!(err, PlacementError::Copy { .. }));
        assert!(err.to_string().contains("disk full"));
    }

    #[test]
    fn dirsymlink_degrades_to_copy_per_file() {
        let s = scratch();
        let outcome = placement(&s, LinkType::DirSymlink, false)
            .apply(&SystemLinkOps, false)
            .unwrap();
        assert_eq!(outcome, PlacementOutcome::Placed(LinkType::Copy));
        assert!(!s.dest.symlink_metadata().unwrap().is_symlink());
    }

    #[test]
    fn description_names_both_paths() {
        let s = scratch();
        let desc = placement(&s, LinkType::Hardlink, false).description();
        assert!(desc.contains("a.md"));
        assert!(desc.ends_with("(hardlink)"));
    }
}

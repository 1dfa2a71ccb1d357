use anyhow::Result;

use super::{Context, Task, TaskResult};
use crate::resources::PlacementOutcome;
use crate::resources::dir_link::{DirLinkState, DirectoryLink};

/// Link `.cursor/rules` to the whole source rules directory.
#[derive(Debug)]
pub struct LinkRulesDirectory;

impl Task for LinkRulesDirectory {
    fn name(&self) -> &str {
        "Link rules directory"
    }

    fn should_run(&self, ctx: &Context) -> bool {
        ctx.directory_mode()
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult> {
        let link = DirectoryLink::new(ctx.plan.source_dir.clone(), ctx.rules_dir(), ctx.plan.force);
        let state = link.current_state();
        ctx.log
            .info("Creating directory-level symlink to entire rules folder...");

        let outcome = match link.apply(ctx.ops.as_ref(), ctx.dry_run) {
            Ok(outcome) => outcome,
            Err(e) => {
                ctx.log
                    .warn(&format!("Could not create directory symlink: {e}"));
                ctx.log.warn("Falling back to copy mode...");
                ctx.fall_back_to_copy();
                ctx.report().directory_link = Some(PlacementOutcome::Failed {
                    reason: e.to_string(),
                });
                return Ok(TaskResult::Skipped("fell back to copy mode".to_string()));
            }
        };
        ctx.report().directory_link = Some(outcome.clone());

        match outcome {
            PlacementOutcome::SkippedExisting => {
                let reason = match state {
                    DirLinkState::Link(_) => "rules symlink already exists",
                    DirLinkState::Directory => "rules directory already exists",
                    DirLinkState::File | DirLinkState::Missing => "rules path already exists",
                };
                Ok(TaskResult::Skipped(format!(
                    "{reason}; use --force to replace it"
                )))
            }
            PlacementOutcome::WouldPlace(_) => {
                if state != DirLinkState::Missing {
                    ctx.log.dry_run(&format!(
                        "would remove existing {}",
                        link.link.display()
                    ));
                }
                ctx.log
                    .dry_run(&format!("would link {}", link.description()));
                Ok(TaskResult::DryRun)
            }
            _ => {
                ctx.log.info("Directory symlink created successfully");
                ctx.log.debug(&format!("linked {}", link.description()));
                Ok(TaskResult::Ok)
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::operations::MockLinkOps;
    use crate::resources::LinkType;
    use crate::tasks::test_helpers::{Fixture, make_context_with_ops};
    use std::io;
    use std::sync::Arc;

    #[test]
    fn only_runs_in_directory_mode() {
        let fx = Fixture::new();
        let (ctx, _log, _guard) = fx.context(LinkType::Copy);
        assert!(!LinkRulesDirectory.should_run(&ctx));
        let (ctx, _log, _guard) = fx.context(LinkType::DirSymlink);
        assert!(LinkRulesDirectory.should_run(&ctx));
    }

    #[cfg(unix)]
    #[test]
    fn creates_link_and_records_outcome() {
        let fx = Fixture::new();
        let (ctx, _log, _guard) = fx.context(LinkType::DirSymlink);

        let result = LinkRulesDirectory.run(&ctx).unwrap();

        assert!(matches!(result, TaskResult::Ok));
        assert!(ctx.rules_dir().symlink_metadata().unwrap().is_symlink());
        assert_eq!(
            ctx.report().directory_link,
            Some(PlacementOutcome::Placed(LinkType::DirSymlink))
        );
    }

    #[test]
    fn existing_directory_is_skipped_without_force() {
        let fx = Fixture::new();
        let (ctx, _log, _guard) = fx.context(LinkType::DirSymlink);
        std::fs::create_dir_all(ctx.rules_dir()).unwrap();

        let result = LinkRulesDirectory.run(&ctx).unwrap();

        match result {
            TaskResult::Skipped(reason) => assert!(reason.contains("rules directory already exists")),
            other => panic!("expected skip, got {other:?}"),
        }
        assert!(!ctx.fell_back());
    }

    #[test]
    fn link_failure_switches_to_copy_mode() {
        let fx = Fixture::new();
        let mut ops = MockLinkOps::new();
        ops.expect_canonicalize()
            .returning(|p| Ok(p.to_path_buf()));
        ops.expect_symlink_dir()
            .returning(|_, _| Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied")));
        let (ctx, _log, _guard) =
            make_context_with_ops(fx.plan(LinkType::DirSymlink), Arc::new(ops));

        let result = LinkRulesDirectory.run(&ctx).unwrap();

        assert!(matches!(result, TaskResult::Skipped(_)));
        assert!(ctx.fell_back());
        assert!(!ctx.directory_mode());
        assert!(ctx.report().fell_back_to_copy);
    }
}

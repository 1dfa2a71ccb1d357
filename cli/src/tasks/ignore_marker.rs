use anyhow::Result;

use super::{Context, Task, TaskResult};
use crate::resources::ResourceChange;
use crate::resources::ignore_marker::{IgnoreMarker, MARKER_FILE};

/// Create `.cursorignore` at the target root when absent.
#[derive(Debug)]
pub struct WriteIgnoreMarker;

impl Task for WriteIgnoreMarker {
    fn name(&self) -> &str {
        "Write ignore marker"
    }

    fn should_run(&self, _ctx: &Context) -> bool {
        true
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult> {
        let marker = IgnoreMarker::for_mode(ctx.target_dir(), ctx.rules_linked());

        if !marker.exists() && !ctx.dry_run {
            ctx.log.info(&format!("Creating {MARKER_FILE} file..."));
        }
        let change = marker.apply(ctx.dry_run)?;
        ctx.report().ignore_marker = Some(change);

        Ok(match change {
            ResourceChange::Applied => TaskResult::Ok,
            ResourceChange::AlreadyPresent => {
                TaskResult::Skipped(format!("{MARKER_FILE} already exists"))
            }
            ResourceChange::WouldApply => {
                ctx.log
                    .dry_run(&format!("would create {}", marker.path.display()));
                TaskResult::DryRun
            }
        })
    }
}

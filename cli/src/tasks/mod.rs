//! Named tasks that orchestrate placement resources, run in order.
pub mod context;
pub mod dir_link;
pub mod ignore_marker;
mod processing;
pub mod report;
pub mod rule_sets;

pub use context::Context;
pub use processing::{TaskResult, TaskStats};

use anyhow::Result;

use crate::logging::TaskOutcome;

/// A named, executable task.
pub trait Task: Send + Sync {
    /// Human-readable task name.
    fn name(&self) -> &str;

    /// Whether this task applies to the current run.
    fn should_run(&self, ctx: &Context) -> bool;

    /// Execute the task.
    ///
    /// # Errors
    ///
    /// Returns an error if the task cannot complete, such as when a directory
    /// cannot be created or some files could not be placed.
    fn run(&self, ctx: &Context) -> Result<TaskResult>;
}

/// The complete set of tasks run by an import, in execution order.
///
/// The directory link runs first so that a failed link can switch the rule
/// set import to copies; the ignore marker runs last in both modes.
#[must_use]
pub fn all_import_tasks() -> Vec<Box<dyn Task>> {
    vec![
        Box::new(dir_link::LinkRulesDirectory),
        Box::new(rule_sets::ImportRuleSets),
        Box::new(ignore_marker::WriteIgnoreMarker),
    ]
}

/// Execute a task, recording how it ended.
///
/// A failing task is reported as a warning: the import carries on and the
/// failure only shows up in the summary.
pub fn execute(task: &dyn Task, ctx: &Context) {
    if !task.should_run(ctx) {
        ctx.log
            .debug(&format!("skipping task: {} (not applicable)", task.name()));
        ctx.log.record(task.name(), TaskOutcome::NotApplicable);
        return;
    }

    ctx.log.stage(task.name());

    let outcome = match task.run(ctx) {
        Ok(TaskResult::Ok) => TaskOutcome::Done,
        Ok(TaskResult::Skipped(reason)) => {
            ctx.log.info(&format!("skipped: {reason}"));
            TaskOutcome::Skipped(reason)
        }
        Ok(TaskResult::DryRun) => TaskOutcome::DryRun,
        Err(e) => {
            ctx.log.warn(&format!("{}: {e:#}", task.name()));
            TaskOutcome::Failed(format!("{e:#}"))
        }
    };
    ctx.log.record(task.name(), outcome);
}

use anyhow::Result;

use super::context::Context;

/// Result of a single task execution.
///
/// # Examples
///
/// ```
/// use cursor_rules_cli::tasks::TaskResult;
///
/// let ok = TaskResult::Ok;
/// let skipped = TaskResult::Skipped("rules directory already exists".into());
/// let dry = TaskResult::DryRun;
///
/// assert!(matches!(ok, TaskResult::Ok));
/// assert!(matches!(skipped, TaskResult::Skipped(_)));
/// assert!(matches!(dry, TaskResult::DryRun));
/// ```
#[derive(Debug, Clone)]
pub enum TaskResult {
    /// Task completed successfully.
    Ok,
    /// Task was skipped (conflicting entry, nothing to do).
    Skipped(String),
    /// Task ran in dry-run mode.
    DryRun,
}

/// Counters for batch tasks that place many files.
///
/// Provides consistent summary logging across tasks.
///
/// # Examples
///
/// ```
/// use cursor_rules_cli::tasks::TaskStats;
///
/// let mut stats = TaskStats::new();
/// stats.changed = 3;
/// stats.already_present = 10;
///
/// assert_eq!(stats.summary(false), "3 placed, 10 already present");
/// assert_eq!(stats.summary(true), "3 would place, 10 already present");
/// ```
///
/// When files fail, the summary includes the count:
///
/// ```
/// use cursor_rules_cli::tasks::TaskStats;
///
/// let stats = TaskStats { changed: 1, already_present: 2, failed: 3 };
/// assert_eq!(stats.summary(false), "1 placed, 2 already present, 3 failed");
/// ```
#[derive(Debug, Default)]
pub struct TaskStats {
    /// Number of files placed (or that would be placed).
    pub changed: u32,
    /// Number of files skipped because the destination already existed.
    pub already_present: u32,
    /// Number of files that could not be placed.
    pub failed: u32,
}

impl TaskStats {
    /// Create a new empty stats counter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Format the summary string (e.g. "3 placed, 10 already present, 1 failed").
    #[must_use]
    pub fn summary(&self, dry_run: bool) -> String {
        let verb = if dry_run { "would place" } else { "placed" };
        if self.failed > 0 {
            format!(
                "{} {verb}, {} already present, {} failed",
                self.changed, self.already_present, self.failed
            )
        } else {
            format!("{} {verb}, {} already present", self.changed, self.already_present)
        }
    }

    /// Log the summary and return the appropriate `TaskResult`.
    ///
    /// # Errors
    ///
    /// Returns an error naming the failure count when any file failed, so the
    /// task is recorded as failed in the run summary.
    pub fn finish(self, ctx: &Context) -> Result<TaskResult> {
        ctx.log.info(&self.summary(ctx.dry_run));
        if self.failed > 0 {
            anyhow::bail!("{} file(s) could not be placed", self.failed);
        }
        Ok(if ctx.dry_run {
            TaskResult::DryRun
        } else {
            TaskResult::Ok
        })
    }
}

impl std::ops::AddAssign for TaskStats {
    fn add_assign(&mut self, other: Self) {
        self.changed += other.changed;
        self.already_present += other.already_present;
        self.failed += other.failed;
    }
}

//! The [`Log`] trait, its tracing-backed [`Logger`], and the task summary.
use std::path::PathBuf;
use std::sync::Mutex;

use super::output::{DRY_RUN, STAGE, SUMMARY_FAILED, SUMMARY_OK, SUMMARY_SKIPPED, log_path};

/// How a task ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskOutcome {
    /// Changes were made (or nothing was left to do).
    Done,
    /// The task does not apply to this run, such as the directory link in
    /// file mode. Left out of the console summary.
    NotApplicable,
    /// Existing state was left alone, with the reason.
    Skipped(String),
    /// Dry run; changes were only reported.
    DryRun,
    /// The task hit errors, with the last one.
    Failed(String),
}

impl TaskOutcome {
    /// Reason attached to a skip or failure.
    #[must_use]
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::Skipped(reason) | Self::Failed(reason) => Some(reason),
            Self::Done | Self::NotApplicable | Self::DryRun => None,
        }
    }
}

/// One finished task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRecord {
    /// Task name as shown in the summary.
    pub task: String,
    /// How it ended.
    pub outcome: TaskOutcome,
}

/// Logging surface used by tasks and commands.
///
/// Tests substitute a [`Logger`] bound to a thread-local subscriber.
pub trait Log: Send + Sync {
    /// Section header.
    fn stage(&self, msg: &str);
    /// Progress line.
    fn info(&self, msg: &str);
    /// Detail shown only with `--verbose`; always kept in the log file.
    fn debug(&self, msg: &str);
    /// Recoverable problem or advisory notice.
    fn warn(&self, msg: &str);
    /// Error line, printed to stderr.
    fn error(&self, msg: &str);
    /// Action that a dry run would have taken.
    fn dry_run(&self, msg: &str);
    /// Remember how a task ended for the summary.
    fn record(&self, task: &str, outcome: TaskOutcome);
}

/// Emits [`tracing`] events and collects task records for the summary.
#[derive(Debug)]
pub struct Logger {
    records: Mutex<Vec<TaskRecord>>,
    log_file: Option<PathBuf>,
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger {
    /// Logger whose summary points at the default import log.
    #[must_use]
    pub fn new() -> Self {
        Self::with_log_file(log_path())
    }

    /// Logger whose summary points at `log_file`, or names no file.
    #[must_use]
    pub const fn with_log_file(log_file: Option<PathBuf>) -> Self {
        Self {
            records: Mutex::new(Vec::new()),
            log_file,
        }
    }

    /// Path named in the summary.
    #[must_use]
    pub const fn log_path(&self) -> Option<&PathBuf> {
        self.log_file.as_ref()
    }

    /// Snapshot of recorded tasks in execution order.
    #[must_use]
    pub fn records(&self) -> Vec<TaskRecord> {
        self.records.lock().map_or_else(|_| Vec::new(), |r| r.clone())
    }

    /// Number of tasks that ended in [`TaskOutcome::Failed`].
    #[must_use]
    pub fn failure_count(&self) -> usize {
        self.records.lock().map_or(0, |r| {
            r.iter()
                .filter(|rec| matches!(rec.outcome, TaskOutcome::Failed(_)))
                .count()
        })
    }

    /// Print one line per applicable task and where the log file is.
    pub fn print_summary(&self) {
        let records = self.records();
        let shown: Vec<&TaskRecord> = records
            .iter()
            .filter(|r| r.outcome != TaskOutcome::NotApplicable)
            .collect();
        if shown.is_empty() {
            return;
        }

        self.stage("Summary");
        for record in shown {
            let line = record.outcome.detail().map_or_else(
                || record.task.clone(),
                |detail| format!("{} ({detail})", record.task),
            );
            match record.outcome {
                TaskOutcome::Done | TaskOutcome::DryRun => {
                    tracing::info!(kind = SUMMARY_OK, "✓ {line}");
                }
                TaskOutcome::Skipped(_) => tracing::info!(kind = SUMMARY_SKIPPED, "○ {line}"),
                TaskOutcome::Failed(_) => tracing::info!(kind = SUMMARY_FAILED, "✗ {line}"),
                TaskOutcome::NotApplicable => {}
            }
        }

        if let Some(path) = &self.log_file {
            self.debug(&format!("log: {}", path.display()));
        }
    }

    /// See [`Log::stage`].
    pub fn stage(&self, msg: &str) {
        tracing::info!(kind = STAGE, "{msg}");
    }

    /// See [`Log::info`].
    pub fn info(&self, msg: &str) {
        tracing::info!("{msg}");
    }

    /// See [`Log::debug`].
    pub fn debug(&self, msg: &str) {
        tracing::debug!("{msg}");
    }

    /// See [`Log::warn`].
    pub fn warn(&self, msg: &str) {
        tracing::warn!("{msg}");
    }

    /// See [`Log::error`].
    pub fn error(&self, msg: &str) {
        tracing::error!("{msg}");
    }

    /// See [`Log::dry_run`].
    pub fn dry_run(&self, msg: &str) {
        tracing::info!(kind = DRY_RUN, "{msg}");
    }

    /// See [`Log::record`].
    pub fn record(&self, task: &str, outcome: TaskOutcome) {
        if let Ok(mut records) = self.records.lock() {
            records.push(TaskRecord {
                task: task.to_string(),
                outcome,
            });
        }
    }
}

impl Log for Logger {
    fn stage(&self, msg: &str) {
        Self::stage(self, msg);
    }

    fn info(&self, msg: &str) {
        Self::info(self, msg);
    }

    fn debug(&self, msg: &str) {
        Self::debug(self, msg);
    }

    fn warn(&self, msg: &str) {
        Self::warn(self, msg);
    }

    fn error(&self, msg: &str) {
        Self::error(self, msg);
    }

    fn dry_run(&self, msg: &str) {
        Self::dry_run(self, msg);
    }

    fn record(&self, task: &str, outcome: TaskOutcome) {
        Self::record(self, task, outcome);
    }
}

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::report::ImportReport;
use crate::config::ImportPlan;
use crate::logging::Log;
use crate::operations::{LinkOps, SystemLinkOps};
use crate::resources::PlacementOutcome;

/// Shared context for task execution.
pub struct Context {
    /// Resolved plan for this run.
    pub plan: ImportPlan,
    /// Logger for output and task recording.
    pub log: Arc<dyn Log>,
    /// Whether to perform a dry run (preview changes without applying).
    pub dry_run: bool,
    /// Link and copy operations (injectable for testing).
    pub ops: Arc<dyn LinkOps>,
    /// Set when the directory link could not be created; later tasks then
    /// import per file with copies.
    directory_fallback: AtomicBool,
    report: Mutex<ImportReport>,
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("plan", &self.plan)
            .field("log", &"<dyn Log>")
            .field("dry_run", &self.dry_run)
            .field("ops", &"<dyn LinkOps>")
            .field("directory_fallback", &self.directory_fallback)
            .finish_non_exhaustive()
    }
}

impl Context {
    /// Creates a new context backed by the real filesystem.
    #[must_use]
    pub fn new(plan: ImportPlan, log: Arc<dyn Log>) -> Self {
        Self::with_ops(plan, log, Arc::new(SystemLinkOps))
    }

    /// Creates a new context with custom link operations.
    #[must_use]
    pub fn with_ops(plan: ImportPlan, log: Arc<dyn Log>, ops: Arc<dyn LinkOps>) -> Self {
        Self {
            dry_run: plan.dry_run,
            plan,
            log,
            ops,
            directory_fallback: AtomicBool::new(false),
            report: Mutex::new(ImportReport::default()),
        }
    }

    /// Whether the run is (still) placing one link for the whole directory.
    #[must_use]
    pub fn directory_mode(&self) -> bool {
        self.plan.link_type.is_directory_level() && !self.fell_back()
    }

    /// Whether the directory link failed and the run switched to copies.
    #[must_use]
    pub fn fell_back(&self) -> bool {
        self.directory_fallback.load(Ordering::Relaxed)
    }

    /// Whether `.cursor/rules` is (or in a dry run would be) the directory
    /// link made by this run. A link left in place because something already
    /// occupied the path does not count.
    #[must_use]
    pub fn rules_linked(&self) -> bool {
        self.directory_mode()
            && matches!(
                self.report().directory_link,
                Some(PlacementOutcome::Placed(_) | PlacementOutcome::WouldPlace(_))
            )
    }

    /// Switch the rest of the run to per-file copies.
    pub fn fall_back_to_copy(&self) {
        self.directory_fallback.store(true, Ordering::Relaxed);
        self.report().fell_back_to_copy = true;
    }

    /// Target project directory.
    #[must_use]
    pub fn target_dir(&self) -> &std::path::Path {
        &self.plan.target_dir
    }

    /// `<target>/.cursor/rules`
    #[must_use]
    pub fn rules_dir(&self) -> PathBuf {
        self.plan.rules_dir()
    }

    /// Lock the run report for updating.
    ///
    /// Recovers from a poisoned lock (which can only occur if a previous task
    /// panicked) by consuming the poison.
    pub fn report(&self) -> MutexGuard<'_, ImportReport> {
        self.report.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Consume the context and return the accumulated report.
    #[must_use]
    pub fn into_report(self) -> ImportReport {
        self.report
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

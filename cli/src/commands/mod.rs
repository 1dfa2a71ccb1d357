//! Top-level orchestration of an import run.
pub mod import;

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};

use crate::cli::Cli;
use crate::config::ImportPlan;
use crate::config::selection::RuleSelection;
use crate::config::settings::Settings;
use crate::config::source::resolve_source;
use crate::logging::Logger;
use crate::tasks::{self, Context, Task};

/// Shared state produced by the command setup sequence.
///
/// Encapsulates settings loading and plan resolution so that the command
/// body only deals with target preparation and task execution.
#[derive(Debug)]
pub struct CommandSetup {
    /// Settings file contents (defaults when absent or malformed).
    pub settings: Settings,
    /// Resolved plan for the run.
    pub plan: ImportPlan,
}

impl CommandSetup {
    /// Load settings and merge them with the command line into a plan.
    ///
    /// `candidates` are the fallback source locations probed when neither the
    /// command line nor the settings name a source.
    ///
    /// # Errors
    ///
    /// Returns an error if the source rules directory does not exist or the
    /// target path cannot be made absolute.
    pub fn init(cli: &Cli, log: &Logger, candidates: &[PathBuf]) -> Result<Self> {
        let settings = load_settings(cli.config.as_deref(), log);
        let plan = resolve_plan(cli, &settings, candidates)?;

        log.debug(&format!("source: {}", plan.source_dir.display()));
        log.debug(&format!("target: {}", plan.target_dir.display()));
        log.debug(&format!("link type: {}", plan.link_type));
        log.debug(&format!("rule sets: {}", plan.selection));
        log.debug(&format!("force: {}, dry run: {}", plan.force, plan.dry_run));

        Ok(Self { settings, plan })
    }
}

/// Load the settings file, warning (and using defaults) when it is malformed.
fn load_settings(explicit: Option<&Path>, log: &Logger) -> Settings {
    let Some(path) = explicit.map(Path::to_path_buf).or_else(Settings::default_path) else {
        return Settings::default();
    };
    log.debug(&format!("settings: {}", path.display()));
    Settings::load(&path).unwrap_or_else(|e| {
        log.warn(&format!("{e}; using defaults"));
        Settings::default()
    })
}

/// Merge command-line values over settings over built-in defaults.
///
/// # Errors
///
/// Returns an error if the source rules directory does not exist or the
/// target path cannot be made absolute.
pub fn resolve_plan(cli: &Cli, settings: &Settings, candidates: &[PathBuf]) -> Result<ImportPlan> {
    let source_dir = resolve_source(
        cli.source.as_deref(),
        settings.source.as_deref(),
        candidates,
    )?;

    let target_dir = absolute_target(&cli.target_directory)?;

    let link_type = cli.link_type.or(settings.link_type).unwrap_or_default();
    let selection = cli
        .rules
        .as_deref()
        .or(settings.rules.as_deref())
        .map_or(RuleSelection::All, RuleSelection::parse);

    Ok(ImportPlan {
        source_dir,
        target_dir,
        link_type,
        selection,
        force: cli.force,
        dry_run: cli.dry_run,
    })
}

/// Resolve links for an existing target; otherwise just make it absolute.
fn absolute_target(path: &Path) -> Result<PathBuf> {
    if path.exists() {
        dunce::canonicalize(path).with_context(|| format!("resolving {}", path.display()))
    } else {
        std::path::absolute(path).with_context(|| format!("resolving {}", path.display()))
    }
}

/// Execute every task in order and print the summary.
///
/// Task failures are reported in the summary but do not abort the run.
pub fn run_tasks_to_completion<'a>(
    tasks: impl IntoIterator<Item = &'a dyn Task>,
    ctx: &Context,
    log: &Logger,
) {
    for task in tasks {
        tasks::execute(task, ctx);
    }

    log.print_summary();

    let count = log.failure_count();
    if count > 0 {
        log.warn(&format!(
            "{count} task(s) reported failures; see messages above"
        ));
    }
}

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;

use super::{CommandSetup, run_tasks_to_completion};
use crate::cli::{Cli, VERSION};
use crate::config::ImportPlan;
use crate::config::source::candidate_dirs;
use crate::error::ImportError;
use crate::logging::{Log, Logger};
use crate::operations::{LinkOps, SystemLinkOps};
use crate::resources::LinkType;
use crate::resources::helpers::fs::entry_exists;
use crate::tasks::report::ImportReport;
use crate::tasks::{self, Context};

/// Run an import.
///
/// # Errors
///
/// Returns an error if the source rules directory does not exist or the
/// target directory cannot be prepared. Per-file problems are reported in
/// the log and the returned [`ImportReport`] instead.
pub fn run(cli: &Cli, log: &Arc<Logger>) -> Result<ImportReport> {
    run_with_ops(cli, log, Arc::new(SystemLinkOps), &candidate_dirs())
}

/// Run an import with injected link operations and source candidates.
///
/// # Errors
///
/// See [`run`].
pub fn run_with_ops(
    cli: &Cli,
    log: &Arc<Logger>,
    ops: Arc<dyn LinkOps>,
    candidates: &[PathBuf],
) -> Result<ImportReport> {
    log.debug(&format!("cursor-rules {VERSION}"));

    let setup = CommandSetup::init(cli, log, candidates)?;
    prepare_target(&setup.plan, log)?;

    let ctx = Context::with_ops(
        setup.plan.clone(),
        Arc::clone(log) as Arc<dyn Log>,
        ops,
    );
    let all_tasks = tasks::all_import_tasks();
    run_tasks_to_completion(all_tasks.iter().map(AsRef::as_ref), &ctx, log);

    let report = ctx.into_report();
    print_next_steps(&setup.plan, &report, log);
    Ok(report)
}

/// Create the target and `.cursor` directories, with advisory notices.
///
/// # Errors
///
/// Returns [`ImportError::TargetUnavailable`] if either directory cannot be
/// created.
pub fn prepare_target(plan: &ImportPlan, log: &Logger) -> Result<(), ImportError> {
    let target = &plan.target_dir;
    let cursor_dir = plan.cursor_dir();

    if !target.exists() {
        log.warn(&format!(
            "Target directory doesn't exist. Creating: {}",
            target.display()
        ));
        create_dir(target, plan.dry_run, log)?;
    }

    if entry_exists(&cursor_dir) {
        if !plan.force {
            log.warn(&format!(
                ".cursor directory already exists in {}",
                target.display()
            ));
            log.warn("Will skip existing files. Use --force to overwrite them.");
        }
    } else {
        if !plan.dry_run {
            log.info(&format!("Creating .cursor directory in {}", target.display()));
        }
        create_dir(&cursor_dir, plan.dry_run, log)?;
    }
    Ok(())
}

fn create_dir(path: &std::path::Path, dry_run: bool, log: &Logger) -> Result<(), ImportError> {
    if dry_run {
        log.dry_run(&format!("would create {}", path.display()));
        return Ok(());
    }
    std::fs::create_dir_all(path).map_err(|source| ImportError::TargetUnavailable {
        path: path.to_path_buf(),
        source,
    })
}

/// Print the completion banner and the follow-up hints.
fn print_next_steps(plan: &ImportPlan, report: &ImportReport, log: &Logger) {
    let target = plan.target_dir.display();
    let link_type = report.effective_link_type(plan.link_type);

    log.stage("Next steps");
    if plan.dry_run {
        log.info(&format!("Dry run complete for {target}; nothing was changed"));
    } else {
        log.info(&format!("✅ Cursor rules processing completed for {target}"));
    }

    if link_type.is_directory_level() {
        log.info("Link type: directory symlink");
        log.info("All rule sets included via directory link");
    } else {
        log.info(&format!("Link type: {link_type}"));
        log.info(&format!("Rule sets: {}", plan.selection));
    }
    if !report.missing_rule_sets.is_empty() {
        log.warn(&format!(
            "Rule sets not found: {}",
            report.missing_rule_sets.join(", ")
        ));
    }

    log.info(&format!("1. Navigate to your project: cd {target}"));
    log.info("2. Open the project in Cursor");
    log.info("3. The rules will be automatically applied");

    match link_type {
        LinkType::DirSymlink => log.warn(
            "Note: Directory symlink means ALL changes to source rules will affect this project",
        ),
        LinkType::Symlink | LinkType::Hardlink => log.warn(&format!(
            "Note: Using {link_type} means changes to rules in the source will affect this project"
        )),
        LinkType::Copy => {}
    }
}

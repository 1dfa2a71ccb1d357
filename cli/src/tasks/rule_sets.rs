use anyhow::{Context as _, Result};
use std::path::Path;
use walkdir::WalkDir;

use super::report::FileRecord;
use super::{Context, Task, TaskResult, TaskStats};
use crate::resources::PlacementOutcome;
use crate::resources::file_placement::FilePlacement;
use crate::resources::helpers::fs::{entry_exists, is_real_dir, remove_existing};

/// Mirror every file of the selected rule sets under `.cursor/rules/`.
#[derive(Debug)]
pub struct ImportRuleSets;

impl Task for ImportRuleSets {
    fn name(&self) -> &str {
        "Import rule sets"
    }

    fn should_run(&self, ctx: &Context) -> bool {
        !ctx.directory_mode()
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult> {
        let rules_dir = ctx.rules_dir();

        if entry_exists(&rules_dir) && !is_real_dir(&rules_dir) {
            // Usually a link left by a directory-mode run; writing through it
            // would modify the source rules.
            if !ctx.plan.force {
                return Ok(TaskResult::Skipped(format!(
                    "{} is not a real directory; use --force to replace it",
                    rules_dir.display()
                )));
            }
            if ctx.dry_run {
                ctx.log
                    .dry_run(&format!("would replace {}", rules_dir.display()));
            } else {
                ctx.log
                    .info(&format!("Replacing {} with a directory", rules_dir.display()));
                remove_existing(&rules_dir)?;
            }
        }

        if ctx.dry_run {
            if !is_real_dir(&rules_dir) {
                ctx.log
                    .dry_run(&format!("would create {}", rules_dir.display()));
            }
        } else {
            std::fs::create_dir_all(&rules_dir)
                .with_context(|| format!("create {}", rules_dir.display()))?;
        }

        let names = ctx.plan.selection.resolve(&ctx.plan.source_dir)?;
        ctx.log.debug(&format!(
            "rule sets: {} ({})",
            names.join(", "),
            ctx.plan.selection
        ));

        let mut stats = TaskStats::new();
        for name in &names {
            stats += import_rule_set(ctx, name, &rules_dir);
        }
        stats.finish(ctx)
    }
}

/// Import one rule set, returning its counters. Never fails: problems are
/// logged and counted.
fn import_rule_set(ctx: &Context, name: &str, rules_dir: &Path) -> TaskStats {
    let mut stats = TaskStats::new();
    let source_dir = ctx.plan.source_dir.join(name);

    if !source_dir.is_dir() {
        ctx.log
            .warn(&format!("Rule set '{name}' not found, skipping..."));
        ctx.report().missing_rule_sets.push(name.to_string());
        return stats;
    }

    ctx.log.info(&format!("Importing {name} rules..."));
    ctx.report().imported_rule_sets.push(name.to_string());
    let dest_root = rules_dir.join(name);

    if !ctx.dry_run
        && let Err(e) = std::fs::create_dir_all(&dest_root)
    {
        ctx.log
            .warn(&format!("  Error creating {}: {e}", dest_root.display()));
        stats.failed += 1;
        return stats;
    }

    for entry in WalkDir::new(&source_dir)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                ctx.log.warn(&format!("  Error reading {name}: {e}"));
                stats.failed += 1;
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let Ok(relative) = entry.path().strip_prefix(&source_dir) else {
            continue;
        };

        let placement = FilePlacement::new(
            entry.path().to_path_buf(),
            dest_root.join(relative),
            ctx.plan.link_type,
            ctx.plan.force,
        );
        let outcome = place(ctx, &placement, relative, &mut stats);

        ctx.report().files.push(FileRecord {
            rule_set: name.to_string(),
            relative: relative.to_path_buf(),
            outcome,
        });
    }

    stats
}

fn place(
    ctx: &Context,
    placement: &FilePlacement,
    relative: &Path,
    stats: &mut TaskStats,
) -> PlacementOutcome {
    let rel = relative.display();
    let outcome = match placement.apply(ctx.ops.as_ref(), ctx.dry_run) {
        Ok(outcome) => outcome,
        Err(e) => {
            ctx.log.warn(&format!("  Error processing {rel}: {e}"));
            stats.failed += 1;
            return PlacementOutcome::Failed {
                reason: e.to_string(),
            };
        }
    };

    match &outcome {
        PlacementOutcome::Placed(link_type) => {
            ctx.log.info(&format!("  {}: {rel}", link_type.past_tense()));
            stats.changed += 1;
        }
        PlacementOutcome::FellBack { attempted, reason } => {
            ctx.log.warn(&format!(
                "Could not create {attempted} {}: {reason}",
                placement.dest.display()
            ));
            ctx.log.info(&format!("  Copied (fallback): {rel}"));
            stats.changed += 1;
        }
        PlacementOutcome::SkippedExisting => {
            ctx.log.info(&format!("  Skipped (exists): {rel}"));
            stats.already_present += 1;
        }
        PlacementOutcome::WouldPlace(link_type) => {
            ctx.log
                .dry_run(&format!("would {link_type} {}", placement.description()));
            stats.changed += 1;
        }
        PlacementOutcome::Failed { reason } => {
            ctx.log.warn(&format!("  Error processing {rel}: {reason}"));
            stats.failed += 1;
        }
    }
    outcome
}

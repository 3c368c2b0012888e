//! Check, sync, and fix command implementations
//!
//! These commands compare and synchronize project state against the
//! snapshot store.

use colored::Colorize;
use dialoguer::Confirm;

use integrity_core::{StatusReport, SyncResult, scaffold};

use crate::context::Context;
use crate::error::{CliError, Result};

fn print_report(report: &StatusReport) {
    for warning in &report.warnings {
        println!("   {} {}", "~".yellow(), warning);
    }

    if report.is_valid {
        println!(
            "{} Project is fully synchronized ({} files, last sync: {}).",
            "OK".green().bold(),
            report.total_files,
            report.last_sync
        );
        return;
    }

    println!("{} Out of sync components:", "DRIFT".yellow().bold());
    for line in &report.lines {
        println!("   {} {}", "-".yellow(), line);
    }
    println!(
        "   {} new, {} modified, {} missing ({} files tracked locally, last sync: {})",
        report.new_count, report.modified_count, report.missing_count, report.total_files,
        report.last_sync
    );
}

fn emit(result: &SyncResult, json: bool) {
    let report = StatusReport::from_result(result);
    if json {
        match serde_json::to_string_pretty(&report) {
            Ok(out) => println!("{out}"),
            Err(e) => eprintln!("Failed to serialize report: {e}"),
        }
    } else {
        print_report(&report);
    }
}

/// Run the check command
///
/// Read-only comparison of local state against the snapshot. Exits
/// non-zero when the project is out of sync, for scripting.
pub fn run_check(ctx: &Context, json: bool) -> Result<()> {
    let id = ctx.project_id()?;
    let result = ctx.coordinator().check(id, &ctx.base)?;

    emit(&result, json);

    if result.is_valid {
        Ok(())
    } else {
        Err(CliError::user("Project is out of sync"))
    }
}

/// Run the sync command
///
/// Force-publishes the current local state as the new snapshot.
pub fn run_sync(ctx: &Context) -> Result<()> {
    println!("{} Synchronizing snapshot...", "=>".blue().bold());

    let id = ctx.project_id()?;
    ctx.coordinator().sync(id, &ctx.base)?;

    println!("{} Snapshot synchronized.", "OK".green().bold());
    Ok(())
}

/// Run the fix command
///
/// Optionally scaffolds missing tracked files, then checks and, on
/// confirmation, republishes the snapshot.
pub fn run_fix(ctx: &Context, yes: bool, use_scaffold: bool) -> Result<()> {
    let id = ctx.project_id()?;

    if use_scaffold {
        let actions = scaffold(&ctx.manifest()?, &ctx.base)?;
        for action in &actions {
            println!("   {} {}", "+".green(), action);
        }
    }

    let result = ctx.coordinator().fix(id, &ctx.base, |pending| {
        if yes {
            return true;
        }
        Confirm::new()
            .with_prompt(format!(
                "Update snapshot with {} changes?",
                pending.discrepancies.len()
            ))
            .default(false)
            .interact()
            .unwrap_or(false)
    })?;

    if result.is_valid {
        println!("{} Snapshot is up to date.", "OK".green().bold());
        Ok(())
    } else {
        print_report(&StatusReport::from_result(&result));
        println!("Snapshot left unchanged.");
        Ok(())
    }
}

//! Audit command implementation

use colored::Colorize;

use integrity_core::audit;

use crate::context::Context;
use crate::error::{CliError, Result};

/// Run the audit command
///
/// Offline check of the tracked file structure; the snapshot store is not
/// consulted. Exits non-zero when tracked files are missing.
pub fn run_audit(ctx: &Context, json: bool) -> Result<()> {
    let manifest = ctx.manifest()?;
    let report = audit(&manifest, &ctx.base);

    if json {
        match serde_json::to_string_pretty(&report) {
            Ok(out) => println!("{out}"),
            Err(e) => eprintln!("Failed to serialize report: {e}"),
        }
    } else {
        if !report.errors.is_empty() {
            println!("{} Errors:", "MISSING".red().bold());
            for error in &report.errors {
                println!("   {} {}", "!".red(), error);
            }
        }
        if !report.warnings.is_empty() {
            println!("{} Warnings:", "WARN".yellow().bold());
            for warning in &report.warnings {
                println!("   {} {}", "~".yellow(), warning);
            }
        }
        if report.is_clean() {
            println!(
                "{} All {} tracked files present and non-empty.",
                "OK".green().bold(),
                report.checked
            );
        } else {
            println!(
                "Checked {} tracked files: {} errors, {} warnings.",
                report.checked,
                report.errors.len(),
                report.warnings.len()
            );
        }
    }

    if report.errors.is_empty() {
        Ok(())
    } else {
        Err(CliError::user("Tracked files are missing"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;
    use clap::Parser;
    use integrity_core::Manifest;

    fn context_for(dir: &std::path::Path) -> Context {
        let cli = Cli::parse_from(["integrity", "-C", dir.to_str().unwrap(), "audit"]);
        Context::new(&cli).unwrap()
    }

    #[test]
    fn audit_of_empty_project_fails() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context_for(dir.path());
        assert!(run_audit(&ctx, false).is_err());
    }

    #[test]
    fn audit_of_complete_project_passes() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context_for(dir.path());

        for tracked in Manifest::builtin().files() {
            let path = tracked.path.to_absolute(dir.path());
            std::fs::create_dir_all(path.parent().unwrap()).unwrap();
            std::fs::write(path, "content").unwrap();
        }

        assert!(run_audit(&ctx, false).is_ok());
        assert!(run_audit(&ctx, true).is_ok());
    }
}

//! Integrity Manager CLI
//!
//! Front-end over the integrity-core engine: registration, drift checks,
//! and snapshot synchronization.

mod cli;
mod commands;
mod context;
mod error;

use clap::Parser;
use colored::Colorize;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use cli::{Cli, Commands};
use context::Context;
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .with_target(true)
            .finish();
        tracing::subscriber::set_global_default(subscriber)
            .expect("Failed to set tracing subscriber");
        tracing::debug!("Verbose mode enabled");
    }

    let ctx = Context::new(&cli)?;

    match cli.command {
        Commands::Register => commands::run_register(&ctx),
        Commands::Check { json } => commands::run_check(&ctx, json),
        Commands::Sync => commands::run_sync(&ctx),
        Commands::Fix { yes, scaffold } => commands::run_fix(&ctx, yes, scaffold),
        Commands::Audit { json } => commands::run_audit(&ctx, json),
    }
}

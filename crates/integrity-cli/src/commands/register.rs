//! Register command implementation

use colored::Colorize;

use integrity_core::Registrar;

use crate::context::Context;
use crate::error::Result;

/// Run the register command
///
/// Mints a project identity, writes `.integrity/project.toml`, and
/// publishes the initial snapshot.
pub fn run_register(ctx: &Context) -> Result<()> {
    println!("{} Registering project...", "=>".blue().bold());

    let registrar = Registrar::new(ctx.store.clone());
    let id = registrar.register(&ctx.base)?;

    println!(
        "{} Registered project {} and published initial snapshot.",
        "OK".green().bold(),
        id.to_string().cyan()
    );
    Ok(())
}

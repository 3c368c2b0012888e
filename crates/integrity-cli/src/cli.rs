//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Integrity Manager - Track and synchronize project file integrity
#[derive(Parser, Debug)]
#[command(name = "integrity")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Project base directory
    #[arg(short = 'C', long, global = true, default_value = ".")]
    pub project: PathBuf,

    /// Snapshot store database path (relative paths resolve under the
    /// project directory)
    #[arg(
        long,
        global = true,
        env = "INTEGRITY_STORE",
        default_value = ".integrity/snapshots.db"
    )]
    pub store: PathBuf,

    /// The command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Register the project: mint an identity and publish the first snapshot
    Register,

    /// Compare local file state against the recorded snapshot
    Check {
        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Publish the current local state as the new snapshot
    Sync,

    /// Check and, on confirmation, republish to repair drift
    Fix {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,

        /// Also create missing tracked files with placeholder content
        /// before syncing
        #[arg(long)]
        scaffold: bool,
    },

    /// Audit the tracked file structure on disk, without the store
    Audit {
        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },
}

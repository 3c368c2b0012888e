//! Execution context shared by all commands

use std::path::PathBuf;
use std::sync::Arc;

use integrity_core::{Manifest, ProjectId, SyncCoordinator, load_project_id};
use integrity_store::{SqliteStore, StoreConfig};

use crate::cli::Cli;
use crate::error::Result;

/// Resolved project directory, store handle, and coordinator.
pub struct Context {
    pub base: PathBuf,
    pub store: Arc<SqliteStore>,
}

impl Context {
    /// Build the context from parsed arguments: resolve the project base,
    /// open the snapshot store, initialize its schema.
    pub fn new(cli: &Cli) -> Result<Self> {
        let base = cli.project.clone();
        let store_path = if cli.store.is_absolute() {
            cli.store.clone()
        } else {
            base.join(&cli.store)
        };

        if let Some(parent) = store_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let store = Arc::new(SqliteStore::open(&store_path, StoreConfig::default())?);

        Ok(Self { base, store })
    }

    pub fn coordinator(&self) -> SyncCoordinator {
        SyncCoordinator::new(self.store.clone())
    }

    /// The registered identity of this project.
    pub fn project_id(&self) -> Result<ProjectId> {
        Ok(load_project_id(&self.base)?)
    }

    pub fn manifest(&self) -> Result<Manifest> {
        Ok(Manifest::load_or_builtin(&self.base)?)
    }
}

//! Project registration
//!
//! Explicit bootstrap over an initialized store handle. Registration mints
//! a project identity, records it in `.integrity/project.toml`, and
//! publishes the initial snapshot. There is no process-wide registration
//! state; every handle is constructed and passed in by the caller.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::identity::ProjectId;
use crate::manifest::CONFIG_DIR;
use crate::store::SnapshotStore;
use crate::sync::SyncCoordinator;

/// Project config file name under [`CONFIG_DIR`]
pub const PROJECT_FILE: &str = "project.toml";

#[derive(Debug, Serialize, Deserialize)]
struct ProjectConfig {
    project_id: ProjectId,
}

fn project_config_path(base: &Path) -> PathBuf {
    base.join(CONFIG_DIR).join(PROJECT_FILE)
}

/// Read the registered identity of a project.
///
/// # Errors
///
/// [`Error::ProjectConfigMissing`] when the project was never registered;
/// [`Error::InvalidIdentity`] (via parse) or TOML errors when the config is
/// malformed.
pub fn load_project_id(base: &Path) -> Result<ProjectId> {
    let path = project_config_path(base);
    if !path.exists() {
        return Err(Error::ProjectConfigMissing { path });
    }

    let content = fs::read_to_string(&path)?;
    let config: ProjectConfig = toml::from_str(&content)?;
    Ok(config.project_id)
}

/// Registers projects against a snapshot store.
pub struct Registrar {
    coordinator: SyncCoordinator,
}

impl Registrar {
    pub fn new(store: Arc<dyn SnapshotStore>) -> Self {
        Self {
            coordinator: SyncCoordinator::new(store),
        }
    }

    /// Register the project at `base`: mint an identity, write the project
    /// config, publish the initial snapshot.
    ///
    /// # Errors
    ///
    /// [`Error::AlreadyRegistered`] when a project config already exists;
    /// store failures propagate from the initial publish.
    pub fn register(&self, base: &Path) -> Result<ProjectId> {
        let path = project_config_path(base);
        if path.exists() {
            return Err(Error::AlreadyRegistered { path });
        }

        let id = ProjectId::generate();
        let content = toml::to_string_pretty(&ProjectConfig { project_id: id })?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, content)?;
        tracing::debug!(%id, ?path, "Registered project");

        self.coordinator.sync(id, base)?;
        Ok(id)
    }
}

//! Error types for integrity-core

use std::path::PathBuf;

use crate::store::StoreError;

/// Result type for integrity-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in integrity-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Identity string is not a valid project UUID
    #[error("Invalid project identity: {value}")]
    InvalidIdentity { value: String },

    /// Project config file not found under the base directory
    #[error("Project config not found at {path} (run register first)")]
    ProjectConfigMissing { path: PathBuf },

    /// Project is already registered
    #[error("Project already registered at {path}")]
    AlreadyRegistered { path: PathBuf },

    /// Tracked-file manifest is malformed
    #[error("Invalid manifest at {path}: {message}")]
    ManifestInvalid { path: PathBuf, message: String },

    /// Remote snapshot store failure, fatal to the current call
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Filesystem error from integrity-fs
    #[error(transparent)]
    Fs(#[from] integrity_fs::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// TOML deserialization error
    #[error(transparent)]
    TomlDe(#[from] toml::de::Error),

    /// TOML serialization error
    #[error(transparent)]
    TomlSer(#[from] toml::ser::Error),
}

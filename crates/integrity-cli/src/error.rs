//! Error types for integrity-cli

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from integrity-core
    #[error(transparent)]
    Core(#[from] integrity_core::Error),

    /// Error from a snapshot store adapter
    #[error(transparent)]
    Store(#[from] integrity_core::StoreError),

    /// Error from integrity-fs
    #[error(transparent)]
    Fs(#[from] integrity_fs::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Interactive prompt error
    #[error("Interactive prompt error: {0}")]
    Dialoguer(#[from] dialoguer::Error),

    /// User-facing error with a message
    #[error("{message}")]
    User { message: String },
}

impl CliError {
    /// Create a new user error with the given message
    pub fn user(message: impl Into<String>) -> Self {
        Self::User {
            message: message.into(),
        }
    }
}

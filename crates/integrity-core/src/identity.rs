//! Project identity
//!
//! Every tracked project is keyed by a stable UUID. Identity strings arrive
//! from config files and command lines, so parsing is validated here, before
//! any store call is attempted.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Error, Result};

/// Stable unique identifier of a tracked project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectId(Uuid);

impl ProjectId {
    /// Mint a fresh identity for a newly registered project.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse an identity string.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidIdentity`] when the string is not a UUID.
    pub fn parse(value: &str) -> Result<Self> {
        Uuid::parse_str(value.trim())
            .map(Self)
            .map_err(|_| Error::InvalidIdentity {
                value: value.to_string(),
            })
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for ProjectId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_valid_uuid() {
        let id = ProjectId::parse("67e55044-10b1-426f-9247-bb680e5fe0c8").unwrap();
        assert_eq!(id.to_string(), "67e55044-10b1-426f-9247-bb680e5fe0c8");
    }

    #[test]
    fn trims_whitespace() {
        assert!(ProjectId::parse("  67e55044-10b1-426f-9247-bb680e5fe0c8\n").is_ok());
    }

    #[test]
    fn rejects_malformed() {
        let err = ProjectId::parse("not-a-uuid").unwrap_err();
        assert!(matches!(err, Error::InvalidIdentity { .. }));
    }

    #[test]
    fn generated_ids_are_unique() {
        assert_ne!(ProjectId::generate(), ProjectId::generate());
    }
}

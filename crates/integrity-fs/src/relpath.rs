//! Canonical relative paths for tracked files
//!
//! Snapshot entries are keyed by relative path, so every path that enters
//! the engine is normalized once, here, to a forward-slash relative form.
//! Two spellings of the same tracked file must compare equal or diffing
//! reports phantom discrepancies.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A validated, normalized relative path.
///
/// Invariants:
/// - forward slashes only, no empty or `.` components
/// - never absolute, never contains `..`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RelPath {
    inner: String,
}

impl RelPath {
    /// Normalize and validate a relative path.
    ///
    /// Backslashes become forward slashes, duplicate slashes collapse,
    /// `.` components are dropped.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPath`] for empty paths, absolute paths, and
    /// paths containing `..` (a tracked path must stay under the base
    /// directory).
    pub fn new(path: impl AsRef<str>) -> Result<Self> {
        let raw = path.as_ref();
        let slashed = raw.replace('\\', "/");

        if slashed.starts_with('/') {
            return Err(Error::invalid_path(raw, "absolute paths are not tracked"));
        }

        let mut components = Vec::new();
        for part in slashed.split('/') {
            match part {
                "" | "." => continue,
                ".." => {
                    return Err(Error::invalid_path(raw, "parent traversal is not allowed"));
                }
                other => components.push(other),
            }
        }

        if components.is_empty() {
            return Err(Error::invalid_path(raw, "path has no components"));
        }

        Ok(Self {
            inner: components.join("/"),
        })
    }

    /// The normalized string form, suitable as a snapshot key.
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Resolve this path under a base directory for I/O.
    pub fn to_absolute(&self, base: &Path) -> PathBuf {
        let mut out = base.to_path_buf();
        for part in self.inner.split('/') {
            out.push(part);
        }
        out
    }
}

impl fmt::Display for RelPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.inner)
    }
}

impl TryFrom<String> for RelPath {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl From<RelPath> for String {
    fn from(value: RelPath) -> Self {
        value.inner
    }
}

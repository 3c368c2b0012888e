//! Snapshot diffing
//!
//! Pure comparison of a freshly computed local hash index against the last
//! recorded snapshot. No I/O, no side effects; the primary target for
//! property testing.

use std::fmt;

use serde::{Deserialize, Serialize};

use integrity_fs::RelPath;

use crate::scan::HashIndex;

/// A classified difference between local state and the snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "path", rename_all = "lowercase")]
pub enum Discrepancy {
    /// Present locally, absent from the snapshot.
    New(RelPath),
    /// Present in both with differing digests.
    Modified(RelPath),
    /// Recorded in the snapshot, absent locally.
    Missing(RelPath),
}

impl Discrepancy {
    pub fn path(&self) -> &RelPath {
        match self {
            Self::New(p) | Self::Modified(p) | Self::Missing(p) => p,
        }
    }
}

impl fmt::Display for Discrepancy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::New(p) => write!(f, "New file: {}", p),
            Self::Modified(p) => write!(f, "Modified: {}", p),
            Self::Missing(p) => write!(f, "Missing: {}", p),
        }
    }
}

/// Classify every difference between `local` and `remote`.
///
/// New and Modified entries come first in sorted local-path order, then
/// Missing entries in sorted remote-path order. A path equal in both maps
/// is not reported; no path is classified twice.
pub fn diff(local: &HashIndex, remote: &HashIndex) -> Vec<Discrepancy> {
    let mut out = Vec::new();

    for (path, digest) in local {
        match remote.get(path) {
            None => out.push(Discrepancy::New(path.clone())),
            Some(recorded) if recorded != digest => {
                out.push(Discrepancy::Modified(path.clone()));
            }
            Some(_) => {}
        }
    }

    for path in remote.keys() {
        if !local.contains_key(path) {
            out.push(Discrepancy::Missing(path.clone()));
        }
    }

    out
}

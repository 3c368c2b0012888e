//! Local hash scan
//!
//! Builds the transient local hash index: the digest of every tracked file
//! that exists on disk right now. Recomputed on every check or sync call,
//! never persisted by this crate.

use std::collections::BTreeMap;
use std::path::Path;

use integrity_fs::{RelPath, hash_file};

use crate::manifest::Manifest;

/// Mapping from tracked relative path to content digest.
///
/// A `BTreeMap` so iteration is always in sorted path order, which keeps
/// diff output and publish order deterministic.
pub type HashIndex = BTreeMap<RelPath, String>;

/// Result of a local scan.
#[derive(Debug, Clone, Default)]
pub struct ScanOutcome {
    /// Digests of the tracked files present and readable on disk.
    pub hashes: HashIndex,
    /// One entry per tracked file that exists but could not be read.
    pub warnings: Vec<String>,
}

/// Hash every tracked file present under `base`.
///
/// Files absent from disk are omitted entirely. Files that exist but fail
/// to read mid-hash degrade to a warning and are likewise omitted — a
/// single unreadable file must not abort a whole check.
pub fn scan_tracked(manifest: &Manifest, base: &Path) -> ScanOutcome {
    let mut outcome = ScanOutcome::default();

    for file in manifest.resolve_present(base) {
        match hash_file(&file.abs) {
            Ok(digest) => {
                outcome.hashes.insert(file.rel, digest);
            }
            Err(e) => {
                tracing::warn!(path = %file.rel, error = %e, "Skipping unreadable tracked file");
                outcome
                    .warnings
                    .push(format!("Unreadable tracked file {}: {}", file.rel, e));
            }
        }
    }

    outcome
}

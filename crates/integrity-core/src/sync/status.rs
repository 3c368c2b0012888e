//! Sync status types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::diff::Discrepancy;

/// Outcome of a check (or post-fix re-check) for one identity.
///
/// Transient; recomputed on every call and never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncResult {
    /// True iff `discrepancies` is empty.
    pub is_valid: bool,
    /// Classified differences, New/Modified first, then Missing.
    pub discrepancies: Vec<Discrepancy>,
    /// Number of tracked files hashed locally.
    pub total_files: usize,
    /// Last successful sync marker, if any.
    pub last_sync: Option<DateTime<Utc>>,
    /// Tracked files that exist but could not be read this pass.
    pub warnings: Vec<String>,
}

impl SyncResult {
    pub fn new(
        discrepancies: Vec<Discrepancy>,
        total_files: usize,
        last_sync: Option<DateTime<Utc>>,
        warnings: Vec<String>,
    ) -> Self {
        Self {
            is_valid: discrepancies.is_empty(),
            discrepancies,
            total_files,
            last_sync,
            warnings,
        }
    }
}

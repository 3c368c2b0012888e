//! Presentation-agnostic status reporting
//!
//! Pure assembly of a [`SyncResult`] into a structured record the CLI (or
//! any other front-end) can render. No I/O here.

use serde::{Deserialize, Serialize};

use crate::diff::Discrepancy;
use crate::sync::SyncResult;

/// Display value used when an identity has never been synced.
pub const NEVER_SYNCED: &str = "never";

/// Structured, render-ready view of a [`SyncResult`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusReport {
    pub is_valid: bool,
    pub total_files: usize,
    pub new_count: usize,
    pub modified_count: usize,
    pub missing_count: usize,
    /// Last sync timestamp rendered for display, [`NEVER_SYNCED`] if absent.
    pub last_sync: String,
    /// One human-readable line per discrepancy, in diff order.
    pub lines: Vec<String>,
    pub warnings: Vec<String>,
}

impl StatusReport {
    /// Build the report for a sync result.
    pub fn from_result(result: &SyncResult) -> Self {
        let mut new_count = 0;
        let mut modified_count = 0;
        let mut missing_count = 0;
        for discrepancy in &result.discrepancies {
            match discrepancy {
                Discrepancy::New(_) => new_count += 1,
                Discrepancy::Modified(_) => modified_count += 1,
                Discrepancy::Missing(_) => missing_count += 1,
            }
        }

        Self {
            is_valid: result.is_valid,
            total_files: result.total_files,
            new_count,
            modified_count,
            missing_count,
            last_sync: result
                .last_sync
                .map(|ts| ts.format("%Y-%m-%d %H:%M:%S UTC").to_string())
                .unwrap_or_else(|| NEVER_SYNCED.to_string()),
            lines: result.discrepancies.iter().map(|d| d.to_string()).collect(),
            warnings: result.warnings.clone(),
        }
    }
}

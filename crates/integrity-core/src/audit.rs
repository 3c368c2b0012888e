//! Offline structure audit
//!
//! Checks the tracked set against disk only, with no store involved:
//! a missing tracked file is an error, an empty one a warning. This is the
//! no-database complement to a snapshot check, usable before a project is
//! ever registered.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::manifest::Manifest;

/// Result of a structure audit.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuditReport {
    /// Tracked files absent from disk.
    pub errors: Vec<String>,
    /// Tracked files present but empty or unreadable.
    pub warnings: Vec<String>,
    /// Number of tracked files examined.
    pub checked: usize,
}

impl AuditReport {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }
}

/// Audit the tracked set under `base`.
pub fn audit(manifest: &Manifest, base: &Path) -> AuditReport {
    let mut report = AuditReport::default();

    for tracked in manifest.files() {
        report.checked += 1;
        let abs = tracked.path.to_absolute(base);

        match fs::metadata(&abs) {
            Ok(meta) if meta.len() == 0 => {
                report.warnings.push(format!("Empty file: {}", tracked.path));
            }
            Ok(_) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {
                report.errors.push(format!("Missing file: {}", tracked.path));
            }
            Err(e) => {
                report
                    .warnings
                    .push(format!("Unreadable file {}: {}", tracked.path, e));
            }
        }
    }

    report
}

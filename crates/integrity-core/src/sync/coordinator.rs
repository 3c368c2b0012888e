//! Sync coordination
//!
//! Orchestrates hashing, snapshot retrieval, diffing, and the two-step
//! publish of a new snapshot. Owns the consistency contract:
//!
//! - publish order is clear, insert, sync marker, acknowledged in that
//!   order against a single store handle;
//! - at most one in-flight `sync` per identity (process-local per-identity
//!   mutex); `check` runs freely concurrent since it is read-only;
//! - store failures are fatal to the current call, with no internal retry.
//!
//! A crash between clear and insert leaves an empty snapshot. That is
//! deliberate: the next `check` reports every local file as new and a
//! re-run of `sync` converges the snapshot, so recovery is a retry, not a
//! rollback.

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex, PoisonError};

use chrono::Utc;

use crate::diff::diff;
use crate::error::Result;
use crate::identity::ProjectId;
use crate::manifest::Manifest;
use crate::scan::scan_tracked;
use crate::store::SnapshotStore;

use super::status::SyncResult;

/// Coordinates check, sync, and fix for tracked projects.
pub struct SyncCoordinator {
    store: Arc<dyn SnapshotStore>,
    sync_locks: Mutex<HashMap<ProjectId, Arc<Mutex<()>>>>,
}

impl SyncCoordinator {
    /// Create a coordinator over an already initialized store handle.
    pub fn new(store: Arc<dyn SnapshotStore>) -> Self {
        Self {
            store,
            sync_locks: Mutex::new(HashMap::new()),
        }
    }

    /// Compare current local state against the recorded snapshot.
    ///
    /// Read-only and safe to call concurrently. Unreadable tracked files
    /// degrade to warnings on the result; only store failures abort.
    pub fn check(&self, identity: ProjectId, base: &Path) -> Result<SyncResult> {
        let manifest = Manifest::load_or_builtin(base)?;
        let scan = scan_tracked(&manifest, base);
        tracing::debug!(
            %identity,
            hashed = scan.hashes.len(),
            degraded = scan.warnings.len(),
            "Local scan complete"
        );

        let snapshot = self.store.fetch(identity)?.unwrap_or_default();
        let discrepancies = diff(&scan.hashes, &snapshot.entries);

        Ok(SyncResult::new(
            discrepancies,
            scan.hashes.len(),
            snapshot.last_sync,
            scan.warnings,
        ))
    }

    /// Recompute the local hash index and publish it as the new snapshot.
    ///
    /// Any previously computed diff is ignored; the publish always reflects
    /// disk state at call time. Not crash-atomic: a failure can leave the
    /// snapshot cleared or partially inserted, and re-running `sync` is the
    /// recovery path.
    pub fn sync(&self, identity: ProjectId, base: &Path) -> Result<()> {
        let lock = self.sync_lock_for(identity);
        let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);

        let manifest = Manifest::load_or_builtin(base)?;
        let scan = scan_tracked(&manifest, base);
        for warning in &scan.warnings {
            tracing::warn!(%identity, "{warning}");
        }

        let timestamp = Utc::now();
        tracing::debug!(%identity, entries = scan.hashes.len(), "Publishing snapshot");
        self.store.replace(identity, &scan.hashes, timestamp)?;
        self.store.record_sync(identity, timestamp)?;

        Ok(())
    }

    /// Check, then repair on confirmation.
    ///
    /// When discrepancies exist, the injected `confirm` callback decides
    /// whether to publish; the engine itself never performs interactive
    /// I/O. On acceptance the post-sync state is re-checked and returned,
    /// otherwise the original check result is returned unchanged.
    pub fn fix(
        &self,
        identity: ProjectId,
        base: &Path,
        confirm: impl FnOnce(&SyncResult) -> bool,
    ) -> Result<SyncResult> {
        let result = self.check(identity, base)?;
        if result.is_valid {
            return Ok(result);
        }

        if !confirm(&result) {
            tracing::debug!(%identity, "Fix declined");
            return Ok(result);
        }

        self.sync(identity, base)?;
        self.check(identity, base)
    }

    fn sync_lock_for(&self, identity: ProjectId) -> Arc<Mutex<()>> {
        let mut locks = self
            .sync_locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        locks.entry(identity).or_default().clone()
    }
}

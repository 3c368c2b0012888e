//! In-memory snapshot store
//!
//! Reference adapter for unit and integration tests. Supports one-shot
//! fault injection so partial-publish and outage scenarios can be driven
//! deterministically.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};

use crate::identity::ProjectId;
use crate::scan::HashIndex;

use super::{Snapshot, SnapshotStore, StoreError};

#[derive(Debug, Default)]
struct Inner {
    snapshots: HashMap<ProjectId, Snapshot>,
    fail_next_fetch: bool,
    // Simulates a crash between the clear and insert steps of replace.
    fail_replace_after_clear: bool,
    fail_next_record: bool,
}

/// Thread-safe in-memory [`SnapshotStore`].
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Make the next `fetch` fail with [`StoreError::Unavailable`].
    pub fn fail_next_fetch(&self) {
        self.lock().fail_next_fetch = true;
    }

    /// Make the next `replace` apply its clear step and then fail before
    /// inserting, leaving the snapshot empty.
    pub fn fail_replace_after_clear(&self) {
        self.lock().fail_replace_after_clear = true;
    }

    /// Make the next `record_sync` fail.
    pub fn fail_next_record(&self) {
        self.lock().fail_next_record = true;
    }

    /// Direct view of the stored snapshot, for assertions.
    pub fn snapshot_of(&self, identity: ProjectId) -> Option<Snapshot> {
        self.lock().snapshots.get(&identity).cloned()
    }
}

impl SnapshotStore for MemoryStore {
    fn fetch(&self, identity: ProjectId) -> Result<Option<Snapshot>, StoreError> {
        let mut inner = self.lock();
        if std::mem::take(&mut inner.fail_next_fetch) {
            return Err(StoreError::unavailable("injected fetch failure"));
        }
        Ok(inner.snapshots.get(&identity).cloned())
    }

    fn replace(
        &self,
        identity: ProjectId,
        entries: &HashIndex,
        _timestamp: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        let mut inner = self.lock();

        // Step (a): clear, preserving any existing sync marker.
        let snapshot = inner.snapshots.entry(identity).or_default();
        snapshot.entries.clear();

        if std::mem::take(&mut inner.fail_replace_after_clear) {
            return Err(StoreError::unavailable("injected failure after clear"));
        }

        // Step (b): insert.
        let snapshot = inner.snapshots.entry(identity).or_default();
        snapshot.entries = entries.clone();
        Ok(())
    }

    fn record_sync(&self, identity: ProjectId, timestamp: DateTime<Utc>) -> Result<(), StoreError> {
        let mut inner = self.lock();
        if std::mem::take(&mut inner.fail_next_record) {
            return Err(StoreError::unavailable("injected record failure"));
        }
        inner.snapshots.entry(identity).or_default().last_sync = Some(timestamp);
        Ok(())
    }
}

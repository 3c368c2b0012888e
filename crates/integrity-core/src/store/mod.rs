//! Snapshot store contract
//!
//! The remote store holds, per project identity, the last recorded
//! path-to-digest mapping and sync timestamp. The engine only requires the
//! three operations below; any durable keyed store with per-entry
//! read/write semantics can back them.
//!
//! The contract deliberately does NOT promise cross-entry atomicity for
//! [`SnapshotStore::replace`]: readers may observe a partially applied
//! replacement. The coordinator tolerates that by re-running sync rather
//! than attempting rollback.

mod memory;

pub use memory::MemoryStore;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::identity::ProjectId;
use crate::scan::HashIndex;

/// Read/write acknowledgment policy a store adapter should apply.
///
/// Single-node adapters record the level and apply their native semantics;
/// replicated adapters are expected to honor it per call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsistencyLevel {
    One,
    #[default]
    Quorum,
    All,
}

/// The last durably recorded integrity state for one identity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Full path-to-digest mapping written by the most recent publish.
    pub entries: HashIndex,
    /// When the last successful sync marker was written, if ever.
    pub last_sync: Option<DateTime<Utc>>,
}

/// Store failures, fatal to the call that hit them.
///
/// The engine never retries internally; retry policy belongs to the caller.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Snapshot store unavailable: {message}")]
    Unavailable { message: String },

    #[error("Snapshot store timed out during {operation}")]
    Timeout { operation: String },

    #[error("Snapshot store rejected write: {message}")]
    WriteRejected { message: String },
}

impl StoreError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    pub fn timeout(operation: impl Into<String>) -> Self {
        Self::Timeout {
            operation: operation.into(),
        }
    }

    pub fn write_rejected(message: impl Into<String>) -> Self {
        Self::WriteRejected {
            message: message.into(),
        }
    }
}

/// Keyed store holding one snapshot per project identity.
pub trait SnapshotStore: Send + Sync {
    /// Point-in-time read of the recorded snapshot, `None` when the
    /// identity has never been published.
    fn fetch(&self, identity: ProjectId) -> Result<Option<Snapshot>, StoreError>;

    /// Full replacement of all entries for an identity: clear previously
    /// recorded entries, then insert the new ones stamped with `timestamp`.
    ///
    /// Only per-entry consistency is promised. A failure may leave the
    /// clear applied and the insert absent or partial; the caller recovers
    /// by re-running the replacement.
    fn replace(
        &self,
        identity: ProjectId,
        entries: &HashIndex,
        timestamp: DateTime<Utc>,
    ) -> Result<(), StoreError>;

    /// Idempotent write of the last-sync marker, valid even when the
    /// preceding `replace` was only partially applied.
    fn record_sync(&self, identity: ProjectId, timestamp: DateTime<Utc>) -> Result<(), StoreError>;
}

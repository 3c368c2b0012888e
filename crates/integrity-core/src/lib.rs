//! Core synchronization engine for the integrity manager
//!
//! Computes content fingerprints for a closed set of tracked project files,
//! compares them against the snapshot recorded in a keyed store, classifies
//! the differences, and republishes a new snapshot under explicit
//! consistency and idempotence guarantees.
//!
//! # Architecture
//!
//! ```text
//!                 CLI / API
//!                     |
//!              integrity-core
//!               /           \
//!       integrity-fs   SnapshotStore adapters
//! ```
//!
//! The manifest resolver and scanner build the local hash index, the diff
//! engine classifies it against the fetched snapshot, and the coordinator
//! owns the publish path and its ordering guarantees. All remote state
//! flows through the [`store::SnapshotStore`] trait.

pub mod audit;
pub mod diff;
pub mod error;
pub mod identity;
pub mod manifest;
pub mod registrar;
pub mod report;
pub mod scaffold;
pub mod scan;
pub mod store;
pub mod sync;

pub use audit::{AuditReport, audit};
pub use diff::{Discrepancy, diff};
pub use error::{Error, Result};
pub use identity::ProjectId;
pub use manifest::{FileCategory, Manifest, ResolvedFile, TrackedFile};
pub use registrar::{Registrar, load_project_id};
pub use report::{NEVER_SYNCED, StatusReport};
pub use scaffold::scaffold;
pub use scan::{HashIndex, ScanOutcome, scan_tracked};
pub use store::{ConsistencyLevel, MemoryStore, Snapshot, SnapshotStore, StoreError};
pub use sync::{SyncCoordinator, SyncResult};

//! Durable snapshot store adapters
//!
//! Implements the integrity-core [`SnapshotStore`] contract over SQLite.
//! Any keyed store with per-entry read/write semantics can satisfy the
//! contract; this crate is the single-host reference adapter.
//!
//! [`SnapshotStore`]: integrity_core::store::SnapshotStore

pub mod sqlite;

pub use sqlite::{SqliteStore, StoreConfig};

//! SQLite snapshot store
//!
//! Durable [`SnapshotStore`] adapter for single-host deployments and
//! integration tests. Entries are one row per tracked path, so the adapter
//! naturally offers the per-entry semantics of the store contract: the
//! clear and insert phases of `replace` run as separate statements, and a
//! reader between them observes the cleared state.

use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use chrono::{DateTime, Utc};
use rusqlite::{Connection, params};

use integrity_core::store::{ConsistencyLevel, Snapshot, SnapshotStore, StoreError};
use integrity_core::{HashIndex, ProjectId};
use integrity_fs::RelPath;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS snapshot_entries (
    identity    TEXT NOT NULL,
    path        TEXT NOT NULL,
    digest      TEXT NOT NULL,
    recorded_at TEXT NOT NULL,
    PRIMARY KEY (identity, path)
);
CREATE TABLE IF NOT EXISTS sync_marker (
    identity  TEXT PRIMARY KEY,
    last_sync TEXT NOT NULL
);
";

/// Adapter configuration.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Requested acknowledgment policy. SQLite is single-node, so the
    /// level is recorded for parity with replicated adapters and the
    /// native durability semantics apply.
    pub consistency: ConsistencyLevel,
    /// Upper bound on waiting for a locked database; hitting it surfaces
    /// as [`StoreError::Timeout`].
    pub busy_timeout: Duration,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            consistency: ConsistencyLevel::default(),
            busy_timeout: Duration::from_secs(5),
        }
    }
}

/// SQLite-backed [`SnapshotStore`].
pub struct SqliteStore {
    conn: Mutex<Connection>,
    config: StoreConfig,
}

impl SqliteStore {
    /// Open (or create) the store at `path` and initialize its schema.
    pub fn open(path: &Path, config: StoreConfig) -> Result<Self, StoreError> {
        let conn = Connection::open(path).map_err(open_err)?;
        Self::from_connection(conn, config)
    }

    /// In-memory store, for tests.
    pub fn open_in_memory(config: StoreConfig) -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory().map_err(open_err)?;
        Self::from_connection(conn, config)
    }

    fn from_connection(conn: Connection, config: StoreConfig) -> Result<Self, StoreError> {
        conn.busy_timeout(config.busy_timeout).map_err(open_err)?;
        conn.execute_batch(SCHEMA).map_err(open_err)?;
        tracing::debug!(consistency = ?config.consistency, "Opened sqlite snapshot store");
        Ok(Self {
            conn: Mutex::new(conn),
            config,
        })
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    fn lock(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn open_err(e: rusqlite::Error) -> StoreError {
    StoreError::unavailable(format!("failed to open store: {e}"))
}

/// Map a rusqlite failure to the contract's error taxonomy.
fn store_err(operation: &str) -> impl Fn(rusqlite::Error) -> StoreError + '_ {
    move |e| match e.sqlite_error_code() {
        Some(rusqlite::ErrorCode::DatabaseBusy | rusqlite::ErrorCode::DatabaseLocked) => {
            StoreError::timeout(operation.to_string())
        }
        Some(rusqlite::ErrorCode::ReadOnly | rusqlite::ErrorCode::ConstraintViolation) => {
            StoreError::write_rejected(format!("{operation}: {e}"))
        }
        _ => StoreError::unavailable(format!("{operation}: {e}")),
    }
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, StoreError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| StoreError::unavailable(format!("corrupt timestamp {raw:?}: {e}")))
}

impl SnapshotStore for SqliteStore {
    fn fetch(&self, identity: ProjectId) -> Result<Option<Snapshot>, StoreError> {
        let conn = self.lock();
        let key = identity.to_string();

        let mut stmt = conn
            .prepare("SELECT path, digest FROM snapshot_entries WHERE identity = ?1")
            .map_err(store_err("fetch"))?;
        let rows = stmt
            .query_map(params![key], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
            })
            .map_err(store_err("fetch"))?;

        let mut entries = HashIndex::new();
        for row in rows {
            let (path, digest) = row.map_err(store_err("fetch"))?;
            let path = RelPath::new(&path)
                .map_err(|e| StoreError::unavailable(format!("corrupt entry path: {e}")))?;
            entries.insert(path, digest);
        }

        let last_sync = conn
            .query_row(
                "SELECT last_sync FROM sync_marker WHERE identity = ?1",
                params![key],
                |row| row.get::<_, String>(0),
            )
            .map(Some)
            .or_else(|e| match e {
                rusqlite::Error::QueryReturnedNoRows => Ok(None),
                other => Err(store_err("fetch")(other)),
            })?
            .map(|raw| parse_timestamp(&raw))
            .transpose()?;

        if entries.is_empty() && last_sync.is_none() {
            return Ok(None);
        }
        Ok(Some(Snapshot { entries, last_sync }))
    }

    fn replace(
        &self,
        identity: ProjectId,
        entries: &HashIndex,
        timestamp: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        let conn = self.lock();
        let key = identity.to_string();
        let recorded_at = timestamp.to_rfc3339();

        // Clear, then insert, as separate statements: only per-entry
        // semantics are promised and callers must tolerate observing the
        // gap between the two phases.
        conn.execute(
            "DELETE FROM snapshot_entries WHERE identity = ?1",
            params![key],
        )
        .map_err(store_err("replace.clear"))?;

        let mut insert = conn
            .prepare(
                "INSERT INTO snapshot_entries (identity, path, digest, recorded_at)
                 VALUES (?1, ?2, ?3, ?4)",
            )
            .map_err(store_err("replace.insert"))?;
        for (path, digest) in entries {
            insert
                .execute(params![key, path.as_str(), digest, recorded_at])
                .map_err(store_err("replace.insert"))?;
        }

        Ok(())
    }

    fn record_sync(&self, identity: ProjectId, timestamp: DateTime<Utc>) -> Result<(), StoreError> {
        let conn = self.lock();
        conn.execute(
            "INSERT INTO sync_marker (identity, last_sync) VALUES (?1, ?2)
             ON CONFLICT(identity) DO UPDATE SET last_sync = excluded.last_sync",
            params![identity.to_string(), timestamp.to_rfc3339()],
        )
        .map_err(store_err("record_sync"))?;
        Ok(())
    }
}

//! Store contract conformance
//!
//! Both adapters must present identical observable behavior for the three
//! contract operations, so the same assertions run against each.

use std::sync::Arc;

use chrono::Utc;
use pretty_assertions::assert_eq;

use integrity_core::{HashIndex, MemoryStore, ProjectId, SnapshotStore};
use integrity_fs::RelPath;
use integrity_store::{SqliteStore, StoreConfig};

fn index(entries: &[(&str, &str)]) -> HashIndex {
    entries
        .iter()
        .map(|(p, d)| (RelPath::new(p).unwrap(), d.to_string()))
        .collect()
}

fn adapters() -> Vec<Arc<dyn SnapshotStore>> {
    vec![
        Arc::new(MemoryStore::new()),
        Arc::new(SqliteStore::open_in_memory(StoreConfig::default()).unwrap()),
    ]
}

#[test]
fn unknown_identity_is_absent() {
    for store in adapters() {
        assert!(store.fetch(ProjectId::generate()).unwrap().is_none());
    }
}

#[test]
fn replace_round_trips_exactly() {
    for store in adapters() {
        let id = ProjectId::generate();
        let entries = index(&[("a.py", "h1"), ("src/app.py", "h2")]);

        store.replace(id, &entries, Utc::now()).unwrap();

        assert_eq!(store.fetch(id).unwrap().unwrap().entries, entries);
    }
}

#[test]
fn replace_discards_stale_entries() {
    for store in adapters() {
        let id = ProjectId::generate();

        store
            .replace(id, &index(&[("old.py", "h1"), ("kept.py", "h2")]), Utc::now())
            .unwrap();
        store
            .replace(id, &index(&[("kept.py", "h3")]), Utc::now())
            .unwrap();

        let entries = store.fetch(id).unwrap().unwrap().entries;
        assert_eq!(entries, index(&[("kept.py", "h3")]));
    }
}

#[test]
fn replace_with_empty_index_clears_entries() {
    for store in adapters() {
        let id = ProjectId::generate();

        store.replace(id, &index(&[("a.py", "h1")]), Utc::now()).unwrap();
        store.record_sync(id, Utc::now()).unwrap();
        store.replace(id, &HashIndex::new(), Utc::now()).unwrap();

        let snapshot = store.fetch(id).unwrap().unwrap();
        assert!(snapshot.entries.is_empty());
        assert!(snapshot.last_sync.is_some());
    }
}

#[test]
fn record_sync_is_idempotent_and_independent_of_replace() {
    for store in adapters() {
        let id = ProjectId::generate();
        let ts = Utc::now();

        // Marker write is valid even with no entries published.
        store.record_sync(id, ts).unwrap();
        store.record_sync(id, ts).unwrap();

        let snapshot = store.fetch(id).unwrap().unwrap();
        let recorded = snapshot.last_sync.unwrap();
        assert_eq!(recorded.timestamp_millis(), ts.timestamp_millis());
    }
}

#[test]
fn identities_do_not_share_snapshots() {
    for store in adapters() {
        let first = ProjectId::generate();
        let second = ProjectId::generate();

        store.replace(first, &index(&[("a.py", "h1")]), Utc::now()).unwrap();
        store.replace(second, &index(&[("b.py", "h2")]), Utc::now()).unwrap();

        assert_eq!(
            store.fetch(first).unwrap().unwrap().entries,
            index(&[("a.py", "h1")])
        );
        assert_eq!(
            store.fetch(second).unwrap().unwrap().entries,
            index(&[("b.py", "h2")])
        );
    }
}

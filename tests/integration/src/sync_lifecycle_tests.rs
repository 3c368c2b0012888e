//! End-to-end lifecycle tests
//!
//! Exercise the complete flow across core and store adapters: register,
//! drift, check, fix, and recovery after a partial publish.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use chrono::Utc;
use pretty_assertions::assert_eq;

use integrity_core::{
    Discrepancy, HashIndex, MemoryStore, Registrar, SnapshotStore, SyncCoordinator, diff,
    scan_tracked, Manifest,
};
use integrity_fs::{RelPath, hash_bytes};
use integrity_store::{SqliteStore, StoreConfig};
use tempfile::TempDir;

/// Set up a project directory with a manifest tracking the given files and
/// writing initial content for those marked present.
fn setup_project(tracked: &[&str], present: &[(&str, &str)]) -> TempDir {
    let temp = TempDir::new().unwrap();
    let cfg = temp.path().join(".integrity");
    fs::create_dir_all(&cfg).unwrap();

    let list = tracked
        .iter()
        .map(|p| format!("\"{p}\""))
        .collect::<Vec<_>>()
        .join(", ");
    fs::write(cfg.join("manifest.toml"), format!("src = [{list}]\n")).unwrap();

    for (rel, content) in present {
        let path = RelPath::new(rel).unwrap().to_absolute(temp.path());
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    temp
}

fn rel(p: &str) -> RelPath {
    RelPath::new(p).unwrap()
}

#[test]
fn register_check_drift_fix_lifecycle_on_sqlite() {
    let project = setup_project(
        &["a.py", "b.py"],
        &[("a.py", "alpha"), ("b.py", "beta")],
    );
    let db = project.path().join("snapshots.db");
    let store = Arc::new(SqliteStore::open(&db, StoreConfig::default()).unwrap());

    let id = Registrar::new(store.clone()).register(project.path()).unwrap();
    let coordinator = SyncCoordinator::new(store);

    // Fresh registration is clean.
    let result = coordinator.check(id, project.path()).unwrap();
    assert!(result.is_valid);
    assert_eq!(result.total_files, 2);
    assert!(result.last_sync.is_some());

    // Drift: modify one file, delete the other.
    fs::write(project.path().join("a.py"), "alpha v2").unwrap();
    fs::remove_file(project.path().join("b.py")).unwrap();

    let result = coordinator.check(id, project.path()).unwrap();
    assert_eq!(
        result.discrepancies,
        vec![
            Discrepancy::Modified(rel("a.py")),
            Discrepancy::Missing(rel("b.py")),
        ]
    );

    // Fix with acceptance repairs and re-checks clean.
    let fixed = coordinator.fix(id, project.path(), |_| true).unwrap();
    assert!(fixed.is_valid);
    assert_eq!(fixed.total_files, 1);
}

#[test]
fn round_trip_diff_is_empty_after_sync() {
    let project = setup_project(
        &["a.py", "src/app.py"],
        &[("a.py", "alpha"), ("src/app.py", "app")],
    );
    let store = Arc::new(MemoryStore::new());
    let coordinator = SyncCoordinator::new(store.clone());
    let id = integrity_core::ProjectId::generate();

    coordinator.sync(id, project.path()).unwrap();

    // Recompute local state from the same base and diff against the
    // fetched snapshot directly.
    let manifest = Manifest::load_or_builtin(project.path()).unwrap();
    let local = scan_tracked(&manifest, project.path()).hashes;
    let snapshot = store.fetch(id).unwrap().unwrap();

    assert!(diff(&local, &snapshot.entries).is_empty());
}

#[test]
fn known_scenario_one_match_one_new_one_missing() {
    // local = {a.py, b.py} on disk; remote = {a.py (matching), c.py}.
    let project = setup_project(
        &["a.py", "b.py", "c.py"],
        &[("a.py", "alpha"), ("b.py", "beta")],
    );
    let store = Arc::new(MemoryStore::new());
    let id = integrity_core::ProjectId::generate();

    let mut remote = HashIndex::new();
    remote.insert(rel("a.py"), hash_bytes(b"alpha"));
    remote.insert(rel("c.py"), "h3".to_string());
    store.replace(id, &remote, Utc::now()).unwrap();

    let coordinator = SyncCoordinator::new(store);
    let result = coordinator.check(id, project.path()).unwrap();

    assert!(!result.is_valid);
    assert_eq!(result.total_files, 2);
    assert_eq!(
        result.discrepancies,
        vec![Discrepancy::New(rel("b.py")), Discrepancy::Missing(rel("c.py"))]
    );
}

#[test]
fn known_scenario_empty_local_empty_remote_is_valid() {
    let project = setup_project(&["a.py"], &[]);
    let coordinator = SyncCoordinator::new(Arc::new(MemoryStore::new()));

    let result = coordinator
        .check(integrity_core::ProjectId::generate(), project.path())
        .unwrap();

    assert!(result.is_valid);
    assert!(result.discrepancies.is_empty());
    assert_eq!(result.total_files, 0);
}

#[test]
fn partial_publish_self_heals_on_re_sync() {
    let project = setup_project(
        &["a.py", "b.py"],
        &[("a.py", "alpha"), ("b.py", "beta")],
    );
    let store = Arc::new(MemoryStore::new());
    let coordinator = SyncCoordinator::new(store.clone());
    let id = integrity_core::ProjectId::generate();

    coordinator.sync(id, project.path()).unwrap();

    // Clear applies, insert never happens.
    store.fail_replace_after_clear();
    assert!(coordinator.sync(id, project.path()).is_err());

    // Every tracked local file now reads as new.
    let degraded = coordinator.check(id, project.path()).unwrap();
    assert_eq!(degraded.discrepancies.len(), 2);
    assert!(degraded
        .discrepancies
        .iter()
        .all(|d| matches!(d, Discrepancy::New(_))));

    // Re-running sync repairs the snapshot to match local state exactly.
    coordinator.sync(id, project.path()).unwrap();
    let manifest = Manifest::load_or_builtin(project.path()).unwrap();
    let local = scan_tracked(&manifest, project.path()).hashes;
    assert_eq!(store.fetch(id).unwrap().unwrap().entries, local);
}

#[test]
fn sync_twice_without_changes_is_a_no_op_for_checks() {
    let project = setup_project(&["a.py"], &[("a.py", "alpha")]);
    let store = Arc::new(MemoryStore::new());
    let coordinator = SyncCoordinator::new(store);
    let id = integrity_core::ProjectId::generate();

    coordinator.sync(id, project.path()).unwrap();
    let first = coordinator.check(id, project.path()).unwrap();
    coordinator.sync(id, project.path()).unwrap();
    let second = coordinator.check(id, project.path()).unwrap();

    assert!(first.is_valid);
    assert!(second.is_valid);
    assert_eq!(first.discrepancies, second.discrepancies);
}

fn check_across_adapters(project: &Path, with_store: fn() -> Arc<dyn SnapshotStore>) {
    let coordinator = SyncCoordinator::new(with_store());
    let id = integrity_core::ProjectId::generate();

    coordinator.sync(id, project).unwrap();
    assert!(coordinator.check(id, project).unwrap().is_valid);
}

#[test]
fn adapters_are_interchangeable_behind_the_trait() {
    let project = setup_project(&["a.py"], &[("a.py", "alpha")]);

    check_across_adapters(project.path(), || Arc::new(MemoryStore::new()));
    check_across_adapters(project.path(), || {
        Arc::new(SqliteStore::open_in_memory(StoreConfig::default()).unwrap())
    });
}

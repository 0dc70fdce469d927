use std::path::Path;
use std::sync::Arc;

use sitescan::errors::SitescanError;
use sitescan::fs::mock::MockFileSystem;
use sitescan::fs::{FileSystem, RealFileSystem};
use sitescan::incremental::{JsonStateStore, StateStore};
use sitescan_test_utils::init_tracing;

#[test]
fn missing_file_means_no_marker() {
    init_tracing();
    let store = JsonStateStore::new(Arc::new(MockFileSystem::new()), ".incremental");
    assert_eq!(store.load("anything").unwrap(), None);
}

#[test]
fn unparsable_file_is_corruption() {
    init_tracing();
    let fs = Arc::new(MockFileSystem::new());
    fs.add_file(".incremental", "{ not json");

    let store = JsonStateStore::new(fs, ".incremental");
    let err = store.load("key").unwrap_err();
    assert!(
        matches!(err, SitescanError::StateCorruption { .. }),
        "got {err:?}"
    );
}

#[test]
fn corruption_also_aborts_save() {
    init_tracing();
    let fs = Arc::new(MockFileSystem::new());
    fs.add_file(".incremental", "[1, 2, 3]");

    let mut store = JsonStateStore::new(fs.clone(), ".incremental");
    assert!(store.save("key", "marker").is_err());
    // The corrupt file was not clobbered.
    assert_eq!(
        fs.read_to_string(Path::new(".incremental")).unwrap(),
        "[1, 2, 3]"
    );
}

#[test]
fn save_merges_with_existing_entries() {
    init_tracing();
    let fs = Arc::new(MockFileSystem::new());
    fs.add_file(".incremental", r#"{ "other": "2024-01-01T00:00:00+00:00" }"#);

    let mut store = JsonStateStore::new(fs, ".incremental");
    store.save("mine", "abc123").unwrap();

    assert_eq!(store.load("mine").unwrap().as_deref(), Some("abc123"));
    assert_eq!(
        store.load("other").unwrap().as_deref(),
        Some("2024-01-01T00:00:00+00:00")
    );
}

#[test]
fn file_format_is_pretty_json_with_two_space_indent() {
    init_tracing();
    let fs = Arc::new(MockFileSystem::new());
    let mut store = JsonStateStore::new(fs.clone(), ".incremental");
    store.save("b", "rev-b").unwrap();
    store.save("a", "rev-a").unwrap();

    let raw = fs.read_to_string(Path::new(".incremental")).unwrap();
    // Keys sorted, 2-space indent, trailing newline.
    assert_eq!(raw, "{\n  \"a\": \"rev-a\",\n  \"b\": \"rev-b\"\n}\n");
}

#[test]
fn round_trip_on_a_real_filesystem() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".incremental");

    let mut store = JsonStateStore::new(Arc::new(RealFileSystem), &path);
    assert_eq!(store.load("key").unwrap(), None);

    store.save("key", "2024-06-01T12:00:00+00:00").unwrap();

    let reread = JsonStateStore::new(Arc::new(RealFileSystem), &path);
    assert_eq!(
        reread.load("key").unwrap().as_deref(),
        Some("2024-06-01T12:00:00+00:00")
    );
}

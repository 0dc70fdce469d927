use std::sync::Arc;

use sitescan::errors::SitescanError;
use sitescan::fs::mock::MockFileSystem;
use sitescan::fs::FileSystem;
use sitescan::incremental::{
    IncrementalFilter, JsonStateStore, MemoryStateStore, StateStore,
};
use sitescan_test_utils::builders::StubStrategy;
use sitescan_test_utils::init_tracing;

fn candidates() -> Vec<String> {
    vec![
        "a.md".to_string(),
        "b.md".to_string(),
        "c.md".to_string(),
    ]
}

#[test]
fn absent_marker_means_identity_filter() {
    init_tracing();
    let filter = IncrementalFilter::new(
        "fresh",
        ".",
        ".",
        vec![],
        Box::new(StubStrategy::new(&["a.md"], "m1")),
        Box::new(MemoryStateStore::new()),
    )
    .unwrap();

    let result = filter.filter(&candidates()).unwrap();
    assert_eq!(result, candidates());
}

#[test]
fn filter_contains_changed_intersection() {
    init_tracing();
    // "ghost.md" changed but is not a candidate; it must not appear.
    let filter = IncrementalFilter::new(
        "key",
        ".",
        ".",
        vec![],
        Box::new(StubStrategy::new(&["b.md", "ghost.md"], "m1")),
        Box::new(MemoryStateStore::new().with_entry("key", "m0")),
    )
    .unwrap();

    let result = filter.filter(&candidates()).unwrap();
    assert_eq!(result, vec!["b.md"]);
}

#[test]
fn filter_is_repeatable_without_finalize() {
    init_tracing();
    let filter = IncrementalFilter::new(
        "key",
        ".",
        ".",
        vec![],
        Box::new(StubStrategy::new(&["a.md"], "m1")),
        Box::new(MemoryStateStore::new().with_entry("key", "m0")),
    )
    .unwrap();

    let first = filter.filter(&candidates()).unwrap();
    let second = filter.filter(&candidates()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn empty_key_is_rejected_at_construction() {
    init_tracing();
    let err = IncrementalFilter::new(
        "  ",
        ".",
        ".",
        vec![],
        Box::new(StubStrategy::new(&[], "m1")),
        Box::new(MemoryStateStore::new()),
    )
    .unwrap_err();

    assert!(matches!(err, SitescanError::Validation(_)), "got {err:?}");
}

#[test]
fn finalize_persists_the_strategy_marker() {
    init_tracing();
    let fs = Arc::new(MockFileSystem::new());
    let store = JsonStateStore::new(fs.clone(), ".incremental");

    let mut filter = IncrementalFilter::new(
        "key",
        ".",
        ".",
        vec![],
        Box::new(StubStrategy::new(&[], "marker-1")),
        Box::new(store.clone()),
    )
    .unwrap();

    filter.finalize().unwrap();
    assert_eq!(store.load("key").unwrap().as_deref(), Some("marker-1"));
}

#[test]
fn finalize_preserves_other_keys_in_shared_state_file() {
    init_tracing();
    let fs = Arc::new(MockFileSystem::new());

    let mut filter_a = IncrementalFilter::new(
        "a",
        ".",
        ".",
        vec![],
        Box::new(StubStrategy::new(&[], "marker-a")),
        Box::new(JsonStateStore::new(fs.clone(), ".incremental")),
    )
    .unwrap();
    let mut filter_b = IncrementalFilter::new(
        "b",
        ".",
        ".",
        vec![],
        Box::new(StubStrategy::new(&[], "marker-b")),
        Box::new(JsonStateStore::new(fs.clone(), ".incremental")),
    )
    .unwrap();

    filter_a.finalize().unwrap();
    filter_b.finalize().unwrap();

    let store = JsonStateStore::new(fs, ".incremental");
    assert_eq!(store.load("a").unwrap().as_deref(), Some("marker-a"));
    assert_eq!(store.load("b").unwrap().as_deref(), Some("marker-b"));
}

#[test]
fn repeated_finalize_overwrites_the_same_key() {
    init_tracing();
    let fs = Arc::new(MockFileSystem::new());
    let store = JsonStateStore::new(fs.clone(), ".incremental");

    let mut filter = IncrementalFilter::new(
        "key",
        ".",
        ".",
        vec![],
        Box::new(StubStrategy::new(&[], "marker-1")),
        Box::new(store.clone()),
    )
    .unwrap();

    filter.finalize().unwrap();
    filter.finalize().unwrap();

    assert_eq!(store.load("key").unwrap().as_deref(), Some("marker-1"));
    // Exactly one entry: the second call overwrote, it did not append.
    let raw = fs
        .read_to_string(std::path::Path::new(".incremental"))
        .unwrap();
    assert_eq!(raw.matches("marker-1").count(), 1);
}

#[test]
fn candidates_outside_tracking_root_need_a_trigger() {
    init_tracing();
    // Reading "content" while tracking "content/posts": files above the
    // tracking root can never be "changed", only force-included via rules.
    let filter = IncrementalFilter::new(
        "key",
        "content",
        "content/posts",
        vec![],
        Box::new(StubStrategy::new(&["intro.md"], "m1")),
        Box::new(MemoryStateStore::new().with_entry("key", "m0")),
    )
    .unwrap();

    let candidates = vec!["posts/intro.md".to_string(), "about.md".to_string()];
    let result = filter.filter(&candidates).unwrap();
    assert_eq!(result, vec!["posts/intro.md"]);
}

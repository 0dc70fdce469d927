use sitescan::incremental::{IncrementalFilter, MemoryStateStore, TriggerRule};
use sitescan_test_utils::builders::StubStrategy;
use sitescan_test_utils::init_tracing;

/// Filter with a marker already persisted, so `filter` exercises the change
/// set + trigger path instead of the first-run identity shortcut.
fn filter_with(rules: Vec<TriggerRule>, changed: &[&str]) -> IncrementalFilter {
    IncrementalFilter::new(
        "key",
        ".",
        ".",
        rules,
        Box::new(StubStrategy::new(changed, "next-marker")),
        Box::new(MemoryStateStore::new().with_entry("key", "prev-marker")),
    )
    .unwrap()
}

fn candidates() -> Vec<String> {
    vec![
        "file1.txt".to_string(),
        "file2.txt".to_string(),
        "file3.txt".to_string(),
    ]
}

#[test]
fn no_rules_keeps_only_changed_candidates() {
    init_tracing();
    let filter = filter_with(vec![], &["file2.txt"]);

    let result = filter.filter(&candidates()).unwrap();
    assert_eq!(result, vec!["file2.txt"]);
}

#[test]
fn all_activating_rule_forces_full_set() {
    init_tracing();
    let rules = vec![TriggerRule::AllActivating {
        source: "**/*2*".to_string(),
    }];
    let filter = filter_with(rules, &["file2.txt"]);

    let result = filter.filter(&candidates()).unwrap();
    assert_eq!(result, candidates());
}

#[test]
fn all_activating_rule_without_hit_is_inert() {
    init_tracing();
    let rules = vec![TriggerRule::AllActivating {
        source: "**/*9*".to_string(),
    }];
    let filter = filter_with(rules, &["file2.txt"]);

    let result = filter.filter(&candidates()).unwrap();
    assert_eq!(result, vec!["file2.txt"]);
}

#[test]
fn some_activating_rule_pulls_in_targets() {
    init_tracing();
    let rules = vec![TriggerRule::SomeActivating {
        source: "**/*2*".to_string(),
        target: "**/*3*".to_string(),
    }];
    let filter = filter_with(rules, &["file2.txt"]);

    let result = filter.filter(&candidates()).unwrap();
    assert_eq!(result, vec!["file2.txt", "file3.txt"]);
}

#[test]
fn triggered_inclusions_do_not_retrigger_rules() {
    init_tracing();
    // file2 changed -> file3 included. file3 was *not* changed, so the
    // 3 -> 1 rule must stay quiet: evaluation is single-pass.
    let rules = vec![
        TriggerRule::SomeActivating {
            source: "**/*2*".to_string(),
            target: "**/*3*".to_string(),
        },
        TriggerRule::SomeActivating {
            source: "**/*3*".to_string(),
            target: "**/*1*".to_string(),
        },
    ];
    let filter = filter_with(rules, &["file2.txt"]);

    let result = filter.filter(&candidates()).unwrap();
    assert_eq!(result, vec!["file2.txt", "file3.txt"]);
}

#[test]
fn multiple_rules_may_share_a_target_pattern() {
    init_tracing();
    let rules = vec![
        TriggerRule::SomeActivating {
            source: "**/*1*".to_string(),
            target: "**/*3*".to_string(),
        },
        TriggerRule::SomeActivating {
            source: "**/*2*".to_string(),
            target: "**/*3*".to_string(),
        },
    ];
    let filter = filter_with(rules, &["file1.txt", "file2.txt"]);

    let result = filter.filter(&candidates()).unwrap();
    assert_eq!(result, vec!["file1.txt", "file2.txt", "file3.txt"]);
}

#[test]
fn all_activating_wins_over_some_activating() {
    init_tracing();
    let rules = vec![
        TriggerRule::SomeActivating {
            source: "**/*2*".to_string(),
            target: "**/*3*".to_string(),
        },
        TriggerRule::AllActivating {
            source: "**/*2*".to_string(),
        },
    ];
    let filter = filter_with(rules, &["file2.txt"]);

    let result = filter.filter(&candidates()).unwrap();
    assert_eq!(result, candidates());
}

#[test]
fn callback_rule_contributes_targets_when_applicable() {
    init_tracing();
    let rules = vec![TriggerRule::Callback(Box::new(|changes: &[String]| {
        if changes.iter().any(|c| c.contains('2')) {
            vec!["**/*1*".to_string()]
        } else {
            Vec::new()
        }
    }))];
    let filter = filter_with(rules, &["file2.txt"]);

    let result = filter.filter(&candidates()).unwrap();
    assert_eq!(result, vec!["file1.txt", "file2.txt"]);
}

#[test]
fn callback_rule_returning_nothing_is_inert() {
    init_tracing();
    let rules = vec![TriggerRule::Callback(Box::new(|_: &[String]| Vec::new()))];
    let filter = filter_with(rules, &["file2.txt"]);

    let result = filter.filter(&candidates()).unwrap();
    assert_eq!(result, vec!["file2.txt"]);
}

#[test]
fn targets_match_candidate_entries_when_tracking_root_differs() {
    init_tracing();
    // Reading "content" while tracking ".": source patterns see
    // tracking-root-relative changes, but target patterns see candidate
    // entries exactly as discovery produced them.
    let rules = vec![TriggerRule::SomeActivating {
        source: "content/_includes/**".to_string(),
        target: "posts/**".to_string(),
    }];
    let filter = IncrementalFilter::new(
        "key",
        "content",
        ".",
        rules,
        Box::new(StubStrategy::new(
            &["content/_includes/head.html"],
            "next-marker",
        )),
        Box::new(MemoryStateStore::new().with_entry("key", "prev-marker")),
    )
    .unwrap();

    let candidates = vec!["posts/a.md".to_string(), "posts/b.md".to_string()];
    let result = filter.filter(&candidates).unwrap();
    assert_eq!(result, candidates);
}

#[test]
fn output_preserves_candidate_order() {
    init_tracing();
    let rules = vec![TriggerRule::SomeActivating {
        source: "**/*1*".to_string(),
        target: "**/*".to_string(),
    }];
    let filter = filter_with(rules, &["file1.txt"]);

    let shuffled = vec![
        "file3.txt".to_string(),
        "file1.txt".to_string(),
        "file2.txt".to_string(),
    ];
    let result = filter.filter(&shuffled).unwrap();
    assert_eq!(result, shuffled);
}

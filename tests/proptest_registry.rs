//! Property-based tests for path normalization and the derived views.
//!
//! Random record sets are built from a small vocabulary of hives and key
//! names in mixed casing, so collisions between spellings of the same path
//! are common.

use lolreg::model::Record;
use lolreg::registry::{build_index, build_tree, list_all_paths, normalize};
use proptest::prelude::*;
use std::collections::{BTreeSet, HashSet};

fn hive() -> impl Strategy<Value = String> {
    prop::sample::select(vec![
        "HKLM",
        "hklm",
        "HKEY_LOCAL_MACHINE",
        "hkey_local_machine",
        "HKCU",
        "HKEY_CURRENT_USER",
        "HKCR",
        "HKU",
        "HKEY_USERS",
    ])
    .prop_map(str::to_string)
}

fn segment() -> impl Strategy<Value = String> {
    prop_oneof![
        prop::sample::select(vec![
            "Software",
            "SOFTWARE",
            "software",
            "Microsoft",
            "MICROSOFT",
            "Windows",
            "windows",
            "CurrentVersion",
            "Run",
            "RUN",
            "RunOnce",
            "Winlogon",
            "winlogon",
        ])
        .prop_map(str::to_string),
        "[A-Za-z][A-Za-z0-9 ._-]{0,8}",
    ]
}

/// A raw key path with occasional doubled, leading or trailing separators.
fn raw_path() -> impl Strategy<Value = String> {
    (
        hive(),
        prop::collection::vec((segment(), 1usize..3), 0..6),
        any::<bool>(),
        any::<bool>(),
    )
        .prop_map(|(hive, segments, leading, trailing)| {
            let mut path = String::new();
            if leading {
                path.push('\\');
            }
            path.push_str(&hive);
            for (segment, separators) in segments {
                path.push_str(&"\\".repeat(separators));
                path.push_str(&segment);
            }
            if trailing {
                path.push('\\');
            }
            path
        })
}

fn records() -> impl Strategy<Value = Vec<Record>> {
    prop::collection::vec(prop::collection::vec(raw_path(), 0..5), 0..12).prop_map(|key_sets| {
        key_sets
            .into_iter()
            .enumerate()
            .map(|(i, keys)| Record::new(format!("r{i}"), format!("Technique {i}")).with_keys(keys))
            .collect()
    })
}

/// Every non-empty prefix of a normalized path, lower-cased.
fn prefixes(path: &str) -> Vec<String> {
    let segments: Vec<&str> = path.split('\\').collect();
    (1..=segments.len())
        .map(|end| segments[..end].join("\\").to_lowercase())
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn normalize_doesnt_panic(s in "\\PC{0,200}") {
        let _ = normalize(&s);
    }

    #[test]
    fn normalize_is_idempotent(s in "[A-Za-z_ \\\\]{0,80}") {
        let once = normalize(&s);
        prop_assert_eq!(normalize(&once), once);
    }

    #[test]
    fn normalized_paths_have_no_empty_segments(raw in raw_path()) {
        let path = normalize(&raw);
        prop_assert!(!path.is_empty());
        prop_assert!(path.split('\\').all(|s| !s.is_empty()), "{:?} -> {:?}", raw, path);
    }

    #[test]
    fn long_and_short_hive_forms_agree(segments in prop::collection::vec(segment(), 0..5)) {
        let tail: String = segments.iter().map(|s| format!("\\{s}")).collect();
        prop_assert_eq!(
            normalize(&format!("HKEY_LOCAL_MACHINE{tail}")),
            normalize(&format!("hklm{tail}"))
        );
    }

    #[test]
    fn index_paths_unique_and_sorted(records in records()) {
        let index = build_index(&records);

        let folded: HashSet<String> = index.iter().map(|e| e.path.to_lowercase()).collect();
        prop_assert_eq!(folded.len(), index.len());
        prop_assert!(index.windows(2).all(|w| w[0].path < w[1].path));
        prop_assert!(index.iter().all(|e| !e.entries.is_empty()));
    }

    #[test]
    fn each_record_listed_once_per_key(records in records()) {
        let index = build_index(&records);

        for entry in &index {
            let ids: HashSet<&str> = entry.entries.iter().map(|e| e.id.as_str()).collect();
            prop_assert_eq!(ids.len(), entry.entries.len(), "duplicate contributor in {}", entry.path);
        }
        for record in &records {
            for key in &record.keys {
                let folded = normalize(key).to_lowercase();
                let entry = index.iter().find(|e| e.path.to_lowercase() == folded);
                prop_assert!(entry.is_some_and(|e| e.contains_record(&record.id)));
            }
        }
    }

    #[test]
    fn tree_paths_are_index_prefixes(records in records()) {
        let index = build_index(&records);
        let tree = build_tree(&records);

        let expected: BTreeSet<String> = index.iter().flat_map(|e| prefixes(&e.path)).collect();
        let listed = list_all_paths(tree.root());
        let listed_set: BTreeSet<String> = listed.iter().map(|p| p.to_lowercase()).collect();

        prop_assert_eq!(listed.len(), listed_set.len());
        prop_assert_eq!(listed_set, expected);
        prop_assert_eq!(tree.node_count(), listed.len());
    }

    #[test]
    fn tree_terminals_match_index_contributors(records in records()) {
        let index = build_index(&records);
        let tree = build_tree(&records);

        for entry in &index {
            let node = tree.find(&entry.path, lolreg::SegmentTable::standard());
            prop_assert!(node.is_some());
            if let Some(node) = node {
                prop_assert_eq!(node.entries(), entry.entries.as_slice());
            }
        }
    }
}

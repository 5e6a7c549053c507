//! Flat, deduplicated index of registry paths.

use super::lookup::CaseFoldMap;
use super::normalize::{hive_of, SegmentTable};
use crate::model::{Record, RecordRef};
use indexmap::IndexMap;
use serde::Serialize;

/// One distinct normalized path and the records that document it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlatIndexEntry {
    /// Normalized path, casing fixed by the first record that listed it
    pub path: String,
    /// First segment of `path`
    pub hive: String,
    /// Contributing records, deduplicated by id, first-seen first
    pub entries: Vec<RecordRef>,
}

impl FlatIndexEntry {
    fn new(path: &str) -> Self {
        Self {
            path: path.to_string(),
            hive: hive_of(path).to_string(),
            entries: Vec::new(),
        }
    }

    fn add(&mut self, record: &Record) {
        if !self.contains_record(&record.id) {
            self.entries.push(record.to_ref());
        }
    }

    pub fn contains_record(&self, id: &str) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    /// Case-insensitive match against the path or any contributor name.
    pub fn matches(&self, term_lower: &str) -> bool {
        self.path.to_lowercase().contains(term_lower)
            || self
                .entries
                .iter()
                .any(|e| e.name.to_lowercase().contains(term_lower))
    }
}

/// Build the key index, normalizing each key path with `table`.
///
/// Paths are deduplicated case-insensitively. Contributors within an entry
/// keep the order of `records`, so that order is part of the input contract;
/// the entries themselves are sorted by `path` (byte order).
pub fn build_index_with(records: &[Record], table: &SegmentTable) -> Vec<FlatIndexEntry> {
    let mut by_path: CaseFoldMap<FlatIndexEntry> = CaseFoldMap::new();

    for record in records {
        for raw in &record.keys {
            let path = table.normalize(raw);
            if path.is_empty() {
                continue;
            }
            by_path
                .get_or_insert_with(&path, str::to_string, FlatIndexEntry::new)
                .add(record);
        }
    }

    let mut entries: Vec<FlatIndexEntry> = by_path.into_values().collect();
    entries.sort_by(|a, b| a.path.cmp(&b.path));
    entries
}

/// Build the key index with the standard segment table.
pub fn build_index(records: &[Record]) -> Vec<FlatIndexEntry> {
    build_index_with(records, SegmentTable::standard())
}

/// Group entries by hive, hives in order of first appearance.
///
/// On a sorted index that is alphabetical hive order.
pub fn group_by_hive<'a, I>(entries: I) -> IndexMap<&'a str, Vec<&'a FlatIndexEntry>>
where
    I: IntoIterator<Item = &'a FlatIndexEntry>,
{
    let mut groups: IndexMap<&str, Vec<&FlatIndexEntry>> = IndexMap::new();
    for entry in entries {
        groups.entry(entry.hive.as_str()).or_default().push(entry);
    }
    groups
}

/// Entries whose path or contributor names contain `term`, ignoring case.
///
/// An empty term keeps everything.
pub fn filter_index<'a>(entries: &'a [FlatIndexEntry], term: &str) -> Vec<&'a FlatIndexEntry> {
    let term_lower = term.trim().to_lowercase();
    entries
        .iter()
        .filter(|e| term_lower.is_empty() || e.matches(&term_lower))
        .collect()
}

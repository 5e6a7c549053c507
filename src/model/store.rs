//! Immutable collection of loaded records.

use super::Record;
use crate::error::{LolregError, Result};
use std::collections::HashMap;

/// The record set every view is derived from.
///
/// Records keep the order they were supplied in. That order is an input to
/// the key index (contributors are listed first-seen first), so the loader
/// supplies them sorted by file name.
#[derive(Debug, Clone, Default)]
#[must_use]
pub struct RecordStore {
    records: Vec<Record>,
    by_id: HashMap<String, usize>,
}

impl RecordStore {
    /// Build a store, rejecting duplicate ids.
    pub fn new(records: impl IntoIterator<Item = Record>) -> Result<Self> {
        let mut store = Self::default();
        for record in records {
            if store.by_id.contains_key(&record.id) {
                return Err(LolregError::DuplicateId {
                    id: record.id,
                    first: None,
                    second: None,
                });
            }
            store.by_id.insert(record.id.clone(), store.records.len());
            store.records.push(record);
        }
        Ok(store)
    }

    /// Look up a record by id.
    pub fn get(&self, id: &str) -> Option<&Record> {
        self.by_id.get(id).map(|&idx| &self.records[idx])
    }

    /// Look up a record by id, failing with [`LolregError::NotFound`].
    pub fn require(&self, id: &str) -> Result<&Record> {
        self.get(id)
            .ok_or_else(|| LolregError::NotFound(id.to_string()))
    }

    /// All records as a contiguous slice, in load order.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &Record> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preserves_order() {
        let store = RecordStore::new(vec![
            Record::new("b", "B"),
            Record::new("a", "A"),
        ])
        .unwrap();
        let ids: Vec<&str> = store.records().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_rejects_duplicate_ids() {
        let result = RecordStore::new(vec![Record::new("a", "A"), Record::new("a", "Other")]);
        assert!(matches!(result, Err(LolregError::DuplicateId { ref id, .. }) if id == "a"));
    }

    #[test]
    fn test_require_missing() {
        let store = RecordStore::new(vec![Record::new("a", "A")]).unwrap();
        assert!(store.require("a").is_ok());
        assert!(matches!(store.require("z"), Err(LolregError::NotFound(_))));
    }

    #[test]
    fn test_empty_store() {
        let store = RecordStore::default();
        assert!(store.is_empty());
        assert!(store.records().is_empty());
    }
}

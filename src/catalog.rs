//! Catalog search over the flat record list.

use crate::model::Record;
use indexmap::IndexSet;

/// Filter for the catalog view.
///
/// `term` matches name, description or any raw key path, ignoring case.
/// `tag` must be one of the record's tags exactly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogQuery {
    pub term: Option<String>,
    pub tag: Option<String>,
}

impl CatalogQuery {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn term(mut self, term: impl Into<String>) -> Self {
        self.term = Some(term.into());
        self
    }

    #[must_use]
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    pub fn matches(&self, record: &Record) -> bool {
        self.matches_term(record) && self.matches_tag(record)
    }

    fn matches_term(&self, record: &Record) -> bool {
        let term = match self.term.as_deref().map(str::trim) {
            Some(t) if !t.is_empty() => t.to_lowercase(),
            _ => return true,
        };
        record.name.to_lowercase().contains(&term)
            || record.description.to_lowercase().contains(&term)
            || record
                .keys
                .iter()
                .any(|k| k.to_lowercase().contains(&term))
    }

    fn matches_tag(&self, record: &Record) -> bool {
        self.tag.as_deref().map_or(true, |tag| record.has_tag(tag))
    }

    /// Records matching the query, in input order.
    pub fn filter<'a>(&self, records: &'a [Record]) -> Vec<&'a Record> {
        records.iter().filter(|r| self.matches(r)).collect()
    }
}

/// Every distinct tag, in order of first appearance.
pub fn all_tags(records: &[Record]) -> Vec<&str> {
    let tags: IndexSet<&str> = records
        .iter()
        .flat_map(|r| r.tags.iter().map(String::as_str))
        .collect();
    tags.into_iter().collect()
}

//! Case-insensitive, casing-preserving map.

use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use std::collections::HashMap;

/// Map whose keys compare case-insensitively but keep the casing chosen when
/// the key was first inserted.
///
/// Two lookups back it: folded (lower-case) name → canonical name, and
/// canonical name → value. Inserting `"Software"` after `"SOFTWARE"` resolves
/// to the existing `"SOFTWARE"` slot. Iteration follows insertion order.
#[derive(Debug, Clone)]
pub struct CaseFoldMap<V> {
    entries: IndexMap<String, V>,
    folded: HashMap<String, String>,
}

impl<V> Default for CaseFoldMap<V> {
    fn default() -> Self {
        Self {
            entries: IndexMap::new(),
            folded: HashMap::new(),
        }
    }
}

impl<V> CaseFoldMap<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// The canonical casing registered for `name`, if any.
    pub fn canonical_name(&self, name: &str) -> Option<&str> {
        self.folded.get(&name.to_lowercase()).map(String::as_str)
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.canonical_name(name).is_some()
    }

    /// Case-insensitive lookup.
    pub fn get(&self, name: &str) -> Option<&V> {
        self.canonical_name(name)
            .and_then(|canonical| self.entries.get(canonical))
    }

    /// Return the slot for `name`, creating it when no case-variant exists.
    ///
    /// `canonical` picks the casing for a new key and must preserve the
    /// folded form of `name`. `value` receives that canonical key.
    pub fn get_or_insert_with<C, F>(&mut self, name: &str, canonical: C, value: F) -> &mut V
    where
        C: FnOnce(&str) -> String,
        F: FnOnce(&str) -> V,
    {
        let folded = name.to_lowercase();
        let key = match self.folded.get(&folded) {
            Some(existing) => existing.clone(),
            None => {
                let chosen = canonical(name);
                debug_assert_eq!(chosen.to_lowercase(), folded);
                self.folded.insert(folded, chosen.clone());
                chosen
            }
        };
        let slot = self.entries.entry(key);
        let key_for_value = slot.key().clone();
        slot.or_insert_with(|| value(&key_for_value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// (canonical name, value) pairs in insertion order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (&str, &V)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.entries.values()
    }

    pub fn into_values(self) -> impl Iterator<Item = V> {
        self.entries.into_values()
    }
}

impl<V: Serialize> Serialize for CaseFoldMap<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.entries.serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_variants_share_slot() {
        let mut map: CaseFoldMap<u32> = CaseFoldMap::new();
        *map.get_or_insert_with("Software", str::to_string, |_| 0) += 1;
        *map.get_or_insert_with("SOFTWARE", str::to_string, |_| 0) += 1;
        *map.get_or_insert_with("software", str::to_string, |_| 0) += 1;

        assert_eq!(map.len(), 1);
        assert_eq!(map.canonical_name("sOfTwArE"), Some("Software"));
        assert_eq!(map.get("SOFTWARE"), Some(&3));
    }

    #[test]
    fn test_canonical_closure_only_on_insert() {
        let mut map: CaseFoldMap<()> = CaseFoldMap::new();
        map.get_or_insert_with("run", |_| "Run".to_string(), |_| ());
        map.get_or_insert_with("RUN", |_| -> String { panic!("existing key re-cased") }, |_| ());
        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["Run"]);
    }

    #[test]
    fn test_value_sees_canonical_key() {
        let mut map: CaseFoldMap<String> = CaseFoldMap::new();
        let v = map.get_or_insert_with("hklm", |s| s.to_uppercase(), str::to_string);
        assert_eq!(v.as_str(), "HKLM");
    }

    #[test]
    fn test_insertion_order() {
        let mut map: CaseFoldMap<()> = CaseFoldMap::new();
        for name in ["b", "A", "c", "a"] {
            map.get_or_insert_with(name, str::to_string, |_| ());
        }
        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["b", "A", "c"]);
        assert!(map.contains_key("B"));
        assert!(!map.contains_key("d"));
    }
}

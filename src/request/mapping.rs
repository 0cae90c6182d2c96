// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Key-unique string accumulator backing params, headers, cookies and files

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A key-unique, order-irrelevant string-to-string association.
///
/// A later [`set`](Mapping::set) for an existing key overwrites the previous
/// value (last-write-wins); duplicates are never retained. Iteration order is
/// unspecified and callers must not depend on it.
///
/// Not safe for concurrent mutation; each accumulator slot is exclusively
/// owned by one configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Mapping {
    entries: HashMap<String, String>,
}

impl Mapping {
    /// Create an empty mapping
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Insert or overwrite a key
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.entries.insert(key.into(), value.into());
        self
    }

    /// Look up a key
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Look up a key ignoring ASCII case, as header names require
    pub fn get_ignore_ascii_case(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }

    /// Overwrite keys present in `other` into the receiver, leaving the
    /// rest untouched
    pub fn merge(&mut self, other: Mapping) -> &mut Self {
        self.entries.extend(other.entries);
        self
    }

    /// Remove a key, returning its value if present
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.entries.remove(key)
    }

    /// Remove a key ignoring ASCII case, as header names require
    pub fn remove_ignore_ascii_case(&mut self, key: &str) -> Option<String> {
        let found = self
            .entries
            .keys()
            .find(|k| k.eq_ignore_ascii_case(key))
            .cloned()?;
        self.entries.remove(&found)
    }

    /// Check whether a key is present
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Drop all entries
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the mapping holds no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over entries in unspecified order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Mapping {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl<K: Into<String>, V: Into<String>> Extend<(K, V)> for Mapping {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        self.entries
            .extend(iter.into_iter().map(|(k, v)| (k.into(), v.into())));
    }
}

impl From<HashMap<String, String>> for Mapping {
    fn from(entries: HashMap<String, String>) -> Self {
        Self { entries }
    }
}

impl IntoIterator for Mapping {
    type Item = (String, String);
    type IntoIter = std::collections::hash_map::IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_write_wins() {
        let mut mapping = Mapping::new();
        mapping.set("key", "first").set("key", "second");

        assert_eq!(mapping.len(), 1);
        assert_eq!(mapping.get("key"), Some("second"));
    }

    #[test]
    fn test_merge_overwrites_only_present_keys() {
        let mut base = Mapping::new();
        base.set("a", "1").set("b", "2");

        let other: Mapping = [("b", "patched"), ("c", "3")].into_iter().collect();
        base.merge(other);

        assert_eq!(base.get("a"), Some("1"));
        assert_eq!(base.get("b"), Some("patched"));
        assert_eq!(base.get("c"), Some("3"));
    }

    #[test]
    fn test_case_insensitive_lookup() {
        let mut mapping = Mapping::new();
        mapping.set("Content-Type", "application/json");

        assert_eq!(
            mapping.get_ignore_ascii_case("content-type"),
            Some("application/json")
        );
        assert_eq!(mapping.get("content-type"), None);

        assert_eq!(
            mapping.remove_ignore_ascii_case("CONTENT-TYPE"),
            Some("application/json".to_string())
        );
        assert!(mapping.is_empty());
    }

    #[test]
    fn test_clear() {
        let mut mapping: Mapping = [("a", "1")].into_iter().collect();
        mapping.clear();
        assert!(mapping.is_empty());
    }
}

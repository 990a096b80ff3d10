//! Immutable bundle handles

use std::collections::HashMap;

/// One loaded (bundle name, language) partition: a frozen key→text map.
///
/// Handles are created on first successful load and never mutated. A reload
/// replaces the registry entry with a fresh handle; readers holding the old
/// one keep a consistent view.
#[derive(Debug)]
pub struct Bundle {
    name: String,
    language: String,
    entries: HashMap<String, String>,
}

impl Bundle {
    pub fn new(
        name: impl Into<String>,
        language: impl Into<String>,
        entries: HashMap<String, String>,
    ) -> Self {
        Self {
            name: name.into(),
            language: language.into(),
            entries,
        }
    }

    /// Bundle name, e.g. `i18n/day`
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Language subtag this partition was loaded for
    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

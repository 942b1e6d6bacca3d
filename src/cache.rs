//! Suggestion cache keyed by exact input text
//!
//! Entries live for the whole session. The key set is bounded by the distinct
//! strings one user types, so there is no eviction.

use std::collections::HashMap;
use std::sync::Arc;

use crate::suggestion::SuggestionsCollection;

/// State of one cached input text
#[derive(Debug, Clone)]
pub enum CacheEntry {
    /// A fetch was issued and has not answered yet
    Pending,
    /// The fetch answered with this collection
    Ready(Arc<SuggestionsCollection>),
}

#[derive(Debug, Default)]
pub struct SuggestionCache {
    entries: HashMap<String, CacheEntry>,
}

impl SuggestionCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&CacheEntry> {
        self.entries.get(key)
    }

    /// Resolved collection for `key`, if any
    pub fn ready(&self, key: &str) -> Option<Arc<SuggestionsCollection>> {
        match self.entries.get(key) {
            Some(CacheEntry::Ready(collection)) => Some(Arc::clone(collection)),
            _ => None,
        }
    }

    pub fn is_pending(&self, key: &str) -> bool {
        matches!(self.entries.get(key), Some(CacheEntry::Pending))
    }

    /// Record that a fetch for `key` is in flight
    ///
    /// Never downgrades a resolved entry.
    pub fn mark_pending(&mut self, key: &str) {
        self.entries
            .entry(key.to_string())
            .or_insert(CacheEntry::Pending);
    }

    pub fn put(&mut self, key: &str, collection: Arc<SuggestionsCollection>) {
        self.entries
            .insert(key.to_string(), CacheEntry::Ready(collection));
    }

    /// Drop a pending marker so the key can be fetched again
    pub fn forget(&mut self, key: &str) {
        if self.is_pending(key) {
            self.entries.remove(key);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
#[path = "cache_tests.rs"]
mod cache_tests;

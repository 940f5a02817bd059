//! In-process local store
//!
//! The tier that is always present. Holds every value the service has been
//! asked to store, whether or not the primary store accepted it, including
//! values with no JSON form. Expiry is evaluated by the caller; the store
//! only keeps raw entries.

use super::pattern::KeyPattern;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use memotier_domain::error::Result;
use memotier_domain::value_objects::{CacheEntry, CachedValue, is_expired};
use std::sync::Arc;
use std::time::Duration;

/// Concurrent key → entry map
///
/// Clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct LocalStore {
    entries: Arc<DashMap<String, CacheEntry>>,
}

impl LocalStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw entry for `key`, expired or not
    pub fn get(&self, key: &str) -> Option<CacheEntry> {
        self.entries.get(key).map(|entry| entry.value().clone())
    }

    /// Insert or overwrite `key`, written at `now` and living for `ttl`
    pub fn set(
        &self,
        key: &str,
        value: impl Into<CachedValue>,
        ttl: Duration,
        now: DateTime<Utc>,
    ) {
        self.entries
            .insert(key.to_string(), CacheEntry::new(value, now, ttl));
    }

    /// Insert a fully formed entry
    pub fn insert_entry(&self, key: &str, entry: CacheEntry) {
        self.entries.insert(key.to_string(), entry);
    }

    /// Remove `key`; true if it was present
    pub fn delete(&self, key: &str) -> bool {
        self.entries.remove(key).is_some()
    }

    /// Remove `key` only if the stored entry is expired at `now`
    ///
    /// A concurrent overwrite with a fresh entry survives.
    pub fn remove_if_expired(&self, key: &str, now: DateTime<Utc>) -> bool {
        self.entries
            .remove_if(key, |_, entry| is_expired(entry, now))
            .is_some()
    }

    /// Keys matching a shell-style glob
    pub fn keys_matching(&self, pattern: &str) -> Result<Vec<String>> {
        let pattern = KeyPattern::new(pattern)?;
        Ok(self.keys_matching_pattern(&pattern))
    }

    /// Keys matching an already compiled pattern
    pub fn keys_matching_pattern(&self, pattern: &KeyPattern) -> Vec<String> {
        self.entries
            .iter()
            .filter(|entry| pattern.matches(entry.key()))
            .map(|entry| entry.key().clone())
            .collect()
    }

    /// Drop every entry expired at `now`, returning how many were dropped
    pub fn purge_expired(&self, now: DateTime<Utc>) -> usize {
        let mut purged = 0;
        self.entries.retain(|_, entry| {
            let keep = !is_expired(entry, now);
            if !keep {
                purged += 1;
            }
            keep
        });
        purged
    }

    /// Number of stored entries, including expired ones not yet evicted
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing is stored
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Approximate footprint: key bytes plus value bytes
    pub fn approximate_size_bytes(&self) -> usize {
        self.entries
            .iter()
            .map(|entry| entry.key().len() + entry.value().approximate_size())
            .sum()
    }

    /// Remove everything
    pub fn clear(&self) {
        self.entries.clear();
    }
}

//! Cache statistics

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Connectivity of the primary store as seen by the cache service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum PrimaryStatus {
    /// No primary store URL was configured
    NotConfigured,
    /// Primary store wired up and answering
    Connected {
        /// Provider identifier (e.g. "redis")
        provider: String,
        /// Selected server diagnostics
        info: BTreeMap<String, String>,
    },
    /// Primary store configured but not usable
    Unavailable {
        /// Why the primary store is not usable
        reason: String,
    },
}

/// Snapshot of cache state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheStats {
    /// Namespace of the service
    pub namespace: String,
    /// Entries in the local store, including expired ones not yet evicted
    pub local_entries: usize,
    /// Approximate serialized size of the local store
    pub local_size_bytes: usize,
    /// Lookups answered from either tier
    pub hits: u64,
    /// Lookups answered by neither tier
    pub misses: u64,
    /// `hits / (hits + misses)`, 0.0 before any lookup
    pub hit_rate: f64,
    /// Primary store connectivity and diagnostics
    pub primary: PrimaryStatus,
}

/// Calculate hit rate from hits and misses
#[allow(clippy::cast_precision_loss)]
pub fn calculate_hit_rate(hits: u64, misses: u64) -> f64 {
    let total = hits + misses;
    if total > 0 {
        hits as f64 / total as f64
    } else {
        0.0
    }
}

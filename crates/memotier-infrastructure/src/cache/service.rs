//! Two-tier cache service
//!
//! Coordinates the optional primary store and the always-present local
//! store.
//!
//! # Read path
//!
//! The primary store is asked first and is authoritative when it answers
//! with a value. A miss, an error or an undecodable payload falls through to
//! the local store, where an expired entry is evicted on the spot.
//!
//! # Write path
//!
//! Every write lands in the local store. When a primary store is wired up the
//! same value is sent there as JSON text with a millisecond expiry; failures
//! are logged and otherwise ignored. Values with no JSON form are written with
//! [`CacheService::set_local_only`] and never reach the primary store.
//!
//! Nothing in this module ever surfaces a primary store failure to callers.

use super::local::LocalStore;
use super::stats::{CacheStats, PrimaryStatus, calculate_hit_rate};
use crate::config::CacheConfig;
use crate::constants::{PRIMARY_CONNECT_TIMEOUT_MS, PRIMARY_INFO_FIELDS};
use memotier_domain::constants::{
    DEFAULT_CACHE_NAMESPACE, DEFAULT_CACHE_TTL_SECS, PRIMARY_MIN_TTL_MS,
};
use memotier_domain::error::Result;
use memotier_domain::ports::{Clock, PrimaryStore, SystemClock};
use memotier_domain::value_objects::{CachedValue, is_expired};
use memotier_providers::RedisPrimaryStore;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::any::Any;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Two-tier cache service
///
/// Cheap to clone; clones share both tiers and the hit counters. Build one
/// at startup and hand clones to every consumer.
#[derive(Clone)]
pub struct CacheService {
    namespace: String,
    default_ttl: Duration,
    /// Present only if the primary store answered at build time
    primary: Option<Arc<dyn PrimaryStore>>,
    /// Why a configured primary store was dropped
    primary_unavailable: Option<String>,
    local: LocalStore,
    clock: Arc<dyn Clock>,
    stats_hits: Arc<AtomicU64>,
    stats_misses: Arc<AtomicU64>,
}

impl CacheService {
    /// Start building a service
    pub fn builder() -> CacheServiceBuilder {
        CacheServiceBuilder::default()
    }

    /// Service without a primary store
    pub fn local_only<S: Into<String>>(namespace: S, default_ttl: Duration) -> Self {
        Self::from_parts(
            namespace.into(),
            default_ttl,
            None,
            None,
            Arc::new(SystemClock),
        )
    }

    /// Build a service from configuration
    ///
    /// Connects to Redis when `redis_url` is set. An unreachable server is
    /// logged and the service runs local-only; this never fails.
    pub async fn from_config(config: &CacheConfig) -> Self {
        let mut builder = Self::builder()
            .namespace(config.namespace.clone())
            .default_ttl(config.default_ttl())
            .connect_timeout(config.connect_timeout());

        if let Some(url) = config.redis_url.as_deref() {
            match RedisPrimaryStore::connect(
                url,
                config.connect_timeout(),
                config.operation_timeout(),
            )
            .await
            {
                Ok(store) => builder = builder.primary(Arc::new(store)),
                Err(e) => {
                    info!(error = %e, "Primary store unavailable, running with local store only");
                    builder = builder.primary_unavailable(e.to_string());
                }
            }
        } else {
            info!("No primary store configured, running with local store only");
        }

        builder.build().await
    }

    fn from_parts(
        namespace: String,
        default_ttl: Duration,
        primary: Option<Arc<dyn PrimaryStore>>,
        primary_unavailable: Option<String>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            namespace,
            default_ttl,
            primary,
            primary_unavailable,
            local: LocalStore::new(),
            clock,
            stats_hits: Arc::new(AtomicU64::new(0)),
            stats_misses: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Namespace prepended to derived keys
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// TTL applied when `set` is called without one
    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    /// Whether a primary store is wired up
    pub fn has_primary(&self) -> bool {
        self.primary.is_some()
    }

    /// The local tier
    pub fn local(&self) -> &LocalStore {
        &self.local
    }
}

// Cache Operations Methods
impl CacheService {
    /// Look up `key` as JSON
    ///
    /// An entry written with [`set_local_only`](Self::set_local_only) has no
    /// JSON form and reads as absent here; use [`lookup`](Self::lookup).
    pub async fn get(&self, key: &str) -> Option<Value> {
        match self.lookup(key).await? {
            CachedValue::Json(value) => Some(value),
            CachedValue::Opaque(_) => {
                debug!(key, "Entry holds an in-process value, not returned as JSON");
                None
            }
        }
    }

    /// Look up `key`, including values held only in process
    pub async fn lookup(&self, key: &str) -> Option<CachedValue> {
        if let Some(primary) = &self.primary {
            match primary.get(key).await {
                Ok(Some(payload)) => match serde_json::from_str::<Value>(&payload) {
                    Ok(value) => {
                        self.record_hit();
                        debug!(key, tier = "primary", "Cache hit");
                        return Some(CachedValue::Json(value));
                    }
                    Err(e) => {
                        warn!(key, error = %e, "Discarding undecodable primary store payload");
                    }
                },
                Ok(None) => {}
                Err(e) => {
                    warn!(key, error = %e, "Primary store get failed, falling back to local store");
                }
            }
        }

        let now = self.clock.now();
        match self.local.get(key) {
            Some(entry) if !is_expired(&entry, now) => {
                self.record_hit();
                debug!(key, tier = "local", "Cache hit");
                Some(entry.value)
            }
            Some(_) => {
                self.local.remove_if_expired(key, now);
                self.record_miss();
                debug!(key, "Evicted expired local entry");
                None
            }
            None => {
                self.record_miss();
                debug!(key, "Cache miss");
                None
            }
        }
    }

    /// Look up `key` and decode it as `T`
    ///
    /// A value that does not decode is reported as a miss.
    pub async fn get_as<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let value = self.get(key).await?;
        match serde_json::from_value(value) {
            Ok(decoded) => Some(decoded),
            Err(e) => {
                warn!(key, error = %e, "Cached value does not match the requested type");
                None
            }
        }
    }

    /// Store `value` under `key`
    ///
    /// `ttl` falls back to the service default. Always returns true: the
    /// local write cannot fail and the primary write is best-effort.
    pub async fn set(&self, key: &str, value: Value, ttl: Option<Duration>) -> bool {
        let ttl = ttl.unwrap_or(self.default_ttl);
        let payload = self.primary.as_ref().map(|_| value.to_string());

        self.local.set(key, value, ttl, self.clock.now());

        if let (Some(primary), Some(payload)) = (&self.primary, payload) {
            if let Err(e) = primary
                .set_with_expiry(key, primary_ttl_ms(ttl), &payload)
                .await
            {
                warn!(key, error = %e, "Primary store set failed, value kept in local store only");
            }
        }
        true
    }

    /// Store a value with no JSON form under `key`, in the local store only
    ///
    /// Read it back with [`lookup`](Self::lookup). The primary store is not
    /// touched, so a stale primary entry under the same key still wins reads.
    pub fn set_local_only<T: Any + Send + Sync>(
        &self,
        key: &str,
        value: T,
        ttl: Option<Duration>,
    ) {
        let ttl = ttl.unwrap_or(self.default_ttl);
        let now = self.clock.now();
        self.local.set(key, CachedValue::opaque(value), ttl, now);
        debug!(key, "Stored in-process value in local store only");
    }

    /// Time left on the local copy of `key`, `None` when absent or expired
    pub fn remaining_ttl(&self, key: &str) -> Option<Duration> {
        self.local.get(key)?.remaining(self.clock.now())
    }

    /// Serialize `value` and store it under `key`
    ///
    /// Fails only when `value` cannot be represented as JSON, in which case
    /// nothing is stored.
    pub async fn set_serialized<T: Serialize + ?Sized>(
        &self,
        key: &str,
        value: &T,
        ttl: Option<Duration>,
    ) -> Result<bool> {
        let value = serde_json::to_value(value)?;
        Ok(self.set(key, value, ttl).await)
    }

    /// Remove `key` from both tiers
    ///
    /// # Returns
    /// True if at least one tier had the key
    pub async fn delete(&self, key: &str) -> bool {
        let mut removed = false;
        if let Some(primary) = &self.primary {
            match primary.delete(key).await {
                Ok(existed) => removed |= existed,
                Err(e) => warn!(key, error = %e, "Primary store delete failed"),
            }
        }
        removed |= self.local.delete(key);
        removed
    }

    /// Remove every key matching `pattern` from both tiers
    ///
    /// # Returns
    /// Keys removed from the primary store plus keys removed from the local
    /// store. A key held by both tiers is counted twice.
    pub async fn clear_by_pattern(&self, pattern: &str) -> usize {
        let mut removed = 0;

        if let Some(primary) = &self.primary {
            match primary.scan(pattern).await {
                Ok(keys) if keys.is_empty() => {}
                Ok(keys) => match primary.delete_many(&keys).await {
                    Ok(count) => removed += count,
                    Err(e) => warn!(pattern, error = %e, "Primary store bulk delete failed"),
                },
                Err(e) => warn!(pattern, error = %e, "Primary store scan failed"),
            }
        }

        match self.local.keys_matching(pattern) {
            Ok(keys) => removed += keys.iter().filter(|key| self.local.delete(key)).count(),
            Err(e) => warn!(pattern, error = %e, "Skipping local invalidation"),
        }

        debug!(pattern, removed, "Cleared cache entries by pattern");
        removed
    }

    /// Evict every expired local entry now
    pub fn purge_expired(&self) -> usize {
        let purged = self.local.purge_expired(self.clock.now());
        if purged > 0 {
            debug!(purged, "Purged expired local entries");
        }
        purged
    }

    /// Snapshot of both tiers
    pub async fn stats(&self) -> CacheStats {
        let hits = self.stats_hits.load(Ordering::Relaxed);
        let misses = self.stats_misses.load(Ordering::Relaxed);

        CacheStats {
            namespace: self.namespace.clone(),
            local_entries: self.local.len(),
            local_size_bytes: self.local.approximate_size_bytes(),
            hits,
            misses,
            hit_rate: calculate_hit_rate(hits, misses),
            primary: self.primary_status().await,
        }
    }

    async fn primary_status(&self) -> PrimaryStatus {
        match (&self.primary, &self.primary_unavailable) {
            (Some(primary), _) => match primary.info().await {
                Ok(info) => PrimaryStatus::Connected {
                    provider: primary.provider_name().to_string(),
                    info: select_info_fields(info),
                },
                Err(e) => PrimaryStatus::Unavailable {
                    reason: e.to_string(),
                },
            },
            (None, Some(reason)) => PrimaryStatus::Unavailable {
                reason: reason.clone(),
            },
            (None, None) => PrimaryStatus::NotConfigured,
        }
    }

    fn record_hit(&self) {
        self.stats_hits.fetch_add(1, Ordering::Relaxed);
    }

    fn record_miss(&self) {
        self.stats_misses.fetch_add(1, Ordering::Relaxed);
    }
}

impl fmt::Debug for CacheService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheService")
            .field("namespace", &self.namespace)
            .field("default_ttl", &self.default_ttl)
            .field("primary", &self.primary)
            .field("local_entries", &self.local.len())
            .finish_non_exhaustive()
    }
}

/// Builder for [`CacheService`]
pub struct CacheServiceBuilder {
    namespace: String,
    default_ttl: Duration,
    connect_timeout: Duration,
    primary: Option<Arc<dyn PrimaryStore>>,
    primary_unavailable: Option<String>,
    clock: Arc<dyn Clock>,
}

impl Default for CacheServiceBuilder {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_CACHE_NAMESPACE.to_string(),
            default_ttl: Duration::from_secs(DEFAULT_CACHE_TTL_SECS),
            connect_timeout: Duration::from_millis(PRIMARY_CONNECT_TIMEOUT_MS),
            primary: None,
            primary_unavailable: None,
            clock: Arc::new(SystemClock),
        }
    }
}

impl CacheServiceBuilder {
    /// Set the key namespace
    pub fn namespace<S: Into<String>>(mut self, namespace: S) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// Set the default TTL
    pub fn default_ttl(mut self, ttl: Duration) -> Self {
        self.default_ttl = ttl;
        self
    }

    /// Bound for the build-time ping
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Wire up a primary store; it is pinged once in [`build`](Self::build)
    pub fn primary(mut self, primary: Arc<dyn PrimaryStore>) -> Self {
        self.primary = Some(primary);
        self
    }

    /// Record that a configured primary store could not be reached
    pub fn primary_unavailable<S: Into<String>>(mut self, reason: S) -> Self {
        self.primary = None;
        self.primary_unavailable = Some(reason.into());
        self
    }

    /// Use `clock` for entry timestamps and expiry checks
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Ping the primary store, if any, and build the service
    ///
    /// A primary store that does not answer is dropped for the lifetime of
    /// the service.
    pub async fn build(self) -> CacheService {
        let mut unavailable = self.primary_unavailable;
        let primary = match self.primary {
            Some(primary) => {
                match tokio::time::timeout(self.connect_timeout, primary.ping()).await {
                    Ok(Ok(true)) => {
                        info!(
                            provider = primary.provider_name(),
                            "Primary store connected"
                        );
                        Some(primary)
                    }
                    Ok(Ok(false)) => {
                        info!(
                            provider = primary.provider_name(),
                            "Primary store did not answer ping, running with local store only"
                        );
                        unavailable = Some(format!(
                            "{} did not answer ping",
                            primary.provider_name()
                        ));
                        None
                    }
                    Ok(Err(e)) => {
                        info!(error = %e, "Primary store ping failed, running with local store only");
                        unavailable = Some(e.to_string());
                        None
                    }
                    Err(_) => {
                        info!("Primary store ping timed out, running with local store only");
                        unavailable = Some(format!(
                            "{} ping timed out",
                            primary.provider_name()
                        ));
                        None
                    }
                }
            }
            None => None,
        };

        CacheService::from_parts(
            self.namespace,
            self.default_ttl,
            primary,
            unavailable,
            self.clock,
        )
    }
}

/// TTL in milliseconds for the primary store, rounded up, at least one
///
/// Saturates at `u64::MAX` milliseconds.
fn primary_ttl_ms(ttl: Duration) -> u64 {
    let millis = u64::try_from(ttl.as_millis()).unwrap_or(u64::MAX);
    let partial = u64::from(ttl.subsec_nanos() % 1_000_000 > 0);
    millis.saturating_add(partial).max(PRIMARY_MIN_TTL_MS)
}

fn select_info_fields(info: BTreeMap<String, String>) -> BTreeMap<String, String> {
    let selected: BTreeMap<String, String> = info
        .iter()
        .filter(|(field, _)| PRIMARY_INFO_FIELDS.contains(&field.as_str()))
        .map(|(field, value)| (field.clone(), value.clone()))
        .collect();
    if selected.is_empty() { info } else { selected }
}

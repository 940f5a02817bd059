//! Primary Store Port
//!
//! Port for the networked key-value store that backs the cache when it is
//! reachable. Implementations speak a Redis-compatible command set; the
//! cache service treats every error returned here as recoverable and falls
//! back to its local store.

use crate::error::Result;
use async_trait::async_trait;
use std::collections::BTreeMap;

/// Primary Store Port
///
/// Payloads cross this boundary as serialized JSON text. Implementations
/// should bound every call by their own network timeout and report a
/// timeout as an error rather than blocking.
///
/// # Implementations
///
/// - **Redis**: `GET` / `PSETEX` / `DEL` / `KEYS` / `INFO` / `PING`
/// - **Null**: no-op provider that reports itself unreachable
///
/// # Example
///
/// ```ignore
/// use memotier_domain::ports::PrimaryStore;
///
/// if store.ping().await? {
///     store.set_with_expiry("ns:stats:abc", 60_000, r#"{"total":3}"#).await?;
///     let payload = store.get("ns:stats:abc").await?;
/// }
/// ```
#[async_trait]
pub trait PrimaryStore: Send + Sync + std::fmt::Debug {
    /// Check that the store answers
    ///
    /// Called once when the cache service is built.
    async fn ping(&self) -> Result<bool>;

    /// Fetch the raw payload stored under `key`
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `payload` under `key`, expiring after `ttl_ms` milliseconds
    ///
    /// `ttl_ms` is at least one.
    async fn set_with_expiry(&self, key: &str, ttl_ms: u64, payload: &str) -> Result<()>;

    /// Remove `key`
    ///
    /// # Returns
    /// True if the key existed
    async fn delete(&self, key: &str) -> Result<bool>;

    /// List keys matching a shell-style glob
    async fn scan(&self, pattern: &str) -> Result<Vec<String>>;

    /// Remove every key in `keys`
    ///
    /// # Returns
    /// Number of keys actually removed
    async fn delete_many(&self, keys: &[String]) -> Result<usize>;

    /// Server diagnostics as flat `field -> value` pairs
    async fn info(&self) -> Result<BTreeMap<String, String>>;

    /// Get the name/identifier of this provider implementation
    fn provider_name(&self) -> &str;
}

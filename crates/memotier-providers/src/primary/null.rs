//! Null primary store
//!
//! A primary store that stores nothing and never answers a ping. A cache
//! service built with it runs in local-only mode.

use async_trait::async_trait;
use memotier_domain::error::Result;
use memotier_domain::ports::PrimaryStore;
use std::collections::BTreeMap;

/// Null primary store that doesn't store anything
///
/// # Example
///
/// ```rust
/// use memotier_providers::NullPrimaryStore;
///
/// let store = NullPrimaryStore::new();
/// // All operations succeed but nothing is stored
/// ```
#[derive(Debug, Clone, Default)]
pub struct NullPrimaryStore;

impl NullPrimaryStore {
    /// Create a new null primary store
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl PrimaryStore for NullPrimaryStore {
    async fn ping(&self) -> Result<bool> {
        // Never reachable
        Ok(false)
    }

    async fn get(&self, _key: &str) -> Result<Option<String>> {
        Ok(None)
    }

    async fn set_with_expiry(&self, _key: &str, _ttl_ms: u64, _payload: &str) -> Result<()> {
        Ok(())
    }

    async fn delete(&self, _key: &str) -> Result<bool> {
        Ok(false)
    }

    async fn scan(&self, _pattern: &str) -> Result<Vec<String>> {
        Ok(Vec::new())
    }

    async fn delete_many(&self, _keys: &[String]) -> Result<usize> {
        Ok(0)
    }

    async fn info(&self) -> Result<BTreeMap<String, String>> {
        Ok(BTreeMap::new())
    }

    fn provider_name(&self) -> &str {
        "null"
    }
}

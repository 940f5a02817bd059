//! Shared test doubles
//!
//! Primary stores that live in memory so the cache service can be exercised
//! without a Redis server.

use async_trait::async_trait;
use memotier_domain::error::{Error, Result};
use memotier_domain::ports::PrimaryStore;
use memotier_infrastructure::cache::KeyPattern;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};

/// Primary store backed by a shared map
///
/// Clones share the map, so a test can keep one handle and give another to
/// the cache service.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPrimaryStore {
    entries: Arc<Mutex<HashMap<String, (String, u64)>>>,
}

impl InMemoryPrimaryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a raw payload directly, bypassing the cache service
    pub fn insert(&self, key: &str, payload: &str) {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), (payload.to_string(), 60_000));
    }

    /// Raw payload stored under `key`
    pub fn payload(&self, key: &str) -> Option<String> {
        self.entries.lock().unwrap().get(key).map(|(p, _)| p.clone())
    }

    /// TTL in milliseconds the payload under `key` was written with
    pub fn ttl_ms(&self, key: &str) -> Option<u64> {
        self.entries.lock().unwrap().get(key).map(|(_, ttl)| *ttl)
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }
}

#[async_trait]
impl PrimaryStore for InMemoryPrimaryStore {
    async fn ping(&self) -> Result<bool> {
        Ok(true)
    }

    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.payload(key))
    }

    async fn set_with_expiry(&self, key: &str, ttl_ms: u64, payload: &str) -> Result<()> {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), (payload.to_string(), ttl_ms));
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<bool> {
        Ok(self.entries.lock().unwrap().remove(key).is_some())
    }

    async fn scan(&self, pattern: &str) -> Result<Vec<String>> {
        let pattern = KeyPattern::new(pattern)?;
        Ok(self
            .entries
            .lock()
            .unwrap()
            .keys()
            .filter(|key| pattern.matches(key))
            .cloned()
            .collect())
    }

    async fn delete_many(&self, keys: &[String]) -> Result<usize> {
        let mut entries = self.entries.lock().unwrap();
        Ok(keys.iter().filter(|key| entries.remove(*key).is_some()).count())
    }

    async fn info(&self) -> Result<BTreeMap<String, String>> {
        let mut info = BTreeMap::new();
        info.insert("backend".to_string(), "memory".to_string());
        info.insert("keys".to_string(), self.len().to_string());
        Ok(info)
    }

    fn provider_name(&self) -> &str {
        "memory"
    }
}

/// Primary store that answers the ping and then fails every call
#[derive(Debug, Clone, Default)]
pub struct FailingPrimaryStore;

fn outage() -> Error {
    Error::primary_store("simulated outage")
}

#[async_trait]
impl PrimaryStore for FailingPrimaryStore {
    async fn ping(&self) -> Result<bool> {
        Ok(true)
    }

    async fn get(&self, _key: &str) -> Result<Option<String>> {
        Err(outage())
    }

    async fn set_with_expiry(&self, _key: &str, _ttl_ms: u64, _payload: &str) -> Result<()> {
        Err(outage())
    }

    async fn delete(&self, _key: &str) -> Result<bool> {
        Err(outage())
    }

    async fn scan(&self, _pattern: &str) -> Result<Vec<String>> {
        Err(outage())
    }

    async fn delete_many(&self, _keys: &[String]) -> Result<usize> {
        Err(outage())
    }

    async fn info(&self) -> Result<BTreeMap<String, String>> {
        Err(outage())
    }

    fn provider_name(&self) -> &str {
        "failing"
    }
}

/// Primary store whose ping errors
#[derive(Debug, Clone, Default)]
pub struct UnreachablePrimaryStore;

#[async_trait]
impl PrimaryStore for UnreachablePrimaryStore {
    async fn ping(&self) -> Result<bool> {
        Err(Error::primary_store("connection refused"))
    }

    async fn get(&self, _key: &str) -> Result<Option<String>> {
        Err(outage())
    }

    async fn set_with_expiry(&self, _key: &str, _ttl_ms: u64, _payload: &str) -> Result<()> {
        Err(outage())
    }

    async fn delete(&self, _key: &str) -> Result<bool> {
        Err(outage())
    }

    async fn scan(&self, _pattern: &str) -> Result<Vec<String>> {
        Err(outage())
    }

    async fn delete_many(&self, _keys: &[String]) -> Result<usize> {
        Err(outage())
    }

    async fn info(&self) -> Result<BTreeMap<String, String>> {
        Err(outage())
    }

    fn provider_name(&self) -> &str {
        "unreachable"
    }
}

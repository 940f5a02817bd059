//! Cache configuration types

use crate::constants::{PRIMARY_CONNECT_TIMEOUT_MS, PRIMARY_OPERATION_TIMEOUT_MS};
use memotier_domain::constants::{DEFAULT_CACHE_NAMESPACE, DEFAULT_CACHE_TTL_SECS};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Cache configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Namespace prepended to every derived key
    pub namespace: String,

    /// Default TTL in seconds for entries written without an explicit TTL
    pub default_ttl_secs: u64,

    /// Redis URL of the primary store; local-only when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redis_url: Option<String>,

    /// Timeout for connecting to and pinging the primary store
    pub connect_timeout_ms: u64,

    /// Timeout for each primary store command
    pub operation_timeout_ms: u64,
}

impl CacheConfig {
    /// Default TTL as a duration
    pub fn default_ttl(&self) -> Duration {
        Duration::from_secs(self.default_ttl_secs)
    }

    /// Connect timeout as a duration
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }

    /// Operation timeout as a duration
    pub fn operation_timeout(&self) -> Duration {
        Duration::from_millis(self.operation_timeout_ms)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_CACHE_NAMESPACE.to_string(),
            default_ttl_secs: DEFAULT_CACHE_TTL_SECS,
            redis_url: None,
            connect_timeout_ms: PRIMARY_CONNECT_TIMEOUT_MS,
            operation_timeout_ms: PRIMARY_OPERATION_TIMEOUT_MS,
        }
    }
}

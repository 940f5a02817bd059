//! Redis primary store
//!
//! Primary store implementation using Redis as the backend.
//!
//! ## Features
//!
//! - One multiplexed connection, opened at construction and cloned per call
//! - Every command bounded by an operation timeout
//! - `KEYS`-based pattern scan for bulk invalidation
//!
//! ## Example
//!
//! ```ignore
//! use memotier_providers::RedisPrimaryStore;
//! use std::time::Duration;
//!
//! let store = RedisPrimaryStore::connect(
//!     "redis://localhost:6379",
//!     Duration::from_secs(2),
//!     Duration::from_millis(500),
//! )
//! .await?;
//! ```

use async_trait::async_trait;
use memotier_domain::error::{Error, Result};
use memotier_domain::ports::PrimaryStore;
use redis::aio::MultiplexedConnection;
use redis::{Client, Cmd, FromRedisValue, RedisError};
use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

/// Redis primary store
///
/// Holds a single multiplexed connection; clones of the store share it.
#[derive(Clone)]
pub struct RedisPrimaryStore {
    connection: MultiplexedConnection,
    endpoint: String,
    operation_timeout: Duration,
}

impl RedisPrimaryStore {
    /// Open a connection to `url`
    ///
    /// # Arguments
    ///
    /// * `url` - Redis connection URL (e.g., "redis://localhost:6379")
    /// * `connect_timeout` - Upper bound for establishing the connection
    /// * `operation_timeout` - Upper bound for every later command
    pub async fn connect(
        url: &str,
        connect_timeout: Duration,
        operation_timeout: Duration,
    ) -> Result<Self> {
        let client = Client::open(url)
            .map_err(|e| redis_error("Failed to create Redis client", e))?;

        let endpoint = redact_credentials(url);
        tracing::debug!(endpoint = %endpoint, "Connecting to Redis primary store");

        let connection =
            match tokio::time::timeout(connect_timeout, client.get_multiplexed_async_connection())
                .await
            {
                Ok(Ok(conn)) => conn,
                Ok(Err(e)) => return Err(redis_error("Redis connection failed", e)),
                Err(_) => return Err(Error::primary_store("Redis connection timed out")),
            };

        Ok(Self {
            connection,
            endpoint,
            operation_timeout,
        })
    }

    /// Host part of the connection URL, credentials removed
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Run one command under the operation timeout
    async fn query<T: FromRedisValue>(&self, name: &str, cmd: Cmd) -> Result<T> {
        let mut conn = self.connection.clone();
        match tokio::time::timeout(self.operation_timeout, cmd.query_async::<T>(&mut conn)).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => Err(redis_error(&format!("Redis {name} failed"), e)),
            Err(_) => Err(Error::primary_store(format!("Redis {name} timed out"))),
        }
    }
}

#[async_trait]
impl PrimaryStore for RedisPrimaryStore {
    async fn ping(&self) -> Result<bool> {
        let reply: String = self.query("PING", redis::cmd("PING")).await?;
        Ok(reply.eq_ignore_ascii_case("PONG"))
    }

    async fn get(&self, key: &str) -> Result<Option<String>> {
        let mut cmd = redis::cmd("GET");
        cmd.arg(key);
        self.query("GET", cmd).await
    }

    async fn set_with_expiry(&self, key: &str, ttl_ms: u64, payload: &str) -> Result<()> {
        let mut cmd = redis::cmd("PSETEX");
        cmd.arg(key).arg(ttl_ms).arg(payload);
        self.query("PSETEX", cmd).await
    }

    async fn delete(&self, key: &str) -> Result<bool> {
        let mut cmd = redis::cmd("DEL");
        cmd.arg(key);
        let removed: i64 = self.query("DEL", cmd).await?;
        Ok(removed > 0)
    }

    async fn scan(&self, pattern: &str) -> Result<Vec<String>> {
        let mut cmd = redis::cmd("KEYS");
        cmd.arg(pattern);
        self.query("KEYS", cmd).await
    }

    async fn delete_many(&self, keys: &[String]) -> Result<usize> {
        if keys.is_empty() {
            return Ok(0);
        }
        let mut cmd = redis::cmd("DEL");
        for key in keys {
            cmd.arg(key);
        }
        self.query("DEL", cmd).await
    }

    async fn info(&self) -> Result<BTreeMap<String, String>> {
        let raw: String = self.query("INFO", redis::cmd("INFO")).await?;
        Ok(parse_info(&raw))
    }

    fn provider_name(&self) -> &str {
        "redis"
    }
}

impl fmt::Debug for RedisPrimaryStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedisPrimaryStore")
            .field("endpoint", &self.endpoint)
            .field("operation_timeout", &self.operation_timeout)
            .finish_non_exhaustive()
    }
}

fn redis_error(message: &str, err: RedisError) -> Error {
    Error::primary_store_with_source(format!("{message}: {err}"), err)
}

/// Parse the `INFO` reply into `field -> value` pairs
///
/// Section headers (`# Server`) and blank lines are skipped.
pub fn parse_info(raw: &str) -> BTreeMap<String, String> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split_once(':'))
        .map(|(field, value)| (field.to_string(), value.to_string()))
        .collect()
}

/// Strip `user:password@` from a connection URL
pub fn redact_credentials(url: &str) -> String {
    match (url.find("://"), url.rfind('@')) {
        (Some(scheme_end), Some(at)) if at > scheme_end => {
            format!("{}://***@{}", &url[..scheme_end], &url[at + 1..])
        }
        _ => url.to_string(),
    }
}

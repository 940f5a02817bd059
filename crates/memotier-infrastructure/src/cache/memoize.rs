//! Memoization wrapper
//!
//! Wraps an async function so that repeated calls with structurally equal
//! arguments are answered from the cache. A result with no JSON form is kept
//! in the local store only.
//!
//! ## Example
//!
//! ```ignore
//! use memotier_infrastructure::cache::Memoize;
//! use memotier_domain::CallArgs;
//!
//! let count_missions = Memoize::new(&cache)
//!     .ttl(Duration::from_secs(60))
//!     .key_prefix("stats")
//!     .wrap("count_missions", |args: CallArgs| async move {
//!         let status: String = args.get(0)?;
//!         repository.count_by_status(&status).await
//!     });
//!
//! let open = count_missions.call(CallArgs::new().arg("open")).await?;
//! ```

use super::service::CacheService;
use memotier_domain::value_objects::{CacheKey, CachedValue, CallArgs, derive_key};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fmt;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};

/// Builder for [`Memoized`] functions
#[derive(Debug, Clone)]
pub struct Memoize {
    cache: CacheService,
    ttl: Option<Duration>,
    key_prefix: Option<String>,
}

impl Memoize {
    /// Memoize against `cache` with its default TTL and no prefix
    pub fn new(cache: &CacheService) -> Self {
        Self {
            cache: cache.clone(),
            ttl: None,
            key_prefix: None,
        }
    }

    /// TTL for stored results
    pub fn ttl(mut self, ttl: Duration) -> Self {
        self.ttl = Some(ttl);
        self
    }

    /// Prefix joined to the function name with `:`
    pub fn key_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.key_prefix = Some(prefix.into());
        self
    }

    /// Wrap `f` under `name`
    pub fn wrap<F>(self, name: &str, f: F) -> Memoized<F> {
        let logical_name = match self.key_prefix {
            Some(prefix) => format!("{prefix}:{name}"),
            None => name.to_string(),
        };
        Memoized {
            cache: self.cache,
            ttl: self.ttl,
            logical_name,
            f,
        }
    }
}

/// A memoized async function
pub struct Memoized<F> {
    cache: CacheService,
    ttl: Option<Duration>,
    logical_name: String,
    f: F,
}

impl<F> Memoized<F> {
    /// Name hashed into every key, prefix included
    pub fn logical_name(&self) -> &str {
        &self.logical_name
    }

    /// Key a call with `args` is cached under
    pub fn key_for(&self, args: &CallArgs) -> CacheKey {
        derive_key(self.cache.namespace(), &self.logical_name, args)
    }

    /// Drop the cached result for `args`
    pub async fn invalidate(&self, args: &CallArgs) -> bool {
        self.cache.delete(self.key_for(args).as_str()).await
    }

    /// Call through the cache
    ///
    /// Errors from the wrapped function are returned as-is and leave the
    /// cache untouched. A result that cannot be serialized is stored in the
    /// local store only and handed back as a clone on later hits.
    pub async fn call<Fut, T, E>(&self, args: CallArgs) -> Result<T, E>
    where
        F: Fn(CallArgs) -> Fut,
        Fut: Future<Output = Result<T, E>>,
        T: Serialize + DeserializeOwned + Clone + Send + Sync + 'static,
    {
        let key = self.key_for(&args);

        match self.cache.lookup(key.as_str()).await {
            Some(CachedValue::Json(cached)) => match serde_json::from_value::<T>(cached) {
                Ok(value) => return Ok(value),
                Err(e) => {
                    debug!(key = %key, error = %e, "Cached value has a different shape, recomputing");
                }
            },
            Some(cached @ CachedValue::Opaque(_)) => match cached.downcast_ref::<T>() {
                Some(value) => return Ok(value.clone()),
                None => debug!(key = %key, "Cached value has a different type, recomputing"),
            },
            None => {}
        }

        let value = (self.f)(args).await?;

        match serde_json::to_value(&value) {
            Ok(json) => {
                self.cache.set(key.as_str(), json, self.ttl).await;
            }
            Err(e) => {
                warn!(
                    function = %self.logical_name,
                    error = %e,
                    "Result is not serializable, caching it in the local store only"
                );
                self.cache
                    .set_local_only(key.as_str(), value.clone(), self.ttl);
            }
        }

        Ok(value)
    }
}

impl<F> fmt::Debug for Memoized<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Memoized")
            .field("logical_name", &self.logical_name)
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

//! Domain Value Objects
//!
//! Immutable value objects describing what the cache stores and how it
//! names things.
//!
//! ## Value Objects
//!
//! | Value Object | Description |
//! |--------------|-------------|
//! | [`CacheKey`] | Namespaced, digest-bearing cache key |
//! | [`CallArgs`] | Positional and keyword arguments of a memoized call |
//! | [`CacheEntry`] | Stored value with creation and expiry timestamps |
//! | [`CachedValue`] | JSON document or in-process value held by an entry |

/// Cache key derivation
pub mod cache_key;
/// Canonical JSON capture of call arguments
pub mod capture;
/// Cache entries and the expiration policy
pub mod entry;

pub use cache_key::{CacheKey, CallArgs, canonical_json, derive_key};
pub use entry::{CacheEntry, CachedValue, is_expired};

//! Cache entries and the expiration policy

use chrono::{DateTime, TimeDelta, Utc};
use serde_json::Value;
use std::any::Any;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Value Object: Cached Value
///
/// What a local entry holds. JSON values are mirrored to the primary store;
/// opaque values have no JSON form and never leave the process.
#[derive(Clone)]
pub enum CachedValue {
    /// A JSON document
    Json(Value),
    /// An in-process value that could not be serialized
    Opaque(Arc<dyn Any + Send + Sync>),
}

impl CachedValue {
    /// Wrap an in-process value
    pub fn opaque<T: Any + Send + Sync>(value: T) -> Self {
        Self::Opaque(Arc::new(value))
    }

    /// The JSON document, if this is one
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Self::Json(value) => Some(value),
            Self::Opaque(_) => None,
        }
    }

    /// Take the JSON document, if this is one
    pub fn into_json(self) -> Option<Value> {
        match self {
            Self::Json(value) => Some(value),
            Self::Opaque(_) => None,
        }
    }

    /// True for in-process values
    pub fn is_opaque(&self) -> bool {
        matches!(self, Self::Opaque(_))
    }

    /// Borrow an in-process value as `T`
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        match self {
            Self::Opaque(value) => value.downcast_ref::<T>(),
            Self::Json(_) => None,
        }
    }

    /// Serialized length for JSON, in-memory size for opaque values
    pub fn approximate_size(&self) -> usize {
        match self {
            Self::Json(value) => value.to_string().len(),
            Self::Opaque(value) => std::mem::size_of_val(value.as_ref()),
        }
    }
}

impl fmt::Debug for CachedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json(value) => f.debug_tuple("Json").field(value).finish(),
            Self::Opaque(_) => f.write_str("Opaque(..)"),
        }
    }
}

/// JSON values compare structurally, opaque values by identity
impl PartialEq for CachedValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Json(a), Self::Json(b)) => a == b,
            (Self::Opaque(a), Self::Opaque(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl PartialEq<Value> for CachedValue {
    fn eq(&self, other: &Value) -> bool {
        self.as_json() == Some(other)
    }
}

impl From<Value> for CachedValue {
    fn from(value: Value) -> Self {
        Self::Json(value)
    }
}

/// Value Object: Cache Entry
///
/// A value held by the local store together with its lifetime bounds.
/// Entries are never mutated; an overwrite replaces the whole entry.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry {
    /// The cached value
    pub value: CachedValue,
    /// When the entry was written
    pub created_at: DateTime<Utc>,
    /// When the entry stops being served; `None` means unknown
    pub expires_at: Option<DateTime<Utc>>,
}

impl CacheEntry {
    /// Create an entry written at `now` that lives for `ttl`
    ///
    /// A deadline past the calendar range saturates to the latest
    /// representable instant.
    pub fn new(value: impl Into<CachedValue>, now: DateTime<Utc>, ttl: Duration) -> Self {
        let expires_at = TimeDelta::from_std(ttl)
            .ok()
            .and_then(|delta| now.checked_add_signed(delta))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);

        Self {
            value: value.into(),
            created_at: now,
            expires_at: Some(expires_at),
        }
    }

    /// Whether the entry is stale at `now`
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        is_expired(self, now)
    }

    /// Time left before the entry expires, `None` once stale or unknown
    pub fn remaining(&self, now: DateTime<Utc>) -> Option<Duration> {
        let expires_at = self.expires_at?;
        if now > expires_at {
            return None;
        }
        (expires_at - now).to_std().ok()
    }

    /// Approximate size of the value in bytes
    pub fn approximate_size(&self) -> usize {
        self.value.approximate_size()
    }
}

/// Expiration policy
///
/// An entry is expired once `now` is strictly past `expires_at`. An entry
/// without a known deadline is always expired.
pub fn is_expired(entry: &CacheEntry, now: DateTime<Utc>) -> bool {
    match entry.expires_at {
        Some(expires_at) => now > expires_at,
        None => true,
    }
}

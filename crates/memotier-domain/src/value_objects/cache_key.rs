//! Cache key derivation
//!
//! Maps a logical function name and its call arguments to a stable key of the
//! form `<namespace>:<logical-name>:<sha256-hex>`. Arguments are rendered as
//! canonical JSON (object keys sorted at every level) before hashing, so the
//! order in which keyword arguments were supplied never changes the key.

use super::capture::capture_canonical;
use crate::constants::CACHE_KEY_SEPARATOR;
use crate::error::{Error, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::borrow::Borrow;
use std::collections::BTreeMap;
use std::fmt::{self, Write as _};

/// Value Object: Cache Key
///
/// An opaque string key. Keys produced by [`derive_key`] always have three
/// `:`-separated parts: namespace, logical name (which may itself contain
/// `:` when a prefix was used) and a hex digest. Keys built with
/// [`CacheKey::from_raw`] carry no such guarantee.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CacheKey(String);

impl CacheKey {
    /// Wrap an arbitrary string as a key
    pub fn from_raw<S: Into<String>>(key: S) -> Self {
        Self(key.into())
    }

    /// Borrow the key text
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Namespace segment (text before the first separator)
    pub fn namespace(&self) -> Option<&str> {
        self.0.split_once(CACHE_KEY_SEPARATOR).map(|(ns, _)| ns)
    }

    /// Logical name segment (text between the first and last separator)
    pub fn logical_name(&self) -> Option<&str> {
        let (_, rest) = self.0.split_once(CACHE_KEY_SEPARATOR)?;
        let (name, _) = rest.rsplit_once(CACHE_KEY_SEPARATOR)?;
        Some(name)
    }

    /// Digest segment (text after the last separator)
    pub fn digest(&self) -> Option<&str> {
        let (_, rest) = self.0.split_once(CACHE_KEY_SEPARATOR)?;
        rest.rsplit_once(CACHE_KEY_SEPARATOR).map(|(_, digest)| digest)
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CacheKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for CacheKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<CacheKey> for String {
    fn from(key: CacheKey) -> Self {
        key.0
    }
}

/// Value Object: Call Arguments
///
/// Positional and keyword arguments of a memoized call, captured as JSON.
///
/// ## Business Rules
///
/// - Any `Serialize` value can be captured
/// - Map keys JSON cannot express (tuples, numbers) are captured as their
///   canonical JSON text, so iteration order never reaches the key
/// - Values whose `Serialize` implementation fails fall back to their `Debug` text
/// - Keyword arguments are kept sorted by name
///
/// ## Example
///
/// ```rust
/// use memotier_domain::CallArgs;
///
/// let args = CallArgs::new().arg(5).kwarg("page_size", 20);
/// assert_eq!(args.get::<i64>(0).unwrap(), 5);
/// assert_eq!(args.kwarg_or("page", 1_u32).unwrap(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CallArgs {
    positional: Vec<Value>,
    keyword: BTreeMap<String, Value>,
}

impl CallArgs {
    /// Create an empty argument list
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from already-captured JSON parts
    pub fn from_parts(positional: Vec<Value>, keyword: BTreeMap<String, Value>) -> Self {
        Self {
            positional,
            keyword,
        }
    }

    /// Append a positional argument
    pub fn arg<T: Serialize + fmt::Debug>(mut self, value: T) -> Self {
        self.push_arg(&value);
        self
    }

    /// Set a keyword argument, replacing any previous value for `name`
    pub fn kwarg<T: Serialize + fmt::Debug>(mut self, name: &str, value: T) -> Self {
        self.set_kwarg(name, &value);
        self
    }

    /// Append a positional argument in place
    pub fn push_arg<T: Serialize + fmt::Debug + ?Sized>(&mut self, value: &T) {
        self.positional.push(capture(value));
    }

    /// Set a keyword argument in place
    pub fn set_kwarg<T: Serialize + fmt::Debug + ?Sized>(&mut self, name: &str, value: &T) {
        self.keyword.insert(name.to_string(), capture(value));
    }

    /// Positional arguments in call order
    pub fn positional(&self) -> &[Value] {
        &self.positional
    }

    /// Keyword arguments sorted by name
    pub fn keyword(&self) -> &BTreeMap<String, Value> {
        &self.keyword
    }

    /// True when there are no arguments at all
    pub fn is_empty(&self) -> bool {
        self.positional.is_empty() && self.keyword.is_empty()
    }

    /// Decode the positional argument at `index`
    pub fn get<T: DeserializeOwned>(&self, index: usize) -> Result<T> {
        let value = self.positional.get(index).ok_or_else(|| {
            Error::invalid_argument(format!("missing positional argument {index}"))
        })?;
        serde_json::from_value(value.clone()).map_err(|e| {
            Error::invalid_argument(format!("positional argument {index} has wrong type: {e}"))
        })
    }

    /// Decode the keyword argument `name`, if present
    pub fn kwarg_value<T: DeserializeOwned>(&self, name: &str) -> Result<Option<T>> {
        match self.keyword.get(name) {
            Some(value) => serde_json::from_value(value.clone()).map(Some).map_err(|e| {
                Error::invalid_argument(format!("keyword argument '{name}' has wrong type: {e}"))
            }),
            None => Ok(None),
        }
    }

    /// Decode the keyword argument `name`, falling back to `default`
    pub fn kwarg_or<T: DeserializeOwned>(&self, name: &str, default: T) -> Result<T> {
        Ok(self.kwarg_value(name)?.unwrap_or(default))
    }
}

fn capture<T: Serialize + fmt::Debug + ?Sized>(value: &T) -> Value {
    serde_json::to_value(value)
        .or_else(|_| capture_canonical(value))
        .unwrap_or_else(|_| Value::String(format!("{value:?}")))
}

/// Derive the cache key for a call
///
/// The digest covers `logical_name`, the canonical positional list and the
/// canonical keyword map. Never fails.
pub fn derive_key(namespace: &str, logical_name: &str, args: &CallArgs) -> CacheKey {
    let mut positional = String::new();
    write_array(&args.positional, &mut positional);

    let mut keyword = String::new();
    write_object(args.keyword.iter(), &mut keyword);

    let mut hasher = Sha256::new();
    hasher.update(logical_name.as_bytes());
    hasher.update(CACHE_KEY_SEPARATOR.as_bytes());
    hasher.update(positional.as_bytes());
    hasher.update(CACHE_KEY_SEPARATOR.as_bytes());
    hasher.update(keyword.as_bytes());
    let digest = hex::encode(hasher.finalize());

    CacheKey(format!(
        "{namespace}{CACHE_KEY_SEPARATOR}{logical_name}{CACHE_KEY_SEPARATOR}{digest}"
    ))
}

/// Render a JSON value with object keys sorted at every level
pub fn canonical_json(value: &Value) -> String {
    let mut out = String::new();
    write_canonical(value, &mut out);
    out
}

fn write_canonical(value: &Value, out: &mut String) {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(&String, &Value)> = map.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));
            write_object(entries.into_iter(), out);
        }
        Value::Array(items) => write_array(items, out),
        scalar => {
            let _ = write!(out, "{scalar}");
        }
    }
}

fn write_array(items: &[Value], out: &mut String) {
    out.push('[');
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        write_canonical(item, out);
    }
    out.push(']');
}

// Entries must already be sorted by key.
fn write_object<'a>(entries: impl Iterator<Item = (&'a String, &'a Value)>, out: &mut String) {
    out.push('{');
    for (i, (name, value)) in entries.enumerate() {
        if i > 0 {
            out.push(',');
        }
        let _ = write!(out, "{}", Value::String(name.clone()));
        out.push(':');
        write_canonical(value, out);
    }
    out.push('}');
}

//! # Domain Layer
//!
//! Core types and contracts for the memotier cache.
//!
//! The domain layer owns everything that does not touch the network or the
//! process: how cache keys are derived, what a stored entry looks like, when an
//! entry counts as expired, and the ports the outer layers implement.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`constants`] | Namespace, TTL and key-format constants |
//! | [`error`] | Domain error type and `Result` alias |
//! | [`ports`] | `PrimaryStore` and `Clock` boundary traits |
//! | [`value_objects`] | `CacheKey`, `CallArgs`, `CacheEntry` |

pub mod constants;
pub mod error;
pub mod ports;
pub mod value_objects;

pub use error::{Error, Result};
pub use ports::{Clock, PrimaryStore, SystemClock};
pub use value_objects::{CacheEntry, CacheKey, CachedValue, CallArgs, derive_key, is_expired};

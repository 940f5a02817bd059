//! Two-tier cache
//!
//! The [`CacheService`] orchestrates an optional networked primary store and
//! the always-present [`LocalStore`]. [`Memoize`] and the
//! [`invalidation`] helpers are the two ways application code is expected to
//! reach it.

pub mod invalidation;
pub mod local;
pub mod memoize;
pub mod pattern;
pub mod service;
pub mod stats;

pub use invalidation::EntityKind;
pub use local::LocalStore;
pub use memoize::{Memoize, Memoized};
pub use pattern::KeyPattern;
pub use service::{CacheService, CacheServiceBuilder};
pub use stats::{CacheStats, PrimaryStatus, calculate_hit_rate};

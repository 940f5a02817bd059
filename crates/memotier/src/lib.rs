//! # memotier
//!
//! A two-tier memoization cache: an optional Redis primary store in front
//! of an always-present in-process local store, sharing one TTL policy and
//! one key-derivation scheme.
//!
//! ## Example
//!
//! ```ignore
//! use memotier::{CacheService, CallArgs, ConfigLoader, Memoize};
//! use memotier::infrastructure::cache::invalidation::invalidate_mission_cache;
//!
//! let config = ConfigLoader::new().load()?;
//! let cache = CacheService::from_config(&config.cache).await;
//!
//! let missions_by_status = Memoize::new(&cache)
//!     .key_prefix("missions")
//!     .wrap("by_status", |args: CallArgs| async move {
//!         let status: String = args.get(0)?;
//!         repository.missions_by_status(&status).await
//!     });
//!
//! let open = missions_by_status.call(CallArgs::new().arg("open")).await?;
//!
//! // After writing a mission
//! invalidate_mission_cache(&cache, Some(&mission_id)).await;
//! ```
//!
//! ## Architecture
//!
//! - `domain` - keys, entries, expiration policy, ports and errors
//! - `providers` - primary store adapters (Redis, null)
//! - `infrastructure` - cache service, memoization, invalidation, config, logging
//! - [`cli`] - the `memotier` admin command

/// Domain layer - keys, entries and ports
///
/// Re-exports from the domain crate for convenience
pub mod domain {
    pub use memotier_domain::*;
}

/// Provider layer - primary store adapters
///
/// Re-exports from the providers crate for convenience
pub mod providers {
    pub use memotier_providers::*;
}

/// Infrastructure layer - cache service, config and logging
///
/// Re-exports from the infrastructure crate for convenience
pub mod infrastructure {
    pub use memotier_infrastructure::*;
}

pub mod cli;

// Re-export commonly used domain types at the crate root
pub use domain::*;

// Re-export the cache surface at the crate root
pub use infrastructure::cache::invalidation;
pub use infrastructure::{
    AppConfig, CacheConfig, CacheService, CacheStats, ConfigLoader, EntityKind, LoggingConfig,
    Memoize, Memoized, PrimaryStatus, init_logging,
};

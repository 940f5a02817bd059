//! # Infrastructure Layer
//!
//! Everything between the domain types and a running process: the cache
//! service itself, memoization, invalidation, configuration and logging.
//! Primary store adapters live in `memotier-providers`.
//!
//! ## Module Categories
//!
//! ### Caching
//! | Module | Description |
//! |--------|-------------|
//! | [`cache`] | Two-tier cache service, memoization, invalidation helpers |
//! | [`clock`] | System and manual clocks |
//!
//! ### Configuration
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | Layered TOML and environment configuration |
//! | [`constants`] | Centralized configuration constants |
//!
//! ### Observability & Errors
//! | Module | Description |
//! |--------|-------------|
//! | [`logging`] | Structured logging with tracing |
//! | [`error_ext`] | Context helpers for foreign errors |

pub mod cache;
pub mod clock;
pub mod config;
pub mod constants;
pub mod error_ext;
pub mod logging;

pub use cache::{CacheService, CacheStats, EntityKind, Memoize, Memoized, PrimaryStatus};
pub use config::{AppConfig, CacheConfig, ConfigLoader, LoggingConfig};
pub use logging::init_logging;

//! Primary Store Provider Implementations
//!
//! ## Provider Selection Guide
//!
//! - **Tests / local-only deployments**: `NullPrimaryStore`, or no primary at all
//! - **Shared cache across restarts of the UI worker**: `RedisPrimaryStore`

pub mod null;
#[cfg(feature = "primary-redis")]
pub mod redis;

pub use null::NullPrimaryStore;
#[cfg(feature = "primary-redis")]
pub use redis::RedisPrimaryStore;

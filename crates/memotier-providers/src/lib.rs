//! # Provider Implementations
//!
//! Adapters for the [`PrimaryStore`](memotier_domain::PrimaryStore) port.
//!
//! | Provider | Feature | Description |
//! |----------|---------|-------------|
//! | [`NullPrimaryStore`](primary::NullPrimaryStore) | always | No-op store that reports itself unreachable |
//! | [`RedisPrimaryStore`](primary::RedisPrimaryStore) | `primary-redis` | Redis over a multiplexed async connection |

pub mod primary;

pub use primary::NullPrimaryStore;
#[cfg(feature = "primary-redis")]
pub use primary::RedisPrimaryStore;

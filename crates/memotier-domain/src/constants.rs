//! Domain layer constants
//!
//! Constants that shape cache keys and entry lifetimes. Infrastructure
//! concerns (timeouts, config file names) live in
//! `memotier_infrastructure::constants`.

// ============================================================================
// KEY FORMAT CONSTANTS
// ============================================================================

/// Default namespace prepended to every derived cache key
pub const DEFAULT_CACHE_NAMESPACE: &str = "consultator";

/// Separator between the namespace, logical name and digest of a key
pub const CACHE_KEY_SEPARATOR: &str = ":";

// ============================================================================
// TTL CONSTANTS
// ============================================================================

/// Default TTL for cache entries (5 minutes)
pub const DEFAULT_CACHE_TTL_SECS: u64 = 300;

/// Smallest TTL sent to the primary store, in milliseconds (`PSETEX` rejects zero)
pub const PRIMARY_MIN_TTL_MS: u64 = 1;

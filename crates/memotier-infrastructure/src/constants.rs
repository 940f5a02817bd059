//! Infrastructure layer constants
//!
//! Contains constants that are part of the infrastructure implementation.
//! Key-format and TTL constants are defined in `memotier_domain::constants`.

// ============================================================================
// CONFIGURATION CONSTANTS
// ============================================================================

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "memotier.toml";

/// Default configuration directory name
pub const DEFAULT_CONFIG_DIR: &str = "memotier";

/// Environment variable prefix for configuration
pub const CONFIG_ENV_PREFIX: &str = "MEMOTIER";

/// Separator between nested keys in environment variables
pub const CONFIG_ENV_SEPARATOR: &str = "__";

// ============================================================================
// PRIMARY STORE CONSTANTS
// ============================================================================

/// Timeout for connecting to and pinging the primary store (milliseconds)
pub const PRIMARY_CONNECT_TIMEOUT_MS: u64 = 2_000;

/// Timeout for a single primary store command (milliseconds)
pub const PRIMARY_OPERATION_TIMEOUT_MS: u64 = 500;

/// `INFO` fields surfaced in cache statistics
pub const PRIMARY_INFO_FIELDS: &[&str] = &[
    "redis_version",
    "uptime_in_seconds",
    "connected_clients",
    "used_memory_human",
    "total_commands_processed",
    "keyspace_hits",
    "keyspace_misses",
];

// ============================================================================
// LOGGING CONSTANTS
// ============================================================================

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Environment variable overriding the log filter
pub const LOG_FILTER_ENV: &str = "MEMOTIER_LOG";

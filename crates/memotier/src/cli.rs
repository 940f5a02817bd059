//! Admin command line
//!
//! | Command | Description |
//! |---------|-------------|
//! | `stats` | Local store size, hit counters and primary store diagnostics |
//! | `get <key>` | Look up a raw key and the time left on its local copy |
//! | `set <key> <json>` | Store a value, optionally with `--ttl` |
//! | `delete <key>` | Remove a key from both tiers |
//! | `clear <pattern>` | Remove every key matching a glob |
//! | `invalidate <entity>` | Clear the cached reads of one entity kind |
//! | `key <name>` | Print the key a memoized call would use |
//!
//! Every command builds its own cache service, so the local store starts
//! empty; `get`, `delete` and `clear` are only interesting with a Redis
//! primary store configured.

use clap::{Parser, Subcommand};
use memotier_domain::error::{Error, Result};
use memotier_domain::value_objects::{CallArgs, derive_key};
use memotier_infrastructure::cache::invalidation::{self, EntityKind, entity_pattern};
use memotier_infrastructure::cache::{CacheService, KeyPattern};
use memotier_infrastructure::config::{AppConfig, ConfigLoader};
use serde_json::{Value, json};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// Command line interface for memotier
#[derive(Parser, Debug)]
#[command(name = "memotier")]
#[command(about = "memotier - Two-tier memoization cache admin")]
#[command(version)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Admin subcommands
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Show cache statistics
    Stats,

    /// Look up a key
    Get {
        /// Full cache key
        key: String,
    },

    /// Store a JSON value under a key
    Set {
        /// Full cache key
        key: String,
        /// Value as JSON; anything that does not parse is stored as a string
        #[arg(value_parser = parse_json_value)]
        value: Value,
        /// Lifetime in seconds, defaults to the configured TTL
        #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
        ttl: Option<u64>,
    },

    /// Remove a key from both tiers
    Delete {
        /// Full cache key
        key: String,
    },

    /// Remove every key matching a glob pattern
    Clear {
        /// Redis-style glob, e.g. `consultator:*search*`
        pattern: String,
    },

    /// Clear the cached reads of an entity kind
    Invalidate {
        /// consultant, business_manager, mission, practice, skill, search or statistics
        #[arg(value_parser = parse_entity)]
        entity: EntityKind,
        /// Narrow the invalidation to one entity id
        #[arg(long)]
        id: Option<String>,
    },

    /// Print the key a memoized call would be cached under
    Key {
        /// Function name
        name: String,
        /// Positional argument as JSON (repeatable)
        #[arg(long = "arg", value_parser = parse_json_value)]
        args: Vec<Value>,
        /// Keyword argument as name=JSON (repeatable)
        #[arg(long = "kwarg", value_parser = parse_kwarg)]
        kwargs: Vec<(String, Value)>,
        /// Key prefix joined to the name with `:`
        #[arg(long)]
        prefix: Option<String>,
    },
}

/// Load configuration, set up logging, run one command and print its output
pub async fn run(cli: Cli) -> std::result::Result<(), Box<dyn std::error::Error>> {
    let config = load_config(cli.config.as_deref())?;
    memotier_infrastructure::logging::init_logging(&config.logging)?;

    let cache = CacheService::from_config(&config.cache).await;
    let output = execute(&cli.command, &cache).await?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

/// Load configuration from optional path
fn load_config(config_path: Option<&Path>) -> Result<AppConfig> {
    let loader = match config_path {
        Some(path) => ConfigLoader::new().with_config_path(path),
        None => ConfigLoader::new(),
    };
    loader.load()
}

/// Run `command` against `cache` and describe the outcome as JSON
pub async fn execute(command: &Command, cache: &CacheService) -> Result<Value> {
    debug!(?command, "Executing command");
    let output = match command {
        Command::Stats => serde_json::to_value(cache.stats().await)?,
        Command::Get { key } => {
            let value = cache.get(key).await;
            let local_ttl_secs = cache.remaining_ttl(key).map(|left| left.as_secs());
            json!({
                "key": key,
                "hit": value.is_some(),
                "value": value,
                "local_ttl_secs": local_ttl_secs,
            })
        }
        Command::Set { key, value, ttl } => {
            let ttl = ttl.map(Duration::from_secs);
            let stored = cache.set(key, value.clone(), ttl).await;
            let ttl_secs = ttl.unwrap_or_else(|| cache.default_ttl()).as_secs();
            json!({ "key": key, "stored": stored, "ttl_secs": ttl_secs })
        }
        Command::Delete { key } => {
            json!({ "key": key, "deleted": cache.delete(key).await })
        }
        Command::Clear { pattern } => {
            KeyPattern::new(pattern)?;
            json!({ "pattern": pattern, "removed": cache.clear_by_pattern(pattern).await })
        }
        Command::Invalidate { entity, id } => {
            let id = id.as_ref().map(|id| id as &dyn std::fmt::Display);
            let pattern = entity_pattern(cache.namespace(), *entity, id);
            let removed = invalidation::invalidate(cache, *entity, id).await;
            json!({ "entity": entity, "pattern": pattern, "removed": removed })
        }
        Command::Key {
            name,
            args,
            kwargs,
            prefix,
        } => {
            let logical_name = match prefix {
                Some(prefix) => format!("{prefix}:{name}"),
                None => name.clone(),
            };
            let call_args = CallArgs::from_parts(args.clone(), kwargs.iter().cloned().collect());
            let key = derive_key(cache.namespace(), &logical_name, &call_args);
            json!({ "logical_name": logical_name, "key": key })
        }
    };
    Ok(output)
}

/// Parse JSON, falling back to a plain string
fn parse_json_value(raw: &str) -> std::result::Result<Value, String> {
    Ok(serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string())))
}

/// Parse `name=json`
fn parse_kwarg(raw: &str) -> std::result::Result<(String, Value), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected name=value, got '{raw}'"))?;
    if name.is_empty() {
        return Err(format!("missing keyword name in '{raw}'"));
    }
    Ok((name.to_string(), parse_json_value(value)?))
}

fn parse_entity(raw: &str) -> std::result::Result<EntityKind, String> {
    raw.parse().map_err(|e: Error| e.to_string())
}

//! Glob patterns over cache keys
//!
//! Patterns use the Redis `KEYS` dialect: `*` matches any run of characters
//! (including `:`), `?` a single character, `[...]` a class, and `\` escapes
//! the next character.

use globset::{GlobBuilder, GlobMatcher};
use memotier_domain::error::{Error, Result};

/// Compiled key pattern
#[derive(Debug, Clone)]
pub struct KeyPattern {
    raw: String,
    matcher: GlobMatcher,
}

impl KeyPattern {
    /// Compile `pattern`
    pub fn new(pattern: &str) -> Result<Self> {
        let glob = GlobBuilder::new(pattern)
            .literal_separator(false)
            .backslash_escape(true)
            .build()
            .map_err(|e| Error::invalid_argument(format!("Invalid key pattern '{pattern}': {e}")))?;

        Ok(Self {
            raw: pattern.to_string(),
            matcher: glob.compile_matcher(),
        })
    }

    /// Whether `key` matches the pattern
    pub fn matches(&self, key: &str) -> bool {
        self.matcher.is_match(key)
    }

    /// The pattern text as given
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

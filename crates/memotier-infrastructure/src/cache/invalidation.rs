//! Entity invalidation helpers
//!
//! Write paths call these after a create, update or delete so that reads
//! derived from the touched entity are recomputed. Each helper clears every
//! key in the namespace whose logical name mentions the entity token and,
//! when an id is given, contains that id after the token.
//!
//! | Entity | Token |
//! |--------|-------|
//! | Consultant | `consultant` |
//! | Business manager | `business_manager` |
//! | Mission | `mission` |
//! | Practice (category) | `practice` |
//! | Skill | `skill` |
//! | Search results | `search` |
//! | Aggregate statistics | `statistics` |

use super::service::CacheService;
use memotier_domain::constants::CACHE_KEY_SEPARATOR;
use memotier_domain::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::info;

/// Entity families whose cached reads can be invalidated together
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    /// Consultant records
    Consultant,
    /// Business manager records
    BusinessManager,
    /// Missions
    Mission,
    /// Practices, also called categories
    Practice,
    /// Skills
    Skill,
    /// Free-text search results
    Search,
    /// Aggregate statistics
    Statistics,
}

impl EntityKind {
    /// Every kind, in declaration order
    pub const ALL: [Self; 7] = [
        Self::Consultant,
        Self::BusinessManager,
        Self::Mission,
        Self::Practice,
        Self::Skill,
        Self::Search,
        Self::Statistics,
    ];

    /// Token matched inside cache keys
    pub fn token(self) -> &'static str {
        match self {
            Self::Consultant => "consultant",
            Self::BusinessManager => "business_manager",
            Self::Mission => "mission",
            Self::Practice => "practice",
            Self::Skill => "skill",
            Self::Search => "search",
            Self::Statistics => "statistics",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for EntityKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        match normalized.as_str() {
            "category" => Ok(Self::Practice),
            other => Self::ALL
                .into_iter()
                .find(|kind| kind.token() == other)
                .ok_or_else(|| Error::invalid_argument(format!("Unknown entity kind: {s}"))),
        }
    }
}

/// Glob selecting the cached reads of `kind`, optionally narrowed to `id`
pub fn entity_pattern(namespace: &str, kind: EntityKind, id: Option<&dyn fmt::Display>) -> String {
    let token = kind.token();
    match id {
        Some(id) => format!("{namespace}{CACHE_KEY_SEPARATOR}*{token}*{id}*"),
        None => format!("{namespace}{CACHE_KEY_SEPARATOR}*{token}*"),
    }
}

/// Clear the cached reads of `kind`, returning how many entries went away
pub async fn invalidate(
    cache: &CacheService,
    kind: EntityKind,
    id: Option<&dyn fmt::Display>,
) -> usize {
    let pattern = entity_pattern(cache.namespace(), kind, id);
    let removed = cache.clear_by_pattern(&pattern).await;
    info!(entity = %kind, pattern = %pattern, removed, "Invalidated cache entries");
    removed
}

/// Clear cached consultant reads
pub async fn invalidate_consultant_cache(
    cache: &CacheService,
    id: Option<&dyn fmt::Display>,
) -> usize {
    invalidate(cache, EntityKind::Consultant, id).await
}

/// Clear cached business manager reads
pub async fn invalidate_business_manager_cache(
    cache: &CacheService,
    id: Option<&dyn fmt::Display>,
) -> usize {
    invalidate(cache, EntityKind::BusinessManager, id).await
}

/// Clear cached mission reads
pub async fn invalidate_mission_cache(
    cache: &CacheService,
    id: Option<&dyn fmt::Display>,
) -> usize {
    invalidate(cache, EntityKind::Mission, id).await
}

/// Clear cached practice reads
pub async fn invalidate_practice_cache(
    cache: &CacheService,
    id: Option<&dyn fmt::Display>,
) -> usize {
    invalidate(cache, EntityKind::Practice, id).await
}

/// Clear cached skill reads
pub async fn invalidate_skill_cache(cache: &CacheService, id: Option<&dyn fmt::Display>) -> usize {
    invalidate(cache, EntityKind::Skill, id).await
}

/// Clear every cached search result
pub async fn invalidate_search_cache(cache: &CacheService) -> usize {
    invalidate(cache, EntityKind::Search, None).await
}

/// Clear every cached aggregate statistic
pub async fn invalidate_statistics_cache(cache: &CacheService) -> usize {
    invalidate(cache, EntityKind::Statistics, None).await
}

/// Clear everything in the namespace
pub async fn clear_all(cache: &CacheService) -> usize {
    let pattern = format!("{}{CACHE_KEY_SEPARATOR}*", cache.namespace());
    let removed = cache.clear_by_pattern(&pattern).await;
    info!(pattern = %pattern, removed, "Cleared cache namespace");
    removed
}

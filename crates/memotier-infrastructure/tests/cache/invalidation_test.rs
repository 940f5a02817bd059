//! Invalidation Helper Tests

use crate::test_utils::InMemoryPrimaryStore;
use memotier_infrastructure::cache::invalidation::{
    self, EntityKind, clear_all, entity_pattern, invalidate_business_manager_cache,
    invalidate_consultant_cache, invalidate_mission_cache, invalidate_practice_cache,
    invalidate_search_cache, invalidate_skill_cache, invalidate_statistics_cache,
};
use memotier_infrastructure::cache::CacheService;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

async fn seeded_cache() -> CacheService {
    let cache = CacheService::local_only("ns", Duration::from_secs(60));
    for key in [
        "ns:consultant_detail:123",
        "ns:consultant_detail:77",
        "ns:stats:consultant_totals",
        "ns:mission_detail:456",
        "ns:business_manager_list:9",
        "ns:practice_list",
        "ns:skill_list",
        "ns:search:ab12",
        "ns:statistics:dashboard",
        "other:consultant_detail:123",
    ] {
        cache.set(key, json!(key), None).await;
    }
    cache
}

#[tokio::test]
async fn test_invalidation_is_scoped_to_pattern() {
    let cache = seeded_cache().await;

    assert_eq!(cache.clear_by_pattern("ns:*consultant*123*").await, 1);
    assert_eq!(cache.get("ns:consultant_detail:123").await, None);
    assert!(cache.get("ns:consultant_detail:77").await.is_some());
    assert!(cache.get("ns:mission_detail:456").await.is_some());
    assert!(cache.get("other:consultant_detail:123").await.is_some());
}

#[tokio::test]
async fn test_invalidate_consultant_without_id() {
    let cache = seeded_cache().await;

    assert_eq!(invalidate_consultant_cache(&cache, None).await, 3);
    assert!(cache.get("other:consultant_detail:123").await.is_some());
    assert!(cache.get("ns:mission_detail:456").await.is_some());
}

#[tokio::test]
async fn test_entity_helpers() {
    let cache = seeded_cache().await;

    assert_eq!(invalidate_mission_cache(&cache, Some(&456)).await, 1);
    assert_eq!(invalidate_business_manager_cache(&cache, Some(&"9")).await, 1);
    assert_eq!(invalidate_practice_cache(&cache, None).await, 1);
    assert_eq!(invalidate_skill_cache(&cache, None).await, 1);
    assert_eq!(invalidate_search_cache(&cache).await, 1);
    assert_eq!(invalidate_statistics_cache(&cache).await, 1);
    assert_eq!(cache.local().len(), 4);
}

#[tokio::test]
async fn test_invalidate_by_kind() {
    let cache = seeded_cache().await;
    let removed = invalidation::invalidate(&cache, EntityKind::Consultant, Some(&77)).await;
    assert_eq!(removed, 1);
}

#[tokio::test]
async fn test_clear_all_respects_namespace() {
    let cache = seeded_cache().await;

    assert_eq!(clear_all(&cache).await, 9);
    assert_eq!(cache.local().len(), 1);
    assert!(cache.get("other:consultant_detail:123").await.is_some());
}

#[tokio::test]
async fn test_invalidation_reaches_primary() {
    let store = InMemoryPrimaryStore::new();
    let cache = CacheService::builder()
        .namespace("ns")
        .primary(Arc::new(store.clone()))
        .build()
        .await;
    cache.set("ns:search:q1", json!([]), None).await;
    store.insert("ns:search:only_primary", "[]");

    // Two keys in the primary, one in the local store
    assert_eq!(invalidate_search_cache(&cache).await, 3);
    assert_eq!(store.len(), 0);
}

#[test]
fn test_patterns_for_every_kind() {
    for kind in EntityKind::ALL {
        let pattern = entity_pattern("ns", kind, None);
        assert_eq!(pattern, format!("ns:*{}*", kind.token()));
        assert_eq!(kind.to_string().parse::<EntityKind>().ok(), Some(kind));
    }
}

#[test]
fn test_entity_kind_serde() {
    let kind: EntityKind = serde_json::from_str(r#""business_manager""#).unwrap();
    assert_eq!(kind, EntityKind::BusinessManager);
    assert_eq!(serde_json::to_string(&EntityKind::Skill).unwrap(), r#""skill""#);
}

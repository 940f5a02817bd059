//! Redis Primary Store Tests
//!
//! Connection failures only; behavior against a live server is covered by
//! the cache service tests through in-memory doubles.

use memotier_providers::RedisPrimaryStore;
use std::time::Duration;

#[tokio::test]
async fn test_redis_store_rejects_invalid_url() {
    let result = RedisPrimaryStore::connect(
        "invalid://url",
        Duration::from_millis(200),
        Duration::from_millis(200),
    )
    .await;
    let err = result.unwrap_err();
    assert!(err.is_primary_store());
}

#[tokio::test]
async fn test_redis_store_unreachable_server() {
    // Port 1 is reserved; nothing listens there.
    let result = RedisPrimaryStore::connect(
        "redis://127.0.0.1:1",
        Duration::from_millis(500),
        Duration::from_millis(200),
    )
    .await;
    assert!(result.is_err());
    assert!(result.unwrap_err().is_primary_store());
}

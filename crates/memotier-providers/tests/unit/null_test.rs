//! Null Primary Store Tests

use memotier_domain::ports::PrimaryStore;
use memotier_providers::NullPrimaryStore;

#[tokio::test]
async fn test_null_store_is_never_reachable() {
    let store = NullPrimaryStore::new();
    assert!(!store.ping().await.unwrap());
    assert_eq!(store.provider_name(), "null");
}

#[tokio::test]
async fn test_null_store_stores_nothing() {
    let store = NullPrimaryStore::new();

    store
        .set_with_expiry("ns:f:abc", 60_000, r#"{"a":1}"#)
        .await
        .unwrap();
    assert_eq!(store.get("ns:f:abc").await.unwrap(), None);
    assert!(!store.delete("ns:f:abc").await.unwrap());
    assert!(store.scan("ns:*").await.unwrap().is_empty());
    assert_eq!(
        store.delete_many(&["ns:f:abc".to_string()]).await.unwrap(),
        0
    );
    assert!(store.info().await.unwrap().is_empty());
}

//! Local Store Tests

use chrono::{TimeDelta, Utc};
use memotier_domain::value_objects::{CacheEntry, CachedValue};
use memotier_infrastructure::cache::{KeyPattern, LocalStore};
use serde_json::json;
use std::time::Duration;

#[test]
fn test_set_get_delete() {
    let store = LocalStore::new();
    let now = Utc::now();

    store.set("a", json!({"n": 1}), Duration::from_secs(10), now);
    let entry = store.get("a").unwrap();
    assert_eq!(entry.value, json!({"n": 1}));
    assert_eq!(entry.created_at, now);

    assert!(store.delete("a"));
    assert!(!store.delete("a"));
    assert!(store.get("a").is_none());
}

#[test]
fn test_keys_matching() {
    let store = LocalStore::new();
    let now = Utc::now();
    for key in ["ns:consultant:1", "ns:consultant:2", "ns:mission:1"] {
        store.set(key, json!(null), Duration::from_secs(10), now);
    }

    let mut keys = store.keys_matching("ns:consultant:*").unwrap();
    keys.sort();
    assert_eq!(keys, vec!["ns:consultant:1", "ns:consultant:2"]);

    let pattern = KeyPattern::new("ns:*:1").unwrap();
    assert_eq!(store.keys_matching_pattern(&pattern).len(), 2);

    assert!(store.keys_matching("ns:[").is_err());
}

#[test]
fn test_remove_if_expired_spares_fresh_entry() {
    let store = LocalStore::new();
    let now = Utc::now();

    store.set("k", json!(1), Duration::from_secs(1), now);
    let later = now + TimeDelta::seconds(5);
    store.set("k", json!(2), Duration::from_secs(60), later);

    assert!(!store.remove_if_expired("k", later));
    assert_eq!(store.get("k").unwrap().value, json!(2));

    assert!(store.remove_if_expired("k", later + TimeDelta::seconds(61)));
    assert!(store.is_empty());
}

#[test]
fn test_purge_and_size() {
    let store = LocalStore::new();
    let now = Utc::now();

    store.set("short", json!("x"), Duration::from_secs(1), now);
    store.set("long", json!("y"), Duration::from_secs(100), now);
    store.insert_entry(
        "unknown",
        CacheEntry {
            value: json!(0).into(),
            created_at: now,
            expires_at: None,
        },
    );
    assert_eq!(store.len(), 3);
    assert!(store.approximate_size_bytes() > 0);

    assert_eq!(store.purge_expired(now + TimeDelta::seconds(2)), 2);
    assert_eq!(store.len(), 1);

    store.clear();
    assert!(store.is_empty());
    assert_eq!(store.approximate_size_bytes(), 0);
}

#[test]
fn test_holds_values_without_json_form() {
    let store = LocalStore::new();
    let now = Utc::now();

    store.set("k", CachedValue::opaque((1_u8, 'x')), Duration::from_secs(10), now);
    let entry = store.get("k").unwrap();
    assert!(entry.value.is_opaque());
    assert_eq!(entry.value.downcast_ref::<(u8, char)>(), Some(&(1, 'x')));
    assert!(store.approximate_size_bytes() >= "k".len());
}

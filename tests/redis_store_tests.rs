//! Integration Tests against a live Redis server
//!
//! Ignored by default. Run with a server at `REDIS_URL`:
//! `cargo test --test redis_store_tests -- --ignored --test-threads=1`

use std::sync::Arc;
use std::time::Duration;

use redis_facade::{replay, CacheError, Config, KeyValueStore, ObjectCache, RedisStore};

async fn connect() -> Arc<dyn KeyValueStore> {
    let config = Config::from_env();
    let store = RedisStore::connect(&config.redis_url).await.unwrap();
    store.flush_all().await.unwrap();
    Arc::new(store)
}

#[tokio::test]
#[ignore]
async fn test_redis_primitives() {
    let store = connect().await;

    store.set("k", b"v").await.unwrap();
    assert_eq!(store.get("k").await.unwrap(), Some(b"v".to_vec()));
    assert_eq!(store.get("absent").await.unwrap(), None);

    assert_eq!(store.increment("n").await.unwrap(), 1);
    assert_eq!(store.increment("n").await.unwrap(), 2);

    store.append_to_list("l", b"a").await.unwrap();
    store.append_to_list("l", b"b").await.unwrap();
    assert_eq!(
        store.list_range("l", 0, -1).await.unwrap(),
        vec![b"a".to_vec(), b"b".to_vec()]
    );

    store.set_with_ttl("t", b"x", 1).await.unwrap();
    tokio::time::sleep(Duration::from_millis(1500)).await;
    assert_eq!(store.get("t").await.unwrap(), None);
}

#[tokio::test]
#[ignore]
async fn test_redis_wrong_type_is_store_error() {
    let store = connect().await;

    store.set("plain", b"v").await.unwrap();
    let result = store.append_to_list("plain", b"x").await;
    assert!(matches!(result, Err(CacheError::Store(_))));
}

#[tokio::test]
#[ignore]
async fn test_redis_object_cache_replay() {
    let cache = ObjectCache::new(connect().await);

    let key = cache.store("foo").await.unwrap();
    assert_eq!(cache.get_as_text(&key).await.unwrap(), Some("foo".to_string()));

    let report = replay(cache.store_operation()).await.unwrap();
    assert_eq!(report.count, 1);
    assert_eq!(report.calls[0].output, key);
}

#[tokio::test]
async fn test_unreachable_redis_is_unavailable() {
    // Port 1 is reserved and never serves Redis.
    let result = RedisStore::connect("redis://127.0.0.1:1/").await;
    assert!(matches!(result, Err(CacheError::StoreUnavailable(_))));
}

//! Object Cache Module
//!
//! Stores scalar payloads under freshly generated UUID keys and reads them
//! back, optionally through a converter.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::cache::value::{to_float, to_integer, to_text, StoredValue};
use crate::error::Result;
use crate::instrument::{CallHistory, CountCalls, Operation, OperationExt, OperationName};
use crate::store::KeyValueStore;

/// Name under which `ObjectCache::store` is counted and recorded
pub const STORE_OPERATION: &str = "ObjectCache::store";

// == Store Value Operation ==
/// Writes one value under a new random key and returns the key.
pub struct StoreValue {
    name: OperationName,
    store: Arc<dyn KeyValueStore>,
}

#[async_trait]
impl Operation for StoreValue {
    type Args = (StoredValue,);
    type Output = String;

    fn name(&self) -> &OperationName {
        &self.name
    }

    fn store(&self) -> &Arc<dyn KeyValueStore> {
        &self.store
    }

    async fn call(&self, args: Self::Args) -> Result<String> {
        let (value,) = args;
        let key = Uuid::new_v4().to_string();
        self.store.set(&key, &value.to_bytes()).await?;
        Ok(key)
    }
}

/// The store operation with counting outside and history inside.
pub type InstrumentedStore = CountCalls<CallHistory<StoreValue>>;

// == Object Cache ==
/// Generic object cache over a shared store.
pub struct ObjectCache {
    store: Arc<dyn KeyValueStore>,
    store_op: InstrumentedStore,
}

impl ObjectCache {
    // == Constructor ==
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        let store_op = StoreValue {
            name: OperationName::new(STORE_OPERATION),
            store: store.clone(),
        }
        .call_history()
        .count_calls();

        Self { store, store_op }
    }

    // == Store ==
    /// Stores `value` under a new UUID key and returns the key.
    ///
    /// Every call is counted and recorded in the call history.
    pub async fn store(&self, value: impl Into<StoredValue>) -> Result<String> {
        self.store_op.call((value.into(),)).await
    }

    /// Instrumented `store` operation, the handle `replay` reads from.
    pub fn store_operation(&self) -> &InstrumentedStore {
        &self.store_op
    }

    // == Get ==
    /// Reads the raw bytes under `key`; `None` when absent.
    pub async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        self.store.get(key).await
    }

    /// Reads `key` and applies `convert` to a present value.
    pub async fn get_with<T, F>(&self, key: &str, convert: F) -> Result<Option<T>>
    where
        F: FnOnce(Vec<u8>) -> Result<T>,
    {
        self.get(key).await?.map(convert).transpose()
    }

    pub async fn get_as_text(&self, key: &str) -> Result<Option<String>> {
        self.get_with(key, to_text).await
    }

    pub async fn get_as_integer(&self, key: &str) -> Result<Option<i64>> {
        self.get_with(key, to_integer).await
    }

    pub async fn get_as_float(&self, key: &str) -> Result<Option<f64>> {
        self.get_with(key, to_float).await
    }

    // == Flush ==
    /// Clears the whole backing store, instrumentation state included.
    pub async fn flush(&self) -> Result<()> {
        self.store.flush_all().await
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CacheError;
    use crate::instrument::replay;
    use crate::store::MemoryStore;

    fn new_cache() -> (Arc<dyn KeyValueStore>, ObjectCache) {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        (store.clone(), ObjectCache::new(store))
    }

    #[tokio::test]
    async fn test_store_returns_uuid_key() {
        let (store, cache) = new_cache();

        let key = cache.store("bar").await.unwrap();

        assert!(Uuid::parse_str(&key).is_ok());
        assert_eq!(store.get(&key).await.unwrap(), Some(b"bar".to_vec()));
    }

    #[tokio::test]
    async fn test_store_keys_are_unique() {
        let (_, cache) = new_cache();

        let first = cache.store("same").await.unwrap();
        let second = cache.store("same").await.unwrap();

        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn test_typed_getters() {
        let (_, cache) = new_cache();

        let text = cache.store("bar").await.unwrap();
        let int = cache.store(42).await.unwrap();
        let float = cache.store(2.5).await.unwrap();
        let bytes = cache.store(b"\x00\x01".to_vec()).await.unwrap();

        assert_eq!(cache.get_as_text(&text).await.unwrap(), Some("bar".to_string()));
        assert_eq!(cache.get_as_integer(&int).await.unwrap(), Some(42));
        assert_eq!(cache.get_as_float(&float).await.unwrap(), Some(2.5));
        assert_eq!(cache.get(&bytes).await.unwrap(), Some(vec![0, 1]));
    }

    #[tokio::test]
    async fn test_get_with_custom_converter() {
        let (_, cache) = new_cache();

        let key = cache.store("a,b,c").await.unwrap();
        let parts = cache
            .get_with(&key, |bytes| {
                Ok(to_text(bytes)?
                    .split(',')
                    .map(str::to_string)
                    .collect::<Vec<_>>())
            })
            .await
            .unwrap();

        assert_eq!(parts, Some(vec!["a".to_string(), "b".to_string(), "c".to_string()]));
    }

    #[tokio::test]
    async fn test_get_missing_key_is_none() {
        let (_, cache) = new_cache();

        assert_eq!(cache.get("nonexistent").await.unwrap(), None);
        assert_eq!(cache.get_as_text("nonexistent").await.unwrap(), None);
        assert_eq!(cache.get_as_integer("nonexistent").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_get_as_integer_malformed() {
        let (_, cache) = new_cache();

        let key = cache.store("not a number").await.unwrap();
        let result = cache.get_as_integer(&key).await;

        assert!(matches!(result, Err(CacheError::Conversion(_))));
    }

    #[tokio::test]
    async fn test_store_is_counted_and_recorded() {
        let (store, cache) = new_cache();

        let key = cache.store("foo").await.unwrap();
        cache.store(7).await.unwrap();

        assert_eq!(store.get(STORE_OPERATION).await.unwrap(), Some(b"2".to_vec()));

        let report = replay(cache.store_operation()).await.unwrap();
        assert_eq!(report.count, 2);
        assert_eq!(report.calls.len(), 2);
        assert_eq!(report.calls[0].input, r#""foo""#);
        assert_eq!(report.calls[0].output, key);
        assert_eq!(report.calls[1].input, "7");
    }

    #[tokio::test]
    async fn test_flush_clears_everything() {
        let (_, cache) = new_cache();

        let key = cache.store("foo").await.unwrap();
        cache.flush().await.unwrap();

        assert_eq!(cache.get(&key).await.unwrap(), None);
        let report = replay(cache.store_operation()).await.unwrap();
        assert_eq!(report.count, 0);
        assert!(report.calls.is_empty());
    }
}

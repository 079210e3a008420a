//! Memory Store Module
//!
//! In-process `KeyValueStore` with Redis-like semantics, used for tests and
//! offline runs. Expired entries are dropped lazily when touched.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::{CacheError, Result};
use crate::store::{KeyValueStore, MemoryEntry, SlotValue};

const WRONG_TYPE: &str = "WRONGTYPE Operation against a key holding the wrong kind of value";
const NOT_AN_INTEGER: &str = "value is not an integer or out of range";

// == Memory Store ==
/// Key-value storage guarded by a single async lock.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, MemoryEntry>>,
}

impl MemoryStore {
    // == Constructor ==
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    // == Length ==
    /// Returns the number of live (non-expired) keys.
    pub async fn len(&self) -> usize {
        self.entries
            .read()
            .await
            .values()
            .filter(|entry| !entry.is_expired())
            .count()
    }

    // == Is Empty ==
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

/// Drops `key` if its entry has expired.
fn drop_expired(entries: &mut HashMap<String, MemoryEntry>, key: &str) {
    if entries.get(key).is_some_and(MemoryEntry::is_expired) {
        entries.remove(key);
    }
}

/// Resolves a Redis-style inclusive range against a list of `len` items.
fn resolve_range(len: usize, start: isize, end: isize) -> Option<(usize, usize)> {
    let len = len as isize;
    let start = if start < 0 { (len + start).max(0) } else { start };
    let end = if end < 0 { len + end } else { end.min(len - 1) };
    if len == 0 || start > end || start >= len {
        return None;
    }
    Some((start as usize, end as usize))
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        let entry = MemoryEntry::new(SlotValue::Bytes(value.to_vec()), None);
        self.entries.write().await.insert(key.to_string(), entry);
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let mut entries = self.entries.write().await;
        drop_expired(&mut entries, key);
        match entries.get(key) {
            None => Ok(None),
            Some(MemoryEntry {
                value: SlotValue::Bytes(bytes),
                ..
            }) => Ok(Some(bytes.clone())),
            Some(_) => Err(CacheError::Store(WRONG_TYPE.to_string())),
        }
    }

    async fn set_with_ttl(&self, key: &str, value: &[u8], ttl_secs: u64) -> Result<()> {
        if ttl_secs == 0 {
            return Err(CacheError::Store(
                "invalid expire time in 'setex' command".to_string(),
            ));
        }
        let entry = MemoryEntry::new(SlotValue::Bytes(value.to_vec()), Some(ttl_secs));
        self.entries.write().await.insert(key.to_string(), entry);
        Ok(())
    }

    async fn increment(&self, key: &str) -> Result<i64> {
        let mut entries = self.entries.write().await;
        drop_expired(&mut entries, key);
        let entry = entries
            .entry(key.to_string())
            .or_insert_with(|| MemoryEntry::new(SlotValue::Bytes(b"0".to_vec()), None));

        let SlotValue::Bytes(bytes) = &mut entry.value else {
            return Err(CacheError::Store(WRONG_TYPE.to_string()));
        };
        let current: i64 = std::str::from_utf8(bytes)
            .ok()
            .and_then(|text| text.parse().ok())
            .ok_or_else(|| CacheError::Store(NOT_AN_INTEGER.to_string()))?;
        let next = current
            .checked_add(1)
            .ok_or_else(|| CacheError::Store(NOT_AN_INTEGER.to_string()))?;
        *bytes = next.to_string().into_bytes();
        Ok(next)
    }

    async fn append_to_list(&self, key: &str, value: &[u8]) -> Result<()> {
        let mut entries = self.entries.write().await;
        drop_expired(&mut entries, key);
        let entry = entries
            .entry(key.to_string())
            .or_insert_with(|| MemoryEntry::new(SlotValue::List(Vec::new()), None));

        match &mut entry.value {
            SlotValue::List(items) => {
                items.push(value.to_vec());
                Ok(())
            }
            SlotValue::Bytes(_) => Err(CacheError::Store(WRONG_TYPE.to_string())),
        }
    }

    async fn list_range(&self, key: &str, start: isize, end: isize) -> Result<Vec<Vec<u8>>> {
        let mut entries = self.entries.write().await;
        drop_expired(&mut entries, key);
        match entries.get(key) {
            None => Ok(Vec::new()),
            Some(MemoryEntry {
                value: SlotValue::List(items),
                ..
            }) => Ok(resolve_range(items.len(), start, end)
                .map(|(from, to)| items[from..=to].to_vec())
                .unwrap_or_default()),
            Some(_) => Err(CacheError::Store(WRONG_TYPE.to_string())),
        }
    }

    async fn flush_all(&self) -> Result<()> {
        self.entries.write().await.clear();
        Ok(())
    }
}

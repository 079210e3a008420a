//! Store Module
//!
//! The key-value store collaborator every facade component is built on.
//! State, persistence and atomicity all live behind this trait; the facade
//! adds no locking of its own.

mod entry;
mod memory;
mod redis_store;

use async_trait::async_trait;

use crate::error::Result;

// Re-export public types
pub use entry::{MemoryEntry, SlotValue};
pub use memory::MemoryStore;
pub use redis_store::RedisStore;

// == Key Value Store ==
/// Raw key-value operations required from a backing store.
///
/// Keys are text, values are opaque bytes. Implementations must make
/// `increment` and `append_to_list` atomic per key.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Writes `value` under `key`, replacing any previous value and expiry.
    async fn set(&self, key: &str, value: &[u8]) -> Result<()>;

    /// Reads the value under `key`, `None` if absent or expired.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Writes `value` under `key` so that it expires after `ttl_secs`.
    async fn set_with_ttl(&self, key: &str, value: &[u8], ttl_secs: u64) -> Result<()>;

    /// Increments the integer under `key` by one, treating absence as zero.
    async fn increment(&self, key: &str) -> Result<i64>;

    /// Appends `value` to the tail of the list under `key`.
    async fn append_to_list(&self, key: &str, value: &[u8]) -> Result<()>;

    /// Returns list elements from `start` to `end` inclusive.
    ///
    /// Negative indices count from the tail, so `(0, -1)` is the whole list.
    async fn list_range(&self, key: &str, start: isize, end: isize) -> Result<Vec<Vec<u8>>>;

    /// Removes every key from the store.
    async fn flush_all(&self) -> Result<()>;
}

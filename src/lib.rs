//! Redis Facade - instrumented caching over a key-value store
//!
//! Provides an object cache with generated keys and typed reads, call
//! counting and call history for arbitrary operations, replay of that
//! history, and a web-page cache with access counting and a fixed TTL.
//! All state lives in the backing store.

pub mod cache;
pub mod config;
pub mod error;
pub mod instrument;
pub mod store;

pub use cache::{HttpFetcher, ObjectCache, PageFetcher, StoredValue, WebPageCache};
pub use config::Config;
pub use error::{CacheError, Result};
pub use instrument::{replay, Operation, OperationExt, OperationName, ReplayReport};
pub use store::{KeyValueStore, MemoryStore, RedisStore};

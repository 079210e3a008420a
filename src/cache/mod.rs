//! Cache Module
//!
//! The two caches built on the key-value store: an object cache with
//! generated keys and typed reads, and a web-page cache with access counts.

mod object;
mod page;
mod value;


// Re-export public types
pub use object::{InstrumentedStore, ObjectCache, StoreValue, STORE_OPERATION};
pub use page::{count_key, cached_key, HttpFetcher, PageFetcher, WebPageCache};
pub use value::{to_float, to_integer, to_text, StoredValue};

// == Public Constants ==
/// Seconds a fetched page stays cached
pub const DEFAULT_PAGE_TTL: u64 = 10;

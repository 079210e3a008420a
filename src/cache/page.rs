//! Web Page Cache Module
//!
//! Caches fetched pages for a fixed TTL and counts every access per URL.
//!
//! Concurrent misses on the same URL each fetch and each write the cache
//! entry; the last write wins.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::cache::value::{to_integer, to_text};
use crate::cache::DEFAULT_PAGE_TTL;
use crate::config::Config;
use crate::error::Result;
use crate::store::KeyValueStore;

/// Key of the cached content for `url`.
pub fn cached_key(url: &str) -> String {
    format!("cached:{}", url)
}

/// Key of the access counter for `url`.
pub fn count_key(url: &str) -> String {
    format!("count:{}", url)
}

// == Page Fetcher ==
/// External HTTP GET collaborator.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Returns the body of `url`, failing on transport errors and
    /// non-success statuses.
    async fn fetch(&self, url: &str) -> Result<String>;
}

// == Http Fetcher ==
/// `PageFetcher` backed by a reqwest client.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(Duration::from_secs(config.http_timeout))
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        let response = self.client.get(url).send().await?.error_for_status()?;
        Ok(response.text().await?)
    }
}

// == Web Page Cache ==
/// Page cache in front of a `PageFetcher`.
pub struct WebPageCache {
    store: Arc<dyn KeyValueStore>,
    fetcher: Arc<dyn PageFetcher>,
    ttl_secs: u64,
}

impl WebPageCache {
    // == Constructor ==
    /// Creates a cache holding pages for the default 10 seconds.
    pub fn new(store: Arc<dyn KeyValueStore>, fetcher: Arc<dyn PageFetcher>) -> Self {
        Self {
            store,
            fetcher,
            ttl_secs: DEFAULT_PAGE_TTL,
        }
    }

    pub fn from_config(
        store: Arc<dyn KeyValueStore>,
        fetcher: Arc<dyn PageFetcher>,
        config: &Config,
    ) -> Self {
        Self::new(store, fetcher).with_ttl(config.page_ttl)
    }

    /// Overrides the page TTL in seconds.
    pub fn with_ttl(mut self, ttl_secs: u64) -> Self {
        self.ttl_secs = ttl_secs;
        self
    }

    pub fn ttl_secs(&self) -> u64 {
        self.ttl_secs
    }

    // == Fetch ==
    /// Returns the content of `url`, from cache when present.
    ///
    /// The access counter is incremented first, on hits, misses and failed
    /// fetches alike. A failed fetch caches nothing.
    pub async fn fetch(&self, url: &str) -> Result<String> {
        let count = self.store.increment(&count_key(url)).await?;
        debug!("{} accessed {} times", url, count);

        let page_key = cached_key(url);
        if let Some(cached) = self.store.get(&page_key).await? {
            info!("Cache hit for {}", url);
            return to_text(cached);
        }

        info!("Cache miss for {}, fetching", url);
        let content = self.fetcher.fetch(url).await?;
        self.store
            .set_with_ttl(&page_key, content.as_bytes(), self.ttl_secs)
            .await?;
        Ok(content)
    }

    // == Access Count ==
    /// Number of `fetch` calls for `url`, 0 if never fetched.
    pub async fn access_count(&self, url: &str) -> Result<i64> {
        match self.store.get(&count_key(url)).await? {
            None => Ok(0),
            Some(raw) => to_integer(raw),
        }
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CacheError;
    use crate::store::MemoryStore;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    /// Fetcher returning a fixed body and counting calls.
    #[derive(Default)]
    struct StubFetcher {
        calls: AtomicUsize,
        failing: AtomicBool,
    }

    #[async_trait]
    impl PageFetcher for StubFetcher {
        async fn fetch(&self, url: &str) -> Result<String> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            if self.failing.load(Ordering::SeqCst) {
                return Err(CacheError::Fetch(format!("{} unreachable", url)));
            }
            Ok(format!("<html>{} #{}</html>", url, n))
        }
    }

    fn new_cache() -> (Arc<dyn KeyValueStore>, Arc<StubFetcher>, WebPageCache) {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let fetcher = Arc::new(StubFetcher::default());
        let cache = WebPageCache::new(store.clone(), fetcher.clone());
        (store, fetcher, cache)
    }

    #[test]
    fn test_key_layout() {
        assert_eq!(cached_key("http://a.test"), "cached:http://a.test");
        assert_eq!(count_key("http://a.test"), "count:http://a.test");
    }

    #[tokio::test]
    async fn test_default_ttl() {
        let (_, _, cache) = new_cache();
        assert_eq!(cache.ttl_secs(), 10);
        assert_eq!(cache.with_ttl(3).ttl_secs(), 3);
    }

    #[tokio::test]
    async fn test_hit_within_ttl() {
        let (_, fetcher, cache) = new_cache();
        let url = "http://a.test";

        let first = cache.fetch(url).await.unwrap();
        let second = cache.fetch(url).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 1);
        assert_eq!(cache.access_count(url).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_miss_after_expiry() {
        let (_, fetcher, cache) = new_cache();
        let cache = cache.with_ttl(1);
        let url = "http://a.test";

        let first = cache.fetch(url).await.unwrap();
        tokio::time::sleep(Duration::from_millis(1100)).await;
        let second = cache.fetch(url).await.unwrap();

        assert_ne!(first, second);
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 2);
        assert_eq!(cache.access_count(url).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_independent_urls() {
        let (_, fetcher, cache) = new_cache();

        cache.fetch("http://a.test").await.unwrap();
        cache.fetch("http://a.test").await.unwrap();

        assert_eq!(cache.access_count("http://b.test").await.unwrap(), 0);

        cache.fetch("http://b.test").await.unwrap();

        assert_eq!(cache.access_count("http://a.test").await.unwrap(), 2);
        assert_eq!(cache.access_count("http://b.test").await.unwrap(), 1);
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_failed_fetch_counts_but_does_not_cache() {
        let (store, fetcher, cache) = new_cache();
        let url = "http://down.test";

        fetcher.failing.store(true, Ordering::SeqCst);
        let result = cache.fetch(url).await;
        assert!(matches!(result, Err(CacheError::Fetch(_))));
        assert_eq!(store.get(&cached_key(url)).await.unwrap(), None);
        assert_eq!(cache.access_count(url).await.unwrap(), 1);

        fetcher.failing.store(false, Ordering::SeqCst);
        cache.fetch(url).await.unwrap();
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 2);
        assert_eq!(cache.access_count(url).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_empty_page_is_still_a_hit() {
        let (store, fetcher, cache) = new_cache();
        let url = "http://empty.test";

        store.set_with_ttl(&cached_key(url), b"", 10).await.unwrap();

        assert_eq!(cache.fetch(url).await.unwrap(), "");
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 0);
    }
}

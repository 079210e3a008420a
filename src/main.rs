//! Redis Facade demo
//!
//! Exercises the object cache, its replay transcript and the web-page cache
//! against a live Redis server.
//!
//! Usage: `redis_facade [URL...]`

use std::sync::Arc;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use redis_facade::{
    replay, Config, HttpFetcher, KeyValueStore, ObjectCache, RedisStore, WebPageCache,
};

/// Entry point for the demo.
///
/// # Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Connect to Redis and optionally flush it
/// 4. Store and read back values, then print the replay transcript
/// 5. Fetch every URL given on the command line twice
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "redis_facade=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    info!(
        "Configuration loaded: redis_url={}, page_ttl={}s, http_timeout={}s, flush_on_start={}",
        config.redis_url, config.page_ttl, config.http_timeout, config.flush_on_start
    );

    let store: Arc<dyn KeyValueStore> = Arc::new(
        RedisStore::connect(&config.redis_url)
            .await
            .with_context(|| format!("connecting to {}", config.redis_url))?,
    );

    let cache = ObjectCache::new(store.clone());
    if config.flush_on_start {
        cache.flush().await?;
        info!("Store flushed");
    }

    let text_key = cache.store("foo").await?;
    let int_key = cache.store(42).await?;
    let float_key = cache.store(3.5).await?;
    cache.store(b"\x00raw".to_vec()).await?;

    println!("{:?}", cache.get_as_text(&text_key).await?);
    println!("{:?}", cache.get_as_integer(&int_key).await?);
    println!("{:?}", cache.get_as_float(&float_key).await?);
    println!("{:?}", cache.get("missing").await?);
    println!();
    println!("{}", replay(cache.store_operation()).await?);

    let urls: Vec<String> = std::env::args().skip(1).collect();
    if urls.is_empty() {
        return Ok(());
    }

    let fetcher = Arc::new(HttpFetcher::from_config(&config)?);
    let pages = WebPageCache::from_config(store, fetcher, &config);
    for url in &urls {
        for _ in 0..2 {
            let content = pages.fetch(url).await?;
            println!(
                "{}: {} bytes, accessed {} times",
                url,
                content.len(),
                pages.access_count(url).await?
            );
        }
    }

    Ok(())
}

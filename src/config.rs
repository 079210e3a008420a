//! Configuration Module
//!
//! Handles loading facade configuration from environment variables.

use std::env;

/// Facade configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Connection URL of the backing Redis server
    pub redis_url: String,
    /// Lifetime of a cached web page in seconds
    pub page_ttl: u64,
    /// Timeout for external page fetches in seconds
    pub http_timeout: u64,
    /// Whether the demo clears the store before running
    pub flush_on_start: bool,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `REDIS_URL` - Redis connection URL (default: redis://127.0.0.1:6379/)
    /// - `PAGE_TTL` - Page cache TTL in seconds (default: 10)
    /// - `HTTP_TIMEOUT` - Page fetch timeout in seconds (default: 30)
    /// - `FLUSH_ON_START` - Clear the store on startup (default: true)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            redis_url: env::var("REDIS_URL").unwrap_or(defaults.redis_url),
            page_ttl: env::var("PAGE_TTL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.page_ttl),
            http_timeout: env::var("HTTP_TIMEOUT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.http_timeout),
            flush_on_start: env::var("FLUSH_ON_START")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.flush_on_start),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            redis_url: "redis://127.0.0.1:6379/".to_string(),
            page_ttl: crate::cache::DEFAULT_PAGE_TTL,
            http_timeout: 30,
            flush_on_start: true,
        }
    }
}

//! Error types for the cache facade
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the cache facade.
///
/// Absence of a key is never an error; lookups return `Option` instead.
#[derive(Error, Debug)]
pub enum CacheError {
    /// The backing store cannot be reached
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    /// The backing store rejected the command
    #[error("Store error: {0}")]
    Store(String),

    /// A stored payload could not be converted to the requested type
    #[error("Conversion error: {0}")]
    Conversion(String),

    /// The external HTTP fetch failed
    #[error("Fetch failed: {0}")]
    Fetch(String),

    /// A call record could not be serialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

// == Collaborator Conversions ==
impl From<redis::RedisError> for CacheError {
    fn from(err: redis::RedisError) -> Self {
        if err.is_io_error()
            || err.is_connection_refusal()
            || err.is_connection_dropped()
            || err.is_timeout()
        {
            CacheError::StoreUnavailable(err.to_string())
        } else {
            CacheError::Store(err.to_string())
        }
    }
}

impl From<reqwest::Error> for CacheError {
    fn from(err: reqwest::Error) -> Self {
        CacheError::Fetch(err.to_string())
    }
}

// == Result Type Alias ==
/// Convenience Result type for the cache facade.
pub type Result<T> = std::result::Result<T, CacheError>;

//! Memory Entry Module
//!
//! Defines the slot stored per key by the in-process store, with TTL support.

use std::time::{SystemTime, UNIX_EPOCH};

// == Slot Value ==
/// Payload held under a key: a plain value or a list of values.
#[derive(Debug, Clone, PartialEq)]
pub enum SlotValue {
    Bytes(Vec<u8>),
    List(Vec<Vec<u8>>),
}

// == Memory Entry ==
/// A single key's payload plus its expiry.
#[derive(Debug, Clone)]
pub struct MemoryEntry {
    /// The stored payload
    pub value: SlotValue,
    /// Expiration timestamp (Unix milliseconds), None = no expiration
    pub expires_at: Option<u64>,
}

impl MemoryEntry {
    // == Constructor ==
    /// Creates a new entry with optional TTL.
    ///
    /// # Arguments
    /// * `value` - The payload to store
    /// * `ttl_seconds` - Optional TTL in seconds
    pub fn new(value: SlotValue, ttl_seconds: Option<u64>) -> Self {
        let expires_at = ttl_seconds.map(|ttl| current_timestamp_ms() + ttl * 1000);
        Self { value, expires_at }
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    ///
    /// An entry is expired once the current time reaches its expiration
    /// time, so a fully elapsed TTL never yields a hit.
    pub fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(expires) => current_timestamp_ms() >= expires,
            None => false,
        }
    }

    /// Returns remaining TTL in milliseconds, or None if no expiration is set.
    pub fn ttl_remaining_ms(&self) -> Option<u64> {
        self.expires_at
            .map(|expires| expires.saturating_sub(current_timestamp_ms()))
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
pub fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

//! Stored Value Module
//!
//! Payload kinds accepted by the object cache and the converters that
//! recover them from raw bytes.

use serde::Serialize;

use crate::error::{CacheError, Result};

// == Stored Value ==
/// A scalar payload. The store only ever sees its byte encoding; the
/// variant is not persisted, so readers pick a converter themselves.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum StoredValue {
    Text(String),
    Binary(Vec<u8>),
    Integer(i64),
    Float(f64),
}

impl StoredValue {
    /// Encodes the payload: UTF-8 text, raw bytes, or decimal text.
    pub fn to_bytes(&self) -> Vec<u8> {
        match self {
            StoredValue::Text(text) => text.as_bytes().to_vec(),
            StoredValue::Binary(bytes) => bytes.clone(),
            StoredValue::Integer(n) => n.to_string().into_bytes(),
            // Debug keeps the fractional part, so 1.0 stays "1.0"
            StoredValue::Float(x) => format!("{:?}", x).into_bytes(),
        }
    }
}

impl From<&str> for StoredValue {
    fn from(text: &str) -> Self {
        StoredValue::Text(text.to_string())
    }
}

impl From<String> for StoredValue {
    fn from(text: String) -> Self {
        StoredValue::Text(text)
    }
}

impl From<Vec<u8>> for StoredValue {
    fn from(bytes: Vec<u8>) -> Self {
        StoredValue::Binary(bytes)
    }
}

impl From<&[u8]> for StoredValue {
    fn from(bytes: &[u8]) -> Self {
        StoredValue::Binary(bytes.to_vec())
    }
}

impl From<i64> for StoredValue {
    fn from(n: i64) -> Self {
        StoredValue::Integer(n)
    }
}

impl From<i32> for StoredValue {
    fn from(n: i32) -> Self {
        StoredValue::Integer(n.into())
    }
}

impl From<f64> for StoredValue {
    fn from(x: f64) -> Self {
        StoredValue::Float(x)
    }
}

// == Converters ==
/// Decodes bytes as UTF-8 text.
pub fn to_text(bytes: Vec<u8>) -> Result<String> {
    String::from_utf8(bytes).map_err(|e| CacheError::Conversion(e.to_string()))
}

/// Parses a decimal integer.
pub fn to_integer(bytes: Vec<u8>) -> Result<i64> {
    let text = to_text(bytes)?;
    text.parse()
        .map_err(|_| CacheError::Conversion(format!("{:?} is not an integer", text)))
}

/// Parses a floating-point number.
pub fn to_float(bytes: Vec<u8>) -> Result<f64> {
    let text = to_text(bytes)?;
    text.parse()
        .map_err(|_| CacheError::Conversion(format!("{:?} is not a number", text)))
}

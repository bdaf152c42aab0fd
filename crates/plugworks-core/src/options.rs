//! Option values and the host option-store seam.
//!
//! The host platform persists plugin configuration as a flat map from
//! namespaced string keys to scalar values. Historically the platform
//! stores everything stringly (booleans as `"true"`/`"false"`), so
//! [`OptionValue`] keeps typed variants but decodes the legacy string
//! encodings on read.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::result::AppResult;

/// A scalar configuration value as persisted by the host option store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    /// Boolean value.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// String value (also the legacy encoding for the other two).
    String(String),
}

impl OptionValue {
    /// Interpret the value as a boolean, decoding legacy string flags.
    ///
    /// Returns `None` when the value has no boolean reading.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            Self::Int(i) => Some(*i != 0),
            Self::String(s) => match s.trim().to_ascii_lowercase().as_str() {
                "true" | "1" | "yes" | "on" => Some(true),
                "false" | "0" | "no" | "off" | "" => Some(false),
                _ => None,
            },
        }
    }

    /// Interpret the value as an integer, parsing string digits.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            Self::String(s) => s.trim().parse().ok(),
            Self::Bool(_) => None,
        }
    }

    /// Borrow the value as a string when it is one.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// The platform's string encoding of this value (`"true"`/`"false"`
    /// for booleans, decimal digits for integers).
    pub fn storage_repr(&self) -> String {
        match self {
            Self::Bool(b) => if *b { "true" } else { "false" }.to_string(),
            Self::Int(i) => i.to_string(),
            Self::String(s) => s.clone(),
        }
    }
}

impl std::fmt::Display for OptionValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.storage_repr())
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<i64> for OptionValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<bool> for OptionValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// Trait for the host's persistent key-value option storage.
///
/// Keys are plugin-namespaced strings (e.g. `"example_plugin_date_format"`).
/// The store serializes concurrent access internally; callers perform
/// unconditional read-then-write and accept last-write-wins.
#[async_trait]
pub trait OptionStore: Send + Sync + std::fmt::Debug + 'static {
    /// Get a value by key. Returns `None` if the key has never been set.
    async fn get(&self, key: &str) -> AppResult<Option<OptionValue>>;

    /// Set a value, creating or overwriting the key.
    async fn set(&self, key: &str, value: OptionValue) -> AppResult<()>;

    /// Set a value only if the key is absent.
    /// Returns `true` if the value was written, `false` if the key existed.
    async fn set_if_absent(&self, key: &str, value: OptionValue) -> AppResult<bool>;

    /// Delete a key from the store.
    /// Returns `true` if the key existed.
    async fn delete(&self, key: &str) -> AppResult<bool>;

    /// Check whether a key exists in the store.
    async fn exists(&self, key: &str) -> AppResult<bool>;
}

//! Submitted form data.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Key-value pairs submitted with a settings form.
///
/// Checkbox semantics follow the usual form encoding: a checked box submits
/// its key, an unchecked box submits nothing. Use [`FormData::has`] to read
/// checkbox state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FormData {
    fields: HashMap<String, String>,
}

impl FormData {
    /// Creates an empty form.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a form from key-value pairs.
    pub fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        Self {
            fields: pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    /// Sets a field value.
    pub fn set(&mut self, key: &str, value: &str) {
        self.fields.insert(key.to_string(), value.to_string());
    }

    /// Returns a field value.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    /// Returns a field value with surrounding whitespace removed.
    pub fn get_trimmed(&self, key: &str) -> Option<&str> {
        self.get(key).map(str::trim)
    }

    /// Returns whether the field was submitted at all.
    pub fn has(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// Returns the number of submitted fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns whether the form is empty.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

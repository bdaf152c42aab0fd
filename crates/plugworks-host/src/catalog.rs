//! Service catalog.
//!
//! The catalog records which framework services the host makes available.
//! Plugin bootstrap checks its required set against the catalog before
//! wiring anything; the verification CLI reports on the same data.

use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A registered service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceEntry {
    /// Stable service key, e.g. `settings-core`.
    pub key: String,
    /// Human-readable description.
    pub description: String,
}

/// Catalog of services available on the host.
#[derive(Debug, Default)]
pub struct ServiceCatalog {
    entries: DashMap<String, ServiceEntry>,
}

impl ServiceCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a service. Returns false if the key was already present;
    /// re-registration keeps the existing entry.
    pub fn register(&self, key: &str, description: &str) -> bool {
        if self.entries.contains_key(key) {
            debug!(key = %key, "Service already registered");
            return false;
        }
        self.entries.insert(
            key.to_string(),
            ServiceEntry {
                key: key.to_string(),
                description: description.to_string(),
            },
        );
        true
    }

    /// Removes a service from the catalog. Returns false if absent.
    pub fn remove(&self, key: &str) -> bool {
        self.entries.remove(key).is_some()
    }

    /// Returns whether a service is registered.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Looks up a service entry by key.
    pub fn get(&self, key: &str) -> Option<ServiceEntry> {
        self.entries.get(key).map(|e| e.value().clone())
    }

    /// Returns the registered keys, sorted.
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.entries.iter().map(|e| e.key().clone()).collect();
        keys.sort();
        keys
    }

    /// Returns the expected services that are missing from the catalog,
    /// preserving the order of the expected list.
    pub fn missing<'a>(&self, expected: &'a [(&'a str, &'a str)]) -> Vec<(&'a str, &'a str)> {
        expected
            .iter()
            .filter(|(key, _)| !self.contains(key))
            .copied()
            .collect()
    }

    /// Returns the number of registered services.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

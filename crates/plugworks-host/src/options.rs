//! In-memory option store.
//!
//! Options survive plugin deactivation; nothing in the host ever deletes an
//! option unless a caller asks for it explicitly. Read and write counters are
//! exposed so tests and the demo binary can assert on storage traffic.

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;
use tracing::debug;

use plugworks_core::{AppResult, OptionStore, OptionValue};

/// `OptionStore` backed by a concurrent in-memory map.
#[derive(Debug, Default)]
pub struct MemoryOptionStore {
    /// Option key → stored value.
    entries: DashMap<String, OptionValue>,
    /// Number of read operations (get, exists, presence checks).
    reads: AtomicU64,
    /// Number of operations that wrote or removed a value.
    writes: AtomicU64,
}

impl MemoryOptionStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of read operations performed.
    pub fn read_count(&self) -> u64 {
        self.reads.load(Ordering::Relaxed)
    }

    /// Returns the number of write operations performed.
    pub fn write_count(&self) -> u64 {
        self.writes.load(Ordering::Relaxed)
    }

    /// Resets both traffic counters to zero.
    pub fn reset_counters(&self) {
        self.reads.store(0, Ordering::Relaxed);
        self.writes.store(0, Ordering::Relaxed);
    }

    /// Returns the number of stored options.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether the store holds no options.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl OptionStore for MemoryOptionStore {
    async fn get(&self, key: &str) -> AppResult<Option<OptionValue>> {
        self.reads.fetch_add(1, Ordering::Relaxed);
        Ok(self.entries.get(key).map(|entry| entry.value().clone()))
    }

    async fn set(&self, key: &str, value: OptionValue) -> AppResult<()> {
        self.writes.fetch_add(1, Ordering::Relaxed);
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    async fn set_if_absent(&self, key: &str, value: OptionValue) -> AppResult<bool> {
        self.reads.fetch_add(1, Ordering::Relaxed);
        match self.entries.entry(key.to_string()) {
            dashmap::mapref::entry::Entry::Occupied(_) => {
                debug!(key = %key, "Option already present, leaving existing value");
                Ok(false)
            }
            dashmap::mapref::entry::Entry::Vacant(slot) => {
                self.writes.fetch_add(1, Ordering::Relaxed);
                slot.insert(value);
                Ok(true)
            }
        }
    }

    async fn delete(&self, key: &str) -> AppResult<bool> {
        self.writes.fetch_add(1, Ordering::Relaxed);
        Ok(self.entries.remove(key).is_some())
    }

    async fn exists(&self, key: &str) -> AppResult<bool> {
        self.reads.fetch_add(1, Ordering::Relaxed);
        Ok(self.entries.contains_key(key))
    }
}

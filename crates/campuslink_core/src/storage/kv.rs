//! Key/value storage contract and the volatile in-memory implementation.
//!
//! # Responsibility
//! - Define the storage seam shared by durable and tab-scoped storage.
//! - Provide the in-memory implementation modelling tab-scoped storage.
//!
//! # Invariants
//! - Keys map to whole serialized blobs; there is no partial update.
//! - `MemoryKvStorage` contents do not survive the process ("tab") ending.

use std::collections::HashMap;

use crate::storage::StorageResult;

/// Blob-per-key storage contract.
///
/// Both the durable store and the tab-scoped session store speak this
/// interface, so repositories stay agnostic of where a blob lives.
pub trait KvStorage {
    fn get(&self, key: &str) -> StorageResult<Option<String>>;
    fn put(&mut self, key: &str, value: &str) -> StorageResult<()>;
    fn remove(&mut self, key: &str) -> StorageResult<()>;
}

/// Volatile map-backed storage; models browser tab-scoped storage.
#[derive(Debug, Default)]
pub struct MemoryKvStorage {
    entries: HashMap<String, String>,
}

impl MemoryKvStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvStorage for MemoryKvStorage {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn put(&mut self, key: &str, value: &str) -> StorageResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> StorageResult<()> {
        self.entries.remove(key);
        Ok(())
    }
}

//! In-memory key-value store

use std::collections::BTreeMap;

use serde_json::Value;

use super::{KeyValueStore, StorageResult};

/// A [`KeyValueStore`] that lives only as long as the process
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, Value>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> StorageResult<Option<Value>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: Value) -> StorageResult<()> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    fn clear(&mut self) -> StorageResult<()> {
        self.entries.clear();
        Ok(())
    }
}

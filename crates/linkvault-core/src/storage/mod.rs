//! Storage layer
//!
//! A small key-value abstraction over where the collection lives.
//!
//! ## Backends
//!
//! - [`JsonFileStore`]: one JSON object file on disk, rewritten atomically
//! - [`MemoryStore`]: in-process map, for tests and embedding
//!
//! The link collection is kept under a single key, [`LINKS_KEY`], as a
//! JSON array of link records. It is always read and written as a whole.

pub mod error;
pub mod memory;
pub mod persistence;

use serde_json::Value;
use tracing::debug;

pub use error::{StorageError, StorageResult};
pub use memory::MemoryStore;
pub use persistence::JsonFileStore;

use crate::models::Link;

/// Key under which the link collection is stored
pub const LINKS_KEY: &str = "links";

/// Minimal key-value persistence interface
pub trait KeyValueStore {
    /// Read a value, `None` if the key is absent
    fn get(&self, key: &str) -> StorageResult<Option<Value>>;

    /// Write a value, replacing any previous one
    fn set(&mut self, key: &str, value: Value) -> StorageResult<()>;

    /// Remove every key
    fn clear(&mut self) -> StorageResult<()>;
}

/// Load the ordered link collection; an absent key is an empty collection
pub fn load_links(store: &dyn KeyValueStore) -> StorageResult<Vec<Link>> {
    let links = match store.get(LINKS_KEY)? {
        Some(value) => {
            serde_json::from_value(value).map_err(|source| StorageError::Encoding {
                key: LINKS_KEY.to_string(),
                source,
            })?
        }
        None => Vec::new(),
    };
    debug!(count = links.len(), "Loaded links");
    Ok(links)
}

/// Write the whole link collection as one value
pub fn save_links(store: &mut dyn KeyValueStore, links: &[Link]) -> StorageResult<()> {
    let value = serde_json::to_value(links).map_err(|source| StorageError::Encoding {
        key: LINKS_KEY.to_string(),
        source,
    })?;
    store.set(LINKS_KEY, value)?;
    debug!(count = links.len(), "Saved links");
    Ok(())
}

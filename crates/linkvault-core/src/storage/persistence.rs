//! File-backed key-value store
//!
//! All keys live in one JSON object file. Every write replaces the whole
//! file using an atomic write (write to temp file, sync, then rename), so
//! a crash never leaves a half-written store behind.
//!
//! Storage location: `~/.local/share/linkvault/storage.json` (configurable
//! via `Config`)

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use tracing::{debug, warn};

use super::{KeyValueStore, StorageError, StorageResult};
use crate::config::Config;

/// A [`KeyValueStore`] persisted as a single JSON object file
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Create a store at the given file path (the file may not exist yet)
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Create a store at the configured storage path
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.storage_path())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Check if the store file exists on disk
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Size of the store file in bytes (0 when absent)
    pub fn size(&self) -> u64 {
        fs::metadata(&self.path).map(|m| m.len()).unwrap_or(0)
    }

    /// Read the whole object; a missing file is an empty object
    fn read_all(&self) -> StorageResult<Map<String, Value>> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) if e.kind() == io::ErrorKind::PermissionDenied => {
                return Err(StorageError::PermissionDenied {
                    path: self.path.clone(),
                    source: e,
                })
            }
            Err(e) => {
                return Err(StorageError::ReadError {
                    path: self.path.clone(),
                    source: e,
                })
            }
        };

        match serde_json::from_slice::<Value>(&bytes) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(_) => Err(self.quarantine("expected a JSON object".to_string())),
            Err(e) => Err(self.quarantine(e.to_string())),
        }
    }

    /// Copy an unreadable store aside and report it as corrupt
    fn quarantine(&self, details: String) -> StorageError {
        let backup_path = backup_path_for(&self.path);
        if let Err(e) = fs::copy(&self.path, &backup_path) {
            warn!("Could not back up corrupt store to {:?}: {}", backup_path, e);
        }
        StorageError::CorruptDocument {
            path: self.path.clone(),
            backup_path,
            details,
        }
    }

    fn write_all(&self, map: Map<String, Value>) -> StorageResult<()> {
        let bytes = serde_json::to_vec_pretty(&Value::Object(map)).map_err(|source| {
            StorageError::Encoding {
                key: "*".to_string(),
                source,
            }
        })?;
        atomic_write(&self.path, &bytes)?;
        debug!("Wrote store {:?} ({} bytes)", self.path, bytes.len());
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> StorageResult<Option<Value>> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&mut self, key: &str, value: Value) -> StorageResult<()> {
        let mut map = self.read_all()?;
        map.insert(key.to_string(), value);
        self.write_all(map)
    }

    fn clear(&mut self) -> StorageResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::from_io(e, self.path.clone())),
        }
    }
}

fn backup_path_for(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".corrupt.backup");
    PathBuf::from(name)
}

/// Replace `path` with `data` via a synced temp file and a rename
///
/// Readers see either the old store or the new one, never a partial write.
fn atomic_write(path: &Path, data: &[u8]) -> StorageResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| StorageError::CreateDirectory {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    // Same directory so the rename stays on one filesystem
    let temp_path = path.with_extension("tmp");

    let mut file =
        File::create(&temp_path).map_err(|e| StorageError::from_io(e, temp_path.clone()))?;
    file.write_all(data)
        .map_err(|e| StorageError::from_io(e, temp_path.clone()))?;
    file.sync_all()
        .map_err(|e| StorageError::from_io(e, temp_path.clone()))?;

    fs::rename(&temp_path, path).map_err(|source| StorageError::AtomicWriteFailed {
        from: temp_path.clone(),
        to: path.to_path_buf(),
        source,
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Link, LinkFields};
    use crate::storage::{load_links, save_links};
    use serde_json::json;
    use tempfile::TempDir;

    fn store_in(temp_dir: &TempDir) -> JsonFileStore {
        JsonFileStore::new(temp_dir.path().join("storage.json"))
    }

    #[test]
    fn test_missing_file_reads_empty() {
        let temp_dir = TempDir::new().unwrap();
        let store = store_in(&temp_dir);

        assert!(!store.exists());
        assert_eq!(store.size(), 0);
        assert!(store.get("links").unwrap().is_none());
    }

    #[test]
    fn test_set_and_get() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = store_in(&temp_dir);

        store.set("links", json!([{"id": "1"}])).unwrap();
        store.set("other", json!(true)).unwrap();

        assert!(store.exists());
        assert!(store.size() > 0);
        assert_eq!(store.get("links").unwrap(), Some(json!([{"id": "1"}])));
        assert_eq!(store.get("other").unwrap(), Some(json!(true)));
        assert!(!temp_dir.path().join("storage.tmp").exists());
    }

    #[test]
    fn test_data_persists_across_instances() {
        let temp_dir = TempDir::new().unwrap();
        let links = vec![
            Link::new(LinkFields::new("https://example.com", "Web").with_tags(["a"])).unwrap(),
        ];

        {
            let mut store = store_in(&temp_dir);
            save_links(&mut store, &links).unwrap();
        }

        let store = store_in(&temp_dir);
        assert_eq!(load_links(&store).unwrap(), links);
    }

    #[test]
    fn test_clear_removes_file() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = store_in(&temp_dir);

        store.set("links", json!([])).unwrap();
        store.clear().unwrap();
        assert!(!store.exists());
        assert!(store.get("links").unwrap().is_none());

        // Clearing twice is fine
        store.clear().unwrap();
    }

    #[test]
    fn test_corrupt_file_is_backed_up() {
        let temp_dir = TempDir::new().unwrap();
        let store = store_in(&temp_dir);
        fs::write(store.path(), b"{ definitely not json").unwrap();

        let err = store.get("links").unwrap_err();
        match err {
            StorageError::CorruptDocument { backup_path, .. } => {
                assert!(backup_path.exists());
                assert!(backup_path.to_string_lossy().ends_with(".corrupt.backup"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_non_object_file_is_corrupt() {
        let temp_dir = TempDir::new().unwrap();
        let store = store_in(&temp_dir);
        fs::write(store.path(), b"[1, 2, 3]").unwrap();

        assert!(matches!(
            store.get("links"),
            Err(StorageError::CorruptDocument { .. })
        ));
    }

    #[test]
    fn test_atomic_write_creates_parent_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let nested_path = temp_dir
            .path()
            .join("a")
            .join("b")
            .join("c")
            .join("file.json");

        atomic_write(&nested_path, b"test data").unwrap();

        assert!(nested_path.exists());
        let content = fs::read_to_string(&nested_path).unwrap();
        assert_eq!(content, "test data");
    }
}

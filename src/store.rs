//! Small key-value persistence layer.
//!
//! Session and attendance state are plain serialized blobs keyed by name,
//! so the components can run against an in-memory stand-in in tests and a
//! file-backed store in the binary.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::error::Result;

/// Key for the serialized current identity.
pub const USER_KEY: &str = "ems_user";
/// Key for the bearer credential string.
pub const TOKEN_KEY: &str = "ems_token";
/// Key for the open attendance session.
pub const ATTENDANCE_KEY: &str = "attendance_state";

pub trait KvStore: Send {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
    fn remove(&mut self, key: &str);
}

/// Read a typed value. Unparseable blobs are treated as absent.
pub fn get_value<T: DeserializeOwned>(store: &dyn KvStore, key: &str) -> Option<T> {
    let raw = store.get(key)?;
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(key, error = %e, "Discarding unparseable stored value");
            None
        }
    }
}

/// Write a typed value. Serialization of our own models cannot fail in
/// practice; a failure is logged and the previous value left in place.
pub fn set_value<T: Serialize>(store: &mut dyn KvStore, key: &str, value: &T) {
    match serde_json::to_string(value) {
        Ok(raw) => store.set(key, &raw),
        Err(e) => warn!(key, error = %e, "Failed to serialize value for storage"),
    }
}

/// HashMap-backed store for tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }
}

/// One JSON file per key under a data directory. Write failures are
/// logged and swallowed; the store favors availability like the rest of
/// the client.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KvStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.path_for(key)).ok()
    }

    fn set(&mut self, key: &str, value: &str) {
        if let Err(e) = fs::write(self.path_for(key), value) {
            warn!(key, error = %e, "Failed to persist value");
        }
    }

    fn remove(&mut self, key: &str) {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => warn!(key, error = %e, "Failed to remove stored value"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_round_trip() {
        let mut store = MemoryStore::new();
        set_value(&mut store, "k", &vec![1u32, 2, 3]);
        let back: Vec<u32> = get_value(&store, "k").unwrap();
        assert_eq!(back, vec![1, 2, 3]);

        store.remove("k");
        assert!(store.get("k").is_none());
    }

    #[test]
    fn unparseable_blob_reads_as_absent() {
        let mut store = MemoryStore::new();
        store.set("k", "{not json");
        assert!(get_value::<Vec<u32>>(&store, "k").is_none());
    }

    #[test]
    fn file_store_round_trip() {
        let dir = std::env::temp_dir().join(format!("ems-store-{}", uuid::Uuid::new_v4()));
        let mut store = FileStore::new(&dir).unwrap();

        store.set("ems_token", "\"abc\"");
        assert_eq!(store.get("ems_token").as_deref(), Some("\"abc\""));

        store.remove("ems_token");
        assert!(store.get("ems_token").is_none());
        // removing twice is fine
        store.remove("ems_token");

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn unusable_data_dir_is_a_storage_error() {
        let file = std::env::temp_dir().join(format!("ems-blocker-{}", uuid::Uuid::new_v4()));
        std::fs::write(&file, "not a directory").unwrap();

        // the data dir path collides with an existing file
        let result = FileStore::new(file.join("store"));
        assert!(matches!(result, Err(crate::error::Error::Storage(_))));

        let _ = std::fs::remove_file(&file);
    }
}

//! Key-value persistence
//!
//! Features:
//! - One `KvStore` trait over string keys and string values
//! - In-memory, file-backed (native) and LocalStorage (wasm32) backends
//! - Fail-soft JSON helpers: unreadable or corrupt data loads as the default

#[cfg(not(target_arch = "wasm32"))]
pub mod file;
#[cfg(target_arch = "wasm32")]
pub mod local_storage;

use std::collections::HashMap;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStore;
#[cfg(target_arch = "wasm32")]
pub use local_storage::LocalStorageStore;

/// Errors a storage backend can report
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage is unavailable: {0}")]
    Unavailable(String),
    #[error("failed to encode value for key {key}: {source}")]
    Serialize {
        key: String,
        source: serde_json::Error,
    },
    #[error("failed to decode value for key {key}: {source}")]
    Deserialize {
        key: String,
        source: serde_json::Error,
    },
}

/// String key-value storage that survives process restarts
pub trait KvStore {
    /// Read a value; `Ok(None)` when the key was never written
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    /// Write a value, replacing any previous one
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
    /// Delete a key; deleting a missing key is not an error
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

impl<S: KvStore + ?Sized> KvStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}

/// Volatile store for tests and sessions without persistence
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.values.remove(key);
        Ok(())
    }
}

/// Read and decode a JSON value, reporting every failure
pub fn read_json<T: DeserializeOwned>(
    store: &dyn KvStore,
    key: &str,
) -> Result<Option<T>, StorageError> {
    let Some(json) = store.get(key)? else {
        return Ok(None);
    };
    serde_json::from_str(&json)
        .map(Some)
        .map_err(|source| StorageError::Deserialize {
            key: key.to_string(),
            source,
        })
}

/// Encode and write a JSON value
pub fn write_json<T: Serialize + ?Sized>(
    store: &mut dyn KvStore,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let json = serde_json::to_string(value).map_err(|source| StorageError::Serialize {
        key: key.to_string(),
        source,
    })?;
    store.set(key, &json)
}

/// Load a JSON value; missing, unreadable or corrupt data yields the default
pub fn load_or_default<T: DeserializeOwned + Default>(store: &dyn KvStore, key: &str) -> T {
    match read_json(store, key) {
        Ok(Some(value)) => value,
        Ok(None) => T::default(),
        Err(e) => {
            log::warn!("Ignoring stored {}: {}", key, e);
            T::default()
        }
    }
}

/// Save a JSON value; failures are logged and otherwise ignored
pub fn save_or_log<T: Serialize + ?Sized>(store: &mut dyn KvStore, key: &str, value: &T) -> bool {
    match write_json(store, key, value) {
        Ok(()) => true,
        Err(e) => {
            log::warn!("Failed to save {}: {}", key, e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Store that refuses every operation
    struct BrokenStore;

    impl KvStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Unavailable("broken".into()))
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable("broken".into()))
        }

        fn remove(&mut self, _key: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable("broken".into()))
        }
    }

    #[test]
    fn test_memory_store_roundtrip() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("k").unwrap(), None);
        store.set("k", "v").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
        store.remove("k").unwrap();
        assert_eq!(store.get("k").unwrap(), None);
        store.remove("k").unwrap();
    }

    #[test]
    fn test_json_save_then_get() {
        let mut store = MemoryStore::new();
        let value = vec![("a".to_string(), 3u32), ("b".to_string(), 1)];
        assert!(save_or_log(&mut store, "pairs", &value));
        let loaded: Vec<(String, u32)> = load_or_default(&store, "pairs");
        assert_eq!(loaded, value);
    }

    #[test]
    fn test_corrupt_json_loads_default() {
        let mut store = MemoryStore::new();
        store.set("pairs", "[{not json").unwrap();
        let loaded: Vec<u32> = load_or_default(&store, "pairs");
        assert!(loaded.is_empty());
        assert!(matches!(
            read_json::<Vec<u32>>(&store, "pairs"),
            Err(StorageError::Deserialize { .. })
        ));
    }

    #[test]
    fn test_broken_store_fails_soft() {
        let mut store = BrokenStore;
        let loaded: Vec<u32> = load_or_default(&store, "anything");
        assert!(loaded.is_empty());
        assert!(!save_or_log(&mut store, "anything", &vec![1u32]));
    }
}

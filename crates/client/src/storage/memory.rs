//! In-memory storage adapter.

use std::collections::HashMap;
use std::sync::Mutex;

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::{KvStore, StorageError, StorageKey};

/// Storage adapter backed by a process-local map.
///
/// Used for tests and for sessions that opt out of persistence; contents
/// vanish when the process exits.
#[derive(Debug, Default)]
pub struct MemoryStore {
    blobs: Mutex<HashMap<&'static str, String>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvStore for MemoryStore {
    fn get<T: DeserializeOwned>(&self, key: StorageKey) -> Result<Option<T>, StorageError> {
        let blobs = self.blobs.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        match blobs.get(key.as_str()) {
            Some(json) => Ok(Some(serde_json::from_str(json)?)),
            None => Ok(None),
        }
    }

    fn set<T: Serialize>(&self, key: StorageKey, value: &T) -> Result<(), StorageError> {
        let json = serde_json::to_string(value)?;
        let mut blobs = self.blobs.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        blobs.insert(key.as_str(), json);
        Ok(())
    }

    fn remove(&self, key: StorageKey) -> Result<(), StorageError> {
        let mut blobs = self.blobs.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        blobs.remove(key.as_str());
        Ok(())
    }
}

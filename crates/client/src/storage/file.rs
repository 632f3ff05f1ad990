//! File-backed storage adapter.
//!
//! One JSON file per [`StorageKey`] under a directory, written via a
//! temp-file rename so readers never observe a torn blob.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::{KvStore, StorageError, StorageKey};

/// Storage adapter persisting each key as `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open a store rooted at `dir`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn path_for(&self, key: StorageKey) -> PathBuf {
        self.dir.join(format!("{}.json", key.as_str()))
    }
}

impl KvStore for FileStore {
    fn get<T: DeserializeOwned>(&self, key: StorageKey) -> Result<Option<T>, StorageError> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(json) => Ok(Some(serde_json::from_str(&json)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set<T: Serialize>(&self, key: StorageKey, value: &T) -> Result<(), StorageError> {
        let json = serde_json::to_string(value)?;
        let path = self.path_for(key);
        write_atomic(&path, json.as_bytes())
    }

    fn remove(&self, key: StorageKey) -> Result<(), StorageError> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Write to a sibling temp file, then rename over the target.
fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), StorageError> {
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, bytes)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip_through_disk() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = FileStore::open(dir.path()).expect("open");

        store
            .set(StorageKey::RewardRate, &40_u32)
            .expect("set rate");

        // A fresh handle over the same directory sees the value
        let reopened = FileStore::open(dir.path()).expect("reopen");
        let rate: Option<u32> = reopened.get(StorageKey::RewardRate).expect("get rate");
        assert_eq!(rate, Some(40));
    }

    #[test]
    fn test_remove_missing_is_ok() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = FileStore::open(dir.path()).expect("open");
        store.remove(StorageKey::Cart).expect("remove absent");
    }

    #[test]
    fn test_corrupt_blob_is_a_serde_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = FileStore::open(dir.path()).expect("open");
        std::fs::write(dir.path().join("maejang_points.json"), b"not-json{")
            .expect("write corrupt blob");

        let result: Result<Option<i64>, _> = store.get(StorageKey::Points);
        assert!(matches!(result, Err(StorageError::Serde(_))));
    }
}

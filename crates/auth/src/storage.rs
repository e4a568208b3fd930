//! Browser-style key/value storage backing the client session.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage io error: {0}")]
    Io(#[from] io::Error),
    #[error("failed to encode storage contents: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Process-wide string key/value storage.
///
/// Reads never fail: anything that cannot be read is reported as absent.
pub trait ClientStorage: Send + Sync {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

impl<T: ClientStorage + ?Sized> ClientStorage for std::sync::Arc<T> {
    fn get_item(&self, key: &str) -> Option<String> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove_item(key)
    }
}

/// In-memory storage, mainly for tests and embedding.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: Mutex<BTreeMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a storage pre-populated with the given entries.
    pub fn with_items<I, K, V>(items: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let items = items
            .into_iter()
            .map(|(key, value)| (key.into(), value.into()))
            .collect();
        Self {
            items: Mutex::new(items),
        }
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, BTreeMap<String, String>> {
        // a poisoned map is still a valid map
        self.items.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl ClientStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.lock().get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.lock().insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.lock().remove(key);
        Ok(())
    }
}

/// Storage persisted as a single JSON object on disk.
///
/// A missing file reads as empty storage. A file that cannot be read or
/// parsed also reads as empty and is replaced by the next write.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    guard: Mutex<()>,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            guard: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> BTreeMap<String, String> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(error) if error.kind() == io::ErrorKind::NotFound => return BTreeMap::new(),
            Err(error) => {
                warn!(path = %self.path.display(), %error, "unable to read client storage");
                return BTreeMap::new();
            }
        };

        serde_json::from_str(&contents).unwrap_or_else(|error| {
            warn!(path = %self.path.display(), %error, "client storage is not a JSON object");
            BTreeMap::new()
        })
    }

    fn persist(&self, items: &BTreeMap<String, String>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let encoded = serde_json::to_string_pretty(items)?;
        fs::write(&self.path, encoded)?;
        debug!(path = %self.path.display(), entries = items.len(), "client storage written");
        Ok(())
    }

    fn update<F>(&self, apply: F) -> Result<(), StorageError>
    where
        F: FnOnce(&mut BTreeMap<String, String>) -> bool,
    {
        let _guard = self.guard.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let mut items = self.load();
        if apply(&mut items) {
            self.persist(&items)?;
        }
        Ok(())
    }
}

impl ClientStorage for FileStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        let _guard = self.guard.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        self.load().remove(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.update(|items| {
            items.insert(key.to_owned(), value.to_owned());
            true
        })
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.update(|items| items.remove(key).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn memory_storage_overwrites_and_removes() {
        let storage = MemoryStorage::new();
        storage.set_item("token", "a").unwrap();
        storage.set_item("token", "b").unwrap();
        assert_eq!(storage.get_item("token").as_deref(), Some("b"));

        storage.remove_item("token").unwrap();
        assert!(storage.get_item("token").is_none());
        assert!(storage.is_empty());
    }

    #[test]
    fn file_storage_survives_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested/session.json");

        FileStorage::new(&path).set_item("token", "t1").unwrap();

        let reopened = FileStorage::new(&path);
        assert_eq!(reopened.get_item("token").as_deref(), Some("t1"));
    }

    #[test]
    fn file_storage_treats_missing_file_as_empty() {
        let dir = TempDir::new().unwrap();
        let storage = FileStorage::new(dir.path().join("absent.json"));

        assert!(storage.get_item("token").is_none());
        storage.remove_item("token").unwrap();
        assert!(!storage.path().exists(), "removing from empty storage writes nothing");
    }

    #[test]
    fn file_storage_recovers_from_garbage_contents() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "{not json").unwrap();

        let storage = FileStorage::new(&path);
        assert!(storage.get_item("token").is_none());

        storage.set_item("token", "fresh").unwrap();
        assert_eq!(storage.get_item("token").as_deref(), Some("fresh"));
    }
}

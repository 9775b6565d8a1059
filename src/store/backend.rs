// ABOUTME: Storage backends for the onboarding record
// A single key-value slot: file-backed in production, in-memory for tests

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::error::StorageError;

/// One durable slot holding the serialized onboarding record.
#[cfg_attr(test, mockall::automock)]
pub trait StorageBackend {
    /// Read the stored document, or `None` if nothing has been stored yet
    fn read(&self) -> Result<Option<String>, StorageError>;

    /// Replace the stored document
    fn write(&self, contents: &str) -> Result<(), StorageError>;

    /// Remove the stored document
    fn clear(&self) -> Result<(), StorageError>;
}

/// File-backed storage at a fixed path
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    /// Storage at an explicit path (used by tests and custom deployments)
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Storage at the default per-user location
    pub fn at_default_path() -> Result<Self, StorageError> {
        Ok(Self::new(Self::default_path()?))
    }

    /// Default location: `~/.bridgevest/onboarding.json`
    pub fn default_path() -> Result<PathBuf, StorageError> {
        let home = dirs::home_dir().ok_or(StorageError::NoHomeDir)?;
        Ok(home.join(".bridgevest").join("onboarding.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StorageBackend for FileStorage {
    fn read(&self) -> Result<Option<String>, StorageError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let contents = fs::read_to_string(&self.path).map_err(|source| StorageError::Read {
            path: self.path.display().to_string(),
            source,
        })?;
        Ok(Some(contents))
    }

    fn write(&self, contents: &str) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|source| StorageError::Write {
                path: parent.display().to_string(),
                source,
            })?;
        }
        fs::write(&self.path, contents).map_err(|source| StorageError::Write {
            path: self.path.display().to_string(),
            source,
        })
    }

    fn clear(&self) -> Result<(), StorageError> {
        if self.path.exists() {
            fs::remove_file(&self.path).map_err(|source| StorageError::Write {
                path: self.path.display().to_string(),
                source,
            })?;
        }
        Ok(())
    }
}

/// In-memory storage for tests; clones share the same slot
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    slot: Arc<Mutex<Option<String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the slot with pre-existing contents, as if from a prior session
    pub fn with_contents(contents: &str) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Some(contents.to_string()))),
        }
    }

    /// Snapshot of the current slot contents
    pub fn contents(&self) -> Option<String> {
        self.slot.lock().expect("storage slot poisoned").clone()
    }
}

impl StorageBackend for MemoryStorage {
    fn read(&self) -> Result<Option<String>, StorageError> {
        Ok(self.contents())
    }

    fn write(&self, contents: &str) -> Result<(), StorageError> {
        *self.slot.lock().expect("storage slot poisoned") = Some(contents.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        *self.slot.lock().expect("storage slot poisoned") = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_storage_read_absent() {
        let dir = TempDir::new().unwrap();
        let storage = FileStorage::new(dir.path().join("onboarding.json"));
        assert!(storage.read().unwrap().is_none());
    }

    #[test]
    fn test_file_storage_write_creates_parent_dirs() {
        let dir = TempDir::new().unwrap();
        let storage = FileStorage::new(dir.path().join("nested").join("onboarding.json"));
        storage.write("{}").unwrap();
        assert_eq!(storage.read().unwrap().as_deref(), Some("{}"));
    }

    #[test]
    fn test_file_storage_clear_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let storage = FileStorage::new(dir.path().join("onboarding.json"));
        storage.write("{}").unwrap();
        storage.clear().unwrap();
        storage.clear().unwrap();
        assert!(storage.read().unwrap().is_none());
    }

    #[test]
    fn test_memory_storage_clones_share_slot() {
        let storage = MemoryStorage::new();
        let handle = storage.clone();
        storage.write("data").unwrap();
        assert_eq!(handle.contents().as_deref(), Some("data"));
        handle.clear().unwrap();
        assert!(storage.contents().is_none());
    }
}

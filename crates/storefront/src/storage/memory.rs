//! In-process storage backend.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use super::{DurableStorage, StorageError, validate_key};

/// Map-backed storage.
///
/// Clones share the same entries, so a second session built from a clone
/// sees what the first one wrote. An optional quota caps the total number of
/// bytes held across all keys, the way browser local storage does.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: Arc<RwLock<HashMap<String, String>>>,
    quota: Option<usize>,
}

impl MemoryStorage {
    /// Create an empty storage with no quota.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty storage that rejects writes beyond `bytes` in total
    /// (keys plus values).
    #[must_use]
    pub fn with_quota(bytes: usize) -> Self {
        Self {
            entries: Arc::default(),
            quota: Some(bytes),
        }
    }

    /// Number of keys currently held.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Unavailable` if the map lock is poisoned.
    pub fn len(&self) -> Result<usize, StorageError> {
        Ok(self.read()?.len())
    }

    /// Whether no keys are held.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Unavailable` if the map lock is poisoned.
    pub fn is_empty(&self) -> Result<bool, StorageError> {
        Ok(self.read()?.is_empty())
    }

    fn read(
        &self,
    ) -> Result<std::sync::RwLockReadGuard<'_, HashMap<String, String>>, StorageError> {
        self.entries
            .read()
            .map_err(|_| StorageError::Unavailable("memory storage lock poisoned".to_string()))
    }

    fn write(
        &self,
    ) -> Result<std::sync::RwLockWriteGuard<'_, HashMap<String, String>>, StorageError> {
        self.entries
            .write()
            .map_err(|_| StorageError::Unavailable("memory storage lock poisoned".to_string()))
    }
}

impl DurableStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        validate_key(key)?;
        Ok(self.read()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        validate_key(key)?;
        let mut entries = self.write()?;

        if let Some(capacity) = self.quota {
            let used: usize = entries
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(k, v)| k.len() + v.len())
                .sum();
            let needed = key.len() + value.len();
            let available = capacity.saturating_sub(used);
            if needed > available {
                return Err(StorageError::QuotaExceeded {
                    key: key.to_string(),
                    needed,
                    capacity: available,
                });
            }
        }

        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        validate_key(key)?;
        self.write()?.remove(key);
        Ok(())
    }
}

//! File-backed storage backend.
//!
//! Values are stored at `<dir>/<key>.json`. Writes are atomic via a
//! temp-rename pattern so a crash mid-write never leaves a truncated value
//! behind.

use std::io;
use std::path::{Path, PathBuf};

use super::{DurableStorage, StorageError, validate_key};

/// Storage rooted at a state directory.
///
/// The directory is created on first write.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Create a storage rooted at `dir`.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The state directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file holding `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::InvalidKey` if `key` is not a plain name.
    pub fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl DurableStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        match std::fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        std::fs::create_dir_all(&self.dir)?;

        let tmp_path = path.with_extension("json.tmp");
        std::fs::write(&tmp_path, value)?;
        if let Err(e) = std::fs::rename(&tmp_path, &path) {
            let _ = std::fs::remove_file(&tmp_path);
            return Err(e.into());
        }

        tracing::trace!(path = %path.display(), bytes = value.len(), "Wrote storage key");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_path_for() {
        let storage = FileStorage::new("/var/lib/shop");
        assert_eq!(
            storage.path_for("jewelry_cart").unwrap(),
            PathBuf::from("/var/lib/shop/jewelry_cart.json")
        );
    }

    #[test]
    fn test_set_then_get_roundtrips() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let storage = FileStorage::new(dir.path().join("state"));

        storage.set("jewelry_wishlist", "[]").unwrap();
        assert_eq!(
            storage.get("jewelry_wishlist").unwrap().as_deref(),
            Some("[]")
        );
    }

    #[test]
    fn test_get_missing_returns_none() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let storage = FileStorage::new(dir.path());
        assert!(storage.get("shop_settings").unwrap().is_none());
    }

    #[test]
    fn test_set_uses_atomic_temp_rename() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let storage = FileStorage::new(dir.path());

        storage.set("jewelry_cart", "[]").unwrap();

        let final_path = storage.path_for("jewelry_cart").unwrap();
        assert!(final_path.exists(), "final file should exist");
        assert!(
            !final_path.with_extension("json.tmp").exists(),
            "temp file should not exist after successful write"
        );
    }

    #[test]
    fn test_failed_rename_removes_temp_file() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let storage = FileStorage::new(dir.path());

        // A directory where the final file should go makes the rename fail.
        let final_path = storage.path_for("jewelry_cart").unwrap();
        std::fs::create_dir_all(final_path.join("blocker")).unwrap();

        assert!(storage.set("jewelry_cart", "[]").is_err());
        assert!(
            !final_path.with_extension("json.tmp").exists(),
            "temp file should be removed after a failed write"
        );
    }

    #[test]
    fn test_remove_missing_is_ok() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let storage = FileStorage::new(dir.path());

        storage.set("jewelry_cart", "[]").unwrap();
        storage.remove("jewelry_cart").unwrap();
        storage.remove("jewelry_cart").unwrap();
        assert!(storage.get("jewelry_cart").unwrap().is_none());
    }
}

//! Snapshot persistence on top of [`DurableStorage`].
//!
//! Reads happen once, when a store is created; writes happen on every
//! mutation. Both directions are forgiving:
//!
//! - A missing key, an unreadable backend, or stored text that does not parse
//!   all yield the default value.
//! - A failed write is logged and dropped. The caller's in-memory state is
//!   the authority and is never rolled back.

use serde::{Serialize, de::DeserializeOwned};

use crate::storage::{DurableStorage, StorageError};

/// Load the value stored under `key`, or `T::default()` if there is none.
pub fn load_or_default<T>(storage: &dyn DurableStorage, key: &str) -> T
where
    T: DeserializeOwned + Default,
{
    load(storage, key).unwrap_or_default()
}

/// Load the value stored under `key`.
///
/// Returns `None` when the key is absent, the backend fails, or the stored
/// text is not valid for `T`. Failures other than absence are logged at
/// `warn` level.
pub fn load<T>(storage: &dyn DurableStorage, key: &str) -> Option<T>
where
    T: DeserializeOwned,
{
    let raw = match storage.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            tracing::debug!(key, "No stored snapshot; using default");
            return None;
        }
        Err(e) => {
            tracing::warn!(key, error = %e, "Failed to read stored snapshot; using default");
            return None;
        }
    };

    match serde_json::from_str::<T>(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(key, error = %e, "Stored snapshot is not valid; using default");
            None
        }
    }
}

/// Write `value` under `key`, attempted once.
///
/// Returns whether the write succeeded. Failures are logged at `warn` level
/// and otherwise ignored.
pub fn persist<T>(storage: &dyn DurableStorage, key: &str, value: &T) -> bool
where
    T: Serialize + ?Sized,
{
    match try_persist(storage, key, value) {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(key, error = %e, "Failed to persist snapshot; keeping in-memory state");
            false
        }
    }
}

fn try_persist<T>(storage: &dyn DurableStorage, key: &str, value: &T) -> Result<(), StorageError>
where
    T: Serialize + ?Sized,
{
    let json = serde_json::to_string(value)?;
    storage.set(key, &json)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    #[test]
    fn test_missing_key_yields_default() {
        let storage = MemoryStorage::new();
        let value: Vec<u32> = load_or_default(&storage, "jewelry_cart");
        assert!(value.is_empty());
    }

    #[test]
    fn test_corrupt_json_yields_default() {
        let storage = MemoryStorage::new();
        storage.set("jewelry_cart", "this is not valid json!!!").unwrap();

        let value: Vec<u32> = load_or_default(&storage, "jewelry_cart");
        assert!(value.is_empty());
    }

    #[test]
    fn test_persist_then_load() {
        let storage = MemoryStorage::new();
        assert!(persist(&storage, "jewelry_cart", &[1_u32, 2, 3][..]));

        let value: Option<Vec<u32>> = load(&storage, "jewelry_cart");
        assert_eq!(value, Some(vec![1, 2, 3]));
    }

    #[test]
    fn test_persist_failure_is_reported_not_raised() {
        let storage = MemoryStorage::with_quota(4);
        assert!(!persist(&storage, "jewelry_cart", &[1_u32, 2, 3][..]));
        assert!(storage.get("jewelry_cart").unwrap().is_none());
    }
}

//! Durable key-value storage for session state.
//!
//! Each store mirrors its full snapshot into one key, JSON-encoded:
//!
//! ## Keys
//!
//! - `jewelry_cart` - Cart lines (`[{ "product": {...}, "quantity": n }]`)
//! - `jewelry_wishlist` - Saved products (`[{...}]`)
//! - `shop_settings` - Shop identity record (`{ "shopName": ..., "tagline": ... }`)
//!
//! # Backends
//!
//! - [`MemoryStorage`] - In-process map, optionally with a byte quota
//! - [`FileStorage`] - One JSON file per key under a state directory
//!
//! Storage is a best-effort mirror. Stores never surface a [`StorageError`]
//! to their callers; see [`crate::persistence`].

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

/// Error type for storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),
    #[error("quota exceeded writing {key}: {needed} bytes needed, {capacity} bytes available")]
    QuotaExceeded {
        key: String,
        needed: usize,
        capacity: usize,
    },
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// A local key-value store that outlives the process.
///
/// Implementations must be safe to share between the stores of one session.
pub trait DurableStorage: Send + Sync {
    /// Read the raw value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read. A missing key is
    /// `Ok(None)`, not an error.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the write is rejected or fails.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete `key`. Removing an absent key succeeds.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Storage keys, one per store.
pub mod keys {
    /// Key for the cart lines.
    pub const CART: &str = "jewelry_cart";

    /// Key for the wishlist products.
    pub const WISHLIST: &str = "jewelry_wishlist";

    /// Key for the shop settings record.
    pub const SHOP_SETTINGS: &str = "shop_settings";
}

/// Check that a key is usable by every backend (it becomes a file name for
/// [`FileStorage`]).
pub(crate) fn validate_key(key: &str) -> Result<(), StorageError> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');

    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_string()))
    }
}

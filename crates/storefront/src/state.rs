//! Session state shared across views.

use std::sync::Arc;

use crate::config::{ShopConfig, StorageBackend};
use crate::storage::{DurableStorage, FileStorage, MemoryStorage};
use crate::stores::{CartStore, SettingsStore, WishlistStore};

/// Session state shared by every view.
///
/// Built once per session; holds exactly one instance of each store. This
/// struct is cheaply cloneable via `Arc`, and every clone hands out the same
/// stores.
#[derive(Clone)]
pub struct ShopSession {
    inner: Arc<ShopSessionInner>,
}

struct ShopSessionInner {
    storage: Arc<dyn DurableStorage>,
    cart: CartStore,
    wishlist: WishlistStore,
    settings: SettingsStore,
}

impl ShopSession {
    /// Create a session, loading every store from `storage`.
    ///
    /// # Arguments
    ///
    /// * `storage` - Durable storage shared by the three stores
    #[must_use]
    pub fn new(storage: Arc<dyn DurableStorage>) -> Self {
        let cart = CartStore::load(Arc::clone(&storage));
        let wishlist = WishlistStore::load(Arc::clone(&storage));
        let settings = SettingsStore::load(Arc::clone(&storage));

        tracing::info!(
            cart_items = cart.cart_count(),
            wishlist_items = wishlist.len(),
            "Session loaded"
        );

        Self {
            inner: Arc::new(ShopSessionInner {
                storage,
                cart,
                wishlist,
                settings,
            }),
        }
    }

    /// Create a session backed by the storage named in `config`.
    #[must_use]
    pub fn from_config(config: &ShopConfig) -> Self {
        let storage: Arc<dyn DurableStorage> = match &config.storage {
            StorageBackend::Memory => Arc::new(MemoryStorage::new()),
            StorageBackend::File { dir } => {
                tracing::debug!(dir = %dir.display(), "Using file storage");
                Arc::new(FileStorage::new(dir.clone()))
            }
        };
        Self::new(storage)
    }

    /// Get a reference to the cart store.
    #[must_use]
    pub fn cart(&self) -> &CartStore {
        &self.inner.cart
    }

    /// Get a reference to the wishlist store.
    #[must_use]
    pub fn wishlist(&self) -> &WishlistStore {
        &self.inner.wishlist
    }

    /// Get a reference to the shop settings store.
    #[must_use]
    pub fn settings(&self) -> &SettingsStore {
        &self.inner.settings
    }

    /// Get a reference to the durable storage behind the stores.
    #[must_use]
    pub fn storage(&self) -> &Arc<dyn DurableStorage> {
        &self.inner.storage
    }
}

impl std::fmt::Debug for ShopSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShopSession")
            .field("cart", &self.inner.cart)
            .field("wishlist", &self.inner.wishlist)
            .field("settings", &self.inner.settings)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use jewelry_shop_core::{Product, ProductId};
    use rust_decimal::Decimal;

    use super::*;

    #[test]
    fn test_clones_share_stores() {
        let session = ShopSession::new(Arc::new(MemoryStorage::new()));
        let view = session.clone();

        view.cart().add_one(Product::new(
            ProductId::new(1),
            "Eternal Gold Bangle",
            Decimal::from(45_000),
            "Bangles",
        ));

        assert_eq!(session.cart().cart_count(), 1);
    }

    #[test]
    fn test_memory_backend_from_config() {
        let config = ShopConfig {
            storage: StorageBackend::Memory,
            ..ShopConfig::default()
        };
        let session = ShopSession::from_config(&config);
        assert!(session.cart().snapshot().is_empty());
        assert_eq!(session.settings().snapshot().shop_name, "Jewelry Shop");
    }

    #[test]
    fn test_file_backend_survives_restart() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let config = ShopConfig::default().with_state_dir(dir.path());

        let first = ShopSession::from_config(&config);
        first.wishlist().add_to_wishlist(Product::new(
            ProductId::new(6),
            "Sapphire Studs",
            Decimal::from(32_000),
            "Earrings",
        ));
        drop(first);

        let second = ShopSession::from_config(&config);
        assert!(second.wishlist().is_in_wishlist(ProductId::new(6)));
    }
}

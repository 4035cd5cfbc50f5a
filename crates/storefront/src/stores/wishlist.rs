//! Wishlist store.
//!
//! Saved products, oldest first, never more than one entry per product id.

use std::sync::Arc;

use tokio::sync::watch;

use jewelry_shop_core::{Product, ProductId};

use crate::persistence;
use crate::storage::{DurableStorage, keys};

/// Immutable view of the wishlist at one instant.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WishlistSnapshot {
    items: Arc<[Product]>,
}

impl WishlistSnapshot {
    #[must_use]
    pub fn items(&self) -> &[Product] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Product> {
        self.items.iter()
    }

    #[must_use]
    pub fn get(&self, product_id: ProductId) -> Option<&Product> {
        self.items.iter().find(|p| p.id == product_id)
    }

    #[must_use]
    pub fn contains(&self, product_id: ProductId) -> bool {
        self.get(product_id).is_some()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl From<Vec<Product>> for WishlistSnapshot {
    fn from(items: Vec<Product>) -> Self {
        Self {
            items: items.into(),
        }
    }
}

impl<'a> IntoIterator for &'a WishlistSnapshot {
    type Item = &'a Product;
    type IntoIter = std::slice::Iter<'a, Product>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// The shopper's wishlist.
///
/// Cheaply cloneable; clones are handles to the same wishlist.
#[derive(Clone)]
pub struct WishlistStore {
    inner: Arc<WishlistStoreInner>,
}

struct WishlistStoreInner {
    storage: Arc<dyn DurableStorage>,
    state: watch::Sender<WishlistSnapshot>,
}

impl WishlistStore {
    /// Load the wishlist from `storage`, or start empty.
    ///
    /// If the stored list repeats a product, the first occurrence wins.
    #[must_use]
    pub fn load(storage: Arc<dyn DurableStorage>) -> Self {
        let stored: Vec<Product> = persistence::load_or_default(storage.as_ref(), keys::WISHLIST);
        let mut items: Vec<Product> = Vec::with_capacity(stored.len());
        for product in stored {
            if !items.iter().any(|p| p.id == product.id) {
                items.push(product);
            }
        }
        tracing::debug!(items = items.len(), "Wishlist loaded");

        Self {
            inner: Arc::new(WishlistStoreInner {
                storage,
                state: watch::Sender::new(WishlistSnapshot::from(items)),
            }),
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> WishlistSnapshot {
        self.inner.state.borrow().clone()
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<WishlistSnapshot> {
        self.inner.state.subscribe()
    }

    /// Save `product`. Already-saved products are left where they are.
    pub fn add_to_wishlist(&self, product: Product) -> WishlistSnapshot {
        self.mutate(|items| insert(items, product))
    }

    /// Remove the entry for `product_id`. Absent ids are a no-op.
    pub fn remove_from_wishlist(&self, product_id: ProductId) -> WishlistSnapshot {
        self.mutate(|items| remove(items, product_id))
    }

    #[must_use]
    pub fn is_in_wishlist(&self, product_id: ProductId) -> bool {
        self.inner.state.borrow().contains(product_id)
    }

    /// Remove `product` if it is saved, save it otherwise.
    ///
    /// Returns `true` if the product is now in the wishlist. The membership
    /// check and the change happen under one lock.
    pub fn toggle_wishlist(&self, product: Product) -> bool {
        let mut added = false;
        self.mutate(|items| {
            if items.iter().any(|p| p.id == product.id) {
                remove(items, product.id)
            } else {
                added = true;
                insert(items, product)
            }
        });
        added
    }

    pub fn clear_wishlist(&self) -> WishlistSnapshot {
        self.mutate(|items| {
            let changed = !items.is_empty();
            items.clear();
            changed
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.state.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.state.borrow().is_empty()
    }

    fn mutate<F>(&self, op: F) -> WishlistSnapshot
    where
        F: FnOnce(&mut Vec<Product>) -> bool,
    {
        let mut result = None;
        self.inner.state.send_if_modified(|current| {
            let mut items = current.items().to_vec();
            if !op(&mut items) {
                result = Some(current.clone());
                return false;
            }

            let next = WishlistSnapshot::from(items);
            persistence::persist(self.inner.storage.as_ref(), keys::WISHLIST, next.items());
            *current = next.clone();
            result = Some(next);
            true
        });

        result.unwrap_or_default()
    }
}

impl std::fmt::Debug for WishlistStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WishlistStore")
            .field("items", &self.inner.state.borrow().len())
            .finish_non_exhaustive()
    }
}

fn insert(items: &mut Vec<Product>, product: Product) -> bool {
    if items.iter().any(|p| p.id == product.id) {
        return false;
    }
    tracing::debug!(product_id = %product.id, "Added to wishlist");
    items.push(product);
    true
}

fn remove(items: &mut Vec<Product>, product_id: ProductId) -> bool {
    let before = items.len();
    items.retain(|p| p.id != product_id);
    let removed = items.len() != before;
    if removed {
        tracing::debug!(%product_id, "Removed from wishlist");
    }
    removed
}

//! Shopping cart store.
//!
//! The cart is an ordered list of [`CartLine`]s with at most one line per
//! product. Every mutation builds a new [`CartSnapshot`], mirrors it to
//! durable storage under [`keys::CART`], then publishes it to subscribers.

use std::sync::Arc;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use jewelry_shop_core::{Product, ProductId};

use crate::persistence;
use crate::storage::{DurableStorage, keys};

/// Error type for cart operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CartError {
    /// Quantities start at one; use `remove_from_cart` to drop a line.
    #[error("quantity for product {product_id} must be at least 1")]
    ZeroQuantity { product_id: ProductId },
}

/// One product in the cart with its quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub product: Product,
    pub quantity: u32,
}

impl CartLine {
    /// Price of the line (`unit price × quantity`).
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.product.unit_price().times(self.quantity).amount
    }
}

/// Immutable view of the cart at one instant.
///
/// Cheap to clone. A snapshot handed out earlier is never changed by later
/// mutations.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CartSnapshot {
    lines: Arc<[CartLine]>,
}

impl CartSnapshot {
    /// Lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Iterate over the lines in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, CartLine> {
        self.lines.iter()
    }

    /// The line for `product_id`, if any.
    #[must_use]
    pub fn line(&self, product_id: ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.product.id == product_id)
    }

    /// Number of distinct products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of `price × quantity` over all lines, saturating at
    /// `Decimal::MAX`.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.lines
            .iter()
            .map(CartLine::line_total)
            .fold(Decimal::ZERO, Decimal::saturating_add)
    }

    /// Sum of quantities over all lines (items, not lines).
    #[must_use]
    pub fn count(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }
}

impl From<Vec<CartLine>> for CartSnapshot {
    fn from(lines: Vec<CartLine>) -> Self {
        Self {
            lines: lines.into(),
        }
    }
}

impl<'a> IntoIterator for &'a CartSnapshot {
    type Item = &'a CartLine;
    type IntoIter = std::slice::Iter<'a, CartLine>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// The shopper's cart.
///
/// Cheaply cloneable; clones are handles to the same cart.
#[derive(Clone)]
pub struct CartStore {
    inner: Arc<CartStoreInner>,
}

struct CartStoreInner {
    storage: Arc<dyn DurableStorage>,
    state: watch::Sender<CartSnapshot>,
}

impl CartStore {
    /// Load the cart from `storage`, or start empty.
    ///
    /// Stored lines are normalized: zero-quantity lines are dropped and
    /// repeated products are merged into their first line.
    #[must_use]
    pub fn load(storage: Arc<dyn DurableStorage>) -> Self {
        let stored: Vec<CartLine> = persistence::load_or_default(storage.as_ref(), keys::CART);
        let lines = normalize(stored);
        tracing::debug!(lines = lines.len(), "Cart loaded");

        Self {
            inner: Arc::new(CartStoreInner {
                storage,
                state: watch::Sender::new(CartSnapshot::from(lines)),
            }),
        }
    }

    /// The current cart.
    #[must_use]
    pub fn snapshot(&self) -> CartSnapshot {
        self.inner.state.borrow().clone()
    }

    /// Subscribe to cart changes.
    ///
    /// The receiver yields the snapshot after every mutation that changed
    /// the cart.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<CartSnapshot> {
        self.inner.state.subscribe()
    }

    /// Add `quantity` units of `product`.
    ///
    /// Increments the existing line for the product, or appends a new line.
    ///
    /// # Errors
    ///
    /// Returns `CartError::ZeroQuantity` if `quantity` is 0. The cart is
    /// left unchanged.
    pub fn add_to_cart(
        &self,
        product: Product,
        quantity: u32,
    ) -> Result<CartSnapshot, CartError> {
        if quantity == 0 {
            return Err(CartError::ZeroQuantity {
                product_id: product.id,
            });
        }

        let product_id = product.id;
        let snapshot = self.add(product, quantity);
        tracing::debug!(%product_id, quantity, "Added to cart");
        Ok(snapshot)
    }

    /// Add a single unit of `product`.
    pub fn add_one(&self, product: Product) -> CartSnapshot {
        self.add(product, 1)
    }

    /// Remove the line for `product_id`. Absent ids are a no-op.
    pub fn remove_from_cart(&self, product_id: ProductId) -> CartSnapshot {
        self.mutate(|lines| {
            let before = lines.len();
            lines.retain(|line| line.product.id != product_id);
            let removed = lines.len() != before;
            if removed {
                tracing::debug!(%product_id, "Removed from cart");
            }
            removed
        })
    }

    /// Set the quantity of the line for `product_id`.
    ///
    /// There is no upper bound here; the cart UI caps quantities itself.
    /// Absent ids are a no-op.
    ///
    /// # Errors
    ///
    /// Returns `CartError::ZeroQuantity` if `quantity` is 0. The cart is
    /// left unchanged.
    pub fn update_quantity(
        &self,
        product_id: ProductId,
        quantity: u32,
    ) -> Result<CartSnapshot, CartError> {
        if quantity == 0 {
            return Err(CartError::ZeroQuantity { product_id });
        }

        Ok(self.mutate(|lines| {
            match lines.iter_mut().find(|l| l.product.id == product_id) {
                Some(line) if line.quantity != quantity => {
                    line.quantity = quantity;
                    tracing::debug!(%product_id, quantity, "Updated cart quantity");
                    true
                }
                _ => false,
            }
        }))
    }

    /// Sum of `price × quantity` over all lines, unformatted.
    #[must_use]
    pub fn cart_total(&self) -> Decimal {
        self.inner.state.borrow().total()
    }

    /// Total number of items (sum of quantities).
    #[must_use]
    pub fn cart_count(&self) -> u64 {
        self.inner.state.borrow().count()
    }

    /// Empty the cart.
    pub fn clear_cart(&self) -> CartSnapshot {
        self.mutate(|lines| {
            let changed = !lines.is_empty();
            lines.clear();
            if changed {
                tracing::debug!("Cart cleared");
            }
            changed
        })
    }

    fn add(&self, product: Product, quantity: u32) -> CartSnapshot {
        let product_id = product.id;
        self.mutate(move |lines| {
            if let Some(line) = lines.iter_mut().find(|l| l.product.id == product_id) {
                line.quantity = line.quantity.saturating_add(quantity);
            } else {
                lines.push(CartLine { product, quantity });
            }
            true
        })
    }

    /// Apply `op` to a copy of the lines. If it reports a change, persist the
    /// result and publish it as the new snapshot.
    ///
    /// The channel lock is held for the whole read-modify-write, so
    /// mutations never interleave.
    fn mutate<F>(&self, op: F) -> CartSnapshot
    where
        F: FnOnce(&mut Vec<CartLine>) -> bool,
    {
        let mut result = None;
        self.inner.state.send_if_modified(|current| {
            let mut lines = current.lines().to_vec();
            if !op(&mut lines) {
                result = Some(current.clone());
                return false;
            }

            let next = CartSnapshot::from(lines);
            persistence::persist(self.inner.storage.as_ref(), keys::CART, next.lines());
            *current = next.clone();
            result = Some(next);
            true
        });

        result.unwrap_or_default()
    }
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("lines", &self.inner.state.borrow().len())
            .finish_non_exhaustive()
    }
}

/// Drop zero-quantity lines and merge repeated products.
fn normalize(stored: Vec<CartLine>) -> Vec<CartLine> {
    let mut lines: Vec<CartLine> = Vec::with_capacity(stored.len());
    for line in stored {
        if line.quantity == 0 {
            continue;
        }
        if let Some(existing) = lines.iter_mut().find(|l| l.product.id == line.product.id) {
            existing.quantity = existing.quantity.saturating_add(line.quantity);
        } else {
            lines.push(line);
        }
    }
    lines
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::storage::{MemoryStorage, StorageError};

    fn product(id: i32, price: i64) -> Product {
        Product::new(
            ProductId::new(id),
            format!("Product {id}"),
            Decimal::from(price),
            "Rings",
        )
    }

    fn empty_store() -> (CartStore, MemoryStorage) {
        let storage = MemoryStorage::new();
        (CartStore::load(Arc::new(storage.clone())), storage)
    }

    struct BrokenStorage;

    impl DurableStorage for BrokenStorage {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Unavailable("disk on fire".to_string()))
        }

        fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable("disk on fire".to_string()))
        }

        fn remove(&self, _key: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable("disk on fire".to_string()))
        }
    }

    #[test]
    fn test_example_scenario() {
        let (cart, _) = empty_store();

        cart.add_to_cart(product(1, 45_000), 1).unwrap();
        let snapshot = cart.add_to_cart(product(1, 45_000), 2).unwrap();

        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot.line(ProductId::new(1)).unwrap().quantity, 3);
        assert_eq!(cart.cart_total(), Decimal::from(135_000));
        assert_eq!(cart.cart_count(), 3);

        cart.update_quantity(ProductId::new(1), 1).unwrap();
        assert_eq!(cart.cart_total(), Decimal::from(45_000));

        let snapshot = cart.remove_from_cart(ProductId::new(1));
        assert!(snapshot.is_empty());
        assert_eq!(cart.cart_total(), Decimal::ZERO);
        assert_eq!(cart.cart_count(), 0);
    }

    #[test]
    fn test_repeated_adds_never_duplicate_lines() {
        let (cart, _) = empty_store();
        for id in [1, 2, 1, 3, 2, 1] {
            cart.add_one(product(id, 100));
        }

        let snapshot = cart.snapshot();
        let ids: Vec<i32> = snapshot.iter().map(|l| l.product.id.as_i32()).collect();
        assert_eq!(ids, vec![1, 2, 3], "insertion order is kept");
        assert_eq!(snapshot.line(ProductId::new(1)).unwrap().quantity, 3);
        assert_eq!(snapshot.count(), 6);
    }

    #[test]
    fn test_aggregates_over_mixed_lines() {
        let (cart, _) = empty_store();
        cart.add_to_cart(product(1, 45_000), 2).unwrap();
        cart.add_to_cart(product(4, 18_000), 1).unwrap();
        let mut ring = product(7, 0);
        ring.price = Decimal::new(2_800_050, 2);
        cart.add_to_cart(ring, 3).unwrap();

        assert_eq!(cart.cart_total(), Decimal::new(19_200_150, 2));
        assert_eq!(cart.cart_count(), 6);
    }

    #[test]
    fn test_empty_cart_aggregates_are_zero() {
        let (cart, _) = empty_store();
        assert_eq!(cart.cart_total(), Decimal::ZERO);
        assert_eq!(cart.cart_count(), 0);
    }

    #[test]
    fn test_zero_quantity_is_rejected() {
        let (cart, _) = empty_store();
        cart.add_one(product(1, 100));

        assert_eq!(
            cart.update_quantity(ProductId::new(1), 0),
            Err(CartError::ZeroQuantity {
                product_id: ProductId::new(1)
            })
        );
        assert!(cart.add_to_cart(product(2, 100), 0).is_err());

        let snapshot = cart.snapshot();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot.line(ProductId::new(1)).unwrap().quantity, 1);
    }

    #[test]
    fn test_update_quantity_accepts_large_values() {
        let (cart, _) = empty_store();
        cart.add_one(product(1, 10));
        cart.update_quantity(ProductId::new(1), 250).unwrap();
        assert_eq!(cart.cart_count(), 250);
    }

    #[test]
    fn test_quantity_saturates_instead_of_wrapping() {
        let (cart, _) = empty_store();
        cart.add_to_cart(product(1, 1), u32::MAX).unwrap();
        cart.add_to_cart(product(1, 1), 5).unwrap();
        assert_eq!(cart.cart_count(), u64::from(u32::MAX));
    }

    #[test]
    fn test_total_saturates_instead_of_overflowing() {
        let (cart, storage) = empty_store();
        let pricey = Product::new(
            ProductId::new(1),
            "Crown Jewels",
            Decimal::from_i128_with_scale(10_i128.pow(20), 0),
            "Rings",
        );
        cart.add_to_cart(pricey.clone(), u32::MAX).unwrap();
        cart.add_to_cart(pricey, 1).unwrap();
        cart.add_one(product(2, 1));

        assert_eq!(cart.cart_count(), u64::from(u32::MAX) + 1);
        assert_eq!(cart.cart_total(), Decimal::MAX);

        let reloaded = CartStore::load(Arc::new(storage));
        assert_eq!(reloaded.cart_total(), Decimal::MAX);
    }

    #[test]
    fn test_absent_ids_are_noops() {
        let (cart, storage) = empty_store();
        cart.add_one(product(1, 100));
        let before = storage.get(keys::CART).unwrap();

        cart.remove_from_cart(ProductId::new(99));
        cart.update_quantity(ProductId::new(99), 4).unwrap();

        assert_eq!(cart.snapshot().len(), 1);
        assert_eq!(storage.get(keys::CART).unwrap(), before);
    }

    #[test]
    fn test_clear_is_idempotent() {
        let (cart, _) = empty_store();
        cart.add_one(product(1, 100));
        cart.add_one(product(2, 100));

        cart.clear_cart();
        assert_eq!(cart.cart_count(), 0);
        let snapshot = cart.clear_cart();
        assert!(snapshot.is_empty());
    }

    #[test]
    fn test_every_mutation_is_persisted() {
        let (cart, storage) = empty_store();
        cart.add_to_cart(product(1, 45_000), 2).unwrap();

        let stored: Vec<CartLine> =
            serde_json::from_str(&storage.get(keys::CART).unwrap().unwrap()).unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored.first().unwrap().quantity, 2);

        cart.clear_cart();
        assert_eq!(storage.get(keys::CART).unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_reload_from_storage() {
        let (cart, storage) = empty_store();
        cart.add_to_cart(product(1, 45_000), 2).unwrap();
        cart.add_one(product(3, 35_000));

        let reloaded = CartStore::load(Arc::new(storage));
        assert_eq!(reloaded.snapshot(), cart.snapshot());
    }

    #[test]
    fn test_load_normalizes_stored_lines() {
        let storage = MemoryStorage::new();
        let stored = vec![
            CartLine {
                product: product(1, 10),
                quantity: 2,
            },
            CartLine {
                product: product(2, 10),
                quantity: 0,
            },
            CartLine {
                product: product(1, 10),
                quantity: 3,
            },
        ];
        storage
            .set(keys::CART, &serde_json::to_string(&stored).unwrap())
            .unwrap();

        let cart = CartStore::load(Arc::new(storage));
        let snapshot = cart.snapshot();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot.line(ProductId::new(1)).unwrap().quantity, 5);
    }

    #[test]
    fn test_storage_failure_keeps_memory_state() {
        let cart = CartStore::load(Arc::new(BrokenStorage));
        assert!(cart.snapshot().is_empty());

        cart.add_to_cart(product(1, 45_000), 2).unwrap();
        cart.add_one(product(2, 18_000));
        cart.remove_from_cart(ProductId::new(2));

        assert_eq!(cart.cart_count(), 2);
        assert_eq!(cart.cart_total(), Decimal::from(90_000));
    }

    #[test]
    fn test_old_snapshots_are_stable() {
        let (cart, _) = empty_store();
        let before = cart.add_one(product(1, 100));
        cart.add_one(product(1, 100));
        cart.add_one(product(2, 100));

        assert_eq!(before.len(), 1);
        assert_eq!(before.count(), 1);
        assert_eq!(cart.snapshot().count(), 3);
    }

    #[tokio::test]
    async fn test_subscribers_see_changes_but_not_noops() {
        let (cart, _) = empty_store();
        let mut rx = cart.subscribe();

        cart.add_to_cart(product(1, 45_000), 2).unwrap();
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow_and_update().count(), 2);

        cart.remove_from_cart(ProductId::new(42));
        cart.clear_cart();
        assert!(rx.has_changed().unwrap());
        assert!(rx.borrow_and_update().is_empty());

        cart.clear_cart();
        assert!(!rx.has_changed().unwrap());
    }
}

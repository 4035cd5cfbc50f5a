//! Product catalog collaborator.
//!
//! The remote catalog is read-only from the session's point of view: views
//! list products, look one up by id, or filter by category, then hand the
//! record to a store. [`FixtureCatalog`] serves the storefront's built-in
//! product set for local sessions and tests.

use rust_decimal::Decimal;
use thiserror::Error;

use jewelry_shop_core::{Product, ProductId};

/// Error type for catalog lookups.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("product {0} not found")]
    NotFound(ProductId),
}

/// Read-only product queries.
pub trait Catalog: Send + Sync {
    /// All products, in catalog order.
    fn list_products(&self) -> Vec<Product>;

    /// One product by id.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` if no product has this id.
    fn get_product(&self, id: ProductId) -> Result<Product, CatalogError>;

    /// Products whose category matches, ignoring case.
    fn products_in_category(&self, category: &str) -> Vec<Product> {
        self.list_products()
            .into_iter()
            .filter(|p| p.category.eq_ignore_ascii_case(category))
            .collect()
    }
}

/// The built-in product set.
#[derive(Debug, Clone)]
pub struct FixtureCatalog {
    products: Vec<Product>,
}

const RUPEE: &str = "₹";

/// (id, name, price, category, image, rating)
const FIXTURES: &[(i32, &str, i64, &str, &str, f32)] = &[
    (
        1,
        "Eternal Gold Bangle",
        45_000,
        "Bangles",
        "https://images.unsplash.com/photo-1611591437281-460bfbe1220a",
        4.8,
    ),
    (
        2,
        "Diamond Solitaire Ring",
        125_000,
        "Rings",
        "https://images.unsplash.com/photo-1605100804763-247f67b3557e",
        4.9,
    ),
    (
        3,
        "Ruby Pendant Necklace",
        35_000,
        "Necklaces",
        "https://images.unsplash.com/photo-1599643478518-17488fbbcd75",
        4.7,
    ),
    (
        4,
        "Pearl Drop Earrings",
        18_000,
        "Earrings",
        "https://images.unsplash.com/photo-1535632066927-ab7c9ab60908",
        4.6,
    ),
    (
        5,
        "Vintage Gold Choker",
        85_000,
        "Necklaces",
        "https://images.unsplash.com/photo-1599643477877-530eb83abc8e",
        4.8,
    ),
    (
        6,
        "Sapphire Studs",
        32_000,
        "Earrings",
        "https://images.unsplash.com/photo-1590543666014-6c38865d8364",
        4.7,
    ),
    (
        7,
        "Gold Wedding Band",
        28_000,
        "Rings",
        "https://images.unsplash.com/photo-1603561596112-0a132b722353",
        4.9,
    ),
    (
        8,
        "Platinum Bracelet",
        95_000,
        "Bangles",
        "https://images.unsplash.com/photo-1611591437281-460bfbe1220a",
        4.8,
    ),
];

impl FixtureCatalog {
    /// Create a catalog holding the built-in products.
    #[must_use]
    pub fn new() -> Self {
        let products = FIXTURES
            .iter()
            .map(|&(id, name, price, category, image, rating)| {
                Product::new(ProductId::new(id), name, Decimal::from(price), category)
                    .with_image(image)
                    .with_rating(rating)
                    .with_currency(RUPEE)
            })
            .collect();
        Self { products }
    }

    /// Create a catalog holding exactly `products`.
    #[must_use]
    pub const fn with_products(products: Vec<Product>) -> Self {
        Self { products }
    }
}

impl Default for FixtureCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl Catalog for FixtureCatalog {
    fn list_products(&self) -> Vec<Product> {
        self.products.clone()
    }

    fn get_product(&self, id: ProductId) -> Result<Product, CatalogError> {
        self.products
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or(CatalogError::NotFound(id))
    }
}

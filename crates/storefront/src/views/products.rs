//! Product listing and product card actions.

use askama::Template;

use jewelry_shop_core::{Product, ProductId};

use crate::catalog::Catalog;
use crate::error::Result;
use crate::filters;
use crate::state::ShopSession;

/// Product card display data for templates.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductView {
    pub id: ProductId,
    pub name: String,
    pub category: String,
    pub price: String,
    pub rating: Option<f32>,
    pub in_wishlist: bool,
}

impl ProductView {
    /// Build a card for `product`, marking wishlist membership.
    #[must_use]
    pub fn new(product: &Product, session: &ShopSession) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
            category: product.category.clone(),
            price: filters::format_inr(product.price),
            rating: product.rating,
            in_wishlist: session.wishlist().is_in_wishlist(product.id),
        }
    }
}

#[derive(Template)]
#[template(path = "products.txt")]
struct ProductsTemplate<'a> {
    products: &'a [ProductView],
}

/// Build cards for every product, optionally limited to one category.
#[must_use]
pub fn list(
    catalog: &dyn Catalog,
    session: &ShopSession,
    category: Option<&str>,
) -> Vec<ProductView> {
    let products = match category {
        Some(category) => catalog.products_in_category(category),
        None => catalog.list_products(),
    };
    products
        .iter()
        .map(|product| ProductView::new(product, session))
        .collect()
}

/// Render product cards as text.
///
/// # Errors
///
/// Returns an error if the template fails to render.
pub fn render_list(products: &[ProductView]) -> Result<String> {
    Ok(ProductsTemplate { products }.render()?)
}

/// Add `quantity` units of a catalog product to the cart.
///
/// Returns the notice to show.
///
/// # Errors
///
/// Returns an error if the product is unknown or `quantity` is 0.
pub fn add_to_cart(
    catalog: &dyn Catalog,
    session: &ShopSession,
    product_id: ProductId,
    quantity: u32,
) -> Result<String> {
    let product = catalog.get_product(product_id)?;
    let message = format!("Added {} to cart!", product.name);
    session.cart().add_to_cart(product, quantity)?;
    Ok(message)
}

/// Toggle a catalog product in the wishlist.
///
/// Returns the notice to show.
///
/// # Errors
///
/// Returns an error if the product is unknown.
pub fn toggle_wishlist(
    catalog: &dyn Catalog,
    session: &ShopSession,
    product_id: ProductId,
) -> Result<String> {
    let product = catalog.get_product(product_id)?;
    Ok(super::wishlist::toggle_product(session, product))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::catalog::FixtureCatalog;
    use crate::error::AppError;
    use crate::storage::MemoryStorage;
    use crate::stores::CartError;

    fn session() -> ShopSession {
        ShopSession::new(Arc::new(MemoryStorage::new()))
    }

    #[test]
    fn test_add_to_cart_from_catalog() {
        let catalog = FixtureCatalog::new();
        let session = session();

        let message = add_to_cart(&catalog, &session, ProductId::new(1), 2).unwrap();
        assert_eq!(message, "Added Eternal Gold Bangle to cart!");
        assert_eq!(session.cart().cart_count(), 2);
    }

    #[test]
    fn test_add_to_cart_errors() {
        let catalog = FixtureCatalog::new();
        let session = session();

        let err = add_to_cart(&catalog, &session, ProductId::new(42), 1).unwrap_err();
        assert!(matches!(err, AppError::Catalog(_)));

        let err = add_to_cart(&catalog, &session, ProductId::new(1), 0).unwrap_err();
        assert!(matches!(
            err,
            AppError::Cart(CartError::ZeroQuantity { .. })
        ));
        assert!(session.cart().snapshot().is_empty());
    }

    #[test]
    fn test_list_marks_wishlist() {
        let catalog = FixtureCatalog::new();
        let session = session();
        toggle_wishlist(&catalog, &session, ProductId::new(7)).unwrap();

        let rings = list(&catalog, &session, Some("Rings"));
        assert_eq!(rings.len(), 2);
        assert!(!rings[0].in_wishlist);
        assert!(rings[1].in_wishlist);
        assert_eq!(rings[1].price, "₹28,000");

        let text = render_list(&rings).unwrap();
        assert!(text.contains("[7] Gold Wedding Band (Rings) ₹28,000"));
        assert!(text.contains("<3"));
    }
}

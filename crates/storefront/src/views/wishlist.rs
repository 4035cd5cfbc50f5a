//! Wishlist page view and actions.

use askama::Template;

use jewelry_shop_core::{Product, ProductId};

use crate::error::{AppError, Result};
use crate::filters;
use crate::state::ShopSession;
use crate::stores::{CartSnapshot, WishlistSnapshot};

/// Wishlist item display data for templates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WishlistItemView {
    pub id: ProductId,
    pub name: String,
    pub category: String,
    pub image: Option<String>,
    pub price: String,
    pub in_cart: bool,
}

/// Wishlist display data for templates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WishlistView {
    pub items: Vec<WishlistItemView>,
}

impl WishlistView {
    /// Build the view, marking items that are already in `cart`.
    #[must_use]
    pub fn new(wishlist: &WishlistSnapshot, cart: &CartSnapshot) -> Self {
        Self {
            items: wishlist
                .iter()
                .map(|product| WishlistItemView {
                    id: product.id,
                    name: product.name.clone(),
                    category: product.category.clone(),
                    image: product.image.clone(),
                    price: filters::format_inr(product.price),
                    in_cart: cart.line(product.id).is_some(),
                })
                .collect(),
        }
    }

    /// Build the view from the session's current snapshots.
    #[must_use]
    pub fn for_session(session: &ShopSession) -> Self {
        Self::new(&session.wishlist().snapshot(), &session.cart().snapshot())
    }

    /// Render the wishlist page as text.
    ///
    /// # Errors
    ///
    /// Returns an error if the template fails to render.
    pub fn render_text(&self) -> Result<String> {
        Ok(WishlistTemplate { wishlist: self }.render()?)
    }
}

#[derive(Template)]
#[template(path = "wishlist.txt")]
struct WishlistTemplate<'a> {
    wishlist: &'a WishlistView,
}

/// Notice shown after toggling a product's wishlist membership.
#[must_use]
pub fn toggle_message(name: &str, added: bool) -> String {
    if added {
        format!("Added {name} to wishlist")
    } else {
        format!("Removed {name} from wishlist")
    }
}

/// Toggle `product` in the wishlist, returning the notice to show.
pub fn toggle_product(session: &ShopSession, product: Product) -> String {
    let name = product.name.clone();
    let added = session.wishlist().toggle_wishlist(product);
    toggle_message(&name, added)
}

/// Add one unit of a wishlisted product to the cart.
///
/// The product stays in the wishlist.
///
/// # Errors
///
/// Returns `AppError::NotInWishlist` if the product is not wishlisted.
pub fn add_wishlist_item_to_cart(session: &ShopSession, product_id: ProductId) -> Result<String> {
    let product = session
        .wishlist()
        .snapshot()
        .get(product_id)
        .cloned()
        .ok_or(AppError::NotInWishlist(product_id))?;

    let message = format!("Added {} to cart!", product.name);
    session.cart().add_one(product);
    Ok(message)
}

/// Remove a product from the wishlist, returning the notice to show.
///
/// # Errors
///
/// Returns `AppError::NotInWishlist` if the product is not wishlisted.
pub fn remove_wishlist_item(session: &ShopSession, product_id: ProductId) -> Result<String> {
    let name = session
        .wishlist()
        .snapshot()
        .get(product_id)
        .map(|product| product.name.clone())
        .ok_or(AppError::NotInWishlist(product_id))?;

    session.wishlist().remove_from_wishlist(product_id);
    Ok(toggle_message(&name, false))
}

//! Cart page view and quantity controls.
//!
//! The quantity control on the cart page accepts 1 to 99. Inputs outside
//! that range are clamped here before reaching the store, which itself only
//! rejects zero.

use askama::Template;

use jewelry_shop_core::ProductId;

use crate::error::Result;
use crate::filters;
use crate::state::ShopSession;
use crate::stores::{CartLine, CartSnapshot};

/// Smallest quantity the cart control accepts.
pub const MIN_QUANTITY: u32 = 1;

/// Largest quantity the cart control accepts.
pub const MAX_QUANTITY: u32 = 99;

/// Clamp a raw quantity input into `MIN_QUANTITY..=MAX_QUANTITY`.
#[must_use]
pub fn clamp_quantity(raw: i64) -> u32 {
    let clamped = raw.clamp(i64::from(MIN_QUANTITY), i64::from(MAX_QUANTITY));
    u32::try_from(clamped).unwrap_or(MIN_QUANTITY)
}

/// Cart item display data for templates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartItemView {
    pub id: ProductId,
    pub name: String,
    pub category: String,
    pub image: Option<String>,
    pub quantity: u32,
    pub price: String,
    pub line_price: String,
}

/// Cart display data for templates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub subtotal: String,
    pub item_count: u64,
}

impl CartView {
    /// Create an empty cart.
    #[must_use]
    pub fn empty() -> Self {
        Self::from(&CartSnapshot::default())
    }

    /// Render the cart page as text.
    ///
    /// # Errors
    ///
    /// Returns an error if the template fails to render.
    pub fn render_text(&self) -> Result<String> {
        Ok(CartTemplate { cart: self }.render()?)
    }
}

impl From<&CartSnapshot> for CartView {
    fn from(cart: &CartSnapshot) -> Self {
        Self {
            items: cart.iter().map(CartItemView::from).collect(),
            subtotal: filters::format_inr(cart.total()),
            item_count: cart.count(),
        }
    }
}

impl From<&CartLine> for CartItemView {
    fn from(line: &CartLine) -> Self {
        Self {
            id: line.product.id,
            name: line.product.name.clone(),
            category: line.product.category.clone(),
            image: line.product.image.clone(),
            quantity: line.quantity,
            price: filters::format_inr(line.product.price),
            line_price: filters::format_inr(line.line_total()),
        }
    }
}

#[derive(Template)]
#[template(path = "cart.txt")]
struct CartTemplate<'a> {
    cart: &'a CartView,
}

/// Apply a raw value from the quantity control to the cart.
///
/// The value is clamped to `MIN_QUANTITY..=MAX_QUANTITY` first, so this
/// never fails on range.
///
/// # Errors
///
/// Returns an error only if the store rejects the clamped quantity.
pub fn apply_quantity_input(
    session: &ShopSession,
    product_id: ProductId,
    raw: i64,
) -> Result<CartSnapshot> {
    let quantity = clamp_quantity(raw);
    if i64::from(quantity) != raw {
        tracing::debug!(%product_id, raw, quantity, "Clamped quantity input");
    }
    Ok(session.cart().update_quantity(product_id, quantity)?)
}

/// Remove a line from the cart, returning the notice to show.
pub fn remove_item(session: &ShopSession, product_id: ProductId) -> String {
    let name = session
        .cart()
        .snapshot()
        .line(product_id)
        .map(|line| line.product.name.clone());
    session.cart().remove_from_cart(product_id);
    name.map_or_else(
        || "Item not in cart".to_string(),
        |name| format!("Removed {name} from cart"),
    )
}

//! Cart commands.

use std::io::Write;

use jewelry_shop_core::ProductId;
use jewelry_shop_storefront::catalog::Catalog;
use jewelry_shop_storefront::state::ShopSession;
use jewelry_shop_storefront::views::{self, CartView};

use super::CommandResult;

/// Print the cart.
pub fn show(session: &ShopSession, out: &mut impl Write) -> CommandResult {
    let text = CartView::from(&session.cart().snapshot()).render_text()?;
    writeln!(out, "{}", text.trim_end())?;
    Ok(())
}

/// Add `quantity` units of a catalog product.
pub fn add(
    catalog: &dyn Catalog,
    session: &ShopSession,
    id: ProductId,
    quantity: u32,
    out: &mut impl Write,
) -> CommandResult {
    let message = views::products::add_to_cart(catalog, session, id, quantity)?;
    writeln!(out, "{message}")?;
    Ok(())
}

/// Remove a product from the cart.
pub fn remove(session: &ShopSession, id: ProductId, out: &mut impl Write) -> CommandResult {
    writeln!(out, "{}", views::cart::remove_item(session, id))?;
    Ok(())
}

/// Set a product's quantity, clamped to the range the cart page allows.
pub fn update(
    session: &ShopSession,
    id: ProductId,
    quantity: i64,
    out: &mut impl Write,
) -> CommandResult {
    let snapshot = views::cart::apply_quantity_input(session, id, quantity)?;
    match snapshot.line(id) {
        Some(line) => writeln!(out, "{} x {}", line.product.name, line.quantity)?,
        None => writeln!(out, "Item not in cart")?,
    }
    Ok(())
}

/// Empty the cart.
pub fn clear(session: &ShopSession, out: &mut impl Write) -> CommandResult {
    session.cart().clear_cart();
    writeln!(out, "Cart cleared")?;
    Ok(())
}

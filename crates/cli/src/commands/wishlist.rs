//! Wishlist commands.

use std::io::Write;

use jewelry_shop_core::ProductId;
use jewelry_shop_storefront::catalog::Catalog;
use jewelry_shop_storefront::error::AppError;
use jewelry_shop_storefront::state::ShopSession;
use jewelry_shop_storefront::views::{WishlistView, products, wishlist};

use super::CommandResult;

/// Print the wishlist.
pub fn show(session: &ShopSession, out: &mut impl Write) -> CommandResult {
    let text = WishlistView::for_session(session).render_text()?;
    writeln!(out, "{}", text.trim_end())?;
    Ok(())
}

/// Add a catalog product. Adding a wishlisted product changes nothing.
pub fn add(
    catalog: &dyn Catalog,
    session: &ShopSession,
    id: ProductId,
    out: &mut impl Write,
) -> CommandResult {
    let product = catalog.get_product(id).map_err(AppError::from)?;
    let name = product.name.clone();
    if session.wishlist().is_in_wishlist(id) {
        writeln!(out, "{name} is already in your wishlist")?;
    } else {
        session.wishlist().add_to_wishlist(product);
        writeln!(out, "{}", wishlist::toggle_message(&name, true))?;
    }
    Ok(())
}

/// Remove a product from the wishlist.
pub fn remove(session: &ShopSession, id: ProductId, out: &mut impl Write) -> CommandResult {
    writeln!(out, "{}", wishlist::remove_wishlist_item(session, id)?)?;
    Ok(())
}

/// Toggle a catalog product in the wishlist.
pub fn toggle(
    catalog: &dyn Catalog,
    session: &ShopSession,
    id: ProductId,
    out: &mut impl Write,
) -> CommandResult {
    writeln!(out, "{}", products::toggle_wishlist(catalog, session, id)?)?;
    Ok(())
}

/// Add one unit of a wishlisted product to the cart.
pub fn to_cart(session: &ShopSession, id: ProductId, out: &mut impl Write) -> CommandResult {
    writeln!(out, "{}", wishlist::add_wishlist_item_to_cart(session, id)?)?;
    Ok(())
}

/// Empty the wishlist.
pub fn clear(session: &ShopSession, out: &mut impl Write) -> CommandResult {
    session.wishlist().clear_wishlist();
    writeln!(out, "Wishlist cleared")?;
    Ok(())
}

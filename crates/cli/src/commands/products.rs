//! Catalog browsing commands.

use std::io::Write;

use jewelry_shop_core::ProductId;
use jewelry_shop_storefront::catalog::Catalog;
use jewelry_shop_storefront::filters;
use jewelry_shop_storefront::state::ShopSession;
use jewelry_shop_storefront::views::products;

use super::CommandResult;

/// Print product cards, optionally limited to one category.
pub fn list(
    catalog: &dyn Catalog,
    session: &ShopSession,
    category: Option<&str>,
    out: &mut impl Write,
) -> CommandResult {
    let cards = products::list(catalog, session, category);
    if cards.is_empty() {
        writeln!(out, "No products found")?;
        return Ok(());
    }
    write!(out, "{}", products::render_list(&cards)?)?;
    Ok(())
}

/// Print one product in full.
pub fn show(
    catalog: &dyn Catalog,
    session: &ShopSession,
    id: ProductId,
    out: &mut impl Write,
) -> CommandResult {
    let product = catalog
        .get_product(id)
        .map_err(jewelry_shop_storefront::error::AppError::from)?;

    writeln!(out, "{} ({})", product.name, product.category)?;
    writeln!(out, "Price: {}", filters::format_inr(product.price))?;
    if let Some(rating) = product.rating {
        writeln!(out, "Rating: {rating}")?;
    }
    if let Some(description) = &product.description {
        writeln!(out, "{description}")?;
    }
    if let Some(image) = &product.image {
        writeln!(out, "Image: {image}")?;
    }

    let in_cart = session
        .cart()
        .snapshot()
        .line(id)
        .map_or(0, |line| line.quantity);
    writeln!(out, "In cart: {in_cart}")?;
    writeln!(
        out,
        "In wishlist: {}",
        if session.wishlist().is_in_wishlist(id) {
            "yes"
        } else {
            "no"
        }
    )?;
    Ok(())
}

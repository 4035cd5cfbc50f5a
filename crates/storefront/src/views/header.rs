//! Site header: shop identity and badge counts.

use askama::Template;

use crate::error::Result;
use crate::filters;
use crate::state::ShopSession;

/// Header display data for templates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderView {
    pub shop_name: String,
    pub tagline: String,
    pub cart_count: u64,
    pub wishlist_count: usize,
}

impl HeaderView {
    /// Build the header from the session's current snapshots.
    #[must_use]
    pub fn for_session(session: &ShopSession) -> Self {
        let settings = session.settings().snapshot();
        Self {
            shop_name: settings.shop_name.clone(),
            tagline: settings.tagline.clone(),
            cart_count: session.cart().cart_count(),
            wishlist_count: session.wishlist().len(),
        }
    }

    /// Render the header as text.
    ///
    /// # Errors
    ///
    /// Returns an error if the template fails to render.
    pub fn render_text(&self) -> Result<String> {
        Ok(HeaderTemplate { header: self }.render()?)
    }
}

#[derive(Template)]
#[template(path = "header.txt")]
struct HeaderTemplate<'a> {
    header: &'a HeaderView,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use jewelry_shop_core::{Product, ProductId};
    use rust_decimal::Decimal;

    use super::*;
    use crate::storage::MemoryStorage;
    use crate::stores::SettingsUpdate;

    #[test]
    fn test_header_tracks_stores() {
        let session = ShopSession::new(Arc::new(MemoryStorage::new()));
        let header = HeaderView::for_session(&session);
        assert_eq!(header.shop_name, "Jewelry Shop");
        assert_eq!(header.cart_count, 0);

        session
            .settings()
            .update_settings(SettingsUpdate::new().shop_name("Aurum"));
        session
            .cart()
            .add_to_cart(
                Product::new(ProductId::new(1), "Bangle", Decimal::from(45_000), "Bangles"),
                1_200,
            )
            .unwrap();

        let text = HeaderView::for_session(&session).render_text().unwrap();
        assert!(text.starts_with("Aurum\nExquisite Jewelry for Every Occasion"));
        assert!(text.contains("Cart: 1,200 | Wishlist: 0"));
    }
}

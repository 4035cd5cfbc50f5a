//! Unified error handling for view actions.
//!
//! Stores never fail on persistence (writes are best-effort and logged), so
//! the errors that reach a view are domain rejections: an unknown product, a
//! zero quantity, an incomplete checkout. Views return `Result<T, AppError>`
//! and the surface decides how to show the message.

use thiserror::Error;

use jewelry_shop_core::ProductId;

use crate::catalog::CatalogError;
use crate::stores::CartError;
use crate::views::checkout::CheckoutError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Catalog lookup failed.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Cart rejected the change.
    #[error("Cart error: {0}")]
    Cart(#[from] CartError),

    /// Checkout could not be placed.
    #[error("Checkout error: {0}")]
    Checkout(#[from] CheckoutError),

    /// Template rendering failed.
    #[error("Render error: {0}")]
    Render(#[from] askama::Error),

    /// Product is not in the wishlist.
    #[error("product {0} is not in the wishlist")]
    NotInWishlist(ProductId),
}

/// Result alias for view actions.
pub type Result<T, E = AppError> = std::result::Result<T, E>;

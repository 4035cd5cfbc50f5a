//! View models and actions.
//!
//! Views read store snapshots, turn them into display structs with formatted
//! prices, and render them through Askama text templates. Actions that touch
//! more than one store (moving a wishlist item into the cart, checkout) live
//! here rather than in the stores.

pub mod cart;
pub mod checkout;
pub mod header;
pub mod products;
pub mod settings;
pub mod wishlist;

pub use cart::{CartItemView, CartView, MAX_QUANTITY, MIN_QUANTITY, clamp_quantity};
pub use checkout::{CheckoutError, OrderConfirmation, PaymentMethod, place_order};
pub use header::HeaderView;
pub use products::ProductView;
pub use wishlist::{WishlistItemView, WishlistView};

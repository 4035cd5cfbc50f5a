//! Session state stores.
//!
//! # Stores
//!
//! - [`CartStore`] - Products and quantities the shopper intends to buy
//! - [`WishlistStore`] - Products saved for later, unique by id
//! - [`SettingsStore`] - Shop identity shown in the header
//!
//! Each store owns its state exclusively and hands out immutable snapshots.
//! A mutation copies the current state, applies the change, mirrors the new
//! snapshot to durable storage, then publishes it on a `watch` channel so
//! subscribed views can re-render. Stores never call one another; views that
//! need two stores (moving a wishlist item into the cart, checkout) hold
//! both.

pub mod cart;
pub mod settings;
pub mod wishlist;

pub use cart::{CartError, CartLine, CartSnapshot, CartStore};
pub use settings::{
    DEFAULT_SHOP_NAME, DEFAULT_TAGLINE, SettingsSnapshot, SettingsStore, SettingsUpdate,
    ShopSettings,
};
pub use wishlist::{WishlistSnapshot, WishlistStore};

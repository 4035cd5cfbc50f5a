//! Jewelry Shop storefront library.
//!
//! Client-side session state for the storefront: the cart, the wishlist, and
//! the shop settings, each mirrored to durable storage and observable
//! through snapshots. The views built on top format prices and render pages
//! as text.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod config;
pub mod error;
pub mod filters;
pub mod persistence;
pub mod state;
pub mod storage;
pub mod stores;
pub mod views;

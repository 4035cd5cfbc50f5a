//! Jewelry Shop Core - Shared types library.
//!
//! This crate provides common types used across all Jewelry Shop components:
//! - `storefront` - Session state stores (cart, wishlist, shop settings)
//! - `cli` - Command-line front end that drives a shopper session
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access,
//! no HTTP clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, and catalog products

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;

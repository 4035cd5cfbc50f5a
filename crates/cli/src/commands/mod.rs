//! Command implementations.
//!
//! Every command writes its human-readable output to `out` so it can be
//! captured in tests; logs go to stderr through `tracing`.

use thiserror::Error;

use jewelry_shop_storefront::error::AppError;

pub mod cart;
pub mod checkout;
pub mod header;
pub mod products;
pub mod settings;
pub mod wishlist;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// The storefront rejected the action.
    #[error(transparent)]
    App(#[from] AppError),

    /// Writing output failed.
    #[error("Output error: {0}")]
    Io(#[from] std::io::Error),

    /// Settings could not be encoded.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A `--field` argument is not `key=value`.
    #[error("Invalid field {0:?}, expected KEY=VALUE")]
    InvalidField(String),
}

/// Result alias for commands.
pub type CommandResult = Result<(), CommandError>;

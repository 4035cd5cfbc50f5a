//! Integration tests for the Jewelry Shop storefront.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p jewelry-shop-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `persistence` - State survives a session restart on file storage
//! - `shopping_flow` - Cross-store flows: browse, wishlist, cart, checkout
//! - `storage_failures` - Failing or corrupt storage never breaks a session
//! - `subscriptions` - Views are notified after every state change
//!
//! [`TestContext`] owns a temporary state directory so each test can open
//! several sessions over the same storage, the way a page reload would.

use std::path::Path;
use std::sync::Arc;

use tempfile::TempDir;

use jewelry_shop_storefront::catalog::FixtureCatalog;
use jewelry_shop_storefront::config::ShopConfig;
use jewelry_shop_storefront::state::ShopSession;
use jewelry_shop_storefront::storage::{DurableStorage, FileStorage};

/// A temporary state directory plus the catalog sessions shop from.
pub struct TestContext {
    dir: TempDir,
    pub catalog: FixtureCatalog,
}

impl TestContext {
    /// Create a context with an empty state directory.
    ///
    /// # Panics
    ///
    /// Panics if the temporary directory cannot be created.
    #[must_use]
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("failed to create temp dir"),
            catalog: FixtureCatalog::new(),
        }
    }

    /// The state directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        self.dir.path()
    }

    /// Configuration pointing at the state directory.
    #[must_use]
    pub fn config(&self) -> ShopConfig {
        ShopConfig::default().with_state_dir(self.dir.path())
    }

    /// Open a fresh session over the state directory.
    #[must_use]
    pub fn open(&self) -> ShopSession {
        ShopSession::from_config(&self.config())
    }

    /// Direct access to the file storage behind every session.
    #[must_use]
    pub fn storage(&self) -> Arc<dyn DurableStorage> {
        Arc::new(FileStorage::new(self.dir.path()))
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

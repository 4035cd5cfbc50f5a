//! Shop settings store.
//!
//! Holds the shop identity shown in the header and footer. The record is
//! always complete: partial updates are merged onto the current record and a
//! stored record missing a field gets that field from the defaults.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tokio::sync::watch;

use crate::persistence;
use crate::storage::{DurableStorage, keys};

/// Shop name used until an administrator sets one.
pub const DEFAULT_SHOP_NAME: &str = "Jewelry Shop";

/// Tagline used until an administrator sets one.
pub const DEFAULT_TAGLINE: &str = "Exquisite Jewelry for Every Occasion";

/// Field names owned by [`ShopSettings`]; never stored in `extra`.
const RESERVED_FIELDS: &[&str] = &["shopName", "tagline"];

/// Shop identity record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ShopSettings {
    pub shop_name: String,
    pub tagline: String,
    /// Additional optional fields, kept verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for ShopSettings {
    fn default() -> Self {
        Self {
            shop_name: DEFAULT_SHOP_NAME.to_string(),
            tagline: DEFAULT_TAGLINE.to_string(),
            extra: Map::new(),
        }
    }
}

impl ShopSettings {
    /// Shallow-merge `update` onto this record.
    ///
    /// Returns whether anything changed.
    pub fn merge(&mut self, update: SettingsUpdate) -> bool {
        let before = self.clone();

        if let Some(shop_name) = update.shop_name {
            self.shop_name = shop_name;
        }
        if let Some(tagline) = update.tagline {
            self.tagline = tagline;
        }
        for (key, value) in update.extra {
            if RESERVED_FIELDS.contains(&key.as_str()) {
                tracing::debug!(%key, "Ignoring reserved settings field in extra");
                continue;
            }
            self.extra.insert(key, value);
        }

        *self != before
    }
}

/// A partial settings record. Absent fields are left as they are.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SettingsUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shop_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tagline: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SettingsUpdate {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn shop_name(mut self, shop_name: impl Into<String>) -> Self {
        self.shop_name = Some(shop_name.into());
        self
    }

    #[must_use]
    pub fn tagline(mut self, tagline: impl Into<String>) -> Self {
        self.tagline = Some(tagline.into());
        self
    }

    /// Set an additional field.
    #[must_use]
    pub fn field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shop_name.is_none() && self.tagline.is_none() && self.extra.is_empty()
    }
}

/// Shared, immutable settings record.
pub type SettingsSnapshot = Arc<ShopSettings>;

/// The shop's display settings.
///
/// Cheaply cloneable; clones are handles to the same record.
#[derive(Clone)]
pub struct SettingsStore {
    inner: Arc<SettingsStoreInner>,
}

struct SettingsStoreInner {
    storage: Arc<dyn DurableStorage>,
    state: watch::Sender<SettingsSnapshot>,
}

impl SettingsStore {
    /// Load the settings from `storage`, or start from the defaults.
    #[must_use]
    pub fn load(storage: Arc<dyn DurableStorage>) -> Self {
        let settings: ShopSettings =
            persistence::load_or_default(storage.as_ref(), keys::SHOP_SETTINGS);
        tracing::debug!(shop_name = %settings.shop_name, "Shop settings loaded");

        Self {
            inner: Arc::new(SettingsStoreInner {
                storage,
                state: watch::Sender::new(Arc::new(settings)),
            }),
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> SettingsSnapshot {
        self.inner.state.borrow().clone()
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SettingsSnapshot> {
        self.inner.state.subscribe()
    }

    /// Merge `update` onto the current settings and persist the result.
    pub fn update_settings(&self, update: SettingsUpdate) -> SettingsSnapshot {
        self.replace_with(|settings| settings.merge(update))
    }

    /// Replace the settings with the defaults and persist them.
    pub fn reset_settings(&self) -> SettingsSnapshot {
        tracing::debug!("Resetting shop settings");
        self.replace_with(|settings| {
            *settings = ShopSettings::default();
            true
        })
    }

    /// Apply `op` to a copy of the record. Persists and publishes whenever
    /// `op` returns `true`, even if the record is unchanged, so a reset
    /// always rewrites storage.
    fn replace_with<F>(&self, op: F) -> SettingsSnapshot
    where
        F: FnOnce(&mut ShopSettings) -> bool,
    {
        let mut result = None;
        self.inner.state.send_if_modified(|current| {
            let mut settings = (**current).clone();
            if !op(&mut settings) {
                result = Some(Arc::clone(current));
                return false;
            }

            persistence::persist(self.inner.storage.as_ref(), keys::SHOP_SETTINGS, &settings);
            let next = Arc::new(settings);
            *current = Arc::clone(&next);
            result = Some(next);
            true
        });

        result.unwrap_or_default()
    }
}

impl std::fmt::Debug for SettingsStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SettingsStore")
            .field("settings", &*self.inner.state.borrow())
            .finish_non_exhaustive()
    }
}

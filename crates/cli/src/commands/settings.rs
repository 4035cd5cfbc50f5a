//! Shop settings commands.

use std::io::Write;

use serde_json::Value;

use jewelry_shop_storefront::state::ShopSession;
use jewelry_shop_storefront::stores::SettingsUpdate;
use jewelry_shop_storefront::views;

use super::{CommandError, CommandResult};

/// Print the settings record as JSON.
pub fn show(session: &ShopSession, out: &mut impl Write) -> CommandResult {
    let settings = session.settings().snapshot();
    let json = serde_json::to_string_pretty(&*settings)?;
    writeln!(out, "{json}")?;
    Ok(())
}

/// Build an update from the command-line flags.
///
/// Each field is `key=value`. The value is parsed as JSON when it can be,
/// so `--field featured=true` stores a boolean; otherwise it is a string.
pub fn build_update(
    shop_name: Option<String>,
    tagline: Option<String>,
    fields: &[String],
) -> Result<SettingsUpdate, CommandError> {
    let mut update = SettingsUpdate::new();
    if let Some(shop_name) = shop_name {
        update = update.shop_name(shop_name);
    }
    if let Some(tagline) = tagline {
        update = update.tagline(tagline);
    }
    for field in fields {
        let (key, raw) = field
            .split_once('=')
            .filter(|(key, _)| !key.trim().is_empty())
            .ok_or_else(|| CommandError::InvalidField(field.clone()))?;
        let value =
            serde_json::from_str::<Value>(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
        update = update.field(key.trim(), value);
    }
    Ok(update)
}

/// Merge `update` into the settings.
pub fn update(session: &ShopSession, update: SettingsUpdate, out: &mut impl Write) -> CommandResult {
    writeln!(out, "{}", views::settings::save(session, update))?;
    Ok(())
}

/// Restore the default settings.
pub fn reset(session: &ShopSession, out: &mut impl Write) -> CommandResult {
    writeln!(out, "{}", views::settings::reset(session))?;
    Ok(())
}

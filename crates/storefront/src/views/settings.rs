//! Shop settings form actions.

use crate::state::ShopSession;
use crate::stores::SettingsUpdate;

/// Save a settings form. Returns the notice to show.
pub fn save(session: &ShopSession, update: SettingsUpdate) -> String {
    if update.is_empty() {
        return "Nothing to save".to_string();
    }
    session.settings().update_settings(update);
    "Settings saved successfully!".to_string()
}

/// Restore the default shop identity. Returns the notice to show.
pub fn reset(session: &ShopSession) -> String {
    session.settings().reset_settings();
    "Settings reset to defaults".to_string()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::storage::MemoryStorage;

    #[test]
    fn test_save_and_reset() {
        let session = ShopSession::new(Arc::new(MemoryStorage::new()));

        assert_eq!(save(&session, SettingsUpdate::new()), "Nothing to save");
        assert_eq!(
            save(&session, SettingsUpdate::new().tagline("Handcrafted in Jaipur")),
            "Settings saved successfully!"
        );
        assert_eq!(session.settings().snapshot().tagline, "Handcrafted in Jaipur");

        assert_eq!(reset(&session), "Settings reset to defaults");
        assert_eq!(
            session.settings().snapshot().tagline,
            "Exquisite Jewelry for Every Occasion"
        );
    }
}

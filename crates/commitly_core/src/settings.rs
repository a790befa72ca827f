//! crates/commitly_core/src/settings.rs
//!
//! Notification preferences. They live under their own storage key, apart
//! from the main document, and are not tied to a user.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::store::{Store, StoreResult};

/// Key the settings are stored under.
pub const SETTINGS_KEY: &str = "commitly-settings";

/// Which notifications the user wants. Every flag defaults to on, and flags
/// missing from stored JSON take their default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NotificationSettings {
    pub friend_activity: bool,
    pub motivations: bool,
    pub daily_challenges: bool,
    pub session_reminders: bool,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            friend_activity: true,
            motivations: true,
            daily_challenges: true,
            session_reminders: true,
        }
    }
}

/// A partial change to the settings. `None` leaves a flag as it is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SettingsUpdate {
    pub friend_activity: Option<bool>,
    pub motivations: Option<bool>,
    pub daily_challenges: Option<bool>,
    pub session_reminders: Option<bool>,
}

impl SettingsUpdate {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn apply(&self, settings: NotificationSettings) -> NotificationSettings {
        NotificationSettings {
            friend_activity: self.friend_activity.unwrap_or(settings.friend_activity),
            motivations: self.motivations.unwrap_or(settings.motivations),
            daily_challenges: self.daily_challenges.unwrap_or(settings.daily_challenges),
            session_reminders: self.session_reminders.unwrap_or(settings.session_reminders),
        }
    }
}

impl Store {
    /// The stored settings merged over the defaults. Missing or unreadable
    /// settings read as the defaults and are left in storage untouched.
    pub fn settings(&self) -> StoreResult<NotificationSettings> {
        let Some(raw) = self.storage().get(SETTINGS_KEY)? else {
            return Ok(NotificationSettings::default());
        };

        match serde_json::from_str(&raw) {
            Ok(settings) => Ok(settings),
            Err(e) => {
                warn!(error = %e, "Stored settings are corrupt, using defaults");
                Ok(NotificationSettings::default())
            }
        }
    }

    /// Replaces the stored settings.
    pub fn update_settings(&self, settings: &NotificationSettings) -> StoreResult<()> {
        let raw = serde_json::to_string(settings)?;
        self.storage().set(SETTINGS_KEY, &raw)?;
        info!(?settings, "Notification settings updated");
        Ok(())
    }
}

//! crates/commitly_core/src/ledger.rs
//!
//! Session ledger and profile updates: everything that changes a user's own
//! record.

use chrono::Utc;
use tracing::{info, warn};

use crate::domain::{Language, NewSession, ProfileUpdate, Session};
use crate::store::{Store, StoreResult};

impl Store {
    /// Records a completed session for `user_id`.
    ///
    /// The session is prepended, XP is added and the level re-derived, all in a
    /// single write. Returns the recorded session, or `None` if the user does
    /// not exist. The streak is left untouched.
    pub fn add_session(&self, user_id: &str, new_session: NewSession) -> StoreResult<Option<Session>> {
        let mut document = self.read()?;
        let Some(user) = document.user_mut(user_id) else {
            warn!(user_id, "Session not added: user not found");
            return Ok(None);
        };

        let xp_gained = new_session.xp_gained;
        let session = new_session.into_session(user.learning_language, Utc::now());
        user.sessions.insert(0, session.clone());
        user.award_xp(xp_gained);

        info!(
            user_id,
            topic = %session.topic,
            xp = user.xp(),
            level = %user.level(),
            "Session added"
        );
        self.write(&document)?;
        Ok(Some(session))
    }

    /// Applies a partial profile update. Returns `false` if the user is unknown
    /// or the update is empty.
    pub fn update_user_profile(&self, user_id: &str, update: &ProfileUpdate) -> StoreResult<bool> {
        if update.is_empty() {
            info!(user_id, "Empty profile update skipped");
            return Ok(false);
        }

        let mut document = self.read()?;
        let Some(user) = document.user_mut(user_id) else {
            warn!(user_id, "Profile not updated: user not found");
            return Ok(false);
        };

        *user = update.merge(user);
        self.write(&document)?;
        info!(user_id, "Profile updated");
        Ok(true)
    }

    /// Switches the language future sessions are recorded under.
    pub fn update_learning_language(&self, user_id: &str, language: Language) -> StoreResult<bool> {
        let mut document = self.read()?;
        let Some(user) = document.user_mut(user_id) else {
            warn!(user_id, "Learning language not updated: user not found");
            return Ok(false);
        };

        user.learning_language = language;
        self.write(&document)?;
        info!(user_id, %language, "Learning language updated");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use crate::domain::{Language, NewSession, ProfileUpdate};
    use crate::levels::LevelName;
    use crate::memory::MemoryStorage;
    use crate::store::Store;
    use std::sync::Arc;

    fn store() -> Store {
        Store::new(Arc::new(MemoryStorage::new()))
    }

    #[test]
    fn session_crossing_a_threshold_levels_up() {
        let store = store();
        let mut document = store.read().unwrap();
        let user = document.user_mut("user4").unwrap();
        *user = user.clone().with_xp(650);
        store.write(&document).unwrap();

        let session = store
            .add_session("user4", NewSession::new("Generics", 30, 50))
            .unwrap()
            .expect("user exists");

        let diana = store.user("user4").unwrap().unwrap();
        assert_eq!(diana.xp(), 700);
        assert_eq!(diana.level(), LevelName::Developer);
        assert_eq!(diana.sessions.first(), Some(&session));
        assert_eq!(session.duration, 30);
        assert_eq!(session.language, Language::Python);
    }

    #[test]
    fn unknown_user_is_a_no_op() {
        let store = store();
        let before = store.read().unwrap();
        let recorded = store
            .add_session("ghost", NewSession::new("Loops", 10, 10))
            .unwrap();

        assert!(recorded.is_none());
        assert_eq!(store.read().unwrap(), before);
    }

    #[test]
    fn session_does_not_touch_streak() {
        let store = store();
        store
            .add_session("user1", NewSession::new("Maps", 15, 15))
            .unwrap();
        assert_eq!(store.user("user1").unwrap().unwrap().streak, 12);
    }

    #[test]
    fn session_snapshots_language_at_creation() {
        let store = store();
        store
            .add_session("user1", NewSession::new("Maps", 15, 15))
            .unwrap();
        store
            .update_learning_language("user1", Language::Python)
            .unwrap();

        let alice = store.user("user1").unwrap().unwrap();
        assert_eq!(alice.learning_language, Language::Python);
        assert_eq!(alice.sessions[0].language, Language::Java);
    }

    #[test]
    fn profile_update_renames_user() {
        let store = store();
        let update = ProfileUpdate {
            name: Some("Alicia".to_string()),
            avatar_url: None,
        };
        assert!(store.update_user_profile("user1", &update).unwrap());

        let alice = store.user("user1").unwrap().unwrap();
        assert_eq!(alice.name, "Alicia");
        assert_eq!(alice.level(), LevelName::Developer);
    }

    #[test]
    fn empty_profile_update_is_skipped() {
        let store = store();
        assert!(!store
            .update_user_profile("user1", &ProfileUpdate::default())
            .unwrap());
    }
}

//! crates/commitly_core/src/auth.rs
//!
//! Mock authentication: email lookup plus a current-user pointer.
//! Passwords are accepted for interface compatibility and never checked.

use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::{User, UserId};
use crate::store::{Store, StoreResult};

pub const EMAIL_TAKEN_MESSAGE: &str = "An account with this email already exists.";

/// Result of a registration attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegisterOutcome {
    Registered(User),
    Rejected { message: String },
}

impl RegisterOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, RegisterOutcome::Registered(_))
    }

    pub fn user(&self) -> Option<&User> {
        match self {
            RegisterOutcome::Registered(user) => Some(user),
            RegisterOutcome::Rejected { .. } => None,
        }
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            RegisterOutcome::Registered(_) => None,
            RegisterOutcome::Rejected { message } => Some(message),
        }
    }
}

impl Store {
    /// Logs in by email (case-insensitive). The password is ignored.
    pub fn login(&self, email: &str, _password: Option<&str>) -> StoreResult<Option<User>> {
        let mut document = self.read()?;
        let Some(user) = document.user_by_email(email).cloned() else {
            warn!(email, "Login failed: no such account");
            return Ok(None);
        };

        document.current_user_id = Some(user.id.clone());
        self.write(&document)?;
        info!(user_id = %user.id, "User logged in");
        Ok(Some(user))
    }

    /// Creates a base-level account and logs it in.
    pub fn register(&self, name: &str, email: &str, _password: Option<&str>) -> StoreResult<RegisterOutcome> {
        let mut document = self.read()?;
        if document.user_by_email(email).is_some() {
            warn!(email, "Registration failed: email already exists");
            return Ok(RegisterOutcome::Rejected {
                message: EMAIL_TAKEN_MESSAGE.to_string(),
            });
        }

        let user = User::new(Uuid::new_v4().to_string(), name.trim(), email.trim());
        document.users.push(user.clone());
        document.current_user_id = Some(user.id.clone());
        self.write(&document)?;

        info!(user_id = %user.id, "User registered and logged in");
        Ok(RegisterOutcome::Registered(user))
    }

    /// Clears the current-user pointer. No user data is removed.
    pub fn logout(&self) -> StoreResult<()> {
        let mut document = self.read()?;
        document.current_user_id = None;
        self.write(&document)?;
        info!("User logged out");
        Ok(())
    }

    pub fn current_user_id(&self) -> StoreResult<Option<UserId>> {
        Ok(self.read()?.current_user_id)
    }

    /// Resolves the current-user pointer. A dangling pointer yields `None`.
    pub fn current_user(&self) -> StoreResult<Option<User>> {
        let document = self.read()?;
        let Some(user_id) = document.current_user_id.as_deref() else {
            return Ok(None);
        };

        let user = document.user(user_id).cloned();
        if user.is_none() {
            warn!(user_id, "Current user not found in users");
        }
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::levels::LevelName;
    use crate::memory::MemoryStorage;
    use std::sync::Arc;

    fn store() -> Store {
        Store::new(Arc::new(MemoryStorage::new()))
    }

    #[test]
    fn login_ignores_password_and_case() {
        let store = store();
        let user = store
            .login("ALICE@example.com", Some("definitely wrong"))
            .unwrap()
            .expect("seeded user");

        assert_eq!(user.name, "Alice");
        assert_eq!(store.current_user_id().unwrap().as_deref(), Some("user1"));
        assert_eq!(store.current_user().unwrap(), Some(user));
    }

    #[test]
    fn unknown_email_fails_without_changing_pointer() {
        let store = store();
        assert!(store.login("nobody@example.com", None).unwrap().is_none());
        assert!(store.current_user().unwrap().is_none());
    }

    #[test]
    fn register_creates_base_level_user() {
        let store = store();
        let outcome = store.register("Dana", "dana@x.com", Some("pw")).unwrap();
        assert!(outcome.is_success());

        let dana = outcome.user().unwrap();
        assert_eq!(dana.xp(), 0);
        assert_eq!(dana.level(), LevelName::BabyCoder);
        assert!(dana.friends.is_empty());
        assert!(dana.sessions.is_empty());
        assert_eq!(store.current_user().unwrap().as_ref(), Some(dana));
    }

    #[test]
    fn register_rejects_duplicate_email_in_any_case() {
        let store = store();
        store.register("Dana", "dana@x.com", None).unwrap();

        let outcome = store.register("Other Dana", "DANA@X.COM", None).unwrap();
        assert!(!outcome.is_success());
        assert!(outcome.message().unwrap().contains("already exists"));
        assert_eq!(store.users().unwrap().len(), 5);
    }

    #[test]
    fn logout_keeps_data() {
        let store = store();
        store.login("bob@example.com", None).unwrap();
        store.logout().unwrap();

        assert!(store.current_user().unwrap().is_none());
        assert_eq!(store.users().unwrap().len(), 4);
    }

    #[test]
    fn dangling_pointer_resolves_to_none() {
        let store = store();
        let mut document = store.read().unwrap();
        document.current_user_id = Some("ghost".to_string());
        store.write(&document).unwrap();

        assert!(store.current_user().unwrap().is_none());
    }
}

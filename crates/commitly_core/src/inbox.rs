//! crates/commitly_core/src/inbox.rs
//!
//! Peer motivations: one-way encouragement messages with a read flag.

use chrono::Utc;
use rand::seq::SliceRandom;
use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::Motivation;
use crate::seed::MOTIVATIONAL_QUOTES;
use crate::store::{Store, StoreResult};

impl Store {
    /// Sends a random quote from `from_user_id` to `to_user_id`.
    ///
    /// The recipient is not checked; a motivation to an unknown id is stored
    /// and simply never shows up in anyone's inbox.
    pub fn send_motivation(&self, from_user_id: &str, to_user_id: &str) -> StoreResult<Motivation> {
        let mut document = self.read()?;
        let message = MOTIVATIONAL_QUOTES
            .choose(&mut rand::thread_rng())
            .copied()
            .unwrap_or(MOTIVATIONAL_QUOTES[0]);

        let motivation = Motivation {
            id: Uuid::new_v4().to_string(),
            from_user_id: from_user_id.to_string(),
            to_user_id: to_user_id.to_string(),
            message: message.to_string(),
            timestamp: Utc::now(),
            is_read: false,
        };
        document.motivations.push(motivation.clone());
        self.write(&document)?;

        info!(from_user_id, to_user_id, "Motivation sent");
        Ok(motivation)
    }

    pub fn unread_motivations_for(&self, user_id: &str) -> StoreResult<Vec<Motivation>> {
        Ok(self
            .read()?
            .motivations
            .into_iter()
            .filter(|m| m.to_user_id == user_id && !m.is_read)
            .collect())
    }

    /// Flags a motivation as read. Returns `false` if the id is unknown.
    /// Marking an already-read motivation again changes nothing.
    pub fn mark_motivation_as_read(&self, motivation_id: &str) -> StoreResult<bool> {
        let mut document = self.read()?;
        let Some(motivation) = document.motivations.iter_mut().find(|m| m.id == motivation_id) else {
            warn!(motivation_id, "Motivation not found");
            return Ok(false);
        };

        if !motivation.is_read {
            motivation.is_read = true;
            self.write(&document)?;
            info!(motivation_id, "Motivation marked as read");
        }
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStorage;
    use std::sync::Arc;

    fn store() -> Store {
        Store::new(Arc::new(MemoryStorage::new()))
    }

    #[test]
    fn sent_motivation_lands_unread_in_recipient_inbox() {
        let store = store();
        let sent = store.send_motivation("user2", "user1").unwrap();

        assert!(MOTIVATIONAL_QUOTES.contains(&sent.message.as_str()));
        assert!(!sent.is_read);
        assert_eq!(store.unread_motivations_for("user1").unwrap(), vec![sent]);
        assert!(store.unread_motivations_for("user2").unwrap().is_empty());
    }

    #[test]
    fn marking_read_twice_is_idempotent() {
        let store = store();
        let sent = store.send_motivation("user2", "user1").unwrap();

        assert!(store.mark_motivation_as_read(&sent.id).unwrap());
        assert!(store.mark_motivation_as_read(&sent.id).unwrap());

        let motivations = store.read().unwrap().motivations;
        assert_eq!(motivations.len(), 1);
        assert!(motivations[0].is_read);
        assert!(store.unread_motivations_for("user1").unwrap().is_empty());
    }

    #[test]
    fn unknown_motivation_is_a_no_op() {
        let store = store();
        assert!(!store.mark_motivation_as_read("missing").unwrap());
    }

    #[test]
    fn recipient_is_not_validated() {
        let store = store();
        store.send_motivation("user1", "ghost").unwrap();
        assert_eq!(store.read().unwrap().motivations.len(), 1);
        assert_eq!(store.unread_motivations_for("ghost").unwrap().len(), 1);
    }
}

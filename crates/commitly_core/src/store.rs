//! crates/commitly_core/src/store.rs
//!
//! The persistence store. All state lives in one JSON document kept under a
//! single key of a `BlobStorage`. Every operation reads the whole document,
//! mutates a detached copy, and writes the whole document back.
//!
//! The workflows built on top of the store (ledger, social graph, inbox, auth)
//! live in their own modules as further `impl Store` blocks.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::domain::{Challenge, FollowRequest, Motivation, User, UserId};
use crate::ports::{BlobStorage, PortError};
use crate::seed;

/// Key the document is stored under.
pub const DB_KEY: &str = "commitlyDB";

/// Errors the store can surface. Expected data conditions (unknown ids,
/// duplicates, corrupt documents) never show up here.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Storage error: {0}")]
    Storage(#[from] PortError),
    #[error("Failed to serialize document: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// The single persisted unit of state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub challenges: Vec<Challenge>,
    #[serde(default)]
    pub follow_requests: Vec<FollowRequest>,
    #[serde(default)]
    pub motivations: Vec<Motivation>,
    #[serde(default)]
    pub current_user_id: Option<UserId>,
}

impl Document {
    /// The document a fresh install starts with. Nobody is logged in.
    pub fn seeded() -> Self {
        Self {
            users: seed::users(Utc::now()),
            challenges: seed::challenges(),
            follow_requests: seed::follow_requests(),
            motivations: Vec::new(),
            current_user_id: None,
        }
    }

    pub fn user(&self, user_id: &str) -> Option<&User> {
        self.users.iter().find(|u| u.id == user_id)
    }

    pub fn user_mut(&mut self, user_id: &str) -> Option<&mut User> {
        self.users.iter_mut().find(|u| u.id == user_id)
    }

    pub fn user_by_email(&self, email: &str) -> Option<&User> {
        let email = email.trim().to_lowercase();
        self.users.iter().find(|u| u.email.to_lowercase() == email)
    }

    /// Re-derives every user's level from their XP. Returns how many were stale.
    fn rederive_levels(&mut self) -> usize {
        self.users
            .iter_mut()
            .map(|user| user.rederive_level())
            .filter(|stale| *stale)
            .count()
    }
}

/// Handle to the persisted document. Cheap to clone; clones share the backend.
#[derive(Clone)]
pub struct Store {
    storage: Arc<dyn BlobStorage>,
}

impl Store {
    pub fn new(storage: Arc<dyn BlobStorage>) -> Self {
        Self { storage }
    }

    /// Seeds the document if nothing has been stored yet.
    pub fn init(&self) -> StoreResult<()> {
        if self.storage.get(DB_KEY)?.is_none() {
            info!("Initializing store with seed data");
            self.write(&Document::seeded())?;
        }
        Ok(())
    }

    /// Reads a detached snapshot of the whole document.
    ///
    /// A missing or unparseable document is replaced by the seed document,
    /// which also drops any current-user pointer.
    pub fn read(&self) -> StoreResult<Document> {
        let raw = match self.storage.get(DB_KEY)? {
            Some(raw) => raw,
            None => {
                warn!("Document not found in storage, seeding");
                return self.reseed();
            }
        };

        match serde_json::from_str::<Document>(&raw) {
            Ok(mut document) => {
                let stale = document.rederive_levels();
                if stale > 0 {
                    warn!(count = stale, "Stored levels disagreed with XP and were re-derived");
                }
                Ok(document)
            }
            Err(e) => {
                warn!(error = %e, "Stored document is corrupt, re-seeding");
                self.reseed()
            }
        }
    }

    /// Replaces the whole stored document.
    pub fn write(&self, document: &Document) -> StoreResult<()> {
        let raw = serde_json::to_string(document)?;
        self.storage.set(DB_KEY, &raw)?;
        debug!(bytes = raw.len(), "Document written");
        Ok(())
    }

    pub(crate) fn storage(&self) -> &dyn BlobStorage {
        self.storage.as_ref()
    }

    fn reseed(&self) -> StoreResult<Document> {
        let document = Document::seeded();
        self.write(&document)?;
        Ok(document)
    }

    //=====================================================================================
    // Plain reads
    //=====================================================================================

    pub fn users(&self) -> StoreResult<Vec<User>> {
        Ok(self.read()?.users)
    }

    pub fn user(&self, user_id: &str) -> StoreResult<Option<User>> {
        Ok(self.read()?.user(user_id).cloned())
    }

    pub fn challenges(&self) -> StoreResult<Vec<Challenge>> {
        Ok(self.read()?.challenges)
    }

    /// All users, highest XP first. Ties keep document order.
    pub fn leaderboard(&self) -> StoreResult<Vec<User>> {
        let mut users = self.read()?.users;
        users.sort_by(|a, b| b.xp().cmp(&a.xp()));
        Ok(users)
    }
}

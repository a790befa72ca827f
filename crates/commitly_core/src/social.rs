//! crates/commitly_core/src/social.rs
//!
//! Friendships and the follow-request workflow.
//!
//! Invariants kept by every operation here:
//! - friendship is symmetric;
//! - at most one pending request exists per pair of users, in either direction;
//! - no request exists between users who are already friends.

use tracing::{debug, error, info, warn};

use crate::domain::{FollowRequest, User};
use crate::store::{Store, StoreResult};

/// What happened to a follow request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendRequestOutcome {
    Sent,
    AlreadyFriends,
    /// A request already exists between the pair, in either direction.
    AlreadyPending,
    SelfRequest,
}

impl Store {
    pub fn send_follow_request(&self, from_user_id: &str, to_user_id: &str) -> StoreResult<SendRequestOutcome> {
        if from_user_id == to_user_id {
            warn!(from_user_id, "Request not sent: users cannot follow themselves");
            return Ok(SendRequestOutcome::SelfRequest);
        }

        let mut document = self.read()?;

        let already_friends = document
            .user(from_user_id)
            .is_some_and(|u| u.is_friends_with(to_user_id))
            || document
                .user(to_user_id)
                .is_some_and(|u| u.is_friends_with(from_user_id));
        if already_friends {
            warn!(from_user_id, to_user_id, "Request not sent: already friends");
            return Ok(SendRequestOutcome::AlreadyFriends);
        }

        if document
            .follow_requests
            .iter()
            .any(|req| req.connects(from_user_id, to_user_id))
        {
            warn!(from_user_id, to_user_id, "Request not sent: existing request found");
            return Ok(SendRequestOutcome::AlreadyPending);
        }

        document
            .follow_requests
            .push(FollowRequest::new(from_user_id, to_user_id));
        self.write(&document)?;
        info!(from_user_id, to_user_id, "Follow request sent");
        Ok(SendRequestOutcome::Sent)
    }

    /// Clears any request between the pair and befriends both users.
    ///
    /// The friendship forms even when no request was pending. Returns `false`
    /// without writing if either user is unknown or nothing changed.
    pub fn accept_follow_request(&self, from_user_id: &str, to_user_id: &str) -> StoreResult<bool> {
        let mut document = self.read()?;

        if document.user(from_user_id).is_none() || document.user(to_user_id).is_none() {
            error!(from_user_id, to_user_id, "Accept failed: one or both users not found");
            return Ok(false);
        }

        // No request may remain between friends, in either direction.
        let before = document.follow_requests.len();
        document
            .follow_requests
            .retain(|req| !req.connects(from_user_id, to_user_id));
        let removed = document.follow_requests.len() != before;
        if !removed {
            debug!(from_user_id, to_user_id, "No pending request, befriending anyway");
        }

        let mut befriended = false;
        if let Some(from_user) = document.user_mut(from_user_id) {
            befriended |= from_user.add_friend(to_user_id.to_string());
        }
        if let Some(to_user) = document.user_mut(to_user_id) {
            befriended |= to_user.add_friend(from_user_id.to_string());
        }

        if !removed && !befriended {
            warn!(from_user_id, to_user_id, "Accept skipped: already friends");
            return Ok(false);
        }

        self.write(&document)?;
        info!(from_user_id, to_user_id, "Follow request accepted");
        Ok(true)
    }

    /// Drops the pending request `from -> to`. Friendships are untouched.
    pub fn decline_follow_request(&self, from_user_id: &str, to_user_id: &str) -> StoreResult<bool> {
        let mut document = self.read()?;

        let before = document.follow_requests.len();
        document
            .follow_requests
            .retain(|req| !req.matches(from_user_id, to_user_id));
        if document.follow_requests.len() == before {
            warn!(from_user_id, to_user_id, "Decline skipped: no pending request");
            return Ok(false);
        }

        self.write(&document)?;
        info!(from_user_id, to_user_id, "Follow request declined");
        Ok(true)
    }

    /// Pending requests addressed to `user_id`.
    pub fn follow_requests_for(&self, user_id: &str) -> StoreResult<Vec<FollowRequest>> {
        Ok(self
            .read()?
            .follow_requests
            .into_iter()
            .filter(|req| req.to_user_id == user_id)
            .collect())
    }

    /// The senders of `requests`, in document order. Unknown senders are skipped.
    pub fn users_from_requests(&self, requests: &[FollowRequest]) -> StoreResult<Vec<User>> {
        Ok(self
            .read()?
            .users
            .into_iter()
            .filter(|u| requests.iter().any(|req| req.from_user_id == u.id))
            .collect())
    }

    /// Friends of `user_id` resolved to user records. Dangling ids are skipped.
    pub fn friends_of(&self, user_id: &str) -> StoreResult<Vec<User>> {
        let document = self.read()?;
        let Some(user) = document.user(user_id) else {
            warn!(user_id, "Friends not listed: user not found");
            return Ok(Vec::new());
        };

        Ok(user
            .friends
            .iter()
            .filter_map(|id| document.user(id).cloned())
            .collect())
    }

    /// Users `user_id` could send a request to right now.
    pub fn suggest_friends(&self, user_id: &str) -> StoreResult<Vec<User>> {
        let document = self.read()?;
        let Some(user) = document.user(user_id) else {
            warn!(user_id, "No suggestions: user not found");
            return Ok(Vec::new());
        };

        Ok(document
            .users
            .iter()
            .filter(|candidate| candidate.id != user.id)
            .filter(|candidate| !user.is_friends_with(&candidate.id))
            .filter(|candidate| {
                !document
                    .follow_requests
                    .iter()
                    .any(|req| req.connects(&user.id, &candidate.id))
            })
            .cloned()
            .collect())
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

    fn pending(store: &Store) -> Vec<FollowRequest> {
        store.read().unwrap().follow_requests
    }

    #[test]
    fn duplicate_request_is_ignored() {
        let store = store();
        assert_eq!(
            store.send_follow_request("user3", "user4").unwrap(),
            SendRequestOutcome::Sent
        );
        assert_eq!(
            store.send_follow_request("user3", "user4").unwrap(),
            SendRequestOutcome::AlreadyPending
        );

        let between: Vec<_> = pending(&store)
            .into_iter()
            .filter(|req| req.connects("user3", "user4"))
            .collect();
        assert_eq!(between.len(), 1);
    }

    #[test]
    fn reverse_request_is_ignored() {
        let store = store();
        store.send_follow_request("user3", "user4").unwrap();
        assert_eq!(
            store.send_follow_request("user4", "user3").unwrap(),
            SendRequestOutcome::AlreadyPending
        );
        assert_eq!(pending(&store).len(), 2);
    }

    #[test]
    fn request_between_friends_is_ignored() {
        let store = store();
        assert_eq!(
            store.send_follow_request("user2", "user1").unwrap(),
            SendRequestOutcome::AlreadyFriends
        );
        assert_eq!(pending(&store).len(), 1);
    }

    #[test]
    fn self_request_is_rejected() {
        let store = store();
        assert_eq!(
            store.send_follow_request("user1", "user1").unwrap(),
            SendRequestOutcome::SelfRequest
        );
    }

    #[test]
    fn accept_creates_symmetric_friendship() {
        let store = store();
        assert!(store.accept_follow_request("user4", "user1").unwrap());

        let alice = store.user("user1").unwrap().unwrap();
        let diana = store.user("user4").unwrap().unwrap();
        assert!(alice.is_friends_with("user4"));
        assert!(diana.is_friends_with("user1"));
        assert!(!pending(&store).iter().any(|r| r.connects("user1", "user4")));
    }

    #[test]
    fn accept_twice_does_not_duplicate_friends() {
        let store = store();
        assert!(store.accept_follow_request("user4", "user1").unwrap());
        assert!(!store.accept_follow_request("user4", "user1").unwrap());

        let alice = store.user("user1").unwrap().unwrap();
        let diana = store.user("user4").unwrap().unwrap();
        assert_eq!(alice.friends.iter().filter(|id| *id == "user4").count(), 1);
        assert_eq!(diana.friends, vec!["user1"]);
    }

    #[test]
    fn accept_without_request_still_befriends() {
        let store = store();
        assert!(store.accept_follow_request("user3", "user4").unwrap());

        let charlie = store.user("user3").unwrap().unwrap();
        let diana = store.user("user4").unwrap().unwrap();
        assert_eq!(charlie.friends, vec!["user1", "user4"]);
        assert_eq!(diana.friends, vec!["user3"]);
        assert_eq!(pending(&store), vec![FollowRequest::new("user4", "user1")]);
    }

    #[test]
    fn accept_in_reverse_clears_the_pending_request() {
        let store = store();
        assert!(store.accept_follow_request("user1", "user4").unwrap());

        assert!(pending(&store).is_empty());
        let diana = store.user("user4").unwrap().unwrap();
        assert!(diana.is_friends_with("user1"));
    }

    #[test]
    fn accept_with_unknown_user_is_a_no_op() {
        let store = store();
        let before = store.read().unwrap();
        assert!(!store.accept_follow_request("ghost", "user1").unwrap());
        assert_eq!(store.read().unwrap(), before);
    }

    #[test]
    fn decline_removes_request_only() {
        let store = store();
        assert!(store.decline_follow_request("user4", "user1").unwrap());

        assert!(pending(&store).is_empty());
        let alice = store.user("user1").unwrap().unwrap();
        assert!(!alice.is_friends_with("user4"));
        assert!(!store.decline_follow_request("user4", "user1").unwrap());
    }

    #[test]
    fn incoming_requests_resolve_to_senders() {
        let store = store();
        let requests = store.follow_requests_for("user1").unwrap();
        assert_eq!(requests, vec![FollowRequest::new("user4", "user1")]);

        let senders = store.users_from_requests(&requests).unwrap();
        assert_eq!(senders.len(), 1);
        assert_eq!(senders[0].name, "Diana");
        assert!(store.follow_requests_for("user4").unwrap().is_empty());
    }

    #[test]
    fn friends_and_suggestions() {
        let store = store();
        let friends: Vec<_> = store
            .friends_of("user1")
            .unwrap()
            .into_iter()
            .map(|u| u.id)
            .collect();
        assert_eq!(friends, vec!["user2", "user3"]);

        // Diana already has a pending request to Alice.
        assert!(store.suggest_friends("user1").unwrap().is_empty());

        let names: Vec<_> = store
            .suggest_friends("user3")
            .unwrap()
            .into_iter()
            .map(|u| u.name)
            .collect();
        assert_eq!(names, vec!["Bob", "Diana"]);
    }
}

//! crates/commitly_core/src/domain.rs
//!
//! Defines the core data structures for the application.
//! These are the entities held inside the persisted document, so they carry
//! serde derives using the document's camelCase field names.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::levels::{resolve_level, LevelName};

/// Identifier of a user inside the document.
pub type UserId = String;

//=========================================================================================
// Users and Sessions
//=========================================================================================

/// The programming language a user is currently studying.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Language {
    Java,
    #[default]
    Python,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Java => "Java",
            Language::Python => "Python",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "java" => Ok(Language::Java),
            "python" => Ok(Language::Python),
            other => Err(format!("'{}' is not a supported language", other)),
        }
    }
}

/// A completed study interval. Never edited once recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: String,
    pub date: DateTime<Utc>,
    /// Minutes studied; always at least one.
    pub duration: u32,
    pub topic: String,
    /// The user's learning language when the session was recorded.
    pub language: Language,
    pub xp_gained: u64,
}

/// Input for recording a session, usually straight from the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSession {
    pub topic: String,
    pub duration_minutes: u32,
    pub xp_gained: u64,
}

impl NewSession {
    /// Builds a session request, clamping the duration to at least one minute.
    pub fn new(topic: impl Into<String>, duration_minutes: u32, xp_gained: u64) -> Self {
        Self {
            topic: topic.into().trim().to_string(),
            duration_minutes: duration_minutes.max(1),
            xp_gained,
        }
    }

    /// Applies the study-timer rule to an elapsed time.
    ///
    /// Under a minute of study earns nothing and records nothing. Otherwise the
    /// duration is rounded to the nearest minute and one XP is earned per full
    /// minute.
    pub fn from_elapsed(topic: impl Into<String>, studied_seconds: u64) -> Option<Self> {
        if studied_seconds < 60 {
            return None;
        }
        let minutes = (studied_seconds + 30) / 60;
        let duration_minutes = u32::try_from(minutes).unwrap_or(u32::MAX);
        Some(Self::new(topic, duration_minutes, studied_seconds / 60))
    }

    pub(crate) fn into_session(self, language: Language, date: DateTime<Utc>) -> Session {
        Session {
            id: Uuid::new_v4().to_string(),
            date,
            duration: self.duration_minutes,
            topic: self.topic,
            language,
            xp_gained: self.xp_gained,
        }
    }
}

/// A registered user and their progress.
///
/// `xp` and `level` are private so that the level can only ever be derived from
/// the XP counter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub avatar_url: String,
    xp: u64,
    pub streak: u32,
    pub learning_language: Language,
    /// Newest first.
    pub sessions: Vec<Session>,
    /// Ids of friends. Kept free of duplicates.
    pub friends: Vec<UserId>,
    level: LevelName,
}

impl User {
    /// A fresh user at the base level.
    pub fn new(id: impl Into<UserId>, name: impl Into<String>, email: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id: id.into(),
            avatar_url: default_avatar_url(&name),
            name,
            email: email.into(),
            xp: 0,
            streak: 0,
            learning_language: Language::default(),
            sessions: Vec::new(),
            friends: Vec::new(),
            level: resolve_level(0),
        }
    }

    pub fn with_xp(mut self, xp: u64) -> Self {
        self.xp = xp;
        self.rederive_level();
        self
    }

    pub fn with_avatar_url(mut self, avatar_url: impl Into<String>) -> Self {
        self.avatar_url = avatar_url.into();
        self
    }

    pub fn with_streak(mut self, streak: u32) -> Self {
        self.streak = streak;
        self
    }

    pub fn with_language(mut self, language: Language) -> Self {
        self.learning_language = language;
        self
    }

    pub fn with_sessions(mut self, sessions: Vec<Session>) -> Self {
        self.sessions = sessions;
        self
    }

    pub fn with_friends<I, S>(mut self, friends: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<UserId>,
    {
        for friend in friends {
            self.add_friend(friend.into());
        }
        self
    }

    pub fn xp(&self) -> u64 {
        self.xp
    }

    pub fn level(&self) -> LevelName {
        self.level
    }

    /// Adds XP and moves the level along with it.
    pub fn award_xp(&mut self, amount: u64) {
        self.xp = self.xp.saturating_add(amount);
        self.rederive_level();
    }

    /// Recomputes `level` from `xp`. Returns whether the stored level was stale.
    pub fn rederive_level(&mut self) -> bool {
        let level = resolve_level(self.xp);
        let stale = level != self.level;
        self.level = level;
        stale
    }

    pub fn is_friends_with(&self, user_id: &str) -> bool {
        self.friends.iter().any(|id| id == user_id)
    }

    /// Set-union insert. Returns `false` if the friend was already present.
    pub fn add_friend(&mut self, user_id: UserId) -> bool {
        if self.is_friends_with(&user_id) {
            return false;
        }
        self.friends.push(user_id);
        true
    }
}

fn default_avatar_url(name: &str) -> String {
    let seed: String = name.chars().filter(|c| !c.is_whitespace()).collect();
    format!("https://picsum.photos/seed/{}/100", seed)
}

/// An explicit partial update of a user's profile.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub avatar_url: Option<String>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.avatar_url.is_none()
    }

    /// Merges the update into a copy of `user`.
    ///
    /// Blank names are ignored. The level is re-derived on the way out.
    pub fn merge(&self, user: &User) -> User {
        let mut merged = user.clone();
        if let Some(name) = self.name.as_deref().map(str::trim) {
            if !name.is_empty() {
                merged.name = name.to_string();
            }
        }
        if let Some(avatar_url) = &self.avatar_url {
            merged.avatar_url = avatar_url.clone();
        }
        merged.rederive_level();
        merged
    }
}

//=========================================================================================
// Social and Challenges
//=========================================================================================

/// A pending request to become friends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowRequest {
    pub from_user_id: UserId,
    pub to_user_id: UserId,
}

impl FollowRequest {
    pub fn new(from_user_id: impl Into<UserId>, to_user_id: impl Into<UserId>) -> Self {
        Self {
            from_user_id: from_user_id.into(),
            to_user_id: to_user_id.into(),
        }
    }

    /// Exact match on direction.
    pub fn matches(&self, from_user_id: &str, to_user_id: &str) -> bool {
        self.from_user_id == from_user_id && self.to_user_id == to_user_id
    }

    /// Match in either direction.
    pub fn connects(&self, a: &str, b: &str) -> bool {
        self.matches(a, b) || self.matches(b, a)
    }
}

/// An encouragement message sent from one user to another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Motivation {
    pub id: String,
    pub from_user_id: UserId,
    pub to_user_id: UserId,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub is_read: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Challenge {
    pub id: String,
    pub title: String,
    pub description: String,
    pub xp: u64,
    pub is_completed: bool,
}

//=========================================================================================
// Generated Content
//=========================================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PracticeSheetLevel {
    pub questions: Vec<String>,
    pub motivation: String,
}

/// Coding exercises grouped by difficulty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PracticeSheet {
    pub easy: PracticeSheetLevel,
    pub medium: PracticeSheetLevel,
    pub hard: PracticeSheetLevel,
}

/// Outcome of running a snippet. Exactly one side is expected to be set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeExecutionResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CodeExecutionResult {
    pub fn output(output: impl Into<String>) -> Self {
        Self {
            output: Some(output.into()),
            error: None,
        }
    }

    pub fn error(error: impl Into<String>) -> Self {
        Self {
            output: None,
            error: Some(error.into()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatSender {
    User,
    Tutor,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub sender: ChatSender,
    pub message: String,
}

//! crates/commitly_core/src/seed.rs
//!
//! Fixed content: the data a brand new store starts with and the quote pools.

use chrono::{DateTime, Duration, Utc};

use crate::domain::{Challenge, FollowRequest, Language, Session, User};

pub const MOTIVATIONAL_QUOTES: [&str; 8] = [
    "Consistency is self-care in action.",
    "You're doing better than you think.",
    "Tiny steps lead to giant leaps.",
    "The secret of getting ahead is getting started.",
    "Don't watch the clock; do what it does. Keep going.",
    "The expert in anything was once a beginner.",
    "Your only limit is your mind.",
    "Strive for progress, not perfection.",
];

fn sessions(now: DateTime<Utc>) -> Vec<Session> {
    let session = |id: &str, days_ago: i64, duration: u32, topic: &str, language, xp_gained| Session {
        id: id.to_string(),
        date: now - Duration::days(days_ago),
        duration,
        topic: topic.to_string(),
        language,
        xp_gained,
    };

    vec![
        session("s1", 1, 60, "Java Collections", Language::Java, 50),
        session("s2", 2, 45, "Python Dictionaries", Language::Python, 40),
        session("s3", 3, 75, "Java Streams", Language::Java, 65),
    ]
}

/// Alice, Bob, Charlie and Diana. Alice is friends with Bob and Charlie.
pub fn users(now: DateTime<Utc>) -> Vec<User> {
    let history = sessions(now);

    vec![
        User::new("user1", "Alice", "alice@example.com")
            .with_avatar_url("https://picsum.photos/seed/alice/100")
            .with_xp(850)
            .with_streak(12)
            .with_language(Language::Java)
            .with_sessions(history.clone())
            .with_friends(["user2", "user3"]),
        User::new("user2", "Bob", "bob@example.com")
            .with_avatar_url("https://picsum.photos/seed/bob/100")
            .with_xp(1600)
            .with_streak(25)
            .with_language(Language::Python)
            .with_sessions(history[1..].to_vec())
            .with_friends(["user1"]),
        User::new("user3", "Charlie", "charlie@example.com")
            .with_avatar_url("https://picsum.photos/seed/charlie/100")
            .with_xp(450)
            .with_streak(5)
            .with_language(Language::Java)
            .with_sessions(vec![history[0].clone()])
            .with_friends(["user1"]),
        User::new("user4", "Diana", "diana@example.com")
            .with_avatar_url("https://picsum.photos/seed/diana/100")
            .with_xp(200)
            .with_streak(2)
            .with_language(Language::Python),
    ]
}

pub fn challenges() -> Vec<Challenge> {
    let challenge = |id: &str, title: &str, description: &str, xp, is_completed| Challenge {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        xp,
        is_completed,
    };

    vec![
        challenge(
            "c1",
            "Code for 30 minutes",
            "Complete a focused study session of at least 30 minutes.",
            25,
            true,
        ),
        challenge(
            "c2",
            "Complete a quiz",
            "Finish a post-session quiz on a new topic.",
            15,
            false,
        ),
        challenge(
            "c3",
            "Start a 3-day streak",
            "Log in and complete a session for three consecutive days.",
            50,
            false,
        ),
    ]
}

/// Diana wants to be friends with Alice.
pub fn follow_requests() -> Vec<FollowRequest> {
    vec![FollowRequest::new("user4", "user1")]
}

mod common;

use commitly_core::tutor::QUIZ_FAILURE_QUESTION;
use commitly_core::{ChatMessage, ChatSender};
use commitly_lib::error::CliError;
use common::{exec, test_state};
use std::io::Write;

#[tokio::test]
async fn test_commands_require_login() {
    let state = test_state();
    let err = exec(&state, &["whoami"]).await.unwrap_err();
    assert!(matches!(err, CliError::NotLoggedIn));
}

#[tokio::test]
async fn test_login_and_whoami() {
    let state = test_state();
    let out = exec(&state, &["login", "ALICE@example.com", "--password", "nope"])
        .await
        .unwrap();
    assert_eq!(out, "Logged in as Alice.\n");

    let out = exec(&state, &["whoami"]).await.unwrap();
    assert!(out.contains("Level:    Developer"));
    assert!(out.contains("XP:       850 (150/800 towards Guru)"));
    assert!(out.contains("Streak:   12 days"));
}

#[tokio::test]
async fn test_register_twice_reports_duplicate() {
    let state = test_state();
    let out = exec(&state, &["register", "Dana", "dana@x.com"]).await.unwrap();
    assert_eq!(out, "Welcome, Dana! You start as a Baby Coder.\n");

    let out = exec(&state, &["register", "Dana", "Dana@X.com"]).await.unwrap();
    assert_eq!(out, "An account with this email already exists.\n");
}

#[tokio::test]
async fn test_timer_session_levels_up() {
    let state = test_state();
    exec(&state, &["register", "Dana", "dana@x.com"]).await.unwrap();

    let out = exec(&state, &["session", "timer", "Loops", "--seconds", "30"])
        .await
        .unwrap();
    assert_eq!(out, "Less than a minute studied; nothing recorded.\n");

    let out = exec(&state, &["session", "add", "Loops", "--minutes", "45", "--xp", "120"])
        .await
        .unwrap();
    assert_eq!(out, "Session recorded. You now have 120 XP (Script Kiddie).\n");
}

#[tokio::test]
async fn test_follow_request_round_trip() {
    let state = test_state();
    exec(&state, &["login", "charlie@example.com"]).await.unwrap();
    assert_eq!(
        exec(&state, &["follow", "user4"]).await.unwrap(),
        "Follow request sent.\n"
    );
    assert_eq!(
        exec(&state, &["follow", "user4"]).await.unwrap(),
        "A request is already pending.\n"
    );

    exec(&state, &["login", "diana@example.com"]).await.unwrap();
    let out = exec(&state, &["requests"]).await.unwrap();
    assert!(out.contains("Charlie"));
    assert_eq!(
        exec(&state, &["accept", "user3"]).await.unwrap(),
        "You are now friends.\n"
    );

    let out = exec(&state, &["friends"]).await.unwrap();
    assert!(out.contains("Charlie"));
}

#[tokio::test]
async fn test_motivation_inbox() {
    let state = test_state();
    exec(&state, &["login", "bob@example.com"]).await.unwrap();
    let out = exec(&state, &["motivate", "user1"]).await.unwrap();
    assert!(out.starts_with("Sent: "));

    exec(&state, &["login", "alice@example.com"]).await.unwrap();
    let inbox = exec(&state, &["inbox"]).await.unwrap();
    assert!(inbox.contains("Bob"));

    let id = inbox.split_whitespace().next().unwrap().to_string();
    assert_eq!(exec(&state, &["read", &id]).await.unwrap(), "Marked as read.\n");
    assert_eq!(exec(&state, &["inbox"]).await.unwrap(), "");
}

#[tokio::test]
async fn test_leaderboard_marks_current_user() {
    let state = test_state();
    exec(&state, &["login", "charlie@example.com"]).await.unwrap();
    let out = exec(&state, &["leaderboard"]).await.unwrap();
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 4);
    assert!(lines[0].contains("Bob"));
    assert!(lines[2].contains("Charlie") && lines[2].ends_with("(you)"));
}

#[tokio::test]
async fn test_content_commands_use_injected_generator() {
    let state = test_state();
    exec(&state, &["login", "alice@example.com"]).await.unwrap();

    let quiz = exec(&state, &["quiz", "France"]).await.unwrap();
    assert!(quiz.contains("MOCK: What is the capital of France?"));
    assert!(!quiz.contains(QUIZ_FAILURE_QUESTION));

    let sheet = exec(&state, &["practice", "Maps", "--count", "2"]).await.unwrap();
    assert_eq!(sheet.matches("MOCK: Easy Java question about Maps.").count(), 2);

    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "System.out.println(\"hi\");").unwrap();
    let path = file.path().to_str().unwrap().to_string();
    let out = exec(&state, &["run", &path]).await.unwrap();
    assert_eq!(out, "MOCK: Hello from the Java sandbox!\n");
}

#[tokio::test]
async fn test_language_switch() {
    let state = test_state();
    exec(&state, &["login", "alice@example.com"]).await.unwrap();
    assert_eq!(
        exec(&state, &["language", "python"]).await.unwrap(),
        "Now learning Python.\n"
    );
    let out = exec(&state, &["whoami"]).await.unwrap();
    assert!(out.contains("Language: Python"));
}

#[tokio::test]
async fn test_settings_show_and_toggle() {
    let state = test_state();
    let out = exec(&state, &["settings"]).await.unwrap();
    assert!(out.contains("Motivations:       on"));

    let out = exec(&state, &["settings", "--motivations", "false"]).await.unwrap();
    assert!(out.contains("Motivations:       off"));
    assert!(out.contains("Friend activity:   on"));

    let out = exec(&state, &["settings"]).await.unwrap();
    assert!(out.contains("Motivations:       off"));
}

#[tokio::test]
async fn test_chat_appends_to_history_file() {
    let state = test_state();
    exec(&state, &["login", "alice@example.com"]).await.unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("chat.json");
    let path_arg = path.to_str().unwrap().to_string();

    exec(&state, &["chat", "What is a stream?", "--history", &path_arg])
        .await
        .unwrap();
    exec(&state, &["chat", "And a collector?", "--history", &path_arg])
        .await
        .unwrap();

    let raw = std::fs::read_to_string(&path).unwrap();
    let history: Vec<ChatMessage> = serde_json::from_str(&raw).unwrap();
    let senders: Vec<ChatSender> = history.iter().map(|m| m.sender).collect();
    assert_eq!(
        senders,
        vec![ChatSender::User, ChatSender::Tutor, ChatSender::User, ChatSender::Tutor]
    );
    assert_eq!(history[2].message, "And a collector?");
}

//! services/cli/src/commands.rs
//!
//! The `commitly` command surface and its handlers. Handlers write plain text
//! to any `Write` so they can be driven from tests.

use crate::error::CliError;
use crate::state::AppState;
use clap::{Parser, Subcommand};
use commitly_core::{
    level_progress, ChatMessage, ChatSender, Language, NewSession, NotificationSettings, ProfileUpdate, RegisterOutcome,
    SendRequestOutcome, SettingsUpdate, User,
};
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "commitly")]
#[command(version, about = "Commitly - track coding practice, level up, cheer on friends")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Log in by email (passwords are not checked)
    Login {
        email: String,
        #[arg(long)]
        password: Option<String>,
    },

    /// Create an account and log in
    Register {
        name: String,
        email: String,
        #[arg(long)]
        password: Option<String>,
    },

    /// Log out
    Logout,

    /// Show the current user's progress
    Whoami,

    /// List all users
    Users,

    /// Users ranked by XP
    Leaderboard,

    /// List challenges
    Challenges,

    /// Record study sessions
    Session {
        #[command(subcommand)]
        action: SessionAction,
    },

    /// Change the learning language (java or python)
    Language { language: Language },

    /// Edit name or avatar
    Profile {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        avatar: Option<String>,
    },

    /// List friends
    Friends,

    /// List incoming follow requests
    Requests,

    /// Send a follow request
    Follow { user_id: String },

    /// Accept a follow request from a user
    Accept { from_user_id: String },

    /// Decline a follow request from a user
    Decline { from_user_id: String },

    /// Users you could send a request to
    Suggest,

    /// Send a motivational quote to a user
    Motivate { user_id: String },

    /// Show unread motivations
    Inbox,

    /// Mark a motivation as read
    Read { motivation_id: String },

    /// Show or change notification settings
    Settings {
        #[arg(long)]
        friend_activity: Option<bool>,
        #[arg(long)]
        motivations: Option<bool>,
        #[arg(long)]
        daily_challenges: Option<bool>,
        #[arg(long)]
        session_reminders: Option<bool>,
    },

    /// Generate a quiz on a topic
    Quiz { topic: String },

    /// Generate a practice sheet on a topic
    Practice {
        topic: String,
        /// Problems per difficulty
        #[arg(short, long, default_value = "3")]
        count: usize,
    },

    /// Run a source file in the sandbox
    Run { file: PathBuf },

    /// Ask the tutor a question
    Chat {
        message: String,
        /// Source file to share with the tutor
        #[arg(long)]
        code: Option<PathBuf>,
        /// JSON file holding the conversation so far; the exchange is appended to it
        #[arg(long)]
        history: Option<PathBuf>,
    },

    /// Ask the tutor to explain an error message
    Explain {
        error: String,
        #[arg(long)]
        code: Option<PathBuf>,
    },
}

#[derive(Subcommand, Debug)]
pub enum SessionAction {
    /// Record a session with explicit minutes and XP
    Add {
        topic: String,
        #[arg(long)]
        minutes: u32,
        #[arg(long)]
        xp: u64,
    },
    /// Record a session from elapsed timer seconds
    Timer {
        topic: String,
        #[arg(long)]
        seconds: u64,
    },
}

fn require_user(state: &AppState) -> Result<User, CliError> {
    state.store.current_user()?.ok_or(CliError::NotLoggedIn)
}

fn read_code(path: Option<&Path>) -> Result<String, CliError> {
    match path {
        Some(path) => Ok(std::fs::read_to_string(path)?),
        None => Ok(String::new()),
    }
}

fn write_user_line(out: &mut impl Write, user: &User) -> Result<(), CliError> {
    writeln!(
        out,
        "{:<38} {:<12} {:>6} XP  {}",
        user.id,
        user.name,
        user.xp(),
        user.level()
    )?;
    Ok(())
}

fn write_settings(out: &mut impl Write, settings: &NotificationSettings) -> Result<(), CliError> {
    let on_off = |flag: bool| if flag { "on" } else { "off" };
    writeln!(out, "Friend activity:   {}", on_off(settings.friend_activity))?;
    writeln!(out, "Motivations:       {}", on_off(settings.motivations))?;
    writeln!(out, "Daily challenges:  {}", on_off(settings.daily_challenges))?;
    writeln!(out, "Session reminders: {}", on_off(settings.session_reminders))?;
    Ok(())
}

/// Reads a saved conversation. A missing file is an empty conversation.
fn read_history(path: &Path) -> Result<Vec<ChatMessage>, CliError> {
    match std::fs::read_to_string(path) {
        Ok(raw) => Ok(serde_json::from_str(&raw)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
        Err(e) => Err(e.into()),
    }
}

/// Executes one command against `state`.
pub async fn run(command: Commands, state: &AppState, out: &mut impl Write) -> Result<(), CliError> {
    let store = &state.store;

    match command {
        Commands::Login { email, password } => match store.login(&email, password.as_deref())? {
            Some(user) => writeln!(out, "Logged in as {}.", user.name)?,
            None => writeln!(out, "Invalid email or password.")?,
        },

        Commands::Register { name, email, password } => {
            match store.register(&name, &email, password.as_deref())? {
                RegisterOutcome::Registered(user) => {
                    writeln!(out, "Welcome, {}! You start as a {}.", user.name, user.level())?
                }
                RegisterOutcome::Rejected { message } => writeln!(out, "{}", message)?,
            }
        }

        Commands::Logout => {
            store.logout()?;
            writeln!(out, "Logged out.")?;
        }

        Commands::Whoami => {
            let user = require_user(state)?;
            let progress = level_progress(user.xp());
            writeln!(out, "{} <{}>", user.name, user.email)?;
            writeln!(out, "Level:    {}", user.level())?;
            match progress.next {
                Some(next) => writeln!(
                    out,
                    "XP:       {} ({}/{} towards {})",
                    user.xp(),
                    progress.xp_into_level,
                    progress.xp_for_next_level,
                    next.name
                )?,
                None => writeln!(out, "XP:       {} (top level)", user.xp())?,
            }
            writeln!(out, "Streak:   {} days", user.streak)?;
            writeln!(out, "Language: {}", user.learning_language)?;
            writeln!(out, "Sessions: {}", user.sessions.len())?;
            for session in user.sessions.iter().take(5) {
                writeln!(
                    out,
                    "  {}  {:>3} min  +{} XP  {} ({})",
                    session.date.format("%Y-%m-%d"),
                    session.duration,
                    session.xp_gained,
                    session.topic,
                    session.language
                )?;
            }
        }

        Commands::Users => {
            for user in store.users()? {
                write_user_line(out, &user)?;
            }
        }

        Commands::Leaderboard => {
            let current = store.current_user_id()?;
            for (rank, user) in store.leaderboard()?.iter().enumerate() {
                let marker = if current.as_deref() == Some(user.id.as_str()) { " (you)" } else { "" };
                writeln!(out, "{:>2}. {:<12} {:>6} XP  {}{}", rank + 1, user.name, user.xp(), user.level(), marker)?;
            }
        }

        Commands::Challenges => {
            for challenge in store.challenges()? {
                let mark = if challenge.is_completed { "x" } else { " " };
                writeln!(out, "[{}] {} (+{} XP)", mark, challenge.title, challenge.xp)?;
                writeln!(out, "    {}", challenge.description)?;
            }
        }

        Commands::Session { action } => {
            let user = require_user(state)?;
            let new_session = match action {
                SessionAction::Add { topic, minutes, xp } => Some(NewSession::new(topic, minutes, xp)),
                SessionAction::Timer { topic, seconds } => NewSession::from_elapsed(topic, seconds),
            };
            let Some(new_session) = new_session else {
                writeln!(out, "Less than a minute studied; nothing recorded.")?;
                return Ok(());
            };

            if store.add_session(&user.id, new_session)?.is_some() {
                let user = require_user(state)?;
                writeln!(out, "Session recorded. You now have {} XP ({}).", user.xp(), user.level())?;
            }
        }

        Commands::Language { language } => {
            let user = require_user(state)?;
            store.update_learning_language(&user.id, language)?;
            writeln!(out, "Now learning {}.", language)?;
        }

        Commands::Profile { name, avatar } => {
            let user = require_user(state)?;
            let update = ProfileUpdate { name, avatar_url: avatar };
            if store.update_user_profile(&user.id, &update)? {
                writeln!(out, "Profile updated.")?;
            } else {
                writeln!(out, "No changes.")?;
            }
        }

        Commands::Friends => {
            let user = require_user(state)?;
            for friend in store.friends_of(&user.id)? {
                write_user_line(out, &friend)?;
            }
        }

        Commands::Requests => {
            let user = require_user(state)?;
            let requests = store.follow_requests_for(&user.id)?;
            for sender in store.users_from_requests(&requests)? {
                write_user_line(out, &sender)?;
            }
        }

        Commands::Follow { user_id } => {
            let user = require_user(state)?;
            let message = match store.send_follow_request(&user.id, &user_id)? {
                SendRequestOutcome::Sent => "Follow request sent.",
                SendRequestOutcome::AlreadyFriends => "You are already friends.",
                SendRequestOutcome::AlreadyPending => "A request is already pending.",
                SendRequestOutcome::SelfRequest => "You cannot follow yourself.",
            };
            writeln!(out, "{}", message)?;
        }

        Commands::Accept { from_user_id } => {
            let user = require_user(state)?;
            if store.accept_follow_request(&from_user_id, &user.id)? {
                writeln!(out, "You are now friends.")?;
            } else {
                writeln!(out, "Nothing to accept from {}.", from_user_id)?;
            }
        }

        Commands::Decline { from_user_id } => {
            let user = require_user(state)?;
            if store.decline_follow_request(&from_user_id, &user.id)? {
                writeln!(out, "Request declined.")?;
            } else {
                writeln!(out, "No pending request from {}.", from_user_id)?;
            }
        }

        Commands::Suggest => {
            let user = require_user(state)?;
            for candidate in store.suggest_friends(&user.id)? {
                write_user_line(out, &candidate)?;
            }
        }

        Commands::Motivate { user_id } => {
            let user = require_user(state)?;
            let motivation = store.send_motivation(&user.id, &user_id)?;
            writeln!(out, "Sent: \"{}\"", motivation.message)?;
        }

        Commands::Inbox => {
            let user = require_user(state)?;
            for motivation in store.unread_motivations_for(&user.id)? {
                let sender = store
                    .user(&motivation.from_user_id)?
                    .map(|u| u.name)
                    .unwrap_or_else(|| motivation.from_user_id.clone());
                writeln!(out, "{}  {}: \"{}\"", motivation.id, sender, motivation.message)?;
            }
        }

        Commands::Read { motivation_id } => {
            if store.mark_motivation_as_read(&motivation_id)? {
                writeln!(out, "Marked as read.")?;
            } else {
                writeln!(out, "No motivation with id {}.", motivation_id)?;
            }
        }

        Commands::Settings {
            friend_activity,
            motivations,
            daily_challenges,
            session_reminders,
        } => {
            let update = SettingsUpdate {
                friend_activity,
                motivations,
                daily_challenges,
                session_reminders,
            };
            let mut settings = store.settings()?;
            if !update.is_empty() {
                settings = update.apply(settings);
                store.update_settings(&settings)?;
            }
            write_settings(out, &settings)?;
        }

        Commands::Quiz { topic } => {
            let user = require_user(state)?;
            let questions = state.tutor.quiz(&topic, user.learning_language).await;
            for (i, question) in questions.iter().enumerate() {
                writeln!(out, "{}. {}", i + 1, question.question)?;
                for option in &question.options {
                    let mark = if *option == question.correct_answer { "*" } else { "-" };
                    writeln!(out, "   {} {}", mark, option)?;
                }
            }
        }

        Commands::Practice { topic, count } => {
            let user = require_user(state)?;
            let Some(sheet) = state
                .tutor
                .practice_sheet(&topic, user.learning_language, count)
                .await
            else {
                writeln!(out, "Could not generate a practice sheet. Please try again.")?;
                return Ok(());
            };
            for (label, level) in [("Easy", &sheet.easy), ("Medium", &sheet.medium), ("Hard", &sheet.hard)] {
                writeln!(out, "{}:", label)?;
                for question in &level.questions {
                    writeln!(out, "  - {}", question)?;
                }
                writeln!(out, "  {}", level.motivation)?;
            }
        }

        Commands::Run { file } => {
            let user = require_user(state)?;
            let code = read_code(Some(&file))?;
            let result = state.tutor.run_code(&code, user.learning_language).await;
            if let Some(output) = result.output {
                writeln!(out, "{}", output)?;
            }
            if let Some(error) = result.error {
                writeln!(out, "error: {}", error)?;
            }
        }

        Commands::Chat { message, code, history } => {
            let user = require_user(state)?;
            let code = read_code(code.as_deref())?;
            let mut conversation = match &history {
                Some(path) => read_history(path)?,
                None => Vec::new(),
            };
            let reply = state
                .tutor
                .chat(&code, &message, &conversation, user.learning_language)
                .await;
            writeln!(out, "{}", reply)?;

            if let Some(path) = &history {
                conversation.push(ChatMessage {
                    sender: ChatSender::User,
                    message,
                });
                conversation.push(ChatMessage {
                    sender: ChatSender::Tutor,
                    message: reply,
                });
                std::fs::write(path, serde_json::to_string_pretty(&conversation)?)?;
            }
        }

        Commands::Explain { error, code } => {
            let user = require_user(state)?;
            let code = read_code(code.as_deref())?;
            let explanation = state
                .tutor
                .explain_error(&code, &error, user.learning_language)
                .await;
            writeln!(out, "{}", explanation)?;
        }
    }

    Ok(())
}

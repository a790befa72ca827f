pub mod auth;
pub mod domain;
pub mod inbox;
pub mod ledger;
pub mod levels;
pub mod memory;
pub mod ports;
pub mod seed;
pub mod settings;
pub mod social;
pub mod store;
pub mod tutor;

pub use auth::RegisterOutcome;
pub use domain::{
    Challenge, ChatMessage, ChatSender, CodeExecutionResult, FollowRequest, Language, Motivation,
    NewSession, PracticeSheet, PracticeSheetLevel, ProfileUpdate, QuizQuestion, Session, User, UserId,
};
pub use levels::{level_progress, resolve_level, Level, LevelName, LevelProgress, LEVELS};
pub use memory::MemoryStorage;
pub use ports::{BlobStorage, ContentGenerator, PortError, PortResult};
pub use settings::{NotificationSettings, SettingsUpdate, SETTINGS_KEY};
pub use social::SendRequestOutcome;
pub use store::{Document, Store, StoreError, StoreResult, DB_KEY};
pub use tutor::{parse_fenced_json, Tutor};

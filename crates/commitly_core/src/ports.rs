//! crates/commitly_core/src/ports.rs
//!
//! Defines the service contracts (traits) the core depends on.
//! The core never talks to a disk, a browser or a model API directly; adapters
//! implement these traits and are injected at startup.

use async_trait::async_trait;

use crate::domain::{ChatMessage, CodeExecutionResult, Language, PracticeSheet, QuizQuestion};

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("Storage backend failed: {0}")]
    Storage(String),
    #[error("Content service is unavailable: {0}")]
    Unavailable(String),
    #[error("Malformed response from content service: {0}")]
    MalformedResponse(String),
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

/// A synchronous key-value store for string blobs.
///
/// Writes replace the whole value. No isolation is offered between callers.
pub trait BlobStorage: Send + Sync {
    fn get(&self, key: &str) -> PortResult<Option<String>>;

    fn set(&self, key: &str, value: &str) -> PortResult<()>;
}

/// Generates study content. Every call may fail; callers decide how to degrade.
#[async_trait]
pub trait ContentGenerator: Send + Sync {
    /// A handful of multiple-choice questions about `topic`.
    async fn generate_quiz(&self, topic: &str, language: Language) -> PortResult<Vec<QuizQuestion>>;

    /// `count` coding problems per difficulty.
    async fn generate_practice_sheet(
        &self,
        topic: &str,
        language: Language,
        count: usize,
    ) -> PortResult<PracticeSheet>;

    async fn execute_code(&self, code: &str, language: Language) -> PortResult<CodeExecutionResult>;

    /// Replies to `message` given the user's current code and the conversation so far.
    async fn chat(
        &self,
        code: &str,
        message: &str,
        history: &[ChatMessage],
        language: Language,
    ) -> PortResult<String>;

    async fn explain_error(&self, code: &str, error: &str, language: Language) -> PortResult<String>;
}

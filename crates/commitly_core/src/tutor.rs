//! crates/commitly_core/src/tutor.rs
//!
//! The user-facing side of generated content. `Tutor` wraps whichever
//! `ContentGenerator` was injected at startup and turns its failures into
//! fallbacks the UI can show as a retryable error. Nothing here touches the
//! store.

use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::error;

use crate::domain::{ChatMessage, CodeExecutionResult, Language, PracticeSheet, QuizQuestion};
use crate::ports::{ContentGenerator, PortError, PortResult};

pub const QUIZ_FAILURE_QUESTION: &str = "Failed to generate quiz questions. Please try again later.";
pub const CODE_EXECUTION_FAILURE: &str =
    "Failed to connect to the code execution service. Please try again.";
pub const CHAT_FAILURE: &str =
    "Oops! I encountered an error trying to process your request. Please try again or rephrase your question.";
pub const EXPLAIN_FAILURE: &str =
    "Oops! I encountered an error trying to analyze your code's error. Please try again or rephrase your question manually.";

/// Parses a model reply as JSON, tolerating a surrounding markdown code fence.
pub fn parse_fenced_json<T: DeserializeOwned>(raw: &str) -> PortResult<T> {
    let trimmed = raw.trim();
    let body = match trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
    {
        Some(rest) => rest.rfind("```").map_or(rest, |end| &rest[..end]).trim(),
        None => trimmed,
    };

    serde_json::from_str(body).map_err(|e| PortError::MalformedResponse(e.to_string()))
}

#[derive(Clone)]
pub struct Tutor {
    generator: Arc<dyn ContentGenerator>,
}

impl Tutor {
    pub fn new(generator: Arc<dyn ContentGenerator>) -> Self {
        Self { generator }
    }

    /// Always returns at least one question; on failure the single question
    /// carries the error text.
    pub async fn quiz(&self, topic: &str, language: Language) -> Vec<QuizQuestion> {
        match self.generator.generate_quiz(topic, language).await {
            Ok(questions) if !questions.is_empty() => questions,
            Ok(_) => {
                error!(topic, "Quiz generation returned no questions");
                vec![quiz_failure()]
            }
            Err(e) => {
                error!(error = %e, topic, "Quiz generation failed");
                vec![quiz_failure()]
            }
        }
    }

    pub async fn practice_sheet(
        &self,
        topic: &str,
        language: Language,
        count: usize,
    ) -> Option<PracticeSheet> {
        match self
            .generator
            .generate_practice_sheet(topic, language, count.max(1))
            .await
        {
            Ok(sheet) => Some(sheet),
            Err(e) => {
                error!(error = %e, topic, "Practice sheet generation failed");
                None
            }
        }
    }

    pub async fn run_code(&self, code: &str, language: Language) -> CodeExecutionResult {
        match self.generator.execute_code(code, language).await {
            Ok(result) if result.output.is_some() || result.error.is_some() => result,
            Ok(_) => CodeExecutionResult::error(CODE_EXECUTION_FAILURE),
            Err(e) => {
                error!(error = %e, "Code execution failed");
                CodeExecutionResult::error(CODE_EXECUTION_FAILURE)
            }
        }
    }

    pub async fn chat(
        &self,
        code: &str,
        message: &str,
        history: &[ChatMessage],
        language: Language,
    ) -> String {
        match self.generator.chat(code, message, history, language).await {
            Ok(reply) => reply,
            Err(e) => {
                error!(error = %e, "Tutor chat failed");
                CHAT_FAILURE.to_string()
            }
        }
    }

    pub async fn explain_error(&self, code: &str, error_message: &str, language: Language) -> String {
        match self.generator.explain_error(code, error_message, language).await {
            Ok(explanation) => explanation,
            Err(e) => {
                error!(error = %e, "Error explanation failed");
                EXPLAIN_FAILURE.to_string()
            }
        }
    }
}

fn quiz_failure() -> QuizQuestion {
    QuizQuestion {
        question: QUIZ_FAILURE_QUESTION.to_string(),
        options: vec!["A".to_string(), "B".to_string(), "C".to_string()],
        correct_answer: "A".to_string(),
    }
}

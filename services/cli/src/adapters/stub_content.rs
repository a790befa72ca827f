//! services/cli/src/adapters/stub_content.rs
//!
//! A deterministic `ContentGenerator` used when no API key is configured.
//! Every payload is clearly marked as mock data.

use async_trait::async_trait;
use commitly_core::{
    domain::{ChatMessage, CodeExecutionResult, Language, PracticeSheet, PracticeSheetLevel, QuizQuestion},
    ports::{ContentGenerator, PortResult},
};

#[derive(Clone, Debug, Default)]
pub struct StubContentGenerator;

impl StubContentGenerator {
    pub fn new() -> Self {
        Self
    }
}

fn mock_level(count: usize, difficulty: &str, topic: &str, language: Language, motivation: &str) -> PracticeSheetLevel {
    PracticeSheetLevel {
        questions: vec![format!("MOCK: {} {} question about {}.", difficulty, language, topic); count],
        motivation: motivation.to_string(),
    }
}

#[async_trait]
impl ContentGenerator for StubContentGenerator {
    async fn generate_quiz(&self, topic: &str, _language: Language) -> PortResult<Vec<QuizQuestion>> {
        Ok(vec![
            QuizQuestion {
                question: format!("MOCK: What is the capital of {}?", topic),
                options: ["Paris", "London", "Berlin", "Madrid"].map(String::from).to_vec(),
                correct_answer: "Paris".to_string(),
            },
            QuizQuestion {
                question: "MOCK: Which planet is known as the Red Planet?".to_string(),
                options: ["Earth", "Mars", "Jupiter", "Venus"].map(String::from).to_vec(),
                correct_answer: "Mars".to_string(),
            },
        ])
    }

    async fn generate_practice_sheet(
        &self,
        topic: &str,
        language: Language,
        count: usize,
    ) -> PortResult<PracticeSheet> {
        Ok(PracticeSheet {
            easy: mock_level(count, "Easy", topic, language, "MOCK: Keep up the great work on easy problems!"),
            medium: mock_level(count, "Medium", topic, language, "MOCK: You're tackling the challenge, keep pushing!"),
            hard: mock_level(count, "Hard", topic, language, "MOCK: Mastering the tough stuff, amazing effort!"),
        })
    }

    async fn execute_code(&self, code: &str, language: Language) -> PortResult<CodeExecutionResult> {
        let prints = match language {
            Language::Java => code.contains("System.out.println"),
            Language::Python => code.contains("print("),
        };
        if prints {
            Ok(CodeExecutionResult::output(format!("MOCK: Hello from the {} sandbox!", language)))
        } else {
            Ok(CodeExecutionResult::error("MOCK: Compile error: Cannot find symbol 'println'"))
        }
    }

    async fn chat(
        &self,
        _code: &str,
        _message: &str,
        _history: &[ChatMessage],
        _language: Language,
    ) -> PortResult<String> {
        Ok("MOCK: Hello! This is a mock response from Pixi. I'm here to help, but currently using sample data.".to_string())
    }

    async fn explain_error(&self, _code: &str, error: &str, _language: Language) -> PortResult<String> {
        Ok(format!(
            "MOCK: It looks like you've encountered an error! In a real scenario I'd help you understand \"{}\" and give you hints to fix it, like checking your syntax or variable names.",
            error
        ))
    }
}

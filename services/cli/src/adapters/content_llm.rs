//! services/cli/src/adapters/content_llm.rs
//!
//! This module contains the adapter for the content-generating LLM.
//! It implements the `ContentGenerator` port from the `core` crate on top of
//! the OpenAI chat-completions API.

const TUTOR_INSTRUCTIONS: &str = r#"You are Pixi, a friendly, encouraging and helpful coding assistant for Commitly. You guide learners through their {language} coding problems and error messages without handing them the answer.
Tiny helper. Big progress.

When explaining errors:
- Be clear and concise.
- Explain what the error means in simple terms.
- Suggest steps the user can take to debug or fix the issue.
- Do NOT provide the exact corrected code.

When assessing code or giving guidance:
- Offer constructive feedback or hints.
- Encourage good practices.
- Break complex problems into smaller parts.
- Do NOT write full solutions.

Keep a positive and supportive tone at all times."#;

const QUIZ_TEMPLATE: &str = r#"Generate 3-5 short multiple-choice quiz questions for a beginner learning about "{topic}" in {language}.
Keep the questions clear and concise.
Return ONLY a JSON object with a single key "questions" holding an array of objects.
Each object must have "question" (string), "options" (array of strings) and "correctAnswer" (string).
Do not include markdown or any text outside the JSON object."#;

const PRACTICE_SHEET_TEMPLATE: &str = r#"Generate practice coding problems about "{topic}" in {language}.
Write exactly {count} problems for each of three difficulty levels: easy, medium and hard.
Every problem must be a coding exercise, not a conceptual or debugging question.
For each level also write one short, unique motivational message.
Return ONLY a JSON object shaped like:
{
  "easy": { "questions": ["..."], "motivation": "..." },
  "medium": { "questions": ["..."], "motivation": "..." },
  "hard": { "questions": ["..."], "motivation": "..." }
}
Do not include markdown or any text outside the JSON object."#;

const EXECUTE_TEMPLATE: &str = r#"You are a {language} interpreter. Run the following program.
- If it compiles and runs, return its standard output.
- If there is a compilation or runtime error, return the detailed error message.
Return ONLY a JSON object with either an "output" key (success) or an "error" key (failure).
Example success: { "output": "Hello World" }
Example error: { "error": "Main method not found..." }

Code:
```{fence}
{code}
```"#;

use async_openai::{
    config::OpenAIConfig,
    error::OpenAIError,
    types::chat::{
        ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
        ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs,
    },
    Client,
};
use async_trait::async_trait;
use commitly_core::{
    domain::{ChatMessage, ChatSender, CodeExecutionResult, Language, PracticeSheet, QuizQuestion},
    ports::{ContentGenerator, PortError, PortResult},
    tutor::parse_fenced_json,
};
use serde::Deserialize;
use tracing::debug;

#[derive(Deserialize)]
struct QuizEnvelope {
    questions: Vec<QuizQuestion>,
}

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements `ContentGenerator` using an OpenAI-compatible LLM.
#[derive(Clone)]
pub struct OpenAiContentAdapter {
    client: Client<OpenAIConfig>,
    model: String,
}

impl OpenAiContentAdapter {
    /// Creates a new `OpenAiContentAdapter`.
    pub fn new(client: Client<OpenAIConfig>, model: String) -> Self {
        Self { client, model }
    }

    fn system(content: String) -> PortResult<ChatCompletionRequestMessage> {
        Ok(ChatCompletionRequestSystemMessageArgs::default()
            .content(content)
            .build()
            .map_err(|e| PortError::Unexpected(e.to_string()))?
            .into())
    }

    fn user(content: String) -> PortResult<ChatCompletionRequestMessage> {
        Ok(ChatCompletionRequestUserMessageArgs::default()
            .content(content)
            .build()
            .map_err(|e| PortError::Unexpected(e.to_string()))?
            .into())
    }

    fn assistant(content: String) -> PortResult<ChatCompletionRequestMessage> {
        Ok(ChatCompletionRequestAssistantMessageArgs::default()
            .content(content)
            .build()
            .map_err(|e| PortError::Unexpected(e.to_string()))?
            .into())
    }

    /// Sends one chat-completion request and returns the text of the first choice.
    async fn complete(&self, messages: Vec<ChatCompletionRequestMessage>) -> PortResult<String> {
        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(messages)
            .n(1)
            .build()
            .map_err(|e| PortError::Unexpected(e.to_string()))?;

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e: OpenAIError| PortError::Unavailable(e.to_string()))?;

        let content = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| {
                PortError::MalformedResponse("LLM response contained no text content.".to_string())
            })?;

        debug!(model = %self.model, chars = content.len(), "Content generated");
        Ok(content)
    }

    /// Instructions, shared code, prior turns in order, then the new message.
    fn conversation(
        code: &str,
        message: &str,
        history: &[ChatMessage],
        language: Language,
    ) -> PortResult<Vec<ChatCompletionRequestMessage>> {
        let mut messages = vec![
            Self::system(Self::tutor_instructions(language))?,
            Self::user(format!(
                "Current {} code:\n```{}\n{}\n```",
                language,
                fence_tag(language),
                code
            ))?,
        ];
        for entry in history {
            messages.push(match entry.sender {
                ChatSender::User => Self::user(entry.message.clone())?,
                ChatSender::Tutor => Self::assistant(entry.message.clone())?,
            });
        }
        messages.push(Self::user(message.to_string())?);
        Ok(messages)
    }

    fn tutor_instructions(language: Language) -> String {
        TUTOR_INSTRUCTIONS.replace("{language}", language.as_str())
    }
}

fn fence_tag(language: Language) -> String {
    language.as_str().to_lowercase()
}

//=========================================================================================
// `ContentGenerator` Trait Implementation
//=========================================================================================

#[async_trait]
impl ContentGenerator for OpenAiContentAdapter {
    async fn generate_quiz(&self, topic: &str, language: Language) -> PortResult<Vec<QuizQuestion>> {
        let prompt = QUIZ_TEMPLATE
            .replace("{topic}", topic)
            .replace("{language}", language.as_str());
        let raw = self.complete(vec![Self::user(prompt)?]).await?;
        let envelope: QuizEnvelope = parse_fenced_json(&raw)?;
        Ok(envelope.questions)
    }

    async fn generate_practice_sheet(
        &self,
        topic: &str,
        language: Language,
        count: usize,
    ) -> PortResult<PracticeSheet> {
        let prompt = PRACTICE_SHEET_TEMPLATE
            .replace("{topic}", topic)
            .replace("{language}", language.as_str())
            .replace("{count}", &count.to_string());
        let raw = self.complete(vec![Self::user(prompt)?]).await?;
        parse_fenced_json(&raw)
    }

    async fn execute_code(&self, code: &str, language: Language) -> PortResult<CodeExecutionResult> {
        let prompt = EXECUTE_TEMPLATE
            .replace("{language}", language.as_str())
            .replace("{fence}", &fence_tag(language))
            .replace("{code}", code);
        let raw = self.complete(vec![Self::user(prompt)?]).await?;
        parse_fenced_json(&raw)
    }

    async fn chat(
        &self,
        code: &str,
        message: &str,
        history: &[ChatMessage],
        language: Language,
    ) -> PortResult<String> {
        self.complete(Self::conversation(code, message, history, language)?)
            .await
    }

    async fn explain_error(&self, code: &str, error: &str, language: Language) -> PortResult<String> {
        let context = format!(
            "{}\n\nCurrent {} code:\n```{}\n{}\n```\n\nThe user just received this error message: \"{}\"",
            Self::tutor_instructions(language),
            language,
            fence_tag(language),
            code,
            error
        );
        let messages = vec![
            Self::system(context)?,
            Self::user("Explain this error in a helpful, guiding way.".to_string())?,
        ];
        self.complete(messages).await
    }
}

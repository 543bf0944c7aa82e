//! Common types for LLM interactions

use serde::Serialize;

pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_TEMPERATURE: f32 = 0.5;
pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 350;

/// Model parameters passed through to the provider untouched
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelParams {
    pub model: String,
    pub temperature: f32,
    pub max_output_tokens: u32,
}

impl Default for ModelParams {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
        }
    }
}

/// LLM request
#[derive(Debug, Clone)]
pub struct LlmRequest {
    pub system: String,
    pub messages: Vec<LlmMessage>,
    pub params: ModelParams,
}

/// Message in conversation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LlmMessage {
    pub role: MessageRole,
    pub content: String,
}

impl LlmMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
        }
    }
}

/// Message role
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageRole {
    User,
    Assistant,
}

/// What the provider produced for a request that did not fault
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    /// Trimmed, non-empty reply text
    Text(String),
    /// The provider answered but there was nothing usable in it.
    /// `raw` holds a truncated dump of the payload for troubleshooting.
    Empty { raw: String },
}

impl Completion {
    /// Build from optional reply text, falling back to `Empty` for blank text
    pub fn from_reply(text: Option<&str>, raw: impl FnOnce() -> String) -> Self {
        match text.map(str::trim) {
            Some(t) if !t.is_empty() => Completion::Text(t.to_string()),
            _ => Completion::Empty { raw: raw() },
        }
    }
}

/// LLM response
#[derive(Debug, Clone)]
pub struct LlmResponse {
    pub completion: Completion,
    pub usage: Usage,
}

impl LlmResponse {
    #[allow(dead_code)] // Used by the mock service in tests
    pub fn text(text: impl Into<String>) -> Self {
        let text: String = text.into();
        Self {
            completion: Completion::from_reply(Some(text.as_str()), String::new),
            usage: Usage::default(),
        }
    }

    /// Get the reply text, if there is any
    #[allow(dead_code)] // Utility method for API completeness
    pub fn reply(&self) -> Option<&str> {
        match &self.completion {
            Completion::Text(text) => Some(text),
            Completion::Empty { .. } => None,
        }
    }
}

/// Usage statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Usage {
    pub input_tokens: u64,
    pub output_tokens: u64,
}

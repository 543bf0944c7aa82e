//! Per-run conversation log
//!
//! An append-only, insertion-ordered message history. Created empty when the
//! run starts and dropped with it.

use crate::llm::{LlmMessage, MessageRole};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Who contributed a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    User,
    Assistant,
}

/// One contribution to the conversation. Immutable once built.
#[derive(Debug, Clone, Serialize)]
pub struct Message {
    role: Speaker,
    content: String,
    created_at: DateTime<Utc>,
}

impl Message {
    pub fn new(role: Speaker, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            created_at: Utc::now(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Speaker::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Speaker::Assistant, content)
    }

    pub fn role(&self) -> Speaker {
        self.role
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    #[allow(dead_code)] // Exposed to the UI through serialization
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl From<&Message> for LlmMessage {
    fn from(message: &Message) -> Self {
        let role = match message.role {
            Speaker::User => MessageRole::User,
            Speaker::Assistant => MessageRole::Assistant,
        };
        LlmMessage {
            role,
            content: message.content.clone(),
        }
    }
}

/// The ordered message history of one interactive run
#[derive(Debug, Clone)]
pub struct Session {
    id: String,
    started_at: DateTime<Utc>,
    messages: Vec<Message>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            started_at: Utc::now(),
            messages: Vec::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Add a message to the end of the log
    pub fn append(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Every message appended so far, in conversational order
    pub fn snapshot(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// The log in the shape the completion provider expects
    pub fn to_llm_messages(&self) -> Vec<LlmMessage> {
        self.messages.iter().map(LlmMessage::from).collect()
    }
}

//! Shared plumbing for one user-initiated turn
//!
//! Both the counsel chat and the wizard validate input the same way, make at
//! most one completion call, and report failures through `TurnError`.

use crate::credential::ApiKey;
use crate::llm::{Completion, LlmError, LlmErrorKind, LlmMessage, LlmRequest, LlmService, ModelParams};
use crate::wizard::InvalidStateError;
use thiserror::Error;

/// Bad caller input. State is never touched when one of these is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("empty input")]
    EmptyInput,
    #[error("missing credential")]
    MissingCredential,
}

/// The provider could not produce a usable reply
#[derive(Debug, Clone, Error)]
pub enum CompletionError {
    #[error("provider returned no completion")]
    NoCompletion { raw: String },
    #[error(transparent)]
    Provider(#[from] LlmError),
}

impl CompletionError {
    /// Troubleshooting payload shown alongside the error
    pub fn diagnostic(&self) -> String {
        match self {
            CompletionError::NoCompletion { raw } => raw.clone(),
            CompletionError::Provider(e) => format!("{}: {}", e.kind, e.message),
        }
    }

    #[allow(dead_code)] // Utility method for API completeness
    pub fn provider_kind(&self) -> Option<LlmErrorKind> {
        match self {
            CompletionError::NoCompletion { .. } => None,
            CompletionError::Provider(e) => Some(e.kind),
        }
    }
}

#[derive(Debug, Clone, Error)]
pub enum TurnError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    InvalidState(#[from] InvalidStateError),
    #[error(transparent)]
    Completion(#[from] CompletionError),
}

/// Everything a turn needs to reach the provider
#[derive(Clone, Copy)]
pub struct CompletionContext<'a> {
    pub llm: &'a dyn LlmService,
    pub system: &'a str,
    pub params: &'a ModelParams,
}

impl<'a> CompletionContext<'a> {
    pub fn new(llm: &'a dyn LlmService, system: &'a str, params: &'a ModelParams) -> Self {
        Self {
            llm,
            system,
            params,
        }
    }

    /// One provider call; only non-empty reply text counts as success
    pub async fn complete_text(
        &self,
        api_key: &ApiKey,
        messages: Vec<LlmMessage>,
    ) -> Result<String, CompletionError> {
        let request = LlmRequest {
            system: self.system.to_string(),
            messages,
            params: self.params.clone(),
        };

        match self.llm.complete(api_key, &request).await?.completion {
            Completion::Text(text) => Ok(text),
            Completion::Empty { raw } => Err(CompletionError::NoCompletion { raw }),
        }
    }
}

/// Trimmed text, or `EmptyInput` when nothing is left
pub fn require_text(text: &str) -> Result<&str, ValidationError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        Err(ValidationError::EmptyInput)
    } else {
        Ok(trimmed)
    }
}

pub fn require_credential(credential: Option<&ApiKey>) -> Result<&ApiKey, ValidationError> {
    credential.ok_or(ValidationError::MissingCredential)
}

//! `OpenAI` Chat Completions provider implementation

use super::types::{Completion, LlmMessage, LlmRequest, LlmResponse, MessageRole, Usage};
use super::{LlmError, LlmErrorKind, LlmService};
use crate::config::LlmConfig;
use crate::credential::ApiKey;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

/// Upper bound on the provider payload echoed back when a reply has no text
const RAW_DIAGNOSTIC_LIMIT: usize = 1500;

/// OpenAI-compatible chat completions service
pub struct OpenAIService {
    client: Client,
    endpoint: String,
}

impl OpenAIService {
    pub fn new(config: &LlmConfig) -> Result<Self, LlmError> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| LlmError::unknown(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            endpoint: chat_endpoint(&config.base_url),
        })
    }

    fn translate_request(request: &LlmRequest) -> OpenAIRequest {
        let mut messages = Vec::with_capacity(request.messages.len() + 1);

        if !request.system.is_empty() {
            messages.push(OpenAIMessage {
                role: "system".to_string(),
                content: Some(request.system.clone()),
            });
        }

        messages.extend(request.messages.iter().map(Self::translate_message));

        let params = &request.params;
        // Reasoning models take max_completion_tokens and reject a custom temperature
        let (max_tokens, max_completion_tokens, temperature) =
            if uses_max_completion_tokens(&params.model) {
                (None, Some(params.max_output_tokens), None)
            } else {
                (Some(params.max_output_tokens), None, Some(params.temperature))
            };

        OpenAIRequest {
            model: params.model.clone(),
            messages,
            max_tokens,
            max_completion_tokens,
            temperature,
            stream: false,
        }
    }

    fn translate_message(msg: &LlmMessage) -> OpenAIMessage {
        let role = match msg.role {
            MessageRole::User => "user",
            MessageRole::Assistant => "assistant",
        };
        OpenAIMessage {
            role: role.to_string(),
            content: Some(msg.content.clone()),
        }
    }

    fn normalize_response(resp: OpenAIResponse, raw: &serde_json::Value) -> LlmResponse {
        let text = resp
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content);

        let usage = resp.usage.map_or_else(Usage::default, |u| Usage {
            input_tokens: u64::from(u.prompt_tokens),
            output_tokens: u64::from(u.completion_tokens),
        });

        LlmResponse {
            completion: Completion::from_reply(text.as_deref(), || raw_diagnostic(raw)),
            usage,
        }
    }

    /// Status decides the kind; the body only supplies the message, and
    /// proxies often answer with HTML or plain text.
    fn classify_failure(status: reqwest::StatusCode, body: &str) -> LlmError {
        let kind = LlmErrorKind::from_status(status.as_u16());
        let message = serde_json::from_str::<OpenAIErrorResponse>(body).map_or_else(
            |_| body.trim().chars().take(RAW_DIAGNOSTIC_LIMIT).collect(),
            |resp| resp.error.message,
        );
        let text = match kind {
            LlmErrorKind::Auth => format!("Authentication failed: {message}"),
            LlmErrorKind::RateLimit => format!("Rate limit exceeded: {message}"),
            LlmErrorKind::InvalidRequest => format!("Invalid request: {message}"),
            LlmErrorKind::ServerError => format!("Server error: {message}"),
            LlmErrorKind::Network | LlmErrorKind::Unknown => format!("HTTP {status}: {message}"),
        };
        LlmError::new(kind, text)
    }
}

#[async_trait]
impl LlmService for OpenAIService {
    async fn complete(
        &self,
        api_key: &ApiKey,
        request: &LlmRequest,
    ) -> Result<LlmResponse, LlmError> {
        let openai_request = Self::translate_request(request);

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(api_key.expose())
            .json(&openai_request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    LlmError::network(format!("Request timeout: {e}"))
                } else if e.is_connect() {
                    LlmError::network(format!("Connection failed: {e}"))
                } else {
                    LlmError::unknown(format!("Request failed: {e}"))
                }
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| LlmError::network(format!("Failed to read response: {e}")))?;

        if !status.is_success() {
            return Err(Self::classify_failure(status, &body));
        }

        let raw: serde_json::Value = serde_json::from_str(&body).map_err(|e| {
            LlmError::unknown(format!("Failed to parse response: {e} - body: {body}"))
        })?;
        let openai_response: OpenAIResponse = serde_json::from_value(raw.clone())
            .map_err(|e| LlmError::unknown(format!("Unexpected response shape: {e}")))?;

        Ok(Self::normalize_response(openai_response, &raw))
    }
}

fn chat_endpoint(base_url: &str) -> String {
    format!("{}/chat/completions", base_url.trim_end_matches('/'))
}

/// Models that use `max_completion_tokens` instead of `max_tokens`
fn uses_max_completion_tokens(model: &str) -> bool {
    let name = model.rsplit('/').next().unwrap_or(model);
    ["o1", "o3", "o4", "gpt-5"]
        .iter()
        .any(|prefix| name.starts_with(prefix))
}

fn raw_diagnostic(raw: &serde_json::Value) -> String {
    let pretty = serde_json::to_string_pretty(raw).unwrap_or_else(|_| raw.to_string());
    pretty.chars().take(RAW_DIAGNOSTIC_LIMIT).collect()
}

// OpenAI API types

#[derive(Debug, Serialize)]
pub(super) struct OpenAIRequest {
    pub(super) model: String,
    pub(super) messages: Vec<OpenAIMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(super) max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(super) max_completion_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(super) temperature: Option<f32>,
    pub(super) stream: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub(super) struct OpenAIMessage {
    pub(super) role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(super) content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct OpenAIResponse {
    #[serde(default)]
    pub(super) choices: Vec<OpenAIChoice>,
    #[serde(default)]
    pub(super) usage: Option<OpenAIUsage>,
}

#[derive(Debug, Deserialize)]
pub(super) struct OpenAIChoice {
    #[serde(default)]
    pub(super) message: Option<OpenAIMessage>,
    #[allow(dead_code)] // Part of API response, not used
    #[serde(default)]
    pub(super) finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[allow(clippy::struct_field_names)]
pub(super) struct OpenAIUsage {
    pub(super) prompt_tokens: u32,
    pub(super) completion_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct OpenAIErrorResponse {
    error: OpenAIError,
}

#[derive(Debug, Deserialize)]
struct OpenAIError {
    message: String,
}

impl OpenAIService {
    #[cfg(test)]
    pub(super) fn translate_for_test(request: &LlmRequest) -> OpenAIRequest {
        Self::translate_request(request)
    }

    #[cfg(test)]
    pub(super) fn normalize_for_test(body: &str) -> LlmResponse {
        let raw: serde_json::Value = serde_json::from_str(body).unwrap();
        let resp: OpenAIResponse = serde_json::from_value(raw.clone()).unwrap();
        Self::normalize_response(resp, &raw)
    }
}

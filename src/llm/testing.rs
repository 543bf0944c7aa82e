//! Mock LLM service for testing
//!
//! Returns queued responses in order and records every request it sees.

use super::{Completion, LlmError, LlmRequest, LlmResponse, LlmService, Usage};
use crate::credential::ApiKey;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

#[derive(Default)]
pub struct MockLlmService {
    responses: Mutex<VecDeque<Result<LlmResponse, LlmError>>>,
    requests: Mutex<Vec<LlmRequest>>,
    keys: Mutex<Vec<String>>,
}

#[allow(dead_code)]
impl MockLlmService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful response with reply text
    pub fn queue_text(&self, text: &str) {
        self.queue_response(LlmResponse::text(text));
    }

    /// Queue a successful response that carries no usable text
    pub fn queue_empty(&self, raw: &str) {
        self.queue_response(LlmResponse {
            completion: Completion::Empty {
                raw: raw.to_string(),
            },
            usage: Usage::default(),
        });
    }

    pub fn queue_response(&self, response: LlmResponse) {
        self.responses.lock().unwrap().push_back(Ok(response));
    }

    pub fn queue_error(&self, error: LlmError) {
        self.responses.lock().unwrap().push_back(Err(error));
    }

    pub fn recorded_requests(&self) -> Vec<LlmRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Keys the requests were made with, in call order
    pub fn recorded_keys(&self) -> Vec<String> {
        self.keys.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl LlmService for MockLlmService {
    async fn complete(
        &self,
        api_key: &ApiKey,
        request: &LlmRequest,
    ) -> Result<LlmResponse, LlmError> {
        self.requests.lock().unwrap().push(request.clone());
        self.keys.lock().unwrap().push(api_key.expose().to_string());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(LlmError::network("No mock response queued")))
    }
}

//! LLM provider abstraction
//!
//! The completion endpoint is a black box: a system instruction plus an
//! ordered message list goes in, reply text (or nothing, or a fault) comes out.

mod error;
mod openai;
#[cfg(test)]
mod proptests;
#[cfg(test)]
pub mod testing;
mod types;

pub use error::{LlmError, LlmErrorKind};
pub use openai::OpenAIService;
pub use types::*;

use crate::credential::ApiKey;
use async_trait::async_trait;
use std::sync::Arc;

/// Common interface for LLM providers
#[async_trait]
pub trait LlmService: Send + Sync {
    /// Make a completion request on behalf of the holder of `api_key`
    async fn complete(&self, api_key: &ApiKey, request: &LlmRequest)
        -> Result<LlmResponse, LlmError>;
}

/// Logging wrapper for LLM services
pub struct LoggingService {
    inner: Arc<dyn LlmService>,
}

impl LoggingService {
    pub fn new(inner: Arc<dyn LlmService>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl LlmService for LoggingService {
    async fn complete(
        &self,
        api_key: &ApiKey,
        request: &LlmRequest,
    ) -> Result<LlmResponse, LlmError> {
        let start = std::time::Instant::now();
        let result = self.inner.complete(api_key, request).await;
        let duration = start.elapsed();

        match &result {
            Ok(response) => {
                tracing::info!(
                    model = %request.params.model,
                    messages = request.messages.len(),
                    duration_ms = %duration.as_millis(),
                    input_tokens = response.usage.input_tokens,
                    output_tokens = response.usage.output_tokens,
                    empty = matches!(response.completion, Completion::Empty { .. }),
                    "LLM request completed"
                );
            }
            Err(e) => {
                tracing::error!(
                    model = %request.params.model,
                    duration_ms = %duration.as_millis(),
                    error = %e.message,
                    kind = %e.kind,
                    "LLM request failed"
                );
            }
        }

        result
    }
}

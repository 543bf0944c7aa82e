//! HTTP presentation surface
//!
//! Hosts one interactive run: a single counsel session and a single wizard,
//! each behind an async mutex held for the whole turn so turns never overlap.

mod assets;
mod handlers;
mod types;

pub use handlers::create_router;

use crate::credential::CredentialSource;
use crate::llm::{LlmService, ModelParams};
use crate::session::Session;
use crate::system_prompt::Prompts;
use crate::wizard::WizardState;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub session: Arc<Mutex<Session>>,
    pub wizard: Arc<Mutex<WizardState>>,
    pub llm: Arc<dyn LlmService>,
    pub prompts: Arc<Prompts>,
    pub params: Arc<ModelParams>,
    pub credentials: Arc<CredentialSource>,
}

impl AppState {
    pub fn new(
        llm: Arc<dyn LlmService>,
        prompts: Prompts,
        params: ModelParams,
        credentials: CredentialSource,
    ) -> Self {
        Self {
            session: Arc::new(Mutex::new(Session::new())),
            wizard: Arc::new(Mutex::new(WizardState::new())),
            llm,
            prompts: Arc::new(prompts),
            params: Arc::new(params),
            credentials: Arc::new(credentials),
        }
    }
}

//! API request and response types

use crate::session::Message;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Request to submit a counsel turn
#[derive(Debug, Deserialize)]
pub struct TurnRequest {
    pub text: String,
    /// Interactive fallback when no key is configured in the environment
    #[serde(default)]
    pub api_key: Option<String>,
}

/// Request to diagnose a malfunction
#[derive(Debug, Deserialize)]
pub struct DiagnoseRequest {
    pub malfunction: String,
    #[serde(default)]
    pub api_key: Option<String>,
}

/// Request to commit a patch
#[derive(Debug, Deserialize)]
pub struct PatchRequest {
    pub patch: String,
}

/// The full session log for re-rendering
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub session_id: String,
    pub started_at: DateTime<Utc>,
    pub messages: Vec<Message>,
}

/// Result of a successful counsel turn
#[derive(Debug, Serialize)]
pub struct TurnResponse {
    pub reply: String,
    pub messages: Vec<Message>,
}

/// What the UI needs to know before the first turn
#[derive(Debug, Serialize)]
pub struct ConfigResponse {
    pub model: String,
    /// When false the UI must ask for a key
    pub credential_from_env: bool,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnostic: Option<String>,
}

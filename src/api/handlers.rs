//! HTTP request handlers

use super::assets::serve_static;
use super::types::{
    ConfigResponse, DiagnoseRequest, ErrorResponse, PatchRequest, SessionResponse, TurnRequest,
    TurnResponse,
};
use super::AppState;
use crate::chat;
use crate::turn::{CompletionContext, TurnError};
use crate::wizard::{self, WizardView};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/config", get(get_config))
        // Counsel session
        .route("/api/session", get(get_session))
        .route("/api/session/turns", post(submit_turn))
        // Wizard
        .route("/api/wizard", get(get_wizard))
        .route("/api/wizard/diagnose", post(run_diagnostic))
        .route("/api/wizard/patch", post(commit_patch))
        .route("/api/wizard/reset", post(reset_wizard))
        // Everything else is the embedded UI
        .fallback(serve_static)
        .with_state(state)
}

async fn get_config(State(state): State<AppState>) -> Json<ConfigResponse> {
    Json(ConfigResponse {
        model: state.params.model.clone(),
        credential_from_env: state.credentials.has_ambient(),
    })
}

// ============================================================
// Counsel session
// ============================================================

async fn get_session(State(state): State<AppState>) -> Json<SessionResponse> {
    let session = state.session.lock().await;
    Json(SessionResponse {
        session_id: session.id().to_string(),
        started_at: session.started_at(),
        messages: session.snapshot().to_vec(),
    })
}

async fn submit_turn(
    State(state): State<AppState>,
    Json(req): Json<TurnRequest>,
) -> Result<Json<TurnResponse>, AppError> {
    let api_key = state.credentials.resolve(req.api_key.as_deref());
    let ctx = CompletionContext::new(state.llm.as_ref(), &state.prompts.companion, &state.params);

    // Held across the provider call so turns run one at a time
    let mut session = state.session.lock().await;
    let reply = chat::submit_turn(&mut session, &req.text, api_key.as_ref(), &ctx).await?;

    Ok(Json(TurnResponse {
        reply,
        messages: session.snapshot().to_vec(),
    }))
}

// ============================================================
// Wizard
// ============================================================

async fn get_wizard(State(state): State<AppState>) -> Json<WizardView> {
    Json(state.wizard.lock().await.view())
}

async fn run_diagnostic(
    State(state): State<AppState>,
    Json(req): Json<DiagnoseRequest>,
) -> Result<Json<WizardView>, AppError> {
    let api_key = state.credentials.resolve(req.api_key.as_deref());
    let ctx = CompletionContext::new(state.llm.as_ref(), &state.prompts.diagnostic, &state.params);

    let mut wizard_state = state.wizard.lock().await;
    wizard::run_diagnostic(&mut wizard_state, &req.malfunction, api_key.as_ref(), &ctx).await?;
    Ok(Json(wizard_state.view()))
}

async fn commit_patch(
    State(state): State<AppState>,
    Json(req): Json<PatchRequest>,
) -> Result<Json<WizardView>, AppError> {
    let mut wizard_state = state.wizard.lock().await;
    wizard::commit_patch(&mut wizard_state, &req.patch)?;
    Ok(Json(wizard_state.view()))
}

async fn reset_wizard(State(state): State<AppState>) -> Json<WizardView> {
    let mut wizard_state = state.wizard.lock().await;
    wizard::reset(&mut wizard_state);
    Json(wizard_state.view())
}

// ============================================================
// Error Handling
// ============================================================

#[derive(Debug)]
struct AppError(TurnError);

impl From<TurnError> for AppError {
    fn from(err: TurnError) -> Self {
        Self(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, kind, diagnostic) = match &self.0 {
            TurnError::Validation(_) => (StatusCode::BAD_REQUEST, "validation", None),
            TurnError::InvalidState(e) => {
                tracing::error!(error = %e, "Wizard operation in wrong stage");
                (StatusCode::CONFLICT, "invalid_state", None)
            }
            TurnError::Completion(e) => (StatusCode::BAD_GATEWAY, "completion", Some(e.diagnostic())),
        };

        let body = Json(ErrorResponse {
            error: self.0.to_string(),
            kind,
            diagnostic,
        });
        (status, body).into_response()
    }
}

//! Stoic Companion - reflective counsel and a malfunction wizard backed by an LLM
//!
//! One process is one interactive run: the counsel session and the wizard
//! live in memory and are gone when the server stops.

mod api;
mod chat;
mod config;
mod credential;
mod llm;
mod session;
mod system_prompt;
mod turn;
mod wizard;

use api::{create_router, AppState};
use config::AppConfig;
use credential::CredentialSource;
use llm::{LoggingService, OpenAIService};
use std::net::SocketAddr;
use std::sync::Arc;
use system_prompt::Prompts;
use tower_http::{compression::CompressionLayer, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "stoic_companion=info,tower_http=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false),
        )
        .init();

    let config = AppConfig::from_env()?;
    let prompts = Prompts::load(&config.prompts)?;

    let credentials = CredentialSource::from_env();
    if !credentials.has_ambient() {
        tracing::warn!(
            "{} not set; the UI will ask for a key",
            credential::API_KEY_ENV_VAR
        );
    }

    let provider = OpenAIService::new(&config.llm)?;
    let llm = Arc::new(LoggingService::new(Arc::new(provider)));
    tracing::info!(
        model = %config.llm.params.model,
        base_url = %config.llm.base_url,
        temperature = config.llm.params.temperature,
        max_output_tokens = config.llm.params.max_output_tokens,
        "LLM provider configured"
    );

    let state = AppState::new(llm, prompts, config.llm.params.clone(), credentials);

    let compression = CompressionLayer::new().gzip(true).br(true);

    // Same-origin only; no CORS layer
    let app = create_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(compression);

    // Loopback only
    let addr = SocketAddr::from(([127, 0, 0, 1], config.port));
    tracing::info!("Stoic Companion listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

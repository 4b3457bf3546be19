mod colleges;
mod config;
mod errors;
mod essay;
mod extract;
mod grammar;
mod llm_client;
mod markup;
mod resume;
mod routes;
mod state;
#[cfg(test)]
mod test_support;
mod validation;

use anyhow::Result;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::colleges::CollegeData;
use crate::config::Config;
use crate::llm_client::{ChatCompletion, LlmError, OpenAiCompatClient};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting EDU AI API v{}", env!("CARGO_PKG_VERSION"));

    let openai = build_provider(
        "OpenAI",
        config.openai_api_key.clone(),
        OpenAiCompatClient::openai,
    )?;
    let groq = build_provider(
        "Groq",
        config.groq_api_key.clone(),
        OpenAiCompatClient::groq,
    )?;

    let colleges = CollegeData::load(
        Path::new(&config.college_data_path),
        Path::new(&config.steps_data_path),
    )
    .await;

    let state = AppState {
        openai,
        groq,
        colleges: Arc::new(colleges),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Builds a completion client when its key is set. Without a key the routes
/// that need the provider answer 500 instead of the server refusing to start.
fn build_provider(
    label: &str,
    api_key: Option<String>,
    connect: fn(String) -> Result<OpenAiCompatClient, LlmError>,
) -> Result<Option<Arc<dyn ChatCompletion>>> {
    let Some(key) = api_key else {
        warn!("{label} API key is not set; dependent routes will return 500");
        return Ok(None);
    };
    let client = connect(key)?;
    info!("{label} client initialized (model: {})", client.model());
    Ok(Some(Arc::new(client)))
}

//! agentchat server - HTTP front for the chat proxy.
//!
//! Endpoints:
//! - GET /api/health - Liveness check
//! - POST /api/chat - Run one chat turn for a session
//! - POST /api/reset - Clear a session's transcript
//! - GET /api/presets - Built-in agent presets

mod error;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    body::Bytes,
    extract::{rejection::JsonRejection, State},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tower_http::cors::{Any, CorsLayer};

use crate::completion::{CompletionConfig, OpenAiClient};
use crate::models::{presets, AgentPreset};
use crate::proxy::{ChatError, ChatProxy, ChatReply, ChatRequest};

pub use error::UPSTREAM_ERROR_MESSAGE;

/// Listen address for the server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3001,
        }
    }
}

/// Shared server state.
pub type ServerState = Arc<ChatProxy>;

/// Request to reset a session.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetRequest {
    pub session_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ResetResponse {
    pub message: String,
}

// === Server Lifecycle ===

/// Build the API router around `proxy`.
pub fn router(proxy: ServerState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/health", get(health_handler))
        .route("/api/chat", post(chat_handler))
        .route("/api/reset", post(reset_handler))
        .route("/api/presets", get(presets_handler))
        .with_state(proxy)
        .layer(cors)
}

/// Start the server.
pub async fn start_server(config: ServerConfig, completion: CompletionConfig) -> Result<()> {
    let client = OpenAiClient::new(completion).context("Failed to build completion client")?;
    let model = client.config().model.clone();
    let proxy = Arc::new(ChatProxy::new(Arc::new(client)));

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .with_context(|| format!("Invalid address {}:{}", config.host, config.port))?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    tracing::info!(%model, "agentchat server listening on http://{addr}");

    axum::serve(listener, router(proxy))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for ctrl-c: {e}");
        std::future::pending::<()>().await;
    }
}

// === Handlers ===

async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "message": "Server is running"
    }))
}

async fn chat_handler(
    State(proxy): State<ServerState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatReply>, ChatError> {
    let Json(request) = payload.map_err(|e| ChatError::Validation(e.body_text()))?;
    proxy.chat(request).await.map(Json)
}

/// Accepts an empty or non-JSON body as a reset of the default session.
async fn reset_handler(State(proxy): State<ServerState>, body: Bytes) -> Json<ResetResponse> {
    let request: ResetRequest = serde_json::from_slice(&body).unwrap_or_default();
    proxy.reset(request.session_id.as_deref()).await;
    Json(ResetResponse {
        message: "Conversation history has been reset".to_string(),
    })
}

async fn presets_handler() -> Json<Vec<AgentPreset>> {
    Json(presets())
}

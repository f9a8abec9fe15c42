//! Chat proxy - orchestrates one conversation turn.
//!
//! A turn validates the request, resolves the session, re-seeds the system
//! prompt when the agent configuration changed, appends the user message,
//! forwards the whole transcript to the completion API and records the
//! reply. The session lock is held for the whole turn, so concurrent
//! requests for the same session are applied one after another.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::completion::{CompletionClient, CompletionError};
use crate::models::{AgentConfig, Message, SessionError};
use crate::prompt::build_system_prompt;
use crate::session::{SessionStore, DEFAULT_SESSION_ID};

/// Incoming chat turn.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub message: Option<String>,
    pub session_id: Option<String>,
    pub agent_config: Option<AgentConfig>,
}

/// Reply to a successful chat turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatReply {
    pub message: String,
    pub session_id: String,
}

/// Errors from a chat turn.
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    /// Required input missing; nothing was changed.
    #[error("{0}")]
    Validation(String),

    /// The completion call failed. The user message stays in the transcript.
    #[error("{0}")]
    Upstream(#[from] CompletionError),

    /// The transcript refused a message.
    #[error(transparent)]
    Session(#[from] SessionError),
}

/// Session-aware proxy in front of a completion client.
pub struct ChatProxy {
    store: SessionStore,
    client: Arc<dyn CompletionClient>,
}

impl ChatProxy {
    pub fn new(client: Arc<dyn CompletionClient>) -> Self {
        Self::with_store(SessionStore::new(), client)
    }

    pub fn with_store(store: SessionStore, client: Arc<dyn CompletionClient>) -> Self {
        Self { store, client }
    }

    pub const fn store(&self) -> &SessionStore {
        &self.store
    }

    /// Run one chat turn.
    pub async fn chat(&self, request: ChatRequest) -> Result<ChatReply, ChatError> {
        let Some(text) = request.message.filter(|m| !m.is_empty()) else {
            return Err(ChatError::Validation("Message is required".to_string()));
        };
        let session_id = request
            .session_id
            .unwrap_or_else(|| DEFAULT_SESSION_ID.to_string());

        let handle = self.store.session(&session_id).await;
        let mut session = handle.lock().await;

        if let Some(config) = request.agent_config {
            let prompt = build_system_prompt(Some(&config));
            let format = config.format().map(|f| f.to_string()).unwrap_or_default();
            if session.apply_config(config, prompt) {
                tracing::info!(
                    session_id = %session_id,
                    %format,
                    "Agent configuration changed, transcript reset"
                );
            }
        }

        session.append(Message::user(text))?;

        let reply = match self.client.complete(session.transcript()).await {
            Ok(reply) => reply,
            Err(e) => {
                tracing::error!(session_id = %session_id, error = %e, "Completion request failed");
                return Err(e.into());
            }
        };

        session.append(Message::assistant(reply.clone()))?;
        tracing::debug!(
            session_id = %session_id,
            messages = session.transcript().len(),
            age_secs = session.age().num_seconds(),
            updated_at = %session.updated_at,
            "Chat turn completed"
        );

        Ok(ChatReply {
            message: reply,
            session_id,
        })
    }

    /// Clear the transcript of `session_id` (or the default session).
    pub async fn reset(&self, session_id: Option<&str>) {
        let session_id = session_id.unwrap_or(DEFAULT_SESSION_ID);
        self.store.reset(session_id).await;
        tracing::info!(session_id = %session_id, "Session reset");
    }
}

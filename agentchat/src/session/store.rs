//! Session store - maps session ids to conversation state.
//!
//! Sessions are created lazily and live for the lifetime of the process.
//! Each session sits behind its own async mutex: a caller that holds a
//! [`SessionHandle`] lock across a read-modify-write sequence is serialized
//! against every other request for the same session, while different
//! sessions proceed independently.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};

use crate::models::{Message, Session, SessionError};

/// Session id used when a request does not name one.
pub const DEFAULT_SESSION_ID: &str = "default";

/// Shared handle to one session.
pub type SessionHandle = Arc<Mutex<Session>>;

/// In-memory session store. No eviction, no persistence.
#[derive(Default)]
pub struct SessionStore {
    /// Map of session id -> session
    sessions: RwLock<HashMap<String, SessionHandle>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get or create the session for `id`. Never fails.
    pub async fn session(&self, id: &str) -> SessionHandle {
        if let Some(handle) = self.sessions.read().await.get(id) {
            return Arc::clone(handle);
        }

        let mut sessions = self.sessions.write().await;
        Arc::clone(sessions.entry(id.to_string()).or_insert_with(|| {
            let session = Session::new(id);
            tracing::debug!(session_id = %id, created_at = %session.created_at, "Creating session");
            Arc::new(Mutex::new(session))
        }))
    }

    /// Clear the transcript of `id`, creating the session if needed.
    /// The applied agent configuration is left untouched.
    pub async fn reset(&self, id: &str) {
        let handle = self.session(id).await;
        handle.lock().await.clear();
    }

    /// Append a user or assistant message to the transcript of `id`.
    /// System messages are rejected and leave the transcript unchanged.
    pub async fn append(&self, id: &str, message: Message) -> Result<(), SessionError> {
        let handle = self.session(id).await;
        let mut session = handle.lock().await;
        session.append(message)
    }

    /// Snapshot of the transcript of `id`, if the session exists.
    pub async fn transcript(&self, id: &str) -> Option<Vec<Message>> {
        let handle = self.sessions.read().await.get(id).cloned()?;
        let session = handle.lock().await;
        Some(session.transcript().to_vec())
    }

    /// Whether a session exists for `id`.
    pub async fn contains(&self, id: &str) -> bool {
        self.sessions.read().await.contains_key(id)
    }

    /// Number of sessions.
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_session_is_created_lazily() {
        let store = SessionStore::new();
        assert!(store.is_empty().await);
        assert_eq!(store.transcript("a").await, None);

        let handle = store.session("a").await;
        assert_eq!(handle.lock().await.id, "a");
        assert!(store.contains("a").await);
        assert_eq!(store.transcript("a").await, Some(Vec::new()));
    }

    #[tokio::test]
    async fn test_same_id_returns_same_session() {
        let store = SessionStore::new();
        store.append("a", Message::user("hi")).await.unwrap();
        let handle = store.session("a").await;
        assert_eq!(handle.lock().await.transcript().len(), 1);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_reset_unknown_session() {
        let store = SessionStore::new();
        store.reset("ghost").await;
        assert_eq!(store.transcript("ghost").await, Some(Vec::new()));
    }

    #[tokio::test]
    async fn test_reset_clears_transcript_only() {
        let store = SessionStore::new();
        store.append("a", Message::user("one")).await.unwrap();
        store.append("b", Message::user("two")).await.unwrap();

        store.reset("a").await;

        assert_eq!(store.transcript("a").await, Some(Vec::new()));
        assert_eq!(store.transcript("b").await, Some(vec![Message::user("two")]));
    }

    #[tokio::test]
    async fn test_append_rejects_system_message() {
        let store = SessionStore::new();
        store.append("a", Message::user("hi")).await.unwrap();

        let err = store.append("a", Message::system("late")).await.unwrap_err();
        assert!(matches!(err, SessionError::UnexpectedRole(_)));
        assert_eq!(store.transcript("a").await, Some(vec![Message::user("hi")]));
    }
}

//! Session model representing one conversation thread.

use chrono::{DateTime, Utc};

use super::{AgentConfig, Message, MessageRole};

/// Errors from mutating a session transcript.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    /// Only user and assistant turns can be appended; the system message is
    /// owned by the applied agent configuration.
    #[error("cannot append a {0} message to a transcript")]
    UnexpectedRole(MessageRole),
}

/// A conversation thread: its transcript and the agent configuration
/// currently applied to it.
///
/// A system message, when present, is always the first message and there is
/// at most one of it.
#[derive(Debug, Clone)]
pub struct Session {
    /// Opaque session identifier.
    pub id: String,
    transcript: Vec<Message>,
    agent_config: Option<AgentConfig>,
    /// When the session was created.
    pub created_at: DateTime<Utc>,
    /// When the transcript last changed.
    pub updated_at: DateTime<Utc>,
}

impl Session {
    /// Create a new, empty session.
    pub fn new(id: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            transcript: Vec::new(),
            agent_config: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Ordered transcript, as sent to the completion API.
    pub fn transcript(&self) -> &[Message] {
        &self.transcript
    }

    /// The last applied agent configuration.
    pub const fn agent_config(&self) -> Option<&AgentConfig> {
        self.agent_config.as_ref()
    }

    /// Time elapsed since the session was created.
    pub fn age(&self) -> chrono::Duration {
        Utc::now() - self.created_at
    }

    /// Append a user or assistant message.
    ///
    /// System messages are rejected: they only enter through
    /// [`Session::apply_config`], which keeps them at the head of the
    /// transcript.
    pub fn append(&mut self, message: Message) -> Result<(), SessionError> {
        if message.role == MessageRole::System {
            return Err(SessionError::UnexpectedRole(message.role));
        }
        self.transcript.push(message);
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Clear the transcript. The applied configuration is kept.
    pub fn clear(&mut self) {
        self.transcript.clear();
        self.updated_at = Utc::now();
    }

    /// Apply an agent configuration.
    ///
    /// Returns `false` and does nothing when `config` equals the one already
    /// applied. Otherwise stores it, clears the transcript and seeds
    /// `system_prompt` (if any, and non-empty) as the first message.
    pub fn apply_config(&mut self, config: AgentConfig, system_prompt: Option<String>) -> bool {
        if self.agent_config.as_ref() == Some(&config) {
            return false;
        }
        self.agent_config = Some(config);
        self.clear();
        if let Some(prompt) = system_prompt.filter(|p| !p.is_empty()) {
            self.transcript.push(Message::system(prompt));
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_config_resets_and_seeds() {
        let mut session = Session::new("s");
        session.append(Message::user("old")).unwrap();

        let config = AgentConfig::new("X", "", "");
        assert!(session.apply_config(config.clone(), Some("Role: X".into())));
        assert_eq!(session.transcript(), &[Message::system("Role: X")]);
        assert_eq!(session.agent_config(), Some(&config));
    }

    #[test]
    fn test_apply_same_config_is_noop() {
        let mut session = Session::new("s");
        let config = AgentConfig::new("X", "Y", "Text");
        session.apply_config(config.clone(), Some("p".into()));
        session.append(Message::user("hi")).unwrap();

        assert!(!session.apply_config(config, Some("p".into())));
        assert_eq!(session.transcript().len(), 2);
    }

    #[test]
    fn test_empty_prompt_is_not_seeded() {
        let mut session = Session::new("s");
        assert!(session.apply_config(AgentConfig::default(), Some(String::new())));
        assert!(session.transcript().is_empty());
    }

    #[test]
    fn test_clear_keeps_config() {
        let mut session = Session::new("s");
        session.apply_config(AgentConfig::new("X", "", ""), Some("Role: X".into()));
        session.clear();
        assert!(session.transcript().is_empty());
        assert!(session.agent_config().is_some());
    }

    #[test]
    fn test_append_rejects_system_message() {
        let mut session = Session::new("s");
        session.append(Message::user("hi")).unwrap();

        let err = session.append(Message::system("late")).unwrap_err();
        assert_eq!(err, SessionError::UnexpectedRole(MessageRole::System));
        assert_eq!(err.to_string(), "cannot append a system message to a transcript");
        assert_eq!(session.transcript(), &[Message::user("hi")]);

        let mut empty = Session::new("e");
        assert!(empty.append(Message::system("first")).is_err());
        assert!(empty.transcript().is_empty());
    }

    #[test]
    fn test_timestamps_track_changes() {
        let mut session = Session::new("s");
        assert_eq!(session.created_at, session.updated_at);

        session.append(Message::user("hi")).unwrap();
        assert!(session.updated_at >= session.created_at);
        assert!(session.age() >= chrono::Duration::zero());
    }
}

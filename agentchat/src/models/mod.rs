//! Data models for conversations and agent configuration.

mod agent;
mod message;
mod session;

pub use agent::{find_preset, presets, AgentConfig, AgentPreset, OutputFormat};
pub use message::{Message, MessageRole};
pub use session::{Session, SessionError};

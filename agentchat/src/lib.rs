//! agentchat - a session-aware chat proxy for LLM completion APIs.
//!
//! The server keeps one transcript per session id in memory, turns an
//! optional agent configuration (role, goal, output format) into a system
//! prompt, and forwards the whole transcript to an OpenAI-compatible
//! completion API on every turn.
//!
//! Architecture:
//! - `serve` runs the HTTP proxy
//! - Other subcommands are thin clients that talk to the server via HTTP

pub mod cli;
pub mod completion;
pub mod models;
pub mod prompt;
pub mod proxy;
pub mod server;
pub mod session;

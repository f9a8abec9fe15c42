//! Chat-completion API interaction module.

mod client;
mod types;

pub use client::{CompletionClient, CompletionConfig, CompletionError, OpenAiClient};
pub use types::{CompletionRequest, CompletionResponse};

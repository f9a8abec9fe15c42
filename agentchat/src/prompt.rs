//! System prompt construction from an agent configuration.

use crate::models::{AgentConfig, OutputFormat};

/// Build the system instruction for `config`.
///
/// Blocks are emitted in a fixed order (role, goal, output format), each
/// skipped when its field is empty. A recognised output format adds one
/// instruction line after its block. The result is trimmed, so a config with
/// every field empty yields `Some("")`.
pub fn build_system_prompt(config: Option<&AgentConfig>) -> Option<String> {
    let config = config?;
    let mut prompt = String::new();

    if !config.role.is_empty() {
        prompt.push_str(&format!("Role: {}\n\n", config.role));
    }

    if !config.goal.is_empty() {
        prompt.push_str(&format!("Goal: {}\n\n", config.goal));
    }

    if !config.output_format.is_empty() {
        prompt.push_str(&format!("Output format: {}\n\n", config.output_format));
        if let Some(instruction) = config.format().and_then(format_instruction) {
            prompt.push_str(instruction);
        }
    }

    Some(prompt.trim().to_string())
}

const fn format_instruction(format: OutputFormat) -> Option<&'static str> {
    match format {
        OutputFormat::Json => Some("Always respond with strictly valid JSON."),
        OutputFormat::Markdown => Some("Write well-structured responses using Markdown."),
        OutputFormat::List => Some("Respond concisely as an itemized list."),
        OutputFormat::Text => None,
    }
}

//! CLI command execution.
//!
//! `serve` runs the proxy in-process; every other command is a thin HTTP
//! client talking to a running server.

use std::time::Duration;

use anyhow::{bail, Context, Result};
use serde_json::Value;
use uuid::Uuid;

use crate::completion::CompletionConfig;
use crate::models::{find_preset, AgentConfig, AgentPreset};
use crate::proxy::{ChatReply, ChatRequest};
use crate::server::{self, ServerConfig};

use super::args::{AgentArgs, Cli, Commands, ServeArgs};

/// Generate a UUIDv7 (time-ordered, globally unique).
fn generate_session_id() -> String {
    Uuid::now_v7().to_string()
}

/// Execute a parsed CLI.
pub async fn execute(cli: Cli) -> Result<()> {
    let server_url = cli.server.trim_end_matches('/').to_string();

    match cli.command {
        Commands::Serve(args) => cmd_serve(args).await,
        Commands::Chat {
            session,
            new,
            agent,
            message,
        } => {
            let session = if new { Some(generate_session_id()) } else { session };
            cmd_chat(&server_url, session, &agent, &message.join(" ")).await
        }
        Commands::Reset { session } => cmd_reset(&server_url, session).await,
        Commands::Health => cmd_health(&server_url).await,
        Commands::Presets => cmd_presets(&server_url).await,
    }
}

async fn cmd_serve(args: ServeArgs) -> Result<()> {
    if args.api_key.trim().is_empty() {
        bail!("An API key is required (--api-key or OPENAI_API_KEY)");
    }

    let config = ServerConfig {
        host: args.host,
        port: args.port,
    };
    let completion = CompletionConfig {
        base_url: args.base_url,
        api_key: args.api_key,
        model: args.model,
        temperature: args.temperature,
        timeout: Duration::from_secs(args.timeout_secs),
    };

    server::start_server(config, completion).await
}

/// Resolve the agent configuration requested on the command line.
fn agent_config(args: &AgentArgs) -> Result<Option<AgentConfig>> {
    if let Some(ref id) = args.preset {
        let preset = find_preset(id)
            .with_context(|| format!("Unknown preset '{id}'. Run `agentchat presets` to list them."))?;
        return Ok(Some(preset.config));
    }

    if args.role.is_none() && args.goal.is_none() && args.format.is_none() {
        return Ok(None);
    }

    Ok(Some(AgentConfig::new(
        args.role.clone().unwrap_or_default(),
        args.goal.clone().unwrap_or_default(),
        args.format.clone().unwrap_or_default(),
    )))
}

async fn cmd_chat(
    server_url: &str,
    session_id: Option<String>,
    agent: &AgentArgs,
    message: &str,
) -> Result<()> {
    let request = ChatRequest {
        message: Some(message.to_string()),
        session_id,
        agent_config: agent_config(agent)?,
    };

    let response = reqwest::Client::new()
        .post(format!("{server_url}/api/chat"))
        .json(&request)
        .send()
        .await
        .with_context(|| format!("Failed to reach server at {server_url}"))?;

    let status = response.status();
    if !status.is_success() {
        let body: Value = response.json().await.unwrap_or_default();
        let error = body["error"].as_str().unwrap_or("request failed");
        match body["details"].as_str() {
            Some(details) => bail!("{error} ({status}): {details}"),
            None => bail!("{error} ({status})"),
        }
    }

    let reply: ChatReply = response.json().await.context("Invalid chat response")?;
    println!("{}", reply.message);
    eprintln!("\n[session: {}]", reply.session_id);
    Ok(())
}

async fn cmd_reset(server_url: &str, session_id: Option<String>) -> Result<()> {
    let response = reqwest::Client::new()
        .post(format!("{server_url}/api/reset"))
        .json(&serde_json::json!({ "sessionId": session_id }))
        .send()
        .await
        .with_context(|| format!("Failed to reach server at {server_url}"))?
        .error_for_status()?;

    let body: Value = response.json().await.unwrap_or_default();
    println!("{}", body["message"].as_str().unwrap_or("Session reset"));
    Ok(())
}

async fn cmd_health(server_url: &str) -> Result<()> {
    let body: Value = reqwest::get(format!("{server_url}/api/health"))
        .await
        .with_context(|| format!("Failed to reach server at {server_url}"))?
        .error_for_status()?
        .json()
        .await?;

    println!(
        "{}: {}",
        body["status"].as_str().unwrap_or("unknown"),
        body["message"].as_str().unwrap_or_default()
    );
    Ok(())
}

async fn cmd_presets(server_url: &str) -> Result<()> {
    let presets: Vec<AgentPreset> = reqwest::get(format!("{server_url}/api/presets"))
        .await
        .with_context(|| format!("Failed to reach server at {server_url}"))?
        .error_for_status()?
        .json()
        .await
        .context("Invalid presets response")?;

    for preset in presets {
        println!(
            "{:<10} {:<18} [{}] {}",
            preset.id, preset.name, preset.config.output_format, preset.config.role
        );
        println!("           {}", preset.config.goal);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_agent_config_from_preset() {
        let args = AgentArgs {
            preset: Some("teacher".into()),
            ..AgentArgs::default()
        };
        let config = agent_config(&args).unwrap().unwrap();
        assert_eq!(config.output_format, "List");
    }

    #[test]
    fn test_agent_config_unknown_preset() {
        let args = AgentArgs {
            preset: Some("wizard".into()),
            ..AgentArgs::default()
        };
        assert!(agent_config(&args).is_err());
    }

    #[test]
    fn test_agent_config_from_fields() {
        assert!(agent_config(&AgentArgs::default()).unwrap().is_none());

        let args = AgentArgs {
            role: Some("X".into()),
            format: Some("JSON".into()),
            ..AgentArgs::default()
        };
        assert_eq!(
            agent_config(&args).unwrap(),
            Some(AgentConfig::new("X", "", "JSON"))
        );
    }

    #[test]
    fn test_generated_session_ids_are_unique() {
        assert_ne!(generate_session_id(), generate_session_id());
    }
}

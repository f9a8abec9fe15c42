//! CLI argument definitions.

use clap::{Args, Parser, Subcommand};

/// agentchat - session-aware chat proxy for LLM completion APIs
#[derive(Parser, Debug)]
#[command(name = "agentchat")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Base URL of a running agentchat server (client commands)
    #[arg(
        long,
        global = true,
        env = "AGENTCHAT_SERVER",
        default_value = "http://127.0.0.1:3001"
    )]
    pub server: String,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the chat proxy server
    Serve(ServeArgs),

    /// Send a message to a session
    Chat {
        /// Session ID to talk to (server default if omitted)
        #[arg(short, long, conflicts_with = "new")]
        session: Option<String>,

        /// Start a brand-new session with a generated ID
        #[arg(long)]
        new: bool,

        #[command(flatten)]
        agent: AgentArgs,

        /// Message to send
        #[arg(trailing_var_arg = true, required = true)]
        message: Vec<String>,
    },

    /// Clear a session's conversation history
    Reset {
        /// Session ID to reset (server default if omitted)
        #[arg(short, long)]
        session: Option<String>,
    },

    /// Check that the server is up
    Health,

    /// List built-in agent presets
    Presets,
}

/// Options for `serve`.
#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Address to bind
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value = "3001")]
    pub port: u16,

    /// Credential for the completion API
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub api_key: String,

    /// Base URL of the OpenAI-compatible completion API
    #[arg(long, env = "OPENAI_BASE_URL", default_value = "https://api.openai.com/v1")]
    pub base_url: String,

    /// Model identifier sent with every completion request
    #[arg(short, long, env = "OPENAI_MODEL", default_value = "gpt-3.5-turbo")]
    pub model: String,

    /// Sampling temperature
    #[arg(long, default_value = "0.7")]
    pub temperature: f64,

    /// Completion request timeout in seconds
    #[arg(long, default_value = "60")]
    pub timeout_secs: u64,
}

/// Agent configuration options for `chat`.
#[derive(Args, Debug, Default)]
pub struct AgentArgs {
    /// Use a built-in preset (see `agentchat presets`)
    #[arg(long, conflicts_with_all = ["role", "goal", "format"])]
    pub preset: Option<String>,

    /// Role the assistant should play
    #[arg(long)]
    pub role: Option<String>,

    /// Goal the assistant should pursue
    #[arg(long)]
    pub goal: Option<String>,

    /// Output format (Text, Markdown, JSON, List)
    #[arg(long)]
    pub format: Option<String>,
}

//! Agent configuration model and built-in presets.

use serde::{Deserialize, Deserializer, Serialize};

/// Output formats with a dedicated prompt instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Markdown,
    #[serde(rename = "JSON")]
    Json,
    List,
}

impl OutputFormat {
    /// Name as it appears in an agent configuration.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "Text",
            Self::Markdown => "Markdown",
            Self::Json => "JSON",
            Self::List => "List",
        }
    }

    /// Parse a format name. Matching is exact, so `"json"` is not `JSON`.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Text" => Some(Self::Text),
            "Markdown" => Some(Self::Markdown),
            "JSON" => Some(Self::Json),
            "List" => Some(Self::List),
            _ => None,
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// User-supplied role, goal and output format that shape the system prompt.
///
/// Every field is optional on the wire; missing and `null` fields both read
/// as an empty string. `output_format` stays free text: unrecognised values are legal and simply
/// get no extra instruction line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AgentConfig {
    #[serde(deserialize_with = "null_as_empty")]
    pub role: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub goal: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub output_format: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl AgentConfig {
    pub fn new(
        role: impl Into<String>,
        goal: impl Into<String>,
        output_format: impl Into<String>,
    ) -> Self {
        Self {
            role: role.into(),
            goal: goal.into(),
            output_format: output_format.into(),
        }
    }

    /// The recognised output format, if any.
    pub fn format(&self) -> Option<OutputFormat> {
        OutputFormat::from_str(&self.output_format)
    }
}

/// A named, ready-made agent configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentPreset {
    pub id: String,
    pub name: String,
    #[serde(flatten)]
    pub config: AgentConfig,
}

impl AgentPreset {
    fn new(id: &str, name: &str, role: &str, goal: &str, format: OutputFormat) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            config: AgentConfig::new(role, goal, format.as_str()),
        }
    }
}

/// Built-in presets offered to clients.
pub fn presets() -> Vec<AgentPreset> {
    vec![
        AgentPreset::new(
            "default",
            "Default Chatbot",
            "Friendly AI assistant",
            "Give accurate and helpful answers to the user's questions",
            OutputFormat::Text,
        ),
        AgentPreset::new(
            "marketer",
            "Marketing Expert",
            "Professional marketer",
            "Suggest product copy, ad slogans and marketing strategies",
            OutputFormat::Markdown,
        ),
        AgentPreset::new(
            "coder",
            "Coding Assistant",
            "Experienced programmer",
            "Help write code, fix bugs and explain programming concepts",
            OutputFormat::Markdown,
        ),
        AgentPreset::new(
            "writer",
            "Writer",
            "Creative writer",
            "Help write stories, scenarios and other content",
            OutputFormat::Text,
        ),
        AgentPreset::new(
            "analyzer",
            "Data Analyst",
            "Data analysis expert",
            "Analyze data and provide insights",
            OutputFormat::Json,
        ),
        AgentPreset::new(
            "teacher",
            "Teacher",
            "Kind teacher",
            "Explain concepts simply and clearly",
            OutputFormat::List,
        ),
    ]
}

/// Look up a built-in preset by id.
pub fn find_preset(id: &str) -> Option<AgentPreset> {
    presets().into_iter().find(|p| p.id == id)
}

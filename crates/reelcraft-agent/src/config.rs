use serde::{Deserialize, Serialize};

/// Which execution engine provider runs agent reasoning.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LlmProvider {
    /// Anthropic messages API.
    Claude,
    /// OpenAI-compatible chat completions API.
    OpenAi,
}

/// Model settings for the execution engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Provider to talk to.
    pub provider: LlmProvider,
    /// Provider-specific model identifier.
    pub model_id: String,
    /// API key for the provider. May be left empty in config files and
    /// resolved from the environment by the caller.
    #[serde(default)]
    pub api_key: String,
    /// Endpoint override; `None` uses the provider default.
    #[serde(default)]
    pub api_base_url: Option<String>,
    /// Sampling temperature.
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Per-reply token cap.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// Upper bound on LLM round-trips per task (tool loops included).
    #[serde(default = "default_max_turns")]
    pub max_turns: u32,
}

fn default_temperature() -> f32 {
    0.7
}

fn default_max_tokens() -> u32 {
    4096
}

fn default_max_turns() -> u32 {
    25
}

impl ModelConfig {
    /// Resolve the API base URL for this configuration.
    pub fn base_url(&self) -> &str {
        if let Some(url) = &self.api_base_url {
            url
        } else {
            match self.provider {
                LlmProvider::Claude => "https://api.anthropic.com",
                LlmProvider::OpenAi => "https://api.openai.com",
            }
        }
    }
}

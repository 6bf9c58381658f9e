use super::LlmBackend;
use crate::config::ModelConfig;
use crate::llm::{ChatMessage, ChatRole, LlmReply};
use async_trait::async_trait;
use reelcraft_core::{ReelcraftError, ReelcraftResult, ToolCall};
use reelcraft_tools::ToolDescriptor;
use serde::Serialize;

/// Claude (Anthropic) API backend.
pub struct ClaudeBackend {
    config: ModelConfig,
    http: reqwest::Client,
}

impl ClaudeBackend {
    /// Backend over the given configuration.
    pub fn new(config: ModelConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl LlmBackend for ClaudeBackend {
    async fn chat(
        &self,
        system_prompt: Option<&str>,
        transcript: &[ChatMessage],
        tools: &[ToolDescriptor],
    ) -> ReelcraftResult<LlmReply> {
        let url = format!("{}/v1/messages", self.config.base_url());

        let api_messages: Vec<WireMessage> = transcript
            .iter()
            .map(|m| WireMessage {
                role: match m.role {
                    ChatRole::User | ChatRole::Tool => "user",
                    ChatRole::Assistant => "assistant",
                },
                content: m.content.clone(),
            })
            .collect();

        let wire_tools: Vec<WireTool> = tools
            .iter()
            .map(|t| WireTool {
                name: t.name.clone(),
                description: t.description.clone(),
                input_schema: t.parameters_schema.clone(),
            })
            .collect();

        let mut body = serde_json::json!({
            "model": self.config.model_id,
            "max_tokens": self.config.max_tokens,
            "temperature": self.config.temperature,
            "messages": api_messages,
        });

        if let Some(sys) = system_prompt {
            body["system"] = serde_json::json!(sys);
        }
        if !wire_tools.is_empty() {
            body["tools"] = serde_json::to_value(&wire_tools)?;
        }

        let resp = self
            .http
            .post(&url)
            .header("x-api-key", &self.config.api_key)
            .header("anthropic-version", "2023-06-01")
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| ReelcraftError::Http(e.to_string()))?;

        let status = resp.status();
        let resp_body: serde_json::Value = resp
            .json()
            .await
            .map_err(|e| ReelcraftError::Http(e.to_string()))?;

        if !status.is_success() {
            return Err(ReelcraftError::Http(format!(
                "Claude API error {status}: {resp_body}"
            )));
        }

        parse_reply(&resp_body)
    }
}

#[derive(Serialize)]
struct WireMessage {
    role: &'static str,
    content: String,
}

#[derive(Serialize)]
struct WireTool {
    name: String,
    description: String,
    input_schema: serde_json::Value,
}

/// Split a messages-API response into text and `tool_use` blocks.
pub fn parse_reply(body: &serde_json::Value) -> ReelcraftResult<LlmReply> {
    let content = body["content"]
        .as_array()
        .ok_or_else(|| ReelcraftError::Agent("Missing content in Claude response".into()))?;

    let mut text_parts = Vec::new();
    let mut tool_calls = Vec::new();

    for block in content {
        match block["type"].as_str() {
            Some("text") => {
                if let Some(t) = block["text"].as_str() {
                    text_parts.push(t.to_string());
                }
            }
            Some("tool_use") => {
                tool_calls.push(ToolCall {
                    id: block["id"].as_str().unwrap_or_default().to_string(),
                    name: block["name"].as_str().unwrap_or_default().to_string(),
                    arguments: block["input"].clone(),
                });
            }
            _ => {}
        }
    }

    if tool_calls.is_empty() {
        Ok(LlmReply::Done(text_parts.join("\n")))
    } else {
        Ok(LlmReply::ToolUse {
            content: if text_parts.is_empty() {
                None
            } else {
                Some(text_parts.join("\n"))
            },
            tool_calls,
        })
    }
}

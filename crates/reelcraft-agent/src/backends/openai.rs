use super::LlmBackend;
use crate::config::ModelConfig;
use crate::llm::{ChatMessage, ChatRole, LlmReply};
use async_trait::async_trait;
use reelcraft_core::{ReelcraftError, ReelcraftResult, ToolCall};
use reelcraft_tools::ToolDescriptor;

/// OpenAI-compatible chat completions backend.
pub struct OpenAiBackend {
    config: ModelConfig,
    http: reqwest::Client,
}

impl OpenAiBackend {
    /// Backend over the given configuration.
    pub fn new(config: ModelConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }

    fn build_messages(
        &self,
        system_prompt: Option<&str>,
        transcript: &[ChatMessage],
    ) -> Vec<serde_json::Value> {
        let mut api_messages: Vec<serde_json::Value> = Vec::new();

        if let Some(sys) = system_prompt {
            api_messages.push(serde_json::json!({
                "role": "system",
                "content": sys
            }));
        }

        for m in transcript {
            api_messages.push(serde_json::json!({
                "role": match m.role {
                    ChatRole::User | ChatRole::Tool => "user",
                    ChatRole::Assistant => "assistant",
                },
                "content": m.content
            }));
        }

        api_messages
    }

    fn build_tools(&self, tools: &[ToolDescriptor]) -> Vec<serde_json::Value> {
        tools
            .iter()
            .map(|t| {
                serde_json::json!({
                    "type": "function",
                    "function": {
                        "name": t.name,
                        "description": t.description,
                        "parameters": t.parameters_schema,
                    }
                })
            })
            .collect()
    }
}

#[async_trait]
impl LlmBackend for OpenAiBackend {
    async fn chat(
        &self,
        system_prompt: Option<&str>,
        transcript: &[ChatMessage],
        tools: &[ToolDescriptor],
    ) -> ReelcraftResult<LlmReply> {
        let url = format!("{}/v1/chat/completions", self.config.base_url());
        let api_messages = self.build_messages(system_prompt, transcript);

        let mut body = serde_json::json!({
            "model": self.config.model_id,
            "max_tokens": self.config.max_tokens,
            "temperature": self.config.temperature,
            "messages": api_messages,
        });

        if !tools.is_empty() {
            body["tools"] = serde_json::json!(self.build_tools(tools));
        }

        let resp = self
            .http
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .header("Content-Type", "application/json")
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
                "OpenAI API error {status}: {resp_body}"
            )));
        }

        parse_reply(&resp_body)
    }
}

/// Split a chat-completions response into text and function tool calls.
pub fn parse_reply(body: &serde_json::Value) -> ReelcraftResult<LlmReply> {
    let message = &body["choices"][0]["message"];
    if message.is_null() {
        return Err(ReelcraftError::Agent(
            "Missing choices in OpenAI response".into(),
        ));
    }

    let text = message["content"].as_str().unwrap_or_default().to_string();

    let tool_calls: Vec<ToolCall> = message["tool_calls"]
        .as_array()
        .map(|calls| {
            calls
                .iter()
                .map(|c| {
                    // Function arguments arrive as a JSON-encoded string.
                    let arguments = c["function"]["arguments"]
                        .as_str()
                        .and_then(|raw| serde_json::from_str(raw).ok())
                        .unwrap_or_else(|| serde_json::json!({}));
                    ToolCall {
                        id: c["id"].as_str().unwrap_or_default().to_string(),
                        name: c["function"]["name"].as_str().unwrap_or_default().to_string(),
                        arguments,
                    }
                })
                .collect()
        })
        .unwrap_or_default();

    if tool_calls.is_empty() {
        Ok(LlmReply::Done(text))
    } else {
        Ok(LlmReply::ToolUse {
            content: if text.is_empty() { None } else { Some(text) },
            tool_calls,
        })
    }
}

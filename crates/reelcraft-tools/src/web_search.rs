use crate::tool::{Tool, ToolDescriptor};
use async_trait::async_trait;
use reelcraft_core::{ReelcraftResult, ToolCall, ToolResult};
use std::time::Duration;
use tracing::info;

const SEARCH_ENDPOINT: &str = "https://google.serper.dev/search";
const MAX_RESULTS: u64 = 10;

/// Web search tool backed by the Serper.dev Google-search API.
///
/// The Brand Analyst uses it to look up tone, style references, and candidate
/// mood-board image URLs.
pub struct WebSearchTool {
    descriptor: ToolDescriptor,
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl WebSearchTool {
    /// Tool pointed at the production Serper endpoint.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_endpoint(api_key, SEARCH_ENDPOINT)
    }

    /// Tool pointed at a custom endpoint (used by tests).
    pub fn with_endpoint(api_key: impl Into<String>, endpoint: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            descriptor: ToolDescriptor {
                name: "web_search".to_string(),
                description: "Search the web. Always pass a plain string as the query, such \
                              as the brand name or a relevant search phrase — never a \
                              dictionary or any other structure."
                    .to_string(),
                parameters_schema: serde_json::json!({
                    "type": "object",
                    "properties": {
                        "query": {
                            "type": "string",
                            "description": "Plain-text search query"
                        },
                        "num_results": {
                            "type": "integer",
                            "description": "How many results to return (default 5, max 10)"
                        }
                    },
                    "required": ["query"]
                }),
            },
            client,
            endpoint: endpoint.into(),
            api_key: api_key.into(),
        }
    }
}

#[async_trait]
impl Tool for WebSearchTool {
    fn descriptor(&self) -> &ToolDescriptor {
        &self.descriptor
    }

    async fn execute(&self, call: ToolCall) -> ReelcraftResult<ToolResult> {
        let query = call.arguments["query"].as_str().unwrap_or_default();
        if query.is_empty() {
            return Ok(ToolResult::error(&call.id, "Empty search query"));
        }
        let num = call.arguments["num_results"]
            .as_u64()
            .unwrap_or(5)
            .min(MAX_RESULTS);

        info!(query = %query, num = num, "Web search");

        let response = match self
            .client
            .post(&self.endpoint)
            .header("X-API-KEY", &self.api_key)
            .json(&serde_json::json!({"q": query, "num": num}))
            .send()
            .await
        {
            Ok(r) => r,
            Err(e) => {
                return Ok(ToolResult::error(
                    &call.id,
                    format!("Search request failed: {e}"),
                ));
            }
        };

        let status = response.status();
        let body: serde_json::Value = match response.json().await {
            Ok(b) => b,
            Err(e) => {
                return Ok(ToolResult::error(
                    &call.id,
                    format!("Search response was not JSON: {e}"),
                ));
            }
        };

        if !status.is_success() {
            return Ok(ToolResult::error(
                &call.id,
                format!("Search API error {status}: {body}"),
            ));
        }

        Ok(ToolResult::success(&call.id, render_results(&body)))
    }
}

/// Flatten the API's organic results into a numbered plain-text block.
fn render_results(body: &serde_json::Value) -> String {
    let organic = match body["organic"].as_array() {
        Some(results) if !results.is_empty() => results,
        _ => return "No results found.".to_string(),
    };

    organic
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let title = entry["title"].as_str().unwrap_or("(untitled)");
            let link = entry["link"].as_str().unwrap_or("");
            let snippet = entry["snippet"].as_str().unwrap_or("");
            format!("{}. {title}\n   {link}\n   {snippet}", i + 1)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

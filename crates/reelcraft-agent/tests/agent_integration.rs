#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Integration tests for reelcraft-agent: provider wire formats and the full
//! agent loop (tool call, execution, backfill, completion) against a mock
//! engine endpoint.

use reelcraft_agent::{AgentRunner, LlmClient, LlmProvider, LlmReply, ModelConfig};
use reelcraft_tools::{register_builtins, ToolRegistry};
use std::sync::Arc;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn claude_config(base_url: &str) -> ModelConfig {
    ModelConfig {
        provider: LlmProvider::Claude,
        model_id: "claude-sonnet-4-20250514".to_string(),
        api_key: "test-key".to_string(),
        api_base_url: Some(base_url.to_string()),
        temperature: 0.7,
        max_tokens: 1024,
        max_turns: 5,
    }
}

fn openai_config(base_url: &str) -> ModelConfig {
    ModelConfig {
        provider: LlmProvider::OpenAi,
        model_id: "gpt-4o".to_string(),
        api_key: "test-key".to_string(),
        api_base_url: Some(base_url.to_string()),
        temperature: 0.7,
        max_tokens: 1024,
        max_turns: 5,
    }
}

#[tokio::test]
async fn claude_backend_sends_versioned_request_and_parses_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .and(header("x-api-key", "test-key"))
        .and(header("anthropic-version", "2023-06-01"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "content": [{"type": "text", "text": "Theme one, theme two, theme three."}],
            "stop_reason": "end_turn"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = LlmClient::new(claude_config(&server.uri()));
    let reply = client
        .chat(Some("You are a synthesizer."), &[reelcraft_agent::ChatMessage::user("Propose themes.")], &[])
        .await
        .unwrap();

    match reply {
        LlmReply::Done(text) => assert!(text.contains("theme two")),
        other => panic!("expected Done, got {other:?}"),
    }
}

#[tokio::test]
async fn claude_backend_surfaces_api_errors() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(
            ResponseTemplate::new(429)
                .set_body_json(serde_json::json!({"error": {"type": "rate_limit_error"}})),
        )
        .mount(&server)
        .await;

    let client = LlmClient::new(claude_config(&server.uri()));
    let result = client
        .chat(None, &[reelcraft_agent::ChatMessage::user("hi")], &[])
        .await;
    let err = result.err().expect("expected error").to_string();
    assert!(err.contains("429"), "{err}");
}

#[tokio::test]
async fn openai_backend_parses_chat_completion() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("Authorization", "Bearer test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "choices": [{"message": {"role": "assistant", "content": "Vignette list."}}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = LlmClient::new(openai_config(&server.uri()));
    let reply = client
        .chat(None, &[reelcraft_agent::ChatMessage::user("Design vignettes.")], &[])
        .await
        .unwrap();

    match reply {
        LlmReply::Done(text) => assert_eq!(text, "Vignette list."),
        other => panic!("expected Done, got {other:?}"),
    }
}

#[tokio::test]
async fn runner_executes_requested_tool_and_finishes() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let out_dir = dir.path().to_str().unwrap().to_string();

    // First engine turn: write a file via the file_writer tool.
    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "content": [{
                "type": "tool_use",
                "id": "toolu_1",
                "name": "file_writer",
                "input": {"directory": out_dir, "filename": "themes.txt", "content": "urban, warm, playful"}
            }],
            "stop_reason": "tool_use"
        })))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    // Second engine turn: done.
    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "content": [{"type": "text", "text": "Themes written."}],
            "stop_reason": "end_turn"
        })))
        .mount(&server)
        .await;

    let mut registry = ToolRegistry::new();
    register_builtins(&mut registry);

    let runner = AgentRunner::new(claude_config(&server.uri()), Arc::new(registry));
    let text = runner
        .run(
            "You are a creative synthesizer.",
            "Propose themes and save them.",
            &["file_writer".to_string()],
        )
        .await
        .unwrap();

    assert_eq!(text, "Themes written.");
    let written = std::fs::read_to_string(dir.path().join("themes.txt")).unwrap();
    assert_eq!(written, "urban, warm, playful");
}

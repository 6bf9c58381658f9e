use crate::backends::LlmBackend;
use crate::config::ModelConfig;
use crate::llm::{ChatMessage, LlmClient, LlmReply};
use reelcraft_core::{ReelcraftError, ReelcraftResult, ToolResult};
use reelcraft_tools::ToolRegistry;
use std::sync::Arc;
use tracing::{info, warn};

/// Runs one task for one agent: prompt → engine → tool call → backfill →
/// repeat, bounded by the configured turn budget.
pub struct AgentRunner {
    llm: LlmClient,
    registry: Arc<ToolRegistry>,
    max_turns: u32,
}

impl AgentRunner {
    /// Runner over the configured provider.
    pub fn new(config: ModelConfig, registry: Arc<ToolRegistry>) -> Self {
        let max_turns = config.max_turns;
        Self {
            llm: LlmClient::new(config),
            registry,
            max_turns,
        }
    }

    /// Runner over a pre-built backend (used by tests and custom engines).
    pub fn from_backend(
        backend: Box<dyn LlmBackend>,
        registry: Arc<ToolRegistry>,
        max_turns: u32,
    ) -> Self {
        Self {
            llm: LlmClient::from_backend(backend),
            registry,
            max_turns,
        }
    }

    /// Execute `task_prompt` under `system_prompt`, with tool access limited
    /// to `allowed_tools`. Returns the agent's final text.
    pub async fn run(
        &self,
        system_prompt: &str,
        task_prompt: &str,
        allowed_tools: &[String],
    ) -> ReelcraftResult<String> {
        let tools = self.registry.descriptors_for(allowed_tools);
        let mut transcript = vec![ChatMessage::user(task_prompt)];

        for turn in 0..self.max_turns {
            let reply = self
                .llm
                .chat(Some(system_prompt), &transcript, &tools)
                .await?;

            match reply {
                LlmReply::Done(text) => {
                    info!(turns = turn + 1, "Agent completed task");
                    return Ok(text);
                }

                LlmReply::ToolUse {
                    content,
                    tool_calls,
                } => {
                    if let Some(text) = content {
                        transcript.push(ChatMessage::assistant(text));
                    }

                    for call in tool_calls {
                        info!(tool = %call.name, call_id = %call.id, "Executing tool call");

                        let result = if allowed_tools.contains(&call.name) {
                            self.registry.execute(call.clone()).await?
                        } else {
                            // Advertised descriptors are already filtered, but
                            // the engine can still name a tool it was not given.
                            warn!(tool = %call.name, "Engine requested a tool outside the allowlist");
                            ToolResult::error(
                                &call.id,
                                format!("Tool '{}' is not available to this agent", call.name),
                            )
                        };

                        if result.is_error {
                            warn!(tool = %call.name, "Tool reported an error");
                        }

                        // Backfill the result as a tool-role entry.
                        let backfill = serde_json::json!({
                            "type": "tool_result",
                            "tool_use_id": result.call_id,
                            "content": result.content,
                            "is_error": result.is_error,
                        });
                        transcript.push(ChatMessage::tool(backfill.to_string()));
                    }
                }
            }
        }

        warn!(max_turns = self.max_turns, "Agent loop reached max turns");
        Err(ReelcraftError::Agent(format!(
            "Agent loop exceeded maximum of {} turns",
            self.max_turns
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::LlmBackend;
    use async_trait::async_trait;
    use reelcraft_core::ToolCall;
    use reelcraft_tools::ToolDescriptor;
    use std::sync::Mutex;

    /// Backend that replays a fixed script of replies.
    struct ScriptedBackend {
        replies: Mutex<Vec<LlmReply>>,
    }

    impl ScriptedBackend {
        fn new(mut replies: Vec<LlmReply>) -> Self {
            replies.reverse();
            Self {
                replies: Mutex::new(replies),
            }
        }
    }

    #[async_trait]
    impl LlmBackend for ScriptedBackend {
        async fn chat(
            &self,
            _system_prompt: Option<&str>,
            _transcript: &[ChatMessage],
            _tools: &[ToolDescriptor],
        ) -> ReelcraftResult<LlmReply> {
            self.replies
                .lock()
                .expect("lock")
                .pop()
                .ok_or_else(|| ReelcraftError::Agent("script exhausted".into()))
        }
    }

    #[tokio::test]
    async fn immediate_done_returns_text() {
        let backend = ScriptedBackend::new(vec![LlmReply::Done("brand summary".into())]);
        let runner =
            AgentRunner::from_backend(Box::new(backend), Arc::new(ToolRegistry::new()), 5);

        let text = runner.run("You are an analyst.", "Analyze.", &[]).await;
        assert_eq!(text.expect("run"), "brand summary");
    }

    #[tokio::test]
    async fn disallowed_tool_call_is_refused_and_loop_continues() {
        let backend = ScriptedBackend::new(vec![
            LlmReply::ToolUse {
                content: None,
                tool_calls: vec![ToolCall {
                    id: "c1".into(),
                    name: "file_writer".into(),
                    arguments: serde_json::json!({}),
                }],
            },
            LlmReply::Done("done without tools".into()),
        ]);
        let runner =
            AgentRunner::from_backend(Box::new(backend), Arc::new(ToolRegistry::new()), 5);

        let text = runner.run("sys", "task", &[]).await.expect("run");
        assert_eq!(text, "done without tools");
    }

    #[tokio::test]
    async fn turn_budget_exhaustion_is_an_error() {
        let looping = (0..4)
            .map(|i| LlmReply::ToolUse {
                content: None,
                tool_calls: vec![ToolCall {
                    id: format!("c{i}"),
                    name: "ghost".into(),
                    arguments: serde_json::json!({}),
                }],
            })
            .collect();
        let runner =
            AgentRunner::from_backend(Box::new(ScriptedBackend::new(looping)), Arc::new(ToolRegistry::new()), 3);

        let result = runner.run("sys", "task", &[]).await;
        assert!(matches!(result, Err(ReelcraftError::Agent(_))));
    }
}

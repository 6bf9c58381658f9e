use crate::backends::claude::ClaudeBackend;
use crate::backends::openai::OpenAiBackend;
use crate::backends::LlmBackend;
use crate::config::{LlmProvider, ModelConfig};
use reelcraft_core::{ReelcraftResult, ToolCall};
use reelcraft_tools::ToolDescriptor;

/// Role of one transcript entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatRole {
    /// Task text or backfilled tool output.
    User,
    /// Text produced by the engine.
    Assistant,
    /// Tool output; providers receive it under the user role.
    Tool,
}

/// A single entry in the transcript sent to the engine.
#[derive(Debug, Clone)]
pub struct ChatMessage {
    /// Who authored this entry.
    pub role: ChatRole,
    /// Entry text.
    pub content: String,
}

impl ChatMessage {
    /// A user-authored entry.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    /// An engine-authored entry.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }

    /// A backfilled tool result.
    pub fn tool(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Tool,
            content: content.into(),
        }
    }
}

/// Reply from the engine for one chat turn — either the final text for the
/// task, or a request to run tools before continuing.
#[derive(Debug)]
pub enum LlmReply {
    /// Final text; the agent is done with this task.
    Done(String),
    /// The engine wants tool invocations before it can finish.
    ToolUse {
        /// Any text the engine produced alongside the calls.
        content: Option<String>,
        /// The requested invocations.
        tool_calls: Vec<ToolCall>,
    },
}

/// LLM client that dispatches to the correct provider backend.
///
/// To add a provider: implement [`LlmBackend`](crate::backends::LlmBackend)
/// in `backends/` and wire it here.
pub struct LlmClient {
    backend: Box<dyn LlmBackend>,
}

impl LlmClient {
    /// Client for the provider named in `config`.
    pub fn new(config: ModelConfig) -> Self {
        let backend: Box<dyn LlmBackend> = match config.provider {
            LlmProvider::Claude => Box::new(ClaudeBackend::new(config)),
            LlmProvider::OpenAi => Box::new(OpenAiBackend::new(config)),
        };
        Self { backend }
    }

    /// Client over a pre-built backend (used by tests and custom engines).
    pub fn from_backend(backend: Box<dyn LlmBackend>) -> Self {
        Self { backend }
    }

    /// One chat completion.
    pub async fn chat(
        &self,
        system_prompt: Option<&str>,
        transcript: &[ChatMessage],
        tools: &[ToolDescriptor],
    ) -> ReelcraftResult<LlmReply> {
        self.backend.chat(system_prompt, transcript, tools).await
    }
}

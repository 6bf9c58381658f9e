/// Anthropic messages API backend.
pub mod claude;
/// OpenAI-compatible chat completions backend.
pub mod openai;

use crate::llm::{ChatMessage, LlmReply};
use async_trait::async_trait;
use reelcraft_core::ReelcraftResult;
use reelcraft_tools::ToolDescriptor;

/// Trait for execution-engine provider backends.
///
/// Each provider implements this trait to handle API communication. The
/// pipeline is batch: every task waits for the complete reply, so only a
/// non-streaming `chat` exists.
#[async_trait]
pub trait LlmBackend: Send + Sync {
    /// One chat completion against the provider.
    async fn chat(
        &self,
        system_prompt: Option<&str>,
        transcript: &[ChatMessage],
        tools: &[ToolDescriptor],
    ) -> ReelcraftResult<LlmReply>;
}

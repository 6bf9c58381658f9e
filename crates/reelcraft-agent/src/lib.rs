//! Execution-engine adapter for the Reelcraft pipeline.
//!
//! The pipeline's agents do not reason on their own: an external LLM-backed
//! engine runs each agent's thinking. This crate holds the adapter — provider
//! configuration, the wire backends, and the per-task agent loop.
//!
//! # Main types
//!
//! - [`ModelConfig`] / [`LlmProvider`] — Provider and model settings.
//! - [`LlmClient`] / [`LlmReply`] — Provider-agnostic chat interface.
//! - [`AgentRunner`] — The prompt → engine → tool → backfill loop for one task.

/// Provider wire backends.
pub mod backends;
/// Provider and model configuration.
pub mod config;
/// Provider-agnostic chat client and transcript types.
pub mod llm;
/// The per-task agent loop.
pub mod runner;

pub use backends::LlmBackend;
pub use config::{LlmProvider, ModelConfig};
pub use llm::{ChatMessage, ChatRole, LlmClient, LlmReply};
pub use runner::AgentRunner;

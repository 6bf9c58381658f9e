//! Core types and error definitions for the Reelcraft pipeline.
//!
//! This crate provides the foundational types shared across all Reelcraft
//! crates: the unified error enum, the tool invocation vocabulary exchanged
//! with the execution engine, and the brand profile that seeds every run.
//!
//! # Main types
//!
//! - [`ReelcraftError`] — Unified error enum for all Reelcraft subsystems.
//! - [`ReelcraftResult`] — Convenience alias for `Result<T, ReelcraftError>`.
//! - [`ToolCall`] / [`ToolResult`] — An engine-initiated tool invocation and
//!   its outcome.
//! - [`BrandProfile`] — The structured brand description driving a run.

/// Brand profile loading, rendering, and slug derivation.
pub mod brand;
/// Tool invocation request/result vocabulary.
pub mod tool;

pub use brand::{slugify, BrandProfile, BrandScale};
pub use tool::{ToolCall, ToolResult};

/// Top-level error type for the Reelcraft pipeline.
///
/// Each variant corresponds to a subsystem that can produce errors.
#[derive(Debug, thiserror::Error)]
pub enum ReelcraftError {
    /// An error originating from a single agent's execution loop.
    #[error("Agent error: {0}")]
    Agent(String),

    /// An error raised by a tool during invocation.
    #[error("Tool error: {0}")]
    Tool(String),

    /// An error from the pipeline engine (task sequencing, status reporting).
    #[error("Pipeline error: {0}")]
    Pipeline(String),

    /// An error in configuration parsing or validation.
    #[error("Config error: {0}")]
    Config(String),

    /// An error from an outbound HTTP request (e.g. LLM API call).
    #[error("HTTP error: {0}")]
    Http(String),

    /// A JSON serialization or deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A standard I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A convenience `Result` alias using [`ReelcraftError`].
pub type ReelcraftResult<T> = Result<T, ReelcraftError>;

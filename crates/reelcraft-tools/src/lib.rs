//! Built-in tools for the Reelcraft pipeline.
//!
//! Provides the [`Tool`] trait, the [`ToolRegistry`] the engine dispatches
//! through, and the tools agents may be granted: mood-board image downloading,
//! file writing, and web search.
//!
//! # Main entry points
//!
//! - [`register_builtins()`] — Register the standard tool set.
//! - [`register_web_search()`] — Add the search tool when an API key is configured.

/// File writing tool.
pub mod file_write;
/// Mood-board image URL classification and downloading.
pub mod mood_board;
/// Tool registry and dispatch.
pub mod registry;
/// The tool trait and descriptor types.
pub mod tool;
/// Serper.dev web search tool.
pub mod web_search;

pub use file_write::FileWriterTool;
pub use mood_board::{is_direct_image_url, DownloadOutcome, MoodBoardImageTool};
pub use registry::ToolRegistry;
pub use tool::{Tool, ToolDescriptor};
pub use web_search::WebSearchTool;

use std::sync::Arc;

/// Register the standard built-in tools: file writer and mood-board downloader.
pub fn register_builtins(registry: &mut ToolRegistry) {
    registry.register(Arc::new(FileWriterTool::new()));
    registry.register(Arc::new(MoodBoardImageTool::new()));
}

/// Register the web search tool. Separate from [`register_builtins`] because
/// search needs an API key and runs without one are still useful.
pub fn register_web_search(registry: &mut ToolRegistry, api_key: impl Into<String>) {
    registry.register(Arc::new(WebSearchTool::new(api_key)));
}

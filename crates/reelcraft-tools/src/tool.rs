use async_trait::async_trait;
use reelcraft_core::{ReelcraftResult, ToolCall, ToolResult};
use serde::{Deserialize, Serialize};

/// Metadata describing a tool's interface, advertised to the execution engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDescriptor {
    /// Unique tool name used for dispatch.
    pub name: String,
    /// What the tool does, and how (not) to use it.
    pub description: String,
    /// JSON Schema describing the tool's arguments.
    pub parameters_schema: serde_json::Value,
}

/// Trait that all tools must implement.
///
/// A tool reports its own failures through an error-flagged [`ToolResult`];
/// an `Err` return is reserved for faults the registry itself must surface.
#[async_trait]
pub trait Tool: Send + Sync {
    /// The tool's descriptor.
    fn descriptor(&self) -> &ToolDescriptor;

    /// Execute one invocation.
    async fn execute(&self, call: ToolCall) -> ReelcraftResult<ToolResult>;
}

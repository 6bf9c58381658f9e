use crate::tool::{Tool, ToolDescriptor};
use reelcraft_core::{ReelcraftResult, ToolCall, ToolResult};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, warn};

/// Central registry for all available tools.
///
/// Agents see only the descriptors their spec allows
/// (see [`ToolRegistry::descriptors_for`]); dispatch of an unknown tool name
/// produces an error result the engine can feed back, not a hard failure.
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    /// Register a tool under its descriptor name.
    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        let name = tool.descriptor().name.clone();
        info!(tool = %name, "Registered tool");
        self.tools.insert(name, tool);
    }

    /// Look up a tool by name.
    pub fn get(&self, name: &str) -> Option<&Arc<dyn Tool>> {
        self.tools.get(name)
    }

    /// Descriptors of every registered tool.
    pub fn list_descriptors(&self) -> Vec<&ToolDescriptor> {
        self.tools.values().map(|t| t.descriptor()).collect()
    }

    /// Descriptors for the given allowlist, in allowlist order.
    ///
    /// Names with no registered tool are skipped with a warning — a role file
    /// can mention a tool that this deployment did not configure.
    pub fn descriptors_for(&self, allowed: &[String]) -> Vec<ToolDescriptor> {
        allowed
            .iter()
            .filter_map(|name| match self.tools.get(name) {
                Some(tool) => Some(tool.descriptor().clone()),
                None => {
                    warn!(tool = %name, "Allowed tool is not registered, skipping");
                    None
                }
            })
            .collect()
    }

    /// Execute a tool call by name.
    pub async fn execute(&self, call: ToolCall) -> ReelcraftResult<ToolResult> {
        match self.tools.get(&call.name) {
            Some(tool) => tool.execute(call).await,
            None => {
                warn!(tool = %call.name, "Unknown tool requested");
                Ok(ToolResult::error(
                    &call.id,
                    format!("Unknown tool: {}", call.name),
                ))
            }
        }
    }

    /// Number of registered tools.
    pub fn tool_count(&self) -> usize {
        self.tools.len()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

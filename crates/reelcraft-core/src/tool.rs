use serde::{Deserialize, Serialize};

/// A request from the execution engine to invoke a specific tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCall {
    /// Identifier assigned by the engine for this invocation.
    pub id: String,
    /// Name of the tool to invoke.
    pub name: String,
    /// JSON arguments to pass to the tool.
    pub arguments: serde_json::Value,
}

/// The result returned after executing a [`ToolCall`].
///
/// Tools report failures as values: a failed invocation is an `is_error`
/// result, never a panic and never an error propagated past the registry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResult {
    /// The ID of the [`ToolCall`] this result corresponds to.
    pub call_id: String,
    /// The textual output produced by the tool.
    pub content: String,
    /// Whether the tool execution ended in an error.
    pub is_error: bool,
}

impl ToolResult {
    /// Creates a successful tool result.
    pub fn success(call_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            call_id: call_id.into(),
            content: content.into(),
            is_error: false,
        }
    }

    /// Creates an error tool result.
    pub fn error(call_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            call_id: call_id.into(),
            content: content.into(),
            is_error: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_result_is_not_flagged() {
        let result = ToolResult::success("call_7", "saved to disk");
        assert!(!result.is_error);
        assert_eq!(result.call_id, "call_7");
        assert_eq!(result.content, "saved to disk");
    }

    #[test]
    fn error_result_is_flagged() {
        let result = ToolResult::error("call_7", "no such directory");
        assert!(result.is_error);
    }

    #[test]
    fn tool_call_roundtrips_through_json() {
        let call = ToolCall {
            id: "call_1".to_string(),
            name: "mood_board_image".to_string(),
            arguments: serde_json::json!({"image_url": "https://example.com/a.png"}),
        };
        let json = serde_json::to_string(&call).expect("serialize");
        let parsed: ToolCall = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(parsed.name, "mood_board_image");
        assert_eq!(parsed.arguments["image_url"], "https://example.com/a.png");
    }
}

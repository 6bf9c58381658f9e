use crate::tool::{Tool, ToolDescriptor};
use async_trait::async_trait;
use reelcraft_core::{ReelcraftResult, ToolCall, ToolResult};
use std::path::Path;
use tracing::info;

const MAX_WRITE_SIZE: usize = 10 * 1024 * 1024; // 10MB

/// File writing tool. Agents use it to persist their artifacts — theme
/// summaries, test-mode outputs, and the final prompt JSON — under the run's
/// output tree.
pub struct FileWriterTool {
    descriptor: ToolDescriptor,
}

impl FileWriterTool {
    /// Create the tool.
    pub fn new() -> Self {
        Self {
            descriptor: ToolDescriptor {
                name: "file_writer".to_string(),
                description: "Write text content to a file inside a directory. The directory \
                              is created if missing. Always pass the output directory you \
                              were given in your task; the filename must be a bare name \
                              without path separators."
                    .to_string(),
                parameters_schema: serde_json::json!({
                    "type": "object",
                    "properties": {
                        "directory": {
                            "type": "string",
                            "description": "Directory to write into (created if missing)"
                        },
                        "filename": {
                            "type": "string",
                            "description": "Bare file name, e.g. 'ad_prompts.json'"
                        },
                        "content": {
                            "type": "string",
                            "description": "Text content to write"
                        },
                        "overwrite": {
                            "type": "boolean",
                            "description": "Replace an existing file (default: true)"
                        }
                    },
                    "required": ["directory", "filename", "content"]
                }),
            },
        }
    }
}

impl Default for FileWriterTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Tool for FileWriterTool {
    fn descriptor(&self) -> &ToolDescriptor {
        &self.descriptor
    }

    async fn execute(&self, call: ToolCall) -> ReelcraftResult<ToolResult> {
        let directory = call.arguments["directory"].as_str().unwrap_or_default();
        let filename = call.arguments["filename"].as_str().unwrap_or_default();
        let content = call.arguments["content"].as_str().unwrap_or_default();
        let overwrite = call.arguments["overwrite"].as_bool().unwrap_or(true);

        if directory.is_empty() || filename.is_empty() {
            return Ok(ToolResult::error(
                &call.id,
                "Both 'directory' and 'filename' are required",
            ));
        }

        // The filename must stay inside the target directory.
        if filename.contains('/') || filename.contains('\\') || filename.contains("..") {
            return Ok(ToolResult::error(
                &call.id,
                format!("Filename '{filename}' must be a bare name without path separators"),
            ));
        }

        if content.len() > MAX_WRITE_SIZE {
            return Ok(ToolResult::error(
                &call.id,
                format!(
                    "Content too large: {} bytes (max: {} bytes)",
                    content.len(),
                    MAX_WRITE_SIZE
                ),
            ));
        }

        let dir = Path::new(directory);
        if let Err(e) = tokio::fs::create_dir_all(dir).await {
            return Ok(ToolResult::error(
                &call.id,
                format!("Failed to create directory '{directory}': {e}"),
            ));
        }

        let path = dir.join(filename);
        if !overwrite && tokio::fs::try_exists(&path).await.unwrap_or(false) {
            return Ok(ToolResult::error(
                &call.id,
                format!("File already exists: {}", path.display()),
            ));
        }

        match tokio::fs::write(&path, content).await {
            Ok(()) => {
                info!(path = %path.display(), bytes = content.len(), "File written");
                Ok(ToolResult::success(
                    &call.id,
                    format!("Wrote {} bytes to {}", content.len(), path.display()),
                ))
            }
            Err(e) => Ok(ToolResult::error(
                &call.id,
                format!("Failed to write '{}': {e}", path.display()),
            )),
        }
    }
}

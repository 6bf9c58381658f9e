use crate::tool::{Tool, ToolDescriptor};
use async_trait::async_trait;
use reelcraft_core::{ReelcraftResult, ToolCall, ToolResult};
use reqwest::Url;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

/// Hosts that serve HTML pages instead of image bytes, matched as substrings
/// of the URL host.
const HTML_HOSTS: [&str; 8] = [
    "instagram.com",
    "facebook.com",
    "twitter.com",
    "x.com",
    "linkedin.com",
    "pinterest.com",
    "tiktok.com",
    "youtube.com",
];

/// Image file extensions, matched as substrings of the URL path.
const IMAGE_EXTENSIONS: [&str; 8] = [
    ".jpg", ".jpeg", ".png", ".gif", ".bmp", ".webp", ".svg", ".tiff",
];

/// Path segments that indicate an image endpoint even without an extension.
const IMAGE_PATH_SEGMENTS: [&str; 5] = ["/image/", "/img/", "/photo/", "/picture/", "/media/"];

/// Some CDNs refuse requests without a browser-like User-Agent.
const BROWSER_UA: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                          (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(15);

/// Decide whether `url` is plausibly a direct image resource.
///
/// Pure string classification, no network access. The host blocklist is
/// checked first and dominates: a social-media page URL is rejected even if
/// its path mentions an image extension.
pub fn is_direct_image_url(url: &str) -> bool {
    let Ok(parsed) = Url::parse(url) else {
        return false;
    };

    let host = parsed.host_str().unwrap_or("").to_lowercase();
    if HTML_HOSTS.iter().any(|blocked| host.contains(blocked)) {
        return false;
    }

    let path = parsed.path().to_lowercase();
    if IMAGE_EXTENSIONS.iter().any(|ext| path.contains(ext)) {
        return true;
    }

    IMAGE_PATH_SEGMENTS.iter().any(|seg| path.contains(seg))
}

/// Outcome of one download attempt. Created once, never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadOutcome {
    /// The image was written to this path.
    Saved(PathBuf),
    /// The URL failed classification; no network call was made.
    InvalidUrl,
    /// Transport failure, timeout, or non-success HTTP status.
    Network(String),
    /// The response was not an image; carries the offending content-type.
    NotAnImage(String),
    /// Anything else, e.g. a filesystem failure while writing.
    Failed(String),
}

impl DownloadOutcome {
    /// Whether the attempt produced a file on disk.
    pub fn is_saved(&self) -> bool {
        matches!(self, DownloadOutcome::Saved(_))
    }

    /// Human-readable status line for the engine.
    pub fn message(&self, url: &str) -> String {
        match self {
            DownloadOutcome::Saved(path) => {
                format!("Image downloaded successfully to {}", path.display())
            }
            DownloadOutcome::InvalidUrl => format!(
                "Invalid image URL: {url}. This looks like a page URL, not a direct \
                 image URL. Use direct image links (ending in .jpg, .png, etc.) or \
                 stock photo sites."
            ),
            DownloadOutcome::Network(detail) => {
                format!("Failed to download image from {url}: network error - {detail}")
            }
            DownloadOutcome::NotAnImage(content_type) => format!(
                "URL does not return an image: {url} (content-type: {content_type}). \
                 This appears to be an HTML page; use direct image URLs."
            ),
            DownloadOutcome::Failed(detail) => {
                format!("Failed to download image from {url}: {detail}")
            }
        }
    }
}

/// Downloads reference images into a brand's mood board folder.
///
/// One GET per call, no retries; every failure mode is absorbed into a
/// [`DownloadOutcome`] — this type never propagates an error to its caller.
pub struct MoodBoardImageTool {
    descriptor: ToolDescriptor,
    client: reqwest::Client,
}

impl MoodBoardImageTool {
    /// Tool with the standard 15-second request timeout.
    pub fn new() -> Self {
        Self::with_timeout(DOWNLOAD_TIMEOUT)
    }

    /// Tool with a custom request timeout.
    pub fn with_timeout(timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            descriptor: ToolDescriptor {
                name: "mood_board_image".to_string(),
                description: "Downloads an image from a URL and saves it to a mood board \
                              folder for video production. Only use direct image URLs \
                              (ending in .jpg, .png, etc.) or stock photo URLs. Do NOT use \
                              social media page URLs (Instagram, Facebook, etc.); they will \
                              not work."
                    .to_string(),
                parameters_schema: serde_json::json!({
                    "type": "object",
                    "properties": {
                        "image_url": {
                            "type": "string",
                            "description": "Direct URL of the image to download"
                        },
                        "save_path": {
                            "type": "string",
                            "description": "Directory to save the image into (created if missing)"
                        }
                    },
                    "required": ["image_url", "save_path"]
                }),
            },
            client,
        }
    }

    /// Fetch `url` and store the body under `dest_dir`.
    pub async fn download(&self, url: &str, dest_dir: &Path) -> DownloadOutcome {
        if !is_direct_image_url(url) {
            debug!(url = %url, "URL rejected by classifier");
            return DownloadOutcome::InvalidUrl;
        }

        if let Err(e) = tokio::fs::create_dir_all(dest_dir).await {
            return DownloadOutcome::Failed(format!(
                "could not create {}: {e}",
                dest_dir.display()
            ));
        }

        let response = match self
            .client
            .get(url)
            .header(reqwest::header::USER_AGENT, BROWSER_UA)
            .send()
            .await
        {
            Ok(r) => r,
            Err(e) => return DownloadOutcome::Network(e.to_string()),
        };
        let response = match response.error_for_status() {
            Ok(r) => r,
            Err(e) => return DownloadOutcome::Network(e.to_string()),
        };

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_lowercase();
        if !content_type.starts_with("image/") {
            return DownloadOutcome::NotAnImage(content_type);
        }

        let filename =
            filename_from_url(url).unwrap_or_else(|| fallback_filename(&content_type));
        let path = resolve_collision(dest_dir, &filename).await;

        let bytes = match response.bytes().await {
            Ok(b) => b,
            Err(e) => return DownloadOutcome::Network(e.to_string()),
        };

        match tokio::fs::write(&path, &bytes).await {
            Ok(()) => {
                info!(url = %url, path = %path.display(), bytes = bytes.len(), "Mood board image saved");
                DownloadOutcome::Saved(path)
            }
            Err(e) => {
                DownloadOutcome::Failed(format!("could not write {}: {e}", path.display()))
            }
        }
    }
}

impl Default for MoodBoardImageTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Tool for MoodBoardImageTool {
    fn descriptor(&self) -> &ToolDescriptor {
        &self.descriptor
    }

    async fn execute(&self, call: ToolCall) -> ReelcraftResult<ToolResult> {
        let url = call.arguments["image_url"]
            .as_str()
            .unwrap_or_default()
            .to_string();
        let save_path = call.arguments["save_path"]
            .as_str()
            .unwrap_or_default()
            .to_string();

        if url.is_empty() || save_path.is_empty() {
            return Ok(ToolResult::error(
                &call.id,
                "Both 'image_url' and 'save_path' are required",
            ));
        }

        let outcome = self.download(&url, Path::new(&save_path)).await;
        let message = outcome.message(&url);
        if outcome.is_saved() {
            Ok(ToolResult::success(&call.id, message))
        } else {
            Ok(ToolResult::error(&call.id, message))
        }
    }
}

/// Derive a filename from the URL path, or `None` when the last segment does
/// not look like a real filename (empty, no dot, or trailing dot).
fn filename_from_url(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let path = parsed.path().trim_end_matches('/');
    let segment = path.rsplit('/').next().unwrap_or("");

    if segment.is_empty() || !segment.contains('.') || segment.ends_with('.') {
        return None;
    }
    Some(segment.to_string())
}

/// Synthesize `mood_image_<unix_timestamp><ext>`, inferring the extension
/// from the content-type.
fn fallback_filename(content_type: &str) -> String {
    let ext = if content_type.contains("jpeg") || content_type.contains("jpg") {
        ".jpg"
    } else if content_type.contains("png") {
        ".png"
    } else if content_type.contains("gif") {
        ".gif"
    } else if content_type.contains("webp") {
        ".webp"
    } else {
        ".jpg"
    };
    format!("mood_image_{}{ext}", chrono::Utc::now().timestamp())
}

/// If a directory squats on the target name, append `_img` to the whole
/// filename. One pass only; a further collision proceeds regardless.
async fn resolve_collision(dir: &Path, filename: &str) -> PathBuf {
    let candidate = dir.join(filename);
    match tokio::fs::metadata(&candidate).await {
        Ok(meta) if meta.is_dir() => dir.join(format!("{filename}_img")),
        _ => candidate,
    }
}

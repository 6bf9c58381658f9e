#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Integration tests for reelcraft-tools.
//!
//! Exercises the mood-board downloader end to end against a mock HTTP server:
//! happy path, content-type rejection, synthesized filenames, directory
//! collisions, HTTP errors, and timeouts — plus the web search tool's wire
//! format.

use reelcraft_core::ToolCall;
use reelcraft_tools::{DownloadOutcome, MoodBoardImageTool, Tool, WebSearchTool};
use std::time::Duration;
use wiremock::matchers::{body_json, header, header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PNG_BYTES: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0];

// ---------------------------------------------------------------------------
// Mood board downloads
// ---------------------------------------------------------------------------

#[tokio::test]
async fn download_saves_file_named_from_url_path() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/a/b/photo.png"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "image/png")
                .set_body_bytes(PNG_BYTES),
        )
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let tool = MoodBoardImageTool::new();
    let url = format!("{}/a/b/photo.png", server.uri());

    let outcome = tool.download(&url, dir.path()).await;
    let expected = dir.path().join("photo.png");
    assert_eq!(outcome, DownloadOutcome::Saved(expected.clone()));
    assert_eq!(std::fs::read(expected).unwrap(), PNG_BYTES);
}

#[tokio::test]
async fn download_sends_browser_user_agent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/img/banner.jpg"))
        .and(header_exists("user-agent"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "image/jpeg")
                .set_body_bytes(PNG_BYTES),
        )
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let tool = MoodBoardImageTool::new();
    let url = format!("{}/img/banner.jpg", server.uri());
    let outcome = tool.download(&url, dir.path()).await;
    assert!(outcome.is_saved(), "{outcome:?}");
}

#[tokio::test]
async fn html_response_is_not_an_image_and_writes_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/gallery/shot.png"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw("<html>not an image</html>", "text/html; charset=utf-8"),
        )
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let tool = MoodBoardImageTool::new();
    let url = format!("{}/gallery/shot.png", server.uri());

    let outcome = tool.download(&url, dir.path()).await;
    assert_eq!(
        outcome,
        DownloadOutcome::NotAnImage("text/html; charset=utf-8".to_string())
    );
    assert!(std::fs::read_dir(dir.path()).unwrap().next().is_none());
}

#[tokio::test]
async fn trailing_slash_path_synthesizes_filename() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/media/photos/"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "image/webp")
                .set_body_bytes(PNG_BYTES),
        )
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let tool = MoodBoardImageTool::new();
    let url = format!("{}/media/photos/", server.uri());

    let outcome = tool.download(&url, dir.path()).await;
    let DownloadOutcome::Saved(saved) = outcome else {
        panic!("expected Saved, got {outcome:?}");
    };
    let name = saved.file_name().unwrap().to_str().unwrap();
    assert!(name.starts_with("mood_image_"), "unexpected name {name}");
    assert!(name.ends_with(".webp"), "unexpected name {name}");
    let digits = &name["mood_image_".len()..name.len() - ".webp".len()];
    assert!(
        !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()),
        "timestamp part not numeric in {name}"
    );
}

#[tokio::test]
async fn directory_collision_appends_suffix_once() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/shots/photo.png"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "image/png")
                .set_body_bytes(PNG_BYTES),
        )
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    // A subdirectory squatting on the derived filename.
    std::fs::create_dir(dir.path().join("photo.png")).unwrap();

    let tool = MoodBoardImageTool::new();
    let url = format!("{}/shots/photo.png", server.uri());
    let outcome = tool.download(&url, dir.path()).await;

    let expected = dir.path().join("photo.png_img");
    assert_eq!(outcome, DownloadOutcome::Saved(expected.clone()));
    assert!(expected.is_file());
    assert!(dir.path().join("photo.png").is_dir());
}

#[tokio::test]
async fn http_error_status_is_a_network_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/gone/logo.png"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let tool = MoodBoardImageTool::new();
    let url = format!("{}/gone/logo.png", server.uri());

    match tool.download(&url, dir.path()).await {
        DownloadOutcome::Network(detail) => assert!(detail.contains("404"), "{detail}"),
        other => panic!("expected Network, got {other:?}"),
    }
    // The directory was created (step 2) but stays empty.
    assert!(std::fs::read_dir(dir.path()).unwrap().next().is_none());
}

#[tokio::test]
async fn slow_server_times_out_without_writing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/slow/pic.jpg"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "image/jpeg")
                .set_body_bytes(PNG_BYTES)
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let tool = MoodBoardImageTool::with_timeout(Duration::from_millis(250));
    let url = format!("{}/slow/pic.jpg", server.uri());

    match tool.download(&url, dir.path()).await {
        DownloadOutcome::Network(_) => {}
        other => panic!("expected Network, got {other:?}"),
    }
    assert!(std::fs::read_dir(dir.path()).unwrap().next().is_none());
}

#[tokio::test]
async fn tool_interface_reports_saved_path() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/assets/hero.png"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "image/png")
                .set_body_bytes(PNG_BYTES),
        )
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let tool = MoodBoardImageTool::new();
    let call = ToolCall {
        id: "mb1".to_string(),
        name: "mood_board_image".to_string(),
        arguments: serde_json::json!({
            "image_url": format!("{}/assets/hero.png", server.uri()),
            "save_path": dir.path().to_str().unwrap(),
        }),
    };

    let result = tool.execute(call).await.unwrap();
    assert!(!result.is_error, "{}", result.content);
    assert!(result.content.contains("hero.png"));
}

#[tokio::test]
async fn tool_interface_flags_social_urls_as_errors() {
    let dir = tempfile::tempdir().unwrap();
    let tool = MoodBoardImageTool::new();
    let call = ToolCall {
        id: "mb2".to_string(),
        name: "mood_board_image".to_string(),
        arguments: serde_json::json!({
            "image_url": "https://www.instagram.com/p/abc123/",
            "save_path": dir.path().to_str().unwrap(),
        }),
    };

    let result = tool.execute(call).await.unwrap();
    assert!(result.is_error);
    assert!(result.content.contains("Invalid image URL"));
}

// ---------------------------------------------------------------------------
// Web search
// ---------------------------------------------------------------------------

#[tokio::test]
async fn web_search_posts_key_and_renders_results() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/search"))
        .and(header("X-API-KEY", "secret-key"))
        .and(body_json(serde_json::json!({"q": "pizza post brand", "num": 5})))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "organic": [
                {"title": "Pizza Post", "link": "https://pizzapost.example", "snippet": "Wood-fired."}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let tool = WebSearchTool::with_endpoint("secret-key", format!("{}/search", server.uri()));
    let call = ToolCall {
        id: "ws1".to_string(),
        name: "web_search".to_string(),
        arguments: serde_json::json!({"query": "pizza post brand"}),
    };

    let result = tool.execute(call).await.unwrap();
    assert!(!result.is_error, "{}", result.content);
    assert!(result.content.contains("1. Pizza Post"));
    assert!(result.content.contains("https://pizzapost.example"));
}

#[tokio::test]
async fn web_search_surfaces_api_errors() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/search"))
        .respond_with(
            ResponseTemplate::new(403).set_body_json(serde_json::json!({"message": "bad key"})),
        )
        .mount(&server)
        .await;

    let tool = WebSearchTool::with_endpoint("wrong", format!("{}/search", server.uri()));
    let call = ToolCall {
        id: "ws2".to_string(),
        name: "web_search".to_string(),
        arguments: serde_json::json!({"query": "anything"}),
    };

    let result = tool.execute(call).await.unwrap();
    assert!(result.is_error);
    assert!(result.content.contains("403"));
}

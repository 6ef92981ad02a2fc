//! Tests for the YouTube client wire format

use super::client::{provider_error, CommentThreadResponse, SearchResponse};
use super::*;
use crate::config::YoutubeConfig;
use crate::error::{AppError, ProviderErrorKind};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

#[test]
fn test_search_response_parsing() {
    let json = r#"{
        "kind": "youtube#searchListResponse",
        "items": [
            {
                "id": {"kind": "youtube#video", "videoId": "abc123"},
                "snippet": {"title": "Funny cats", "description": "Compilation", "channelTitle": "Cats"}
            },
            {
                "id": {"kind": "youtube#channel", "channelId": "UC1"},
                "snippet": {"title": "Cat channel", "description": ""}
            },
            {
                "id": {"kind": "youtube#video", "videoId": "def456"},
                "snippet": {"title": "Cat facts"}
            }
        ]
    }"#;

    let resp: SearchResponse = serde_json::from_str(json).unwrap();
    let videos = resp.into_videos();

    assert_eq!(videos.len(), 2);
    assert_eq!(videos[0], Video::new("abc123", "Funny cats", "Compilation"));
    assert_eq!(videos[1].video_id, "def456");
    assert_eq!(videos[1].description, "");
}

#[test]
fn test_search_response_without_items() {
    let resp: SearchResponse = serde_json::from_str(r#"{"kind": "youtube#searchListResponse"}"#).unwrap();
    assert!(resp.into_videos().is_empty());
}

#[test]
fn test_comment_threads_parsing() {
    let json = r#"{
        "items": [
            {"snippet": {"videoId": "abc", "topLevelComment": {"snippet": {"textDisplay": "<b>Great</b>", "textOriginal": "Great"}}}},
            {"snippet": {"videoId": "abc", "topLevelComment": {"snippet": {"textOriginal": "Meh."}}}}
        ]
    }"#;

    let resp: CommentThreadResponse = serde_json::from_str(json).unwrap();
    assert_eq!(resp.into_comments(), vec!["Great".to_string(), "Meh.".to_string()]);
}

#[test]
fn test_comment_threads_empty() {
    let resp: CommentThreadResponse = serde_json::from_str("{}").unwrap();
    assert!(resp.into_comments().is_empty());
}

#[test]
fn test_provider_error_from_quota_payload() {
    let body = r#"{
        "error": {
            "code": 403,
            "message": "The request cannot be completed because you have exceeded your quota.",
            "errors": [{"domain": "youtube.quota", "reason": "quotaExceeded"}]
        }
    }"#;

    let err = provider_error(403, body);
    assert_eq!(err.provider_kind(), Some(ProviderErrorKind::QuotaExceeded));
    assert!(err.to_string().contains("exceeded your quota"));
}

#[test]
fn test_provider_error_from_comments_disabled() {
    let body = r#"{"error": {"code": 403, "message": "disabled", "errors": [{"reason": "commentsDisabled"}]}}"#;
    let err = provider_error(403, body);
    assert_eq!(err.provider_kind(), Some(ProviderErrorKind::CommentsDisabled));
}

#[test]
fn test_provider_error_from_invalid_key() {
    let body = r#"{"error": {"code": 400, "message": "API key not valid. Please pass a valid API key.", "errors": [{"reason": "badRequest"}, {"reason": "keyInvalid"}]}}"#;
    let err = provider_error(400, body);
    assert_eq!(err.provider_kind(), Some(ProviderErrorKind::InvalidKey));

    let body = r#"{"error": {"code": 400, "message": "API key not valid.", "errors": [{"reason": "badRequest"}]}}"#;
    let err = provider_error(400, body);
    assert_eq!(err.provider_kind(), Some(ProviderErrorKind::InvalidKey));

    let body = r#"{"error": {"code": 400, "message": "Invalid parameter", "errors": [{"reason": "badRequest"}]}}"#;
    let err = provider_error(400, body);
    assert_eq!(err.provider_kind(), Some(ProviderErrorKind::Other));
}

#[test]
fn test_provider_error_from_plain_body() {
    let err = provider_error(404, "Not Found\n");
    match err {
        AppError::Provider { kind, status, message } => {
            assert_eq!(kind, ProviderErrorKind::NotFound);
            assert_eq!(status, 404);
            assert_eq!(message, "Not Found");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_client_requires_api_key() {
    let config = YoutubeConfig::default();
    match YouTubeClient::new(&config) {
        Err(AppError::Config(msg)) => assert!(msg.contains("API key")),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("client built without API key"),
    }
}

#[test]
fn test_client_with_api_key() {
    let config = YoutubeConfig {
        api_key: "test-key".to_string(),
        ..YoutubeConfig::default()
    };
    assert!(YouTubeClient::new(&config).is_ok());
}

/// Answer one HTTP request with `body` and yield the request line
async fn serve_once(body: &'static str) -> (String, tokio::task::JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&buf[..n]);
        }

        let response = format!(
            "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
            body.len(),
            body
        );
        socket.write_all(response.as_bytes()).await.unwrap();

        let request = String::from_utf8_lossy(&request).into_owned();
        request.lines().next().unwrap_or_default().to_string()
    });

    (base_url, handle)
}

fn client_for(base_url: String, max_comments: u32) -> YouTubeClient {
    YouTubeClient::new(&YoutubeConfig {
        api_key: "k".to_string(),
        base_url,
        max_comments,
        ..YoutubeConfig::default()
    })
    .unwrap()
}

#[tokio::test]
async fn test_comment_request_caps_max_results() {
    let (base_url, server) = serve_once(r#"{"items": []}"#).await;
    let client = client_for(base_url, 500);

    assert!(client.fetch_comments("vid").await.unwrap().is_empty());

    let request_line = server.await.unwrap();
    assert!(request_line.starts_with("GET /commentThreads?"), "{request_line}");
    assert!(request_line.contains("videoId=vid"), "{request_line}");
    assert!(request_line.contains("maxResults=100"), "{request_line}");
}

#[tokio::test]
async fn test_comment_request_raises_zero_to_one() {
    let (base_url, server) = serve_once(r#"{"items": []}"#).await;
    let client = client_for(base_url, 0);

    client.fetch_comments("vid").await.unwrap();

    let request_line = server.await.unwrap();
    assert!(request_line.contains("maxResults=1&"), "{request_line}");
}

#[tokio::test]
async fn test_search_request_caps_max_results() {
    let (base_url, server) = serve_once(r#"{"items": []}"#).await;
    let client = client_for(base_url, 100);

    assert!(client.search_videos("cats", 80).await.unwrap().is_empty());

    let request_line = server.await.unwrap();
    assert!(request_line.starts_with("GET /search?"), "{request_line}");
    assert!(
        request_line.contains(&format!("maxResults={}&", MAX_SEARCH_RESULTS)),
        "{request_line}"
    );
}

#[tokio::test]
async fn test_comment_request_keeps_configured_limit() {
    let (base_url, server) = serve_once(r#"{"items": []}"#).await;
    let client = client_for(base_url, 20);

    client.fetch_comments("vid").await.unwrap();

    let request_line = server.await.unwrap();
    assert!(request_line.contains("maxResults=20&"), "{request_line}");
    assert_eq!(MAX_COMMENTS_PER_REQUEST, 100);
}

#[test]
fn test_video_url() {
    let video = Video::new("dQw4w9WgXcQ", "t", "d");
    assert_eq!(video.url(), "https://www.youtube.com/watch?v=dQw4w9WgXcQ");
}

#[test]
fn test_video_serialization_shape() {
    let video = Video::new("abc", "Title", "Desc");
    let json = serde_json::to_value(&video).unwrap();
    assert_eq!(json["video_id"], "abc");
    assert_eq!(json["title"], "Title");
    assert_eq!(json["description"], "Desc");
}

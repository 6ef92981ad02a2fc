//! HTTP client for the YouTube Data API v3
//!
//! Uses the `search` and `commentThreads` list endpoints with API-key auth.

use super::{CommentSource, Video, VideoSearch};
use crate::config::YoutubeConfig;
use crate::error::{AppError, ProviderErrorKind, Result};
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::Deserialize;
use std::time::Duration;

/// Largest `maxResults` accepted by `commentThreads`
pub const MAX_COMMENTS_PER_REQUEST: u32 = 100;

/// Largest `maxResults` accepted by `search`
pub const MAX_SEARCH_RESULTS: u32 = 50;

/// YouTube Data API client
pub struct YouTubeClient {
    http: Client,
    base_url: String,
    api_key: String,
    max_comments: u32,
}

#[derive(Debug, Deserialize)]
pub(super) struct SearchResponse {
    #[serde(default)]
    pub items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
pub(super) struct SearchItem {
    pub id: SearchItemId,
    pub snippet: SearchSnippet,
}

#[derive(Debug, Deserialize)]
pub(super) struct SearchItemId {
    #[serde(rename = "videoId")]
    pub video_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct SearchSnippet {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct CommentThreadResponse {
    #[serde(default)]
    pub items: Vec<CommentThread>,
}

#[derive(Debug, Deserialize)]
pub(super) struct CommentThread {
    pub snippet: CommentThreadSnippet,
}

#[derive(Debug, Deserialize)]
pub(super) struct CommentThreadSnippet {
    #[serde(rename = "topLevelComment")]
    pub top_level_comment: TopLevelComment,
}

#[derive(Debug, Deserialize)]
pub(super) struct TopLevelComment {
    pub snippet: CommentSnippet,
}

#[derive(Debug, Deserialize)]
pub(super) struct CommentSnippet {
    #[serde(rename = "textOriginal", default)]
    pub text_original: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct ErrorEnvelope {
    pub error: ErrorBody,
}

#[derive(Debug, Deserialize)]
pub(super) struct ErrorBody {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub errors: Vec<ErrorDetail>,
}

#[derive(Debug, Deserialize)]
pub(super) struct ErrorDetail {
    pub reason: Option<String>,
}

impl SearchResponse {
    /// Convert to videos, skipping results that are not videos
    pub(super) fn into_videos(self) -> Vec<Video> {
        self.items
            .into_iter()
            .filter_map(|item| {
                let video_id = item.id.video_id?;
                Some(Video {
                    video_id,
                    title: item.snippet.title,
                    description: item.snippet.description,
                })
            })
            .collect()
    }
}

impl CommentThreadResponse {
    pub(super) fn into_comments(self) -> Vec<String> {
        self.items
            .into_iter()
            .map(|thread| thread.snippet.top_level_comment.snippet.text_original)
            .collect()
    }
}

/// Build a provider error from a failed response body
pub(super) fn provider_error(status: u16, body: &str) -> AppError {
    let (reasons, message) = match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => {
            let reasons: Vec<String> = envelope
                .error
                .errors
                .into_iter()
                .filter_map(|detail| detail.reason)
                .collect();
            (reasons, envelope.error.message)
        }
        Err(_) => (Vec::new(), body.trim().to_string()),
    };

    let mut kind = reasons
        .iter()
        .map(|reason| ProviderErrorKind::classify(status, Some(reason)))
        .find(|kind| *kind != ProviderErrorKind::Other)
        .unwrap_or_else(|| ProviderErrorKind::classify(status, None));

    // Invalid keys come back as a generic 400 "badRequest"
    if kind == ProviderErrorKind::Other && status == 400 && message.contains("API key") {
        kind = ProviderErrorKind::InvalidKey;
    }

    AppError::Provider {
        kind,
        status,
        message,
    }
}

impl YouTubeClient {
    /// Create a new client. Fails if no API key is configured.
    pub fn new(config: &YoutubeConfig) -> Result<Self> {
        if config.api_key.trim().is_empty() {
            return Err(AppError::Config(
                "YouTube API key is not set (API_KEY or youtube.api_key)".to_string(),
            ));
        }

        let max_comments = config.max_comments.clamp(1, MAX_COMMENTS_PER_REQUEST);
        if max_comments != config.max_comments {
            tracing::warn!(
                "youtube.max_comments = {} is outside 1..={}; using {}",
                config.max_comments,
                MAX_COMMENTS_PER_REQUEST,
                max_comments
            );
        }

        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            max_comments,
        })
    }

    async fn check(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let err = provider_error(status.as_u16(), &body);
        tracing::warn!("YouTube API request failed: {}", err);
        Err(err)
    }
}

#[async_trait]
impl VideoSearch for YouTubeClient {
    async fn search_videos(&self, query: &str, max_results: u32) -> Result<Vec<Video>> {
        let url = format!("{}/search", self.base_url);
        let max_results = max_results.clamp(1, MAX_SEARCH_RESULTS);
        tracing::debug!("Searching videos for {:?} (max {})", query, max_results);
        let max_results = max_results.to_string();

        let response = self
            .http
            .get(&url)
            .query(&[
                ("part", "snippet"),
                ("q", query),
                ("type", "video"),
                ("order", "relevance"),
                ("maxResults", max_results.as_str()),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .await?;

        let resp: SearchResponse = Self::check(response).await?.json().await?;
        Ok(resp.into_videos())
    }
}

#[async_trait]
impl CommentSource for YouTubeClient {
    async fn fetch_comments(&self, video_id: &str) -> Result<Vec<String>> {
        let url = format!("{}/commentThreads", self.base_url);
        tracing::debug!("Fetching comments for video {}", video_id);
        let max_results = self.max_comments.to_string();

        let response = self
            .http
            .get(&url)
            .query(&[
                ("part", "snippet"),
                ("videoId", video_id),
                ("maxResults", max_results.as_str()),
                ("textFormat", "plainText"),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .await?;

        let resp: CommentThreadResponse = Self::check(response).await?.json().await?;
        let comments = resp.into_comments();
        tracing::debug!("Fetched {} comments for video {}", comments.len(), video_id);
        Ok(comments)
    }
}

//! YouTube Data API access
//!
//! Two collaborators the pipeline depends on:
//! - `VideoSearch`: topic search returning video metadata
//! - `CommentSource`: top-level comments of one video
//!
//! Both are traits so tests can substitute mocks for the HTTP client.

mod client;
#[cfg(test)]
mod tests;

pub use client::{YouTubeClient, MAX_COMMENTS_PER_REQUEST, MAX_SEARCH_RESULTS};

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Video metadata returned by a topic search
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Video {
    pub video_id: String,
    pub title: String,
    pub description: String,
}

impl Video {
    pub fn new(
        video_id: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            video_id: video_id.into(),
            title: title.into(),
            description: description.into(),
        }
    }

    /// Watch page URL
    pub fn url(&self) -> String {
        format!("https://www.youtube.com/watch?v={}", self.video_id)
    }
}

/// Source of viewer comments for a video
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommentSource: Send + Sync {
    /// Fetch up to the configured maximum of top-level comments.
    /// An empty vector means the video has no comments.
    async fn fetch_comments(&self, video_id: &str) -> Result<Vec<String>>;
}

/// Topic search over the video platform
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VideoSearch: Send + Sync {
    /// Videos matching `query`, ordered by relevance
    async fn search_videos(&self, query: &str, max_results: u32) -> Result<Vec<Video>>;
}

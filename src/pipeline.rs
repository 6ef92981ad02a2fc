//! Topic analysis pipeline
//!
//! Searches videos for a topic and runs the aggregator on each one in order.

use crate::error::{AppError, Result};
use crate::sentiment::{AnalysisResult, SentimentAggregator};
use crate::youtube::VideoSearch;
use std::sync::Arc;

/// Outcome of analyzing a topic
#[derive(Debug, Clone, PartialEq)]
pub enum TopicAnalysis {
    /// One result per video, in search order
    Analyzed(Vec<AnalysisResult>),
    /// The search returned no videos
    NoVideos,
}

impl TopicAnalysis {
    pub fn results(&self) -> &[AnalysisResult] {
        match self {
            TopicAnalysis::Analyzed(results) => results,
            TopicAnalysis::NoVideos => &[],
        }
    }
}

/// Orchestrates search + per-video analysis
pub struct Pipeline {
    search: Arc<dyn VideoSearch>,
    aggregator: SentimentAggregator,
    max_videos: u32,
}

impl Pipeline {
    pub fn new(search: Arc<dyn VideoSearch>, aggregator: SentimentAggregator, max_videos: u32) -> Self {
        Self {
            search,
            aggregator,
            max_videos,
        }
    }

    /// Analyze the top videos for `topic`.
    ///
    /// Videos are processed sequentially and the first provider error aborts
    /// the request, so results never mix complete and missing videos.
    pub async fn analyze_topic(&self, topic: &str, use_statistical: bool) -> Result<TopicAnalysis> {
        let topic = topic.trim();
        if topic.is_empty() {
            return Err(AppError::EmptyTopic);
        }

        if use_statistical && !self.aggregator.has_classifier() {
            tracing::warn!("No trained classifier loaded; using lexicon scoring");
        }

        let videos = self.search.search_videos(topic, self.max_videos).await?;
        if videos.is_empty() {
            tracing::info!("No videos found for {:?}", topic);
            return Ok(TopicAnalysis::NoVideos);
        }

        tracing::info!("Analyzing {} videos for {:?}", videos.len(), topic);

        let mut results = Vec::with_capacity(videos.len());
        for video in videos {
            let result = self.aggregator.analyze_video(video, use_statistical).await?;
            tracing::info!("{} -> {}", result.video.title, result.overall);
            results.push(result);
        }

        Ok(TopicAnalysis::Analyzed(results))
    }
}

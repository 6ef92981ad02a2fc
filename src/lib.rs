//! YouTube Comment Sentiment Analysis
//!
//! Searches videos for a topic, fetches their comments and reports the
//! sentiment distribution of each video.

pub mod config;
pub mod error;
pub mod pipeline;
pub mod sentiment;
pub mod youtube;

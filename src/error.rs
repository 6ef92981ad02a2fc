//! Error types for the sentiment pipeline

use std::fmt;
use thiserror::Error;

/// Category of a failure reported by the video provider
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderErrorKind {
    InvalidKey,
    QuotaExceeded,
    NotFound,
    CommentsDisabled,
    Other,
}

impl ProviderErrorKind {
    /// Classify a failed response from its HTTP status and the API's error reason
    pub fn classify(status: u16, reason: Option<&str>) -> Self {
        match reason {
            Some("keyInvalid") | Some("keyExpired") => return Self::InvalidKey,
            Some("quotaExceeded") | Some("dailyLimitExceeded") | Some("rateLimitExceeded") => {
                return Self::QuotaExceeded
            }
            Some("videoNotFound") | Some("notFound") => return Self::NotFound,
            Some("commentsDisabled") => return Self::CommentsDisabled,
            _ => {}
        }

        match status {
            401 => Self::InvalidKey,
            404 => Self::NotFound,
            429 => Self::QuotaExceeded,
            _ => Self::Other,
        }
    }
}

impl fmt::Display for ProviderErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::InvalidKey => "invalid API key",
            Self::QuotaExceeded => "quota exceeded",
            Self::NotFound => "not found",
            Self::CommentsDisabled => "comments disabled",
            Self::Other => "request failed",
        };
        f.write_str(s)
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Provider error ({kind}, HTTP {status}): {message}")]
    Provider {
        kind: ProviderErrorKind,
        status: u16,
        message: String,
    },

    #[error("Please provide a topic to search for.")]
    EmptyTopic,

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Training error: {0}")]
    Training(String),

    #[error("Model error: {0}")]
    Model(String),
}

impl AppError {
    /// Provider failure kind, if this error came from the video provider
    pub fn provider_kind(&self) -> Option<ProviderErrorKind> {
        match self {
            Self::Provider { kind, .. } => Some(*kind),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

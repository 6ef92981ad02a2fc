//! Configuration management

use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub youtube: YoutubeConfig,
    #[serde(default)]
    pub classifier: ClassifierConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct YoutubeConfig {
    /// YouTube Data API key
    #[serde(default)]
    pub api_key: String,
    /// YouTube Data API v3 endpoint
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Number of videos fetched per topic
    #[serde(default = "default_max_videos")]
    pub max_videos: u32,
    /// Maximum comments fetched per video
    #[serde(default = "default_max_comments")]
    pub max_comments: u32,
    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClassifierConfig {
    /// Path of the persisted classifier bundle
    #[serde(default = "default_model_path")]
    pub model_path: String,
}

fn default_base_url() -> String {
    "https://www.googleapis.com/youtube/v3".to_string()
}

fn default_max_videos() -> u32 {
    5
}

fn default_max_comments() -> u32 {
    100
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_model_path() -> String {
    "naive_bayes_model.json".to_string()
}

impl Default for YoutubeConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_base_url(),
            max_videos: default_max_videos(),
            max_comments: default_max_comments(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            model_path: default_model_path(),
        }
    }
}

impl ClassifierConfig {
    /// Model path with `~` expanded
    pub fn expanded_model_path(&self) -> String {
        shellexpand::tilde(&self.model_path).into_owned()
    }
}

impl Config {
    /// Load configuration from file (optional) and environment.
    ///
    /// `SENTIMENT_YOUTUBE__API_KEY` style variables override the file, and a
    /// plain `API_KEY` variable overrides both.
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::from(path.as_ref()).required(false))
            .add_source(
                config::Environment::with_prefix("SENTIMENT")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .set_override_option("youtube.api_key", std::env::var("API_KEY").ok())?
            .build()?;

        let config: Config = settings.try_deserialize()?;
        Ok(config)
    }

    /// Load from default locations
    pub fn load_default() -> anyhow::Result<Self> {
        let paths = ["config.toml", "~/.config/comment-sentiment/config.toml"];

        for path in paths {
            let expanded = shellexpand::tilde(path);
            if Path::new(expanded.as_ref()).exists() {
                return Self::load(expanded.as_ref());
            }
        }

        // Environment only
        Self::load("config.toml")
    }
}

use std::io;

use thiserror::Error;

/// Application-wide error type for the tubelist CLI.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unknown channel '{0}'")]
    UnknownChannel(String),

    #[error(
        "YouTube API key required. Set YOUTUBE_API_KEY, pass --api-key, or add `key` under [api] in the configuration file. Keys are issued at https://console.cloud.google.com/apis/credentials"
    )]
    MissingApiKey,

    #[error("'{0}' is not installed. Install it with: pip install yt-dlp")]
    ToolMissing(String),

    #[error("yt-dlp failed: {0}")]
    Tool(String),

    #[error("API request failed with status {status}: {body}")]
    Api { status: u16, body: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to parse feed: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("Failed to render report: {0}")]
    Render(#[from] std::fmt::Error),

    #[error("Failed to launch editor: {0}")]
    Editor(String),

    #[error("Failed to parse configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Failed to write configuration: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),
}

impl AppError {
    pub fn config<S: Into<String>>(msg: S) -> Self {
        AppError::Config(msg.into())
    }
}

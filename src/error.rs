use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Division by zero: engagement rate needs at least one view")]
    DivisionByZero,

    #[error("Malformed timestamp: {0:?}")]
    MalformedTimestamp(String),

    #[error("Malformed counter {field}: {value:?}")]
    MalformedCounter { field: &'static str, value: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("API key not set. Run `yt-analyzer init` to configure.")]
    ApiKeyMissing,

    #[error("Channel not found: {0}")]
    ChannelNotFound(String),

    #[error("No videos found for channel: {0}")]
    NoVideos(String),

    #[error("YouTube API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

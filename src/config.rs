use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use crate::error::{Error, Result};

pub const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";

pub const API_KEY_VAR: &str = "YOUTUBE_API_KEY";
pub const CHANNEL_ID_VAR: &str = "YOUTUBE_CHANNEL_ID";
pub const BASE_URL_VAR: &str = "YOUTUBE_API_BASE_URL";

static DATA_DIR: OnceLock<PathBuf> = OnceLock::new();

/// Get the base data directory (~/.yt-analyzer/)
pub fn data_dir() -> &'static PathBuf {
    DATA_DIR.get_or_init(|| {
        std::env::var("YT_ANALYZER_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| {
                dirs::home_dir()
                    .unwrap_or_else(|| PathBuf::from("."))
                    .join(".yt-analyzer")
            })
    })
}

/// Get the .env file path
pub fn env_file_path() -> PathBuf {
    data_dir().join(".env")
}

/// Load environment variables from the data directory's .env file
pub fn load_env() {
    let env_path = env_file_path();
    if env_path.exists() {
        let _ = dotenvy::from_path(&env_path);
    } else {
        // Try current directory as fallback
        let _ = dotenvy::dotenv();
    }
}

/// Settings for talking to the YouTube Data API
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub api_key: String,
    /// Channel analyzed when none is given on the command line
    pub channel_id: Option<String>,
    pub base_url: String,
}

impl Config {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            channel_id: None,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Build from the process environment (after [`load_env`])
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any variable lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let api_key = get(API_KEY_VAR).ok_or(Error::ApiKeyMissing)?;

        Ok(Self {
            api_key,
            channel_id: get(CHANNEL_ID_VAR),
            base_url: get(BASE_URL_VAR)
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        })
    }

    /// The channel to analyze: the explicit argument, else the configured default
    pub fn channel_or_default(&self, channel: Option<&str>) -> Result<String> {
        channel
            .map(String::from)
            .or_else(|| self.channel_id.clone())
            .ok_or_else(|| {
                Error::Config(format!(
                    "No channel given. Pass one on the command line or set {}.",
                    CHANNEL_ID_VAR
                ))
            })
    }
}

/// Create the data directory if it doesn't exist
pub fn ensure_data_dir() -> Result<()> {
    std::fs::create_dir_all(data_dir())?;
    Ok(())
}

/// Write a .env file holding the API key and optional default channel
pub fn write_env_file(path: &Path, api_key: &str, channel_id: Option<&str>) -> Result<()> {
    let mut contents = format!("{}={}\n", API_KEY_VAR, api_key);
    if let Some(channel) = channel_id {
        contents.push_str(&format!("{}={}\n", CHANNEL_ID_VAR, channel));
    }
    std::fs::write(path, contents)?;
    Ok(())
}

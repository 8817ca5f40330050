use std::collections::HashMap;
use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;
use reqwest::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::video::RawVideoRecord;

/// Largest page the Data API hands out for list endpoints
const MAX_PAGE_SIZE: usize = 50;

static CHANNEL_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^UC[A-Za-z0-9_-]{22}$").expect("valid channel id regex"));

static CHANNEL_URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"youtube\.com/(?:channel/(UC[A-Za-z0-9_-]{22})|(@[A-Za-z0-9._-]+))")
        .expect("valid channel url regex")
});

static HANDLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^@[A-Za-z0-9._-]+$").expect("valid handle regex"));

/// A channel as the user named it
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelRef {
    Id(String),
    Handle(String),
}

impl ChannelRef {
    /// Accepts `UC...` ids, `@handles`, and youtube.com channel or handle URLs
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();

        if CHANNEL_ID_RE.is_match(input) {
            return Ok(Self::Id(input.to_string()));
        }
        if HANDLE_RE.is_match(input) {
            return Ok(Self::Handle(input.to_string()));
        }
        if let Some(caps) = CHANNEL_URL_RE.captures(input) {
            if let Some(id) = caps.get(1) {
                return Ok(Self::Id(id.as_str().to_string()));
            }
            if let Some(handle) = caps.get(2) {
                return Ok(Self::Handle(handle.as_str().to_string()));
            }
        }

        Err(Error::Config(format!(
            "Unrecognized channel '{}'. Use a channel ID (UC...), @handle, or channel URL.",
            input
        )))
    }

    fn query(&self) -> (&'static str, &str) {
        match self {
            Self::Id(id) => ("id", id.as_str()),
            Self::Handle(handle) => ("forHandle", handle.as_str()),
        }
    }

    fn as_str(&self) -> &str {
        match self {
            Self::Id(s) | Self::Handle(s) => s,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ListResponse<T> {
    #[serde(default = "Vec::new")]
    items: Vec<T>,
    #[serde(rename = "nextPageToken")]
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChannelItem {
    content_details: ChannelContentDetails,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChannelContentDetails {
    related_playlists: RelatedPlaylists,
}

#[derive(Debug, Deserialize)]
struct RelatedPlaylists {
    uploads: String,
}

#[derive(Debug, Deserialize)]
struct PlaylistItem {
    snippet: PlaylistItemSnippet,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlaylistItemSnippet {
    resource_id: ResourceId,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResourceId {
    video_id: String,
}

#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: Option<String>,
}

/// YouTube Data API v3 client
pub struct YouTubeClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl YouTubeClient {
    pub fn new(config: &Config) -> Result<Self> {
        if config.api_key.is_empty() {
            return Err(Error::ApiKeyMissing);
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// GET an API endpoint and decode the JSON body
    async fn get<T: DeserializeOwned>(&self, endpoint: &str, params: &[(&str, &str)]) -> Result<T> {
        debug!(endpoint, ?params, "YouTube API request");

        let response = self
            .client
            .get(format!("{}/{}", self.base_url, endpoint))
            .query(params)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorResponse>(&text)
                .ok()
                .and_then(|e| e.error.message)
                .unwrap_or(text);
            return Err(Error::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json().await?)
    }

    /// Look up the playlist holding every upload of a channel
    pub async fn uploads_playlist(&self, channel: &ChannelRef) -> Result<String> {
        let (param, value) = channel.query();
        let response: ListResponse<ChannelItem> = self
            .get("channels", &[("part", "contentDetails"), (param, value)])
            .await?;

        let item = response
            .items
            .into_iter()
            .next()
            .ok_or_else(|| Error::ChannelNotFound(channel.as_str().to_string()))?;

        Ok(item.content_details.related_playlists.uploads)
    }

    /// Ids of the newest `count` videos in a playlist, following pagination
    pub async fn playlist_video_ids(&self, playlist_id: &str, count: usize) -> Result<Vec<String>> {
        let mut ids = Vec::with_capacity(count);
        let mut page_token: Option<String> = None;

        while ids.len() < count {
            let page_size = (count - ids.len()).min(MAX_PAGE_SIZE).to_string();
            let mut params = vec![
                ("part", "snippet"),
                ("playlistId", playlist_id),
                ("maxResults", page_size.as_str()),
            ];
            if let Some(token) = page_token.as_deref() {
                params.push(("pageToken", token));
            }

            let page: ListResponse<PlaylistItem> = self.get("playlistItems", &params).await?;
            let remaining = count - ids.len();
            ids.extend(
                page.items
                    .into_iter()
                    .map(|item| item.snippet.resource_id.video_id)
                    .take(remaining),
            );

            match page.next_page_token {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }

        Ok(ids)
    }

    /// Full snippet and statistics for the given videos, in the order asked for.
    /// Videos the API no longer returns (deleted, private) are skipped.
    pub async fn video_details(&self, video_ids: &[String]) -> Result<Vec<RawVideoRecord>> {
        let mut by_id = HashMap::new();

        for chunk in video_ids.chunks(MAX_PAGE_SIZE) {
            let ids = chunk.join(",");
            let response: ListResponse<RawVideoRecord> = self
                .get(
                    "videos",
                    &[("part", "snippet,statistics,contentDetails"), ("id", ids.as_str())],
                )
                .await?;

            for video in response.items {
                if let Some(id) = video.id.clone() {
                    by_id.insert(id, video);
                }
            }
        }

        Ok(video_ids.iter().filter_map(|id| by_id.remove(id)).collect())
    }

    /// Fetch the `count` most recent uploads of a channel, newest first
    pub async fn fetch_recent_videos(&self, channel: &str, count: usize) -> Result<Vec<RawVideoRecord>> {
        if count == 0 {
            return Err(Error::Config("Video count must be at least 1".to_string()));
        }

        let channel_ref = ChannelRef::parse(channel)?;
        let playlist_id = self.uploads_playlist(&channel_ref).await?;
        info!(channel, playlist_id = %playlist_id, "resolved uploads playlist");

        let ids = self.playlist_video_ids(&playlist_id, count).await?;
        if ids.is_empty() {
            return Err(Error::NoVideos(channel.to_string()));
        }

        let videos = self.video_details(&ids).await?;
        if videos.is_empty() {
            return Err(Error::NoVideos(channel.to_string()));
        }

        info!(channel, count = videos.len(), "fetched video details");
        Ok(videos)
    }
}

//! Integration tests for the YouTube client against a wiremock stand-in for the Data API

use serde_json::{json, Value};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use yt_analyzer::config::Config;
use yt_analyzer::error::Error;
use yt_analyzer::youtube::{ChannelRef, YouTubeClient};

const CHANNEL_ID: &str = "UC4Tklxku1yPcRIH0VVCKoeA";
const UPLOADS_ID: &str = "UU4Tklxku1yPcRIH0VVCKoeA";
const API_KEY: &str = "test-key";

fn client_for(server: &MockServer) -> YouTubeClient {
    let mut config = Config::new(API_KEY);
    config.base_url = format!("{}/youtube/v3", server.uri());
    YouTubeClient::new(&config).expect("client should build")
}

fn channel_response() -> Value {
    json!({
        "kind": "youtube#channelListResponse",
        "items": [{
            "id": CHANNEL_ID,
            "contentDetails": { "relatedPlaylists": { "likes": "", "uploads": UPLOADS_ID } }
        }]
    })
}

fn playlist_page(ids: &[&str], next_page_token: Option<&str>) -> Value {
    let items: Vec<Value> = ids
        .iter()
        .map(|id| json!({ "snippet": { "title": id, "resourceId": { "kind": "youtube#video", "videoId": id } } }))
        .collect();

    let mut page = json!({ "items": items });
    if let Some(token) = next_page_token {
        page["nextPageToken"] = json!(token);
    }
    page
}

fn video(id: &str, views: u64) -> Value {
    json!({
        "id": id,
        "snippet": { "title": format!("Video {}", id), "publishedAt": "2024-11-20T10:00:00Z" },
        "statistics": {
            "viewCount": views.to_string(),
            "likeCount": (views / 50).to_string(),
            "commentCount": (views / 500).to_string()
        },
        "contentDetails": { "duration": "PT10M" }
    })
}

async fn mount_channel(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/youtube/v3/channels"))
        .and(query_param("id", CHANNEL_ID))
        .and(query_param("part", "contentDetails"))
        .and(query_param("key", API_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(channel_response()))
        .mount(server)
        .await;
}

#[tokio::test]
async fn fetches_videos_in_playlist_order() {
    let server = MockServer::start().await;
    mount_channel(&server).await;

    Mock::given(method("GET"))
        .and(path("/youtube/v3/playlistItems"))
        .and(query_param("playlistId", UPLOADS_ID))
        .and(query_param("maxResults", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(playlist_page(&["c", "b", "a"], None)))
        .mount(&server)
        .await;

    // The videos endpoint doesn't promise to keep the requested order
    Mock::given(method("GET"))
        .and(path("/youtube/v3/videos"))
        .and(query_param("id", "c,b,a"))
        .and(query_param("part", "snippet,statistics,contentDetails"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [video("a", 100), video("b", 200), video("c", 300)]
        })))
        .mount(&server)
        .await;

    let videos = client_for(&server)
        .fetch_recent_videos(CHANNEL_ID, 3)
        .await
        .expect("fetch should succeed");

    let ids: Vec<_> = videos.iter().map(|v| v.id.as_deref().unwrap()).collect();
    assert_eq!(ids, ["c", "b", "a"]);

    let stats = videos[0].statistics.as_ref().unwrap();
    assert_eq!(stats.view_count.as_deref(), Some("300"));
}

#[tokio::test]
async fn follows_playlist_pagination() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/youtube/v3/playlistItems"))
        .and(query_param("maxResults", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(playlist_page(&["v1", "v2"], Some("page2"))))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/youtube/v3/playlistItems"))
        .and(query_param("maxResults", "1"))
        .and(query_param("pageToken", "page2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(playlist_page(&["v3", "v4"], Some("page3"))))
        .expect(1)
        .mount(&server)
        .await;

    let ids = client_for(&server)
        .playlist_video_ids(UPLOADS_ID, 3)
        .await
        .expect("pagination should succeed");

    assert_eq!(ids, ["v1", "v2", "v3"]);
}

#[tokio::test]
async fn stops_when_pages_run_out() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/youtube/v3/playlistItems"))
        .respond_with(ResponseTemplate::new(200).set_body_json(playlist_page(&["only"], None)))
        .expect(1)
        .mount(&server)
        .await;

    let ids = client_for(&server).playlist_video_ids(UPLOADS_ID, 10).await.unwrap();
    assert_eq!(ids, ["only"]);
}

#[tokio::test]
async fn resolves_handles() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/youtube/v3/channels"))
        .and(query_param("forHandle", "@QuantumTechHD"))
        .respond_with(ResponseTemplate::new(200).set_body_json(channel_response()))
        .mount(&server)
        .await;

    let uploads = client_for(&server)
        .uploads_playlist(&ChannelRef::Handle("@QuantumTechHD".to_string()))
        .await
        .unwrap();

    assert_eq!(uploads, UPLOADS_ID);
}

#[tokio::test]
async fn unknown_channel() {
    let server = MockServer::start().await;

    // The API omits "items" entirely when nothing matches
    Mock::given(method("GET"))
        .and(path("/youtube/v3/channels"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "kind": "youtube#channelListResponse",
            "pageInfo": { "totalResults": 0, "resultsPerPage": 5 }
        })))
        .mount(&server)
        .await;

    let result = client_for(&server).fetch_recent_videos(CHANNEL_ID, 5).await;
    assert!(matches!(result, Err(Error::ChannelNotFound(id)) if id == CHANNEL_ID));
}

#[tokio::test]
async fn empty_uploads_playlist() {
    let server = MockServer::start().await;
    mount_channel(&server).await;

    Mock::given(method("GET"))
        .and(path("/youtube/v3/playlistItems"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": [] })))
        .mount(&server)
        .await;

    let result = client_for(&server).fetch_recent_videos(CHANNEL_ID, 5).await;
    assert!(matches!(result, Err(Error::NoVideos(_))));
}

#[tokio::test]
async fn api_errors_carry_the_google_message() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/youtube/v3/channels"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": {
                "code": 400,
                "message": "API key not valid. Please pass a valid API key.",
                "errors": [{ "reason": "badRequest", "domain": "global" }]
            }
        })))
        .mount(&server)
        .await;

    let result = client_for(&server).fetch_recent_videos(CHANNEL_ID, 5).await;
    match result {
        Err(Error::Api { status, message }) => {
            assert_eq!(status, 400);
            assert_eq!(message, "API key not valid. Please pass a valid API key.");
        }
        other => panic!("expected API error, got {:?}", other),
    }
}

#[tokio::test]
async fn api_errors_without_json_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/youtube/v3/channels"))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream unavailable"))
        .mount(&server)
        .await;

    let result = client_for(&server).fetch_recent_videos(CHANNEL_ID, 5).await;
    assert!(matches!(
        result,
        Err(Error::Api { status: 503, message }) if message == "upstream unavailable"
    ));
}

#[tokio::test]
async fn zero_count_is_rejected_before_any_request() {
    let server = MockServer::start().await;

    let result = client_for(&server).fetch_recent_videos(CHANNEL_ID, 0).await;
    assert!(matches!(result, Err(Error::Config(_))));
    assert!(server.received_requests().await.unwrap_or_default().is_empty());
}

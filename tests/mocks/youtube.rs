//! Mock YouTube Data API for testing

use serde_json::json;
use wiremock::{
    matchers::{method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

use crate::common::constants::TEST_YOUTUBE_API_KEY;

/// Mock YouTube server wrapper
pub struct MockYouTube {
    server: MockServer,
}

impl MockYouTube {
    /// Start a new mock YouTube server
    pub async fn start() -> Self {
        let server = MockServer::start().await;
        Self { server }
    }

    /// Base URL to configure as the YouTube API URL
    pub fn api_url(&self) -> String {
        format!("{}/youtube/v3", self.server.uri())
    }

    /// Mock a search returning two videos and one channel
    pub async fn mock_search_success(&self, query: &str) {
        Mock::given(method("GET"))
            .and(path("/youtube/v3/search"))
            .and(query_param("q", query))
            .and(query_param("part", "snippet"))
            .and(query_param("type", "video"))
            .and(query_param("maxResults", "6"))
            .and(query_param("key", TEST_YOUTUBE_API_KEY))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "kind": "youtube#searchListResponse",
                "items": [
                    {
                        "id": {"kind": "youtube#video", "videoId": "vid1"},
                        "snippet": {
                            "title": "Cats compilation",
                            "thumbnails": {
                                "default": {"url": "https://i.ytimg.com/vi/vid1/default.jpg"},
                                "medium": {"url": "https://i.ytimg.com/vi/vid1/mqdefault.jpg"}
                            }
                        }
                    },
                    {
                        "id": {"kind": "youtube#video", "videoId": "vid2"},
                        "snippet": {
                            "title": "More cats",
                            "thumbnails": {
                                "default": {"url": "https://i.ytimg.com/vi/vid2/default.jpg"}
                            }
                        }
                    },
                    {
                        "id": {"kind": "youtube#channel", "channelId": "UCcats"},
                        "snippet": {"title": "Cat channel", "thumbnails": {}}
                    }
                ]
            })))
            .mount(&self.server)
            .await;
    }

    /// Mock a quota error from YouTube
    pub async fn mock_search_forbidden(&self) {
        Mock::given(method("GET"))
            .and(path("/youtube/v3/search"))
            .respond_with(ResponseTemplate::new(403).set_body_json(json!({
                "error": {"code": 403, "message": "quotaExceeded"}
            })))
            .mount(&self.server)
            .await;
    }

    /// Number of requests received
    pub async fn request_count(&self) -> usize {
        self.server
            .received_requests()
            .await
            .map(|r| r.len())
            .unwrap_or(0)
    }
}

//! YouTube Data API client
//!
//! HTTP client for the `search` endpoint of the YouTube Data API v3.

use serde::{Deserialize, Serialize};
use tracing::{debug, error, instrument};

use crate::{
    config::{Config, Credential},
    error::{AppError, AppResult},
};

/// One video in a search result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoResult {
    #[serde(rename = "videoId")]
    pub video_id: String,
    pub title: String,
    pub thumbnail: Option<String>,
}

/// Search response from the YouTube API (only the fields we use)
#[derive(Debug, Default, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    #[serde(default)]
    id: ItemId,
    #[serde(default)]
    snippet: Snippet,
}

#[derive(Debug, Default, Deserialize)]
struct ItemId {
    #[serde(rename = "videoId")]
    video_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct Snippet {
    #[serde(default)]
    title: String,
    #[serde(default)]
    thumbnails: Thumbnails,
}

#[derive(Debug, Default, Deserialize)]
struct Thumbnails {
    medium: Option<Thumbnail>,
    default: Option<Thumbnail>,
}

#[derive(Debug, Deserialize)]
struct Thumbnail {
    url: Option<String>,
}

impl SearchItem {
    fn into_result(self) -> Option<VideoResult> {
        let thumbnail = [self.snippet.thumbnails.medium, self.snippet.thumbnails.default]
            .into_iter()
            .flatten()
            .find_map(|t| t.url);

        Some(VideoResult {
            video_id: self.id.video_id?,
            title: self.snippet.title,
            thumbnail,
        })
    }
}

/// YouTube search client
pub struct YouTubeClient {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<Credential>,
    max_results: u32,
}

impl YouTubeClient {
    /// Create a new YouTube client
    pub fn new(client: reqwest::Client, config: &Config) -> Self {
        Self {
            client,
            base_url: config.youtube_api_url.trim_end_matches('/').to_string(),
            api_key: config.youtube_api_key.clone(),
            max_results: config.youtube_max_results,
        }
    }

    /// Check if the client is configured with an API key
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Search for videos matching `query`, in the order YouTube ranks them
    #[instrument(skip(self, query), fields(query_len = query.len()))]
    pub async fn search(&self, query: &str) -> AppResult<Vec<VideoResult>> {
        let api_key = self.api_key.as_ref().ok_or_else(|| {
            AppError::NotConfigured("YOUTUBE_API_KEY not configured".to_string())
        })?;

        let url = format!("{}/search", self.base_url);
        let max_results = self.max_results.to_string();

        debug!(url = %url, "Searching YouTube");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("part", "snippet"),
                ("q", query),
                ("type", "video"),
                ("maxResults", max_results.as_str()),
                ("key", api_key.expose()),
            ])
            .send()
            .await
            .map_err(|e| {
                // reqwest errors include the URL, which carries the key
                error!(error = %e.without_url(), "YouTube search request failed");
                AppError::UpstreamError("YouTube search request failed".to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            error!(status = %status, body = %text, "YouTube search returned an error");
            return Err(AppError::UpstreamError(format!(
                "YouTube API error {}",
                status
            )));
        }

        let body: SearchResponse = response.json().await.map_err(|e| {
            error!(error = %e.without_url(), "Failed to parse YouTube search response");
            AppError::UpstreamError("Failed to parse YouTube response".to_string())
        })?;

        let results: Vec<VideoResult> = body
            .items
            .into_iter()
            .filter_map(SearchItem::into_result)
            .collect();

        debug!(results = results.len(), "YouTube search completed");
        Ok(results)
    }
}

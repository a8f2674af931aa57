// Streamio Core - Native core for the Streamio streaming-catalog client
// Copyright (C) 2025 Streamio contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

//! YouTube Data API v3 client
//!
//! Search is two requests: `/search` returns ids and snippets, then one
//! `/videos` batch fills in duration and statistics, which the search
//! endpoint does not carry. The API's nested JSON varies by endpoint
//! (`id` is an object in search results but a string in video lists), so
//! responses are mapped out of `serde_json::Value` rather than one rigid
//! response type.

use crate::error::{Result, StreamioError};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use url::Url;

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_MAX_RESULTS: u32 = 20;

/// Configuration for [`YouTubeClient`].
#[derive(Debug, Clone)]
pub struct YouTubeConfig {
    pub api_key: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl YouTubeConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: "https://www.googleapis.com/youtube/v3".to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

/// Everything the video list and player screens need for one video.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoInfo {
    pub id: String,
    pub title: String,
    pub description: String,
    /// Highest-resolution thumbnail URL available
    pub thumbnail: String,
    pub channel_title: String,
    pub published_at: String,
    /// ISO-8601 duration, e.g. `PT4M5S`; empty until details are fetched
    pub duration: String,
    pub view_count: u64,
    pub like_count: u64,
}

/// One page of search results with the token for the next page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoSearchResults {
    pub items: Vec<VideoInfo>,
    pub next_page_token: Option<String>,
    pub total_results: u64,
}

pub struct YouTubeClient {
    http: Client,
    config: YouTubeConfig,
}

impl YouTubeClient {
    pub fn new(config: YouTubeConfig) -> Result<Self> {
        let http = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { http, config })
    }

    /// Search videos by free-text query. `page_token` continues a previous
    /// page; `max_results` is capped by the API at 50.
    pub async fn search_videos(
        &self,
        query: &str,
        max_results: Option<u32>,
        page_token: Option<&str>,
    ) -> Result<VideoSearchResults> {
        let max = max_results.unwrap_or(DEFAULT_MAX_RESULTS).to_string();
        let mut params = vec![
            ("part", "snippet"),
            ("type", "video"),
            ("q", query),
            ("maxResults", max.as_str()),
        ];
        if let Some(token) = page_token {
            params.push(("pageToken", token));
        }

        let search: Value = self.get_json("/search", &params).await?;
        let ids: Vec<String> = items(&search)
            .iter()
            .filter_map(|item| str_at(item, &["id", "videoId"]))
            .collect();

        let mut results = VideoSearchResults {
            items: Vec::new(),
            next_page_token: str_at(&search, &["nextPageToken"]),
            total_results: u64_at(&search, &["pageInfo", "totalResults"]),
        };
        if ids.is_empty() {
            return Ok(results);
        }

        // One batched details call fills duration and view/like counts.
        let id_list = ids.join(",");
        let details: Value = self
            .get_json(
                "/videos",
                &[
                    ("part", "snippet,contentDetails,statistics"),
                    ("id", &id_list),
                ],
            )
            .await?;
        results.items = items(&details).iter().map(map_video).collect();
        Ok(results)
    }

    /// Full details for one video.
    pub async fn video_details(&self, video_id: &str) -> Result<VideoInfo> {
        let details: Value = self
            .get_json(
                "/videos",
                &[
                    ("part", "snippet,contentDetails,statistics"),
                    ("id", video_id),
                ],
            )
            .await?;
        items(&details)
            .first()
            .map(map_video)
            .ok_or(StreamioError::InvalidApiResponse {
                message: format!("video {video_id} not found"),
            })
    }

    /// Videos related to the given one, via a title-based search.
    pub async fn related_videos(&self, video_id: &str, max: u32) -> Result<Vec<VideoInfo>> {
        let seed = self.video_details(video_id).await?;
        let mut related = self
            .search_videos(&seed.title, Some(max + 1), None)
            .await?
            .items;
        related.retain(|v| v.id != video_id);
        related.truncate(max as usize);
        Ok(related)
    }

    async fn get_json(&self, path: &str, params: &[(&str, &str)]) -> Result<Value> {
        let mut url = Url::parse(&format!("{}{}", self.config.base_url, path))
            .map_err(|e| StreamioError::invalid_input(format!("bad endpoint {path:?}: {e}")))?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("key", &self.config.api_key);
            for (key, value) in params {
                query.append_pair(key, value);
            }
        }

        let response = self.http.get(url).send().await.map_err(|e| {
            StreamioError::network_error(
                format!("request to {} failed: {}", path, e),
                e.is_timeout() || e.is_connect(),
            )
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(StreamioError::api_failed(
                format!("HTTP {}", status),
                Some(status.as_u16()),
                Some(path.to_string()),
            ));
        }
        Ok(response.json().await?)
    }
}

fn items(value: &Value) -> Vec<Value> {
    value
        .get("items")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default()
}

fn str_at(value: &Value, path: &[&str]) -> Option<String> {
    let mut node = value;
    for key in path {
        node = node.get(key)?;
    }
    node.as_str().map(str::to_string)
}

fn u64_at(value: &Value, path: &[&str]) -> u64 {
    let mut node = value;
    for key in path {
        node = match node.get(key) {
            Some(next) => next,
            None => return 0,
        };
    }
    // statistics counts arrive as JSON strings
    node.as_u64()
        .or_else(|| node.as_str().and_then(|s| s.parse().ok()))
        .unwrap_or(0)
}

fn best_thumbnail(snippet: &Value) -> String {
    for size in ["maxres", "high", "medium", "default"] {
        if let Some(url) = str_at(snippet, &["thumbnails", size, "url"]) {
            return url;
        }
    }
    String::new()
}

fn map_video(item: &Value) -> VideoInfo {
    let snippet = item.get("snippet").cloned().unwrap_or(Value::Null);
    VideoInfo {
        id: str_at(item, &["id"]).unwrap_or_default(),
        title: str_at(&snippet, &["title"]).unwrap_or_default(),
        description: str_at(&snippet, &["description"]).unwrap_or_default(),
        thumbnail: best_thumbnail(&snippet),
        channel_title: str_at(&snippet, &["channelTitle"]).unwrap_or_default(),
        published_at: str_at(&snippet, &["publishedAt"]).unwrap_or_default(),
        duration: str_at(item, &["contentDetails", "duration"]).unwrap_or_default(),
        view_count: u64_at(item, &["statistics", "viewCount"]),
        like_count: u64_at(item, &["statistics", "likeCount"]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_map_video_from_videos_response() {
        let item = json!({
            "id": "dQw4w9WgXcQ",
            "snippet": {
                "title": "A Video",
                "description": "About things.",
                "channelTitle": "A Channel",
                "publishedAt": "2024-06-01T12:00:00Z",
                "thumbnails": {
                    "default": {"url": "https://i.ytimg.com/d.jpg"},
                    "high": {"url": "https://i.ytimg.com/h.jpg"}
                }
            },
            "contentDetails": {"duration": "PT4M5S"},
            "statistics": {"viewCount": "123456", "likeCount": "789"}
        });

        let video = map_video(&item);
        assert_eq!(video.id, "dQw4w9WgXcQ");
        assert_eq!(video.duration, "PT4M5S");
        assert_eq!(video.view_count, 123_456);
        assert_eq!(video.like_count, 789);
        // highest-resolution thumbnail wins
        assert_eq!(video.thumbnail, "https://i.ytimg.com/h.jpg");
    }

    #[test]
    fn test_map_video_tolerates_missing_statistics() {
        let item = json!({
            "id": "abc",
            "snippet": {"title": "Sparse"}
        });
        let video = map_video(&item);
        assert_eq!(video.view_count, 0);
        assert_eq!(video.duration, "");
        assert_eq!(video.thumbnail, "");
    }

    #[test]
    fn test_search_item_id_extraction() {
        let search = json!({
            "items": [
                {"id": {"videoId": "v1"}},
                {"id": {"videoId": "v2"}},
                {"id": {"channelId": "c1"}}
            ]
        });
        let ids: Vec<String> = items(&search)
            .iter()
            .filter_map(|item| str_at(item, &["id", "videoId"]))
            .collect();
        assert_eq!(ids, vec!["v1", "v2"]);
    }
}

// Streamio Core - Native core for the Streamio streaming-catalog client
// Copyright (C) 2025 Streamio contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

//! HTTP client for the TMDB catalog API
//!
//! Thin typed wrapper over the v3 REST endpoints the app browses. Requests
//! carry the api key as a query parameter. Transient failures (connect
//! errors, timeouts, 429, 5xx) are retried with exponential backoff up to
//! the configured attempt limit; client errors surface immediately.

use crate::catalog::types::{genre_ids, Credits, Movie, MovieDetails, SearchPage, Video};
use crate::error::{Result, StreamioError};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tokio::time::sleep;
use url::Url;

/// Maximum attempts per request (1 initial + 2 retries)
const MAX_RETRY_ATTEMPTS: u32 = 3;

/// Initial retry delay in seconds (exponential backoff: 1s, 2s, 4s)
const INITIAL_RETRY_DELAY_SECS: u64 = 1;

/// Default request timeout in seconds
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for [`TmdbClient`].
#[derive(Debug, Clone)]
pub struct TmdbConfig {
    pub api_key: String,
    pub base_url: String,
    pub image_base_url: String,
    pub timeout: Duration,
    pub max_retries: u32,
}

impl TmdbConfig {
    /// Production endpoints with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: "https://api.themoviedb.org/3".to_string(),
            image_base_url: "https://image.tmdb.org/t/p".to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_retries: MAX_RETRY_ATTEMPTS,
        }
    }
}

/// Browse categories the home screen renders as rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Trending,
    Popular,
    TopRated,
    Action,
    Comedy,
    Drama,
    Horror,
    Animation,
    SciFi,
    Documentary,
}

/// Typed TMDB API client.
pub struct TmdbClient {
    http: Client,
    config: TmdbConfig,
}

impl TmdbClient {
    pub fn new(config: TmdbConfig) -> Result<Self> {
        let http = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { http, config })
    }

    /// Full image URL for a poster/backdrop path, or `None` when the
    /// catalog has no image. `size` is a TMDB size slug such as `w500`.
    pub fn image_url(&self, path: Option<&str>, size: &str) -> Option<String> {
        path.map(|p| format!("{}/{}{}", self.config.image_base_url, size, p))
    }

    pub async fn trending(&self) -> Result<Vec<Movie>> {
        self.fetch_page("/trending/movie/week", &[]).await
    }

    pub async fn popular(&self) -> Result<Vec<Movie>> {
        self.fetch_page("/movie/popular", &[]).await
    }

    pub async fn top_rated(&self) -> Result<Vec<Movie>> {
        self.fetch_page("/movie/top_rated", &[]).await
    }

    pub async fn now_playing(&self) -> Result<Vec<Movie>> {
        self.fetch_page("/movie/now_playing", &[]).await
    }

    pub async fn upcoming(&self) -> Result<Vec<Movie>> {
        self.fetch_page("/movie/upcoming", &[]).await
    }

    pub async fn search(&self, query: &str) -> Result<Vec<Movie>> {
        self.fetch_page("/search/movie", &[("query", query.to_string())])
            .await
    }

    /// Discover movies for one genre, most popular first.
    pub async fn movies_by_genre(&self, genre_id: u64) -> Result<Vec<Movie>> {
        self.fetch_page(
            "/discover/movie",
            &[
                ("with_genres", genre_id.to_string()),
                ("sort_by", "popularity.desc".to_string()),
            ],
        )
        .await
    }

    pub async fn movies_by_category(&self, category: Category) -> Result<Vec<Movie>> {
        match category {
            Category::Trending => self.trending().await,
            Category::Popular => self.popular().await,
            Category::TopRated => self.top_rated().await,
            Category::Action => self.movies_by_genre(genre_ids::ACTION).await,
            Category::Comedy => self.movies_by_genre(genre_ids::COMEDY).await,
            Category::Drama => self.movies_by_genre(genre_ids::DRAMA).await,
            Category::Horror => self.movies_by_genre(genre_ids::HORROR).await,
            Category::Animation => self.movies_by_genre(genre_ids::ANIMATION).await,
            Category::SciFi => self.movies_by_genre(genre_ids::SCIFI).await,
            Category::Documentary => self.movies_by_genre(genre_ids::DOCUMENTARY).await,
        }
    }

    pub async fn movie_details(&self, movie_id: u64) -> Result<MovieDetails> {
        self.get_json(&format!("/movie/{movie_id}"), &[]).await
    }

    pub async fn movie_credits(&self, movie_id: u64) -> Result<Credits> {
        self.get_json(&format!("/movie/{movie_id}/credits"), &[])
            .await
    }

    /// Videos for a movie, filtered to official YouTube entries. Those are
    /// the only kind the embedded player can render.
    pub async fn movie_videos(&self, movie_id: u64) -> Result<Vec<Video>> {
        #[derive(serde::Deserialize)]
        struct VideoList {
            #[serde(default)]
            results: Vec<Video>,
        }

        let list: VideoList = self
            .get_json(&format!("/movie/{movie_id}/videos"), &[])
            .await?;
        Ok(list
            .results
            .into_iter()
            .filter(|v| v.site == "YouTube" && v.official)
            .collect())
    }

    pub async fn similar(&self, movie_id: u64) -> Result<Vec<Movie>> {
        self.fetch_page(&format!("/movie/{movie_id}/similar"), &[])
            .await
    }

    pub async fn recommendations(&self, movie_id: u64) -> Result<Vec<Movie>> {
        self.fetch_page(&format!("/movie/{movie_id}/recommendations"), &[])
            .await
    }

    async fn fetch_page(&self, path: &str, params: &[(&str, String)]) -> Result<Vec<Movie>> {
        let page: SearchPage = self.get_json(path, params).await?;
        Ok(page.results)
    }

    fn endpoint(&self, path: &str, params: &[(&str, String)]) -> Result<Url> {
        let mut url = Url::parse(&format!("{}{}", self.config.base_url, path))
            .map_err(|e| StreamioError::invalid_input(format!("bad endpoint {path:?}: {e}")))?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("api_key", &self.config.api_key);
            for (key, value) in params {
                query.append_pair(key, value);
            }
        }
        Ok(url)
    }

    /// GET with retry on transient failures.
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T> {
        let url = self.endpoint(path, params)?;

        let mut attempt = 0;
        loop {
            attempt += 1;
            match self.get_json_once(&url, path).await {
                Ok(value) => return Ok(value),
                Err(e) if e.is_retryable() && attempt < self.config.max_retries => {
                    let delay = e
                        .retry_after_seconds()
                        .unwrap_or(INITIAL_RETRY_DELAY_SECS << (attempt - 1));
                    log::debug!("retrying {} after {}s: {}", path, delay, e);
                    sleep(Duration::from_secs(delay)).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn get_json_once<T: DeserializeOwned>(&self, url: &Url, path: &str) -> Result<T> {
        let response = self.http.get(url.clone()).send().await.map_err(|e| {
            StreamioError::network_error(
                format!("request to {} failed: {}", path, e),
                e.is_timeout() || e.is_connect(),
            )
        })?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(INITIAL_RETRY_DELAY_SECS);
            return Err(StreamioError::RateLimitExceeded {
                retry_after_seconds: retry_after,
                endpoint: path.to_string(),
            });
        }
        if !status.is_success() {
            return Err(StreamioError::api_failed(
                format!("HTTP {}", status),
                Some(status.as_u16()),
                Some(path.to_string()),
            ));
        }

        response.json::<T>().await.map_err(|e| {
            StreamioError::InvalidApiResponse {
                message: format!("cannot decode {} response: {}", path, e),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> TmdbClient {
        TmdbClient::new(TmdbConfig::new("test-key")).unwrap()
    }

    #[test]
    fn test_image_url() {
        let client = client();
        assert_eq!(
            client.image_url(Some("/poster.jpg"), "w500").as_deref(),
            Some("https://image.tmdb.org/t/p/w500/poster.jpg")
        );
        assert_eq!(client.image_url(None, "w500"), None);
    }

    #[test]
    fn test_endpoint_carries_api_key_and_params() {
        let client = client();
        let url = client
            .endpoint("/search/movie", &[("query", "blade runner".to_string())])
            .unwrap();
        assert_eq!(url.path(), "/3/search/movie");
        let query = url.query().unwrap();
        assert!(query.contains("api_key=test-key"));
        assert!(query.contains("query=blade+runner"));
    }

    #[test]
    fn test_default_config_endpoints() {
        let config = TmdbConfig::new("k");
        assert_eq!(config.base_url, "https://api.themoviedb.org/3");
        assert_eq!(config.max_retries, 3);
    }
}

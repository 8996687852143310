//! TMDB (The Movie Database) API client.
//!
//! TMDB requires a bearer token for access. Rate limits are generous
//! (around 40 requests per second), so no client-side throttling is done.

use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::types::{
    MovieCategory, MovieDetailsRecord, MoviePage, ShowCategory, ShowDetailsRecord, ShowPage,
};
use super::{MetadataProvider, ProviderError};
use crate::metrics;

/// TMDB API client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TmdbConfig {
    /// TMDB API read access token (required).
    pub bearer_token: String,
    /// Base URL (default: https://api.themoviedb.org/3).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Language sent with every request (default: es-ES).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// Request timeout in seconds (default: 30).
    #[serde(default = "default_timeout")]
    pub timeout_secs: u32,
}

fn default_timeout() -> u32 {
    30
}

/// TMDB API client.
pub struct TmdbClient {
    client: Client,
    base_url: String,
    bearer_token: String,
    language: String,
}

impl TmdbClient {
    /// Create a new TMDB client.
    pub fn new(config: TmdbConfig) -> Result<Self, ProviderError> {
        if config.bearer_token.is_empty() {
            return Err(ProviderError::NotConfigured(
                "TMDB bearer token is required".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs as u64))
            .build()?;

        let base_url = config
            .base_url
            .unwrap_or_else(|| "https://api.themoviedb.org/3".to_string());

        let language = config.language.unwrap_or_else(|| "es-ES".to_string());

        Ok(Self {
            client,
            base_url,
            bearer_token: config.bearer_token,
            language,
        })
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<T, ProviderError> {
        let url = format!("{}{}", self.base_url, path);

        debug!(endpoint, path, "TMDB request");

        let result = self.request(&url, params).await;
        let label = if result.is_ok() { "ok" } else { "error" };
        metrics::UPSTREAM_REQUESTS
            .with_label_values(&[endpoint, label])
            .inc();
        result
    }

    async fn request<T: DeserializeOwned>(
        &self,
        url: &str,
        params: &[(&str, &str)],
    ) -> Result<T, ProviderError> {
        let response = self
            .client
            .get(url)
            .bearer_auth(&self.bearer_token)
            .query(&[("language", self.language.as_str())])
            .query(params)
            .send()
            .await?;

        let status = response.status();
        if status == 404 {
            return Err(ProviderError::NotFound(url.to_string()));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        response
            .json()
            .await
            .map_err(|e| ProviderError::Parse(e.to_string()))
    }
}

#[async_trait::async_trait]
impl MetadataProvider for TmdbClient {
    async fn movie_page(
        &self,
        category: MovieCategory,
        page: u32,
    ) -> Result<MoviePage, ProviderError> {
        let path = format!("/movie/{}", category.as_str());
        let page_str = page.to_string();
        self.fetch("movie_page", &path, &[("page", page_str.as_str())])
            .await
    }

    async fn search_movies(&self, query: &str, page: u32) -> Result<MoviePage, ProviderError> {
        let page_str = page.to_string();
        self.fetch(
            "search_movies",
            "/search/movie",
            &[("query", query), ("page", page_str.as_str())],
        )
        .await
    }

    async fn movie_details(&self, tmdb_id: i64) -> Result<MovieDetailsRecord, ProviderError> {
        let path = format!("/movie/{}", tmdb_id);
        self.fetch("movie_details", &path, &[]).await
    }

    async fn show_page(&self, category: ShowCategory) -> Result<ShowPage, ProviderError> {
        let path = format!("/tv/{}", category.as_str());
        self.fetch("show_page", &path, &[]).await
    }

    async fn search_shows(&self, query: &str) -> Result<ShowPage, ProviderError> {
        self.fetch("search_shows", "/search/tv", &[("query", query)])
            .await
    }

    async fn show_details(&self, tmdb_id: i64) -> Result<ShowDetailsRecord, ProviderError> {
        let path = format!("/tv/{}", tmdb_id);
        self.fetch("show_details", &path, &[]).await
    }
}

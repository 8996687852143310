//! Upstream metadata provider integration.
//!
//! The provider is the source of truth for catalog data; the local store
//! only caches what came through here.

mod tmdb;
mod types;

pub use tmdb::{TmdbClient, TmdbConfig};
pub use types::*;

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur when talking to the metadata provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// HTTP transport failed (includes timeouts).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Resource not found (404).
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Provider returned a non-success status.
    #[error("Provider error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Failed to parse the response body.
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// Client not configured (missing API token, etc.).
    #[error("Provider not configured: {0}")]
    NotConfigured(String),
}

/// Trait for metadata provider clients.
///
/// The locale sent upstream is fixed client configuration, never caller
/// input. Retries are the caller's concern; implementations make exactly
/// one attempt per call with a bounded timeout.
#[async_trait]
pub trait MetadataProvider: Send + Sync {
    /// Fetch one page of a movie listing category.
    async fn movie_page(
        &self,
        category: MovieCategory,
        page: u32,
    ) -> Result<MoviePage, ProviderError>;

    /// Search movies by free-text query.
    async fn search_movies(&self, query: &str, page: u32) -> Result<MoviePage, ProviderError>;

    /// Fetch full details for a single movie.
    async fn movie_details(&self, tmdb_id: i64) -> Result<MovieDetailsRecord, ProviderError>;

    /// Fetch one page of a TV show listing category.
    async fn show_page(&self, category: ShowCategory) -> Result<ShowPage, ProviderError>;

    /// Search TV shows by free-text query.
    async fn search_shows(&self, query: &str) -> Result<ShowPage, ProviderError>;

    /// Fetch full details for a single TV show.
    async fn show_details(&self, tmdb_id: i64) -> Result<ShowDetailsRecord, ProviderError>;
}

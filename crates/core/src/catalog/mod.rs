//! Catalog queries backed by the local store and the upstream provider.
//!
//! Queries are answered from the local cache when it can fill the request
//! and is fresh, otherwise from a live provider fetch whose results are
//! merged back into the store.

mod freshness;
mod movies;
mod normalize;
mod shows;
mod types;

pub use freshness::{needs_refresh, STALENESS_WINDOW_HOURS};
pub use movies::MovieCatalog;
pub use shows::ShowCatalog;
pub use types::*;

use thiserror::Error;

use crate::provider::ProviderError;
use crate::store::StoreError;

/// Errors surfaced by catalog queries.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Identifier failed validation; checked before any lookup.
    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(String),

    /// The upstream fetch failed. Stale local data is never served as a
    /// fallback and no retry is attempted here.
    #[error("Upstream fetch failed: {0}")]
    UpstreamFetch(ProviderError),

    /// Neither the store nor the provider knows this record.
    #[error("Not found: {0}")]
    NotFound(String),

    /// A store read failed. Write failures are handled best-effort inside
    /// the catalog and never surface through this variant.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl From<ProviderError> for CatalogError {
    fn from(e: ProviderError) -> Self {
        match e {
            ProviderError::NotFound(what) => CatalogError::NotFound(what),
            other => CatalogError::UpstreamFetch(other),
        }
    }
}

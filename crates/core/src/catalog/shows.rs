//! TV show catalog queries.
//!
//! Shows are served straight from the provider; only the popular listing
//! feeds the local cache, and cached rows are exposed as a plain listing.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::metrics;
use crate::provider::{MetadataProvider, ShowCategory, ShowPage, ShowRecord};
use crate::store::{CatalogStore, ShowUpsert};

use super::normalize;
use super::types::{ShowDetail, ShowEntry, ShowListPage};
use super::CatalogError;

/// Serves TV show queries from the upstream provider, keeping a
/// best-effort local copy of popular shows.
pub struct ShowCatalog {
    store: Arc<dyn CatalogStore>,
    provider: Arc<dyn MetadataProvider>,
}

impl ShowCatalog {
    pub fn new(store: Arc<dyn CatalogStore>, provider: Arc<dyn MetadataProvider>) -> Self {
        Self { store, provider }
    }

    /// Popular shows from upstream, cached best-effort.
    pub async fn popular(&self) -> Result<ShowListPage, CatalogError> {
        let upstream = self.provider.show_page(ShowCategory::Popular).await?;
        self.cache_page(&upstream.results);
        Ok(Self::upstream_page(upstream))
    }

    /// Top rated shows, pure upstream pass-through.
    pub async fn top_rated(&self) -> Result<ShowListPage, CatalogError> {
        let upstream = self.provider.show_page(ShowCategory::TopRated).await?;
        Ok(Self::upstream_page(upstream))
    }

    /// Currently airing shows, pure upstream pass-through.
    pub async fn on_the_air(&self) -> Result<ShowListPage, CatalogError> {
        let upstream = self.provider.show_page(ShowCategory::OnTheAir).await?;
        Ok(Self::upstream_page(upstream))
    }

    /// Shows airing today, pure upstream pass-through.
    pub async fn airing_today(&self) -> Result<ShowListPage, CatalogError> {
        let upstream = self.provider.show_page(ShowCategory::AiringToday).await?;
        Ok(Self::upstream_page(upstream))
    }

    /// Free-text show search, pure upstream pass-through.
    pub async fn search(&self, query: &str) -> Result<ShowListPage, CatalogError> {
        let upstream = self.provider.search_shows(query).await?;
        Ok(Self::upstream_page(upstream))
    }

    /// Show details by provider id, always fetched upstream.
    pub async fn details(&self, raw_id: &str) -> Result<ShowDetail, CatalogError> {
        let tmdb_id: i64 = raw_id
            .parse()
            .map_err(|_| CatalogError::InvalidIdentifier(raw_id.to_string()))?;

        let details = self.provider.show_details(tmdb_id).await?;
        Ok(ShowDetail::from_wire(&details))
    }

    /// Paged listing of locally cached shows.
    pub fn local(&self, page: u32, limit: u32) -> Result<Vec<ShowEntry>, CatalogError> {
        let skip = page.saturating_sub(1) * limit;
        let rows = self.store.list_shows(skip, limit)?;
        Ok(rows.into_iter().map(ShowEntry::from_stored).collect())
    }

    fn upstream_page(upstream: ShowPage) -> ShowListPage {
        ShowListPage {
            page: upstream.page,
            results: upstream.results.iter().map(ShowEntry::from_wire).collect(),
            total_pages: upstream.total_pages,
            total_results: upstream.total_results,
        }
    }

    /// Cache a page of shows, skipping rows that already exist. A failed
    /// write never affects the response.
    fn cache_page(&self, records: &[ShowRecord]) {
        let upserts: Vec<ShowUpsert> = records.iter().map(normalize::show_from_list).collect();
        match self.store.cache_shows(&upserts) {
            Ok(new_rows) => debug!(new_rows, total = records.len(), "cached show page"),
            Err(e) => {
                metrics::CACHE_WRITE_FAILURES.inc();
                warn!(error = %e, "failed to cache show page");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::ProviderError;
    use crate::testing::{fixtures, MemoryStore, MockProvider};

    fn catalog(store: Arc<MemoryStore>, provider: Arc<MockProvider>) -> ShowCatalog {
        ShowCatalog::new(store, provider)
    }

    #[tokio::test]
    async fn test_popular_passes_through_and_caches() {
        let store = Arc::new(MemoryStore::new());
        let provider = Arc::new(MockProvider::new());
        provider.add_show(fixtures::show_record(1396, "Breaking Bad"));
        provider.add_show(fixtures::show_record(2316, "The Office"));

        let page = catalog(store.clone(), provider).popular().await.unwrap();

        assert_eq!(page.results.len(), 2);
        assert_eq!(store.list_shows(0, 10).unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_popular_does_not_duplicate_cached_shows() {
        let store = Arc::new(MemoryStore::new());
        let provider = Arc::new(MockProvider::new());
        provider.add_show(fixtures::show_record(1396, "Breaking Bad"));

        let service = catalog(store.clone(), provider);
        service.popular().await.unwrap();
        service.popular().await.unwrap();

        assert_eq!(store.list_shows(0, 10).unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_top_rated_does_not_write_to_store() {
        let store = Arc::new(MemoryStore::new());
        let provider = Arc::new(MockProvider::new());
        provider.add_show(fixtures::show_record(1396, "Breaking Bad"));

        catalog(store.clone(), provider).top_rated().await.unwrap();

        assert!(store.list_shows(0, 10).unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_cache_failure_does_not_abort_popular() {
        let store = Arc::new(MemoryStore::new());
        let provider = Arc::new(MockProvider::new());
        provider.add_show(fixtures::show_record(1396, "Breaking Bad"));
        store.fail_writes(true);

        let page = catalog(store, provider).popular().await.unwrap();
        assert_eq!(page.results.len(), 1);
    }

    #[tokio::test]
    async fn test_details_rejects_non_numeric_identifier() {
        let store = Arc::new(MemoryStore::new());
        let provider = Arc::new(MockProvider::new());

        let result = catalog(store, provider.clone()).details("abc").await;

        assert!(matches!(result, Err(CatalogError::InvalidIdentifier(_))));
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn test_details_fetches_upstream() {
        let store = Arc::new(MemoryStore::new());
        let provider = Arc::new(MockProvider::new());
        provider.add_show_details(fixtures::show_details_record(1396, "Breaking Bad"));

        let detail = catalog(store, provider).details("1396").await.unwrap();

        assert_eq!(detail.show.id, 1396);
        assert_eq!(detail.number_of_seasons, 5);
    }

    #[tokio::test]
    async fn test_upstream_failure_surfaces() {
        let store = Arc::new(MemoryStore::new());
        let provider = Arc::new(MockProvider::new());
        provider.set_next_error(ProviderError::Api {
            status: 503,
            message: "unavailable".to_string(),
        });

        let result = catalog(store, provider).search("breaking").await;
        assert!(matches!(result, Err(CatalogError::UpstreamFetch(_))));
    }
}

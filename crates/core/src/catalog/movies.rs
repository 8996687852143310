//! Movie catalog queries - local cache first, upstream refresh when needed.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, warn};

use crate::metrics;
use crate::provider::{MetadataProvider, MovieCategory, MovieDetailsRecord, MoviePage, MovieRecord};
use crate::store::{CatalogStore, MovieFilter, MovieOrder};

use super::freshness::needs_refresh;
use super::normalize;
use super::types::{MovieDetail, MovieEntry, MovieListPage};
use super::CatalogError;

/// Serves movie queries from the local store when it is fresh enough,
/// refreshing from the upstream provider otherwise.
///
/// Concurrent refreshes of the same page or movie are not coordinated; the
/// store's idempotent upserts make redundant writes converge.
pub struct MovieCatalog {
    store: Arc<dyn CatalogStore>,
    provider: Arc<dyn MetadataProvider>,
}

impl MovieCatalog {
    pub fn new(store: Arc<dyn CatalogStore>, provider: Arc<dyn MetadataProvider>) -> Self {
        Self { store, provider }
    }

    /// Popular movies, rating-descending, served from the store when fresh.
    pub async fn popular(&self, page: u32, limit: u32) -> Result<MovieListPage, CatalogError> {
        let filter = MovieFilter::default();
        let skip = page.saturating_sub(1) * limit;
        let local = self
            .store
            .list_movies(&filter, MovieOrder::VoteAverageDesc, skip, limit)?;

        if needs_refresh(limit, &local, Utc::now()) {
            metrics::CACHE_DECISIONS
                .with_label_values(&["popular", "refresh"])
                .inc();
            return self.refresh_page(MovieCategory::Popular, page, limit).await;
        }

        metrics::CACHE_DECISIONS
            .with_label_values(&["popular", "hit"])
            .inc();
        self.local_page(page, limit, &filter, local)
    }

    /// Free-text movie search over title and original title, served from
    /// the store when fresh.
    pub async fn search(
        &self,
        query: &str,
        page: u32,
        limit: u32,
    ) -> Result<MovieListPage, CatalogError> {
        let filter = MovieFilter {
            title: Some(query.to_string()),
        };
        let skip = page.saturating_sub(1) * limit;
        let local = self
            .store
            .list_movies(&filter, MovieOrder::IdAsc, skip, limit)?;

        if needs_refresh(limit, &local, Utc::now()) {
            metrics::CACHE_DECISIONS
                .with_label_values(&["search", "refresh"])
                .inc();
            let upstream = self.provider.search_movies(query, page).await?;
            self.cache_page(&upstream.results);
            return Ok(Self::upstream_page(upstream, limit));
        }

        metrics::CACHE_DECISIONS
            .with_label_values(&["search", "hit"])
            .inc();
        self.local_page(page, limit, &filter, local)
    }

    /// Top rated movies, straight from upstream with best-effort caching.
    pub async fn top_rated(&self, page: u32, limit: u32) -> Result<MovieListPage, CatalogError> {
        self.refresh_page(MovieCategory::TopRated, page, limit).await
    }

    /// Upcoming movies, straight from upstream with best-effort caching.
    pub async fn upcoming(&self, page: u32, limit: u32) -> Result<MovieListPage, CatalogError> {
        self.refresh_page(MovieCategory::Upcoming, page, limit).await
    }

    /// Now playing movies, straight from upstream with best-effort caching.
    pub async fn now_playing(&self, page: u32, limit: u32) -> Result<MovieListPage, CatalogError> {
        self.refresh_page(MovieCategory::NowPlaying, page, limit)
            .await
    }

    /// Movie details by provider id.
    ///
    /// A stored row without a runtime has never been completed by a detail
    /// fetch, so it is treated as stale regardless of its sync timestamp.
    /// Fresh fetches are returned directly and persisted best-effort.
    pub async fn details(&self, raw_id: &str) -> Result<MovieDetail, CatalogError> {
        let tmdb_id: i64 = raw_id
            .parse()
            .map_err(|_| CatalogError::InvalidIdentifier(raw_id.to_string()))?;

        let local = self.store.find_movie(tmdb_id)?;
        if let Some(movie) = local.filter(|m| m.runtime.is_some()) {
            metrics::CACHE_DECISIONS
                .with_label_values(&["details", "hit"])
                .inc();
            let genres = self.store.movie_genres(movie.id)?;
            return Ok(MovieDetail::from_stored(movie, genres));
        }

        metrics::CACHE_DECISIONS
            .with_label_values(&["details", "refresh"])
            .inc();
        let details = self.provider.movie_details(tmdb_id).await?;
        self.cache_details(&details);
        Ok(MovieDetail::from_wire(&details))
    }

    /// Paged listing of whatever is currently cached locally.
    pub fn local(&self, page: u32, limit: u32) -> Result<Vec<MovieEntry>, CatalogError> {
        let skip = page.saturating_sub(1) * limit;
        let rows = self
            .store
            .list_movies(&MovieFilter::default(), MovieOrder::IdAsc, skip, limit)?;

        let mut entries = Vec::with_capacity(rows.len());
        for movie in rows {
            let genres = self.store.movie_genres(movie.id)?;
            entries.push(MovieEntry::from_stored(movie, genres));
        }
        Ok(entries)
    }

    /// Fetch a listing page from upstream, cache it best-effort and return
    /// the upstream-shaped response.
    async fn refresh_page(
        &self,
        category: MovieCategory,
        page: u32,
        limit: u32,
    ) -> Result<MovieListPage, CatalogError> {
        let upstream = self.provider.movie_page(category, page).await?;
        self.cache_page(&upstream.results);
        Ok(Self::upstream_page(upstream, limit))
    }

    /// Shape a response from local rows; totals come from the store using
    /// the same filter as the page read.
    fn local_page(
        &self,
        page: u32,
        limit: u32,
        filter: &MovieFilter,
        rows: Vec<crate::store::StoredMovie>,
    ) -> Result<MovieListPage, CatalogError> {
        let total_results = self.store.count_movies(filter)?;
        let total_pages = if limit == 0 {
            0
        } else {
            total_results.div_ceil(limit as u64) as u32
        };

        let mut results = Vec::with_capacity(rows.len());
        for movie in rows {
            let genres = self.store.movie_genres(movie.id)?;
            results.push(MovieEntry::from_stored(movie, genres));
        }

        Ok(MovieListPage {
            page,
            results,
            total_pages,
            total_results,
        })
    }

    /// Shape an upstream page, truncated to the requested limit. The
    /// provider's page size is fixed and may exceed what was asked for.
    fn upstream_page(upstream: MoviePage, limit: u32) -> MovieListPage {
        let MoviePage {
            page,
            mut results,
            total_pages,
            total_results,
        } = upstream;
        results.truncate(limit as usize);

        MovieListPage {
            page,
            results: results.iter().map(MovieEntry::from_wire).collect(),
            total_pages,
            total_results,
        }
    }

    /// Merge a page of upstream records into the store. Each record fails
    /// independently; failures are logged and never abort the batch or the
    /// response.
    fn cache_page(&self, records: &[MovieRecord]) {
        let mut failures = Vec::new();
        for record in records {
            let upsert = normalize::movie_from_list(record);
            if let Err(e) = self.store.upsert_movie(&upsert) {
                metrics::CACHE_WRITE_FAILURES.inc();
                failures.push((record.id, e));
            }
        }
        for (tmdb_id, error) in &failures {
            warn!(tmdb_id, %error, "failed to cache movie record");
        }
        if !failures.is_empty() {
            debug!(
                failed = failures.len(),
                total = records.len(),
                "movie page cached with failures"
            );
        }
    }

    /// Persist a detail record and its genre links, best-effort. The
    /// response never depends on these writes succeeding.
    fn cache_details(&self, details: &MovieDetailsRecord) {
        let upsert = normalize::movie_from_details(details);
        let movie = match self.store.upsert_movie(&upsert) {
            Ok(movie) => movie,
            Err(e) => {
                metrics::CACHE_WRITE_FAILURES.inc();
                warn!(tmdb_id = details.id, error = %e, "failed to persist movie details");
                return;
            }
        };

        // Genres are matched by name, never by the provider's numeric id.
        // Both steps are idempotent so interleaved refreshes converge.
        for genre in &details.genres {
            let linked = self
                .store
                .ensure_genre(&genre.name)
                .and_then(|g| self.store.link_movie_genre(movie.id, g.id));
            if let Err(e) = linked {
                metrics::CACHE_WRITE_FAILURES.inc();
                warn!(tmdb_id = details.id, genre = %genre.name, error = %e, "failed to link genre");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::ProviderError;
    use crate::testing::{fixtures, MemoryStore, MockProvider, RecordedProviderCall};
    use chrono::Duration;

    fn catalog(store: Arc<MemoryStore>, provider: Arc<MockProvider>) -> MovieCatalog {
        MovieCatalog::new(store, provider)
    }

    #[tokio::test]
    async fn test_popular_with_empty_store_refreshes_from_upstream() {
        let store = Arc::new(MemoryStore::new());
        let provider = Arc::new(MockProvider::new());
        for i in 1..=8 {
            provider.add_movie(fixtures::movie_record(i, &format!("Movie {}", i)));
        }

        let page = catalog(store.clone(), provider.clone())
            .popular(1, 5)
            .await
            .unwrap();

        assert_eq!(page.results.len(), 5);
        assert_eq!(provider.call_count(), 1);
        // Every upstream record is merged, not just the returned slice
        assert_eq!(
            store
                .list_movies(&MovieFilter::default(), MovieOrder::IdAsc, 0, 100)
                .unwrap()
                .len(),
            8
        );
    }

    #[tokio::test]
    async fn test_popular_cache_hit_skips_upstream() {
        let store = Arc::new(MemoryStore::new());
        let provider = Arc::new(MockProvider::new());
        for i in 1..=20 {
            store
                .upsert_movie(&fixtures::movie_upsert(i, &format!("Movie {}", i)))
                .unwrap();
        }

        let page = catalog(store.clone(), provider.clone())
            .popular(1, 20)
            .await
            .unwrap();

        assert_eq!(page.results.len(), 20);
        assert_eq!(page.total_results, 20);
        assert_eq!(page.total_pages, 1);
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn test_popular_with_stale_row_refreshes() {
        let store = Arc::new(MemoryStore::new());
        let provider = Arc::new(MockProvider::new());
        provider.add_movie(fixtures::movie_record(99, "Fresh From Upstream"));

        for i in 1..=3 {
            store
                .upsert_movie(&fixtures::movie_upsert(i, &format!("Movie {}", i)))
                .unwrap();
        }
        store.backdate_movie(2, Utc::now() - Duration::hours(25));

        catalog(store, provider.clone()).popular(1, 3).await.unwrap();

        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test]
    async fn test_search_miss_when_matches_below_limit() {
        let store = Arc::new(MemoryStore::new());
        let provider = Arc::new(MockProvider::new());
        for i in 1..=3 {
            store
                .upsert_movie(&fixtures::movie_upsert(i, &format!("Batman {}", i)))
                .unwrap();
        }
        for i in 10..=16 {
            provider.add_movie(fixtures::movie_record(i, &format!("Batman Upstream {}", i)));
        }

        let page = catalog(store.clone(), provider.clone())
            .search("batman", 1, 5)
            .await
            .unwrap();

        assert!(page.results.len() <= 5);
        assert_eq!(provider.call_count(), 1);
        assert!(matches!(
            provider.recorded_calls()[0],
            RecordedProviderCall::SearchMovies { .. }
        ));
        // Upstream results were merged into the store
        let filter = MovieFilter {
            title: Some("Batman".to_string()),
        };
        assert!(store.count_movies(&filter).unwrap() > 3);
    }

    #[tokio::test]
    async fn test_search_hit_reports_local_totals() {
        let store = Arc::new(MemoryStore::new());
        let provider = Arc::new(MockProvider::new());
        for i in 1..=20 {
            store
                .upsert_movie(&fixtures::movie_upsert(i, &format!("Batman {}", i)))
                .unwrap();
        }

        let page = catalog(store, provider.clone())
            .search("batman", 1, 20)
            .await
            .unwrap();

        assert_eq!(page.results.len(), 20);
        assert_eq!(page.total_results, 20);
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn test_upstream_failure_surfaces_without_stale_fallback() {
        let store = Arc::new(MemoryStore::new());
        let provider = Arc::new(MockProvider::new());
        provider.set_next_error(ProviderError::Api {
            status: 500,
            message: "boom".to_string(),
        });

        let result = catalog(store, provider).popular(1, 5).await;

        assert!(matches!(result, Err(CatalogError::UpstreamFetch(_))));
    }

    #[tokio::test]
    async fn test_batch_persistence_failure_does_not_abort_response() {
        let store = Arc::new(MemoryStore::new());
        let provider = Arc::new(MockProvider::new());
        for i in 1..=3 {
            provider.add_movie(fixtures::movie_record(i, &format!("Movie {}", i)));
        }
        store.fail_writes(true);

        let page = catalog(store, provider).popular(1, 3).await.unwrap();

        assert_eq!(page.results.len(), 3);
    }

    #[tokio::test]
    async fn test_details_complete_row_served_from_store() {
        let store = Arc::new(MemoryStore::new());
        let provider = Arc::new(MockProvider::new());
        let mut record = fixtures::movie_upsert(603, "The Matrix");
        record.runtime = Some(136);
        store.upsert_movie(&record).unwrap();

        let detail = catalog(store, provider.clone())
            .details("603")
            .await
            .unwrap();

        assert_eq!(detail.movie.id, 603);
        assert!(detail.tagline.is_none());
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn test_details_incomplete_row_refreshes_and_links_genres() {
        let store = Arc::new(MemoryStore::new());
        let provider = Arc::new(MockProvider::new());
        // Row exists but was only ever written from a list page
        let mut record = fixtures::movie_upsert(603, "The Matrix");
        record.runtime = None;
        store.upsert_movie(&record).unwrap();
        provider.add_movie_details(fixtures::movie_details_record(
            603,
            "The Matrix",
            136,
            &["Action", "Science Fiction"],
        ));

        let detail = catalog(store.clone(), provider.clone())
            .details("603")
            .await
            .unwrap();

        assert_eq!(detail.movie.runtime, Some(136));
        assert!(detail.tagline.is_some());
        assert_eq!(provider.call_count(), 1);

        let movie = store.find_movie(603).unwrap().unwrap();
        assert_eq!(movie.runtime, Some(136));
        let genres = store.movie_genres(movie.id).unwrap();
        assert_eq!(genres.len(), 2);
    }

    #[tokio::test]
    async fn test_details_absent_row_fetched_and_created() {
        let store = Arc::new(MemoryStore::new());
        let provider = Arc::new(MockProvider::new());
        provider.add_movie_details(fixtures::movie_details_record(
            550,
            "Fight Club",
            139,
            &["Drama"],
        ));

        let detail = catalog(store.clone(), provider)
            .details("550")
            .await
            .unwrap();

        assert_eq!(detail.movie.id, 550);
        assert!(store.find_movie(550).unwrap().is_some());
    }

    #[tokio::test]
    async fn test_details_persistence_failure_still_returns_payload() {
        let store = Arc::new(MemoryStore::new());
        let provider = Arc::new(MockProvider::new());
        provider.add_movie_details(fixtures::movie_details_record(550, "Fight Club", 139, &[]));
        store.fail_writes(true);

        let detail = catalog(store, provider).details("550").await.unwrap();

        assert_eq!(detail.movie.runtime, Some(139));
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
    async fn test_details_unknown_id_is_not_found() {
        let store = Arc::new(MemoryStore::new());
        let provider = Arc::new(MockProvider::new());

        let result = catalog(store, provider).details("42").await;

        assert!(matches!(result, Err(CatalogError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_passthrough_categories_cache_best_effort() {
        let store = Arc::new(MemoryStore::new());
        let provider = Arc::new(MockProvider::new());
        for i in 1..=4 {
            provider.add_movie(fixtures::movie_record(i, &format!("Movie {}", i)));
        }

        let service = catalog(store.clone(), provider.clone());
        let page = service.top_rated(1, 2).await.unwrap();

        assert_eq!(page.results.len(), 2);
        assert_eq!(
            store
                .list_movies(&MovieFilter::default(), MovieOrder::IdAsc, 0, 100)
                .unwrap()
                .len(),
            4
        );

        // Pass-through categories never consult the freshness policy
        service.now_playing(1, 2).await.unwrap();
        service.upcoming(1, 2).await.unwrap();
        assert_eq!(provider.call_count(), 3);
    }
}

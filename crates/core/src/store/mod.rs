//! Local catalog store - the persisted cache of provider records.
//!
//! The store never evicts: stale rows are refreshed in place by the
//! catalog, not removed.

mod sqlite;
mod types;

pub use sqlite::SqliteStore;
pub use types::*;

/// Trait for catalog storage.
pub trait CatalogStore: Send + Sync {
    /// Point lookup by the provider-assigned movie id.
    fn find_movie(&self, tmdb_id: i64) -> Result<Option<StoredMovie>, StoreError>;

    /// Paged movie listing with the given filter and ordering.
    fn list_movies(
        &self,
        filter: &MovieFilter,
        order: MovieOrder,
        skip: u32,
        take: u32,
    ) -> Result<Vec<StoredMovie>, StoreError>;

    /// Count movies matching the filter.
    fn count_movies(&self, filter: &MovieFilter) -> Result<u64, StoreError>;

    /// Insert or update a movie by `tmdb_id`.
    ///
    /// Idempotent: applying the same record twice leaves exactly one row.
    /// Only detail fields are written; genre links are untouched. The row's
    /// `last_synced_at` is set to the current time.
    fn upsert_movie(&self, record: &MovieUpsert) -> Result<StoredMovie, StoreError>;

    /// Get or create a genre by exact name.
    fn ensure_genre(&self, name: &str) -> Result<Genre, StoreError>;

    /// Associate a movie with a genre. Duplicate pairs are silently ignored.
    fn link_movie_genre(&self, movie_id: i64, genre_id: i64) -> Result<(), StoreError>;

    /// All genres linked to a movie, by local surrogate id.
    fn movie_genres(&self, movie_id: i64) -> Result<Vec<Genre>, StoreError>;

    /// Cache a batch of TV shows, skipping rows whose `tmdb_id` already
    /// exists. Returns the number of new rows.
    fn cache_shows(&self, records: &[ShowUpsert]) -> Result<u32, StoreError>;

    /// Paged listing of cached TV shows in insertion order.
    fn list_shows(&self, skip: u32, take: u32) -> Result<Vec<StoredShow>, StoreError>;
}

//! Mock metadata provider for testing.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::provider::{
    MetadataProvider, MovieCategory, MovieDetailsRecord, MoviePage, MovieRecord, ProviderError,
    ShowCategory, ShowDetailsRecord, ShowPage, ShowRecord,
};

/// A recorded provider call for test assertions.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordedProviderCall {
    MoviePage { category: MovieCategory, page: u32 },
    SearchMovies { query: String, page: u32 },
    MovieDetails { tmdb_id: i64 },
    ShowPage { category: ShowCategory },
    SearchShows { query: String },
    ShowDetails { tmdb_id: i64 },
}

/// Mock implementation of the MetadataProvider trait.
///
/// Provides controllable behavior for testing:
/// - Serve configurable movie/show records as single-page responses
/// - Track calls for assertions (e.g. "no upstream call happened")
/// - Simulate failures via one-shot error injection
pub struct MockProvider {
    movies: Mutex<Vec<MovieRecord>>,
    movie_details: Mutex<HashMap<i64, MovieDetailsRecord>>,
    shows: Mutex<Vec<ShowRecord>>,
    show_details: Mutex<HashMap<i64, ShowDetailsRecord>>,
    calls: Mutex<Vec<RecordedProviderCall>>,
    next_error: Mutex<Option<ProviderError>>,
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MockProvider {
    /// Create a new empty mock provider.
    pub fn new() -> Self {
        Self {
            movies: Mutex::new(Vec::new()),
            movie_details: Mutex::new(HashMap::new()),
            shows: Mutex::new(Vec::new()),
            show_details: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
            next_error: Mutex::new(None),
        }
    }

    /// Add a movie served by listing and search endpoints.
    pub fn add_movie(&self, record: MovieRecord) {
        self.movies.lock().unwrap().push(record);
    }

    /// Add a movie detail record served by the details endpoint.
    pub fn add_movie_details(&self, record: MovieDetailsRecord) {
        self.movie_details.lock().unwrap().insert(record.id, record);
    }

    /// Add a show served by listing and search endpoints.
    pub fn add_show(&self, record: ShowRecord) {
        self.shows.lock().unwrap().push(record);
    }

    /// Add a show detail record served by the details endpoint.
    pub fn add_show_details(&self, record: ShowDetailsRecord) {
        self.show_details.lock().unwrap().insert(record.id, record);
    }

    /// Get all recorded calls.
    pub fn recorded_calls(&self) -> Vec<RecordedProviderCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of provider calls performed.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Configure the next call to fail with the given error.
    pub fn set_next_error(&self, error: ProviderError) {
        *self.next_error.lock().unwrap() = Some(error);
    }

    fn take_error(&self) -> Option<ProviderError> {
        self.next_error.lock().unwrap().take()
    }

    fn record(&self, call: RecordedProviderCall) {
        self.calls.lock().unwrap().push(call);
    }

    fn movie_page_response(&self, page: u32, results: Vec<MovieRecord>) -> MoviePage {
        MoviePage {
            page,
            total_results: results.len() as u64,
            total_pages: 1,
            results,
        }
    }

    fn show_page_response(&self, results: Vec<ShowRecord>) -> ShowPage {
        ShowPage {
            page: 1,
            total_results: results.len() as u64,
            total_pages: 1,
            results,
        }
    }
}

#[async_trait]
impl MetadataProvider for MockProvider {
    async fn movie_page(
        &self,
        category: MovieCategory,
        page: u32,
    ) -> Result<MoviePage, ProviderError> {
        if let Some(err) = self.take_error() {
            return Err(err);
        }
        self.record(RecordedProviderCall::MoviePage { category, page });

        let results = self.movies.lock().unwrap().clone();
        Ok(self.movie_page_response(page, results))
    }

    async fn search_movies(&self, query: &str, page: u32) -> Result<MoviePage, ProviderError> {
        if let Some(err) = self.take_error() {
            return Err(err);
        }
        self.record(RecordedProviderCall::SearchMovies {
            query: query.to_string(),
            page,
        });

        let query_lower = query.to_lowercase();
        let results: Vec<MovieRecord> = self
            .movies
            .lock()
            .unwrap()
            .iter()
            .filter(|m| m.title.to_lowercase().contains(&query_lower))
            .cloned()
            .collect();
        Ok(self.movie_page_response(page, results))
    }

    async fn movie_details(&self, tmdb_id: i64) -> Result<MovieDetailsRecord, ProviderError> {
        if let Some(err) = self.take_error() {
            return Err(err);
        }
        self.record(RecordedProviderCall::MovieDetails { tmdb_id });

        self.movie_details
            .lock()
            .unwrap()
            .get(&tmdb_id)
            .cloned()
            .ok_or_else(|| ProviderError::NotFound(format!("Movie {} not found", tmdb_id)))
    }

    async fn show_page(&self, category: ShowCategory) -> Result<ShowPage, ProviderError> {
        if let Some(err) = self.take_error() {
            return Err(err);
        }
        self.record(RecordedProviderCall::ShowPage { category });

        let results = self.shows.lock().unwrap().clone();
        Ok(self.show_page_response(results))
    }

    async fn search_shows(&self, query: &str) -> Result<ShowPage, ProviderError> {
        if let Some(err) = self.take_error() {
            return Err(err);
        }
        self.record(RecordedProviderCall::SearchShows {
            query: query.to_string(),
        });

        let query_lower = query.to_lowercase();
        let results: Vec<ShowRecord> = self
            .shows
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.name.to_lowercase().contains(&query_lower))
            .cloned()
            .collect();
        Ok(self.show_page_response(results))
    }

    async fn show_details(&self, tmdb_id: i64) -> Result<ShowDetailsRecord, ProviderError> {
        if let Some(err) = self.take_error() {
            return Err(err);
        }
        self.record(RecordedProviderCall::ShowDetails { tmdb_id });

        self.show_details
            .lock()
            .unwrap()
            .get(&tmdb_id)
            .cloned()
            .ok_or_else(|| ProviderError::NotFound(format!("Show {} not found", tmdb_id)))
    }
}

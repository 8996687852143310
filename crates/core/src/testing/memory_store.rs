//! In-memory catalog store for testing.

use std::collections::HashSet;
use std::sync::Mutex;

use chrono::{DateTime, Utc};

use crate::store::{
    CatalogStore, Genre, MovieFilter, MovieOrder, MovieUpsert, ShowUpsert, StoreError, StoredMovie,
    StoredShow,
};

/// In-memory implementation of the CatalogStore trait.
///
/// Mirrors the SQLite store's semantics (idempotent upserts, unique genre
/// names, unique association pairs) without any I/O, and adds handles for
/// tests: write failure injection and sync timestamp backdating.
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

struct Inner {
    movies: Vec<StoredMovie>,
    genres: Vec<Genre>,
    movie_genres: HashSet<(i64, i64)>,
    shows: Vec<StoredShow>,
    next_movie_id: i64,
    next_genre_id: i64,
    next_show_id: i64,
    fail_writes: bool,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                movies: Vec::new(),
                genres: Vec::new(),
                movie_genres: HashSet::new(),
                shows: Vec::new(),
                next_movie_id: 1,
                next_genre_id: 1,
                next_show_id: 1,
                fail_writes: false,
            }),
        }
    }

    /// Make every subsequent write fail with a database error.
    pub fn fail_writes(&self, fail: bool) {
        self.inner.lock().unwrap().fail_writes = fail;
    }

    /// Rewrite a movie's sync timestamp, e.g. to make it stale.
    pub fn backdate_movie(&self, tmdb_id: i64, synced_at: DateTime<Utc>) {
        let mut inner = self.inner.lock().unwrap();
        if let Some(movie) = inner.movies.iter_mut().find(|m| m.tmdb_id == tmdb_id) {
            movie.last_synced_at = synced_at;
        }
    }
}

fn matches_filter(movie: &StoredMovie, filter: &MovieFilter) -> bool {
    match &filter.title {
        Some(query) => {
            let query = query.to_lowercase();
            movie.title.to_lowercase().contains(&query)
                || movie
                    .original_title
                    .as_ref()
                    .is_some_and(|t| t.to_lowercase().contains(&query))
        }
        None => true,
    }
}

impl CatalogStore for MemoryStore {
    fn find_movie(&self, tmdb_id: i64) -> Result<Option<StoredMovie>, StoreError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.movies.iter().find(|m| m.tmdb_id == tmdb_id).cloned())
    }

    fn list_movies(
        &self,
        filter: &MovieFilter,
        order: MovieOrder,
        skip: u32,
        take: u32,
    ) -> Result<Vec<StoredMovie>, StoreError> {
        let inner = self.inner.lock().unwrap();

        let mut matches: Vec<StoredMovie> = inner
            .movies
            .iter()
            .filter(|m| matches_filter(m, filter))
            .cloned()
            .collect();

        match order {
            MovieOrder::VoteAverageDesc => {
                // Unrated rows last, ties broken by insertion order
                matches.sort_by(|a, b| {
                    b.vote_average
                        .partial_cmp(&a.vote_average)
                        .unwrap_or(std::cmp::Ordering::Equal)
                        .then(a.id.cmp(&b.id))
                });
            }
            MovieOrder::IdAsc => matches.sort_by_key(|m| m.id),
        }

        Ok(matches
            .into_iter()
            .skip(skip as usize)
            .take(take as usize)
            .collect())
    }

    fn count_movies(&self, filter: &MovieFilter) -> Result<u64, StoreError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .movies
            .iter()
            .filter(|m| matches_filter(m, filter))
            .count() as u64)
    }

    fn upsert_movie(&self, record: &MovieUpsert) -> Result<StoredMovie, StoreError> {
        let mut inner = self.inner.lock().unwrap();
        if inner.fail_writes {
            return Err(StoreError::Database("write failure injected".to_string()));
        }

        let now = Utc::now();
        if let Some(movie) = inner.movies.iter_mut().find(|m| m.tmdb_id == record.tmdb_id) {
            movie.title = record.title.clone();
            movie.overview = record.overview.clone();
            movie.release_date = record.release_date;
            movie.poster_path = record.poster_path.clone();
            movie.backdrop_path = record.backdrop_path.clone();
            movie.runtime = record.runtime;
            movie.vote_average = record.vote_average;
            movie.original_title = record.original_title.clone();
            movie.last_synced_at = now;
            return Ok(movie.clone());
        }

        let movie = StoredMovie {
            id: inner.next_movie_id,
            tmdb_id: record.tmdb_id,
            title: record.title.clone(),
            overview: record.overview.clone(),
            release_date: record.release_date,
            poster_path: record.poster_path.clone(),
            backdrop_path: record.backdrop_path.clone(),
            runtime: record.runtime,
            vote_average: record.vote_average,
            original_title: record.original_title.clone(),
            last_synced_at: now,
        };
        inner.next_movie_id += 1;
        inner.movies.push(movie.clone());
        Ok(movie)
    }

    fn ensure_genre(&self, name: &str) -> Result<Genre, StoreError> {
        let mut inner = self.inner.lock().unwrap();
        if inner.fail_writes {
            return Err(StoreError::Database("write failure injected".to_string()));
        }

        if let Some(genre) = inner.genres.iter().find(|g| g.name == name) {
            return Ok(genre.clone());
        }

        let genre = Genre {
            id: inner.next_genre_id,
            name: name.to_string(),
        };
        inner.next_genre_id += 1;
        inner.genres.push(genre.clone());
        Ok(genre)
    }

    fn link_movie_genre(&self, movie_id: i64, genre_id: i64) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().unwrap();
        if inner.fail_writes {
            return Err(StoreError::Database("write failure injected".to_string()));
        }

        inner.movie_genres.insert((movie_id, genre_id));
        Ok(())
    }

    fn movie_genres(&self, movie_id: i64) -> Result<Vec<Genre>, StoreError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .genres
            .iter()
            .filter(|g| inner.movie_genres.contains(&(movie_id, g.id)))
            .cloned()
            .collect())
    }

    fn cache_shows(&self, records: &[ShowUpsert]) -> Result<u32, StoreError> {
        let mut inner = self.inner.lock().unwrap();
        if inner.fail_writes {
            return Err(StoreError::Database("write failure injected".to_string()));
        }

        let now = Utc::now();
        let mut new_count = 0;
        for record in records {
            if inner.shows.iter().any(|s| s.tmdb_id == record.tmdb_id) {
                continue;
            }
            let show = StoredShow {
                id: inner.next_show_id,
                tmdb_id: record.tmdb_id,
                name: record.name.clone(),
                overview: record.overview.clone(),
                poster_path: record.poster_path.clone(),
                backdrop_path: record.backdrop_path.clone(),
                first_air_date: record.first_air_date,
                vote_average: record.vote_average,
                last_synced_at: now,
            };
            inner.next_show_id += 1;
            inner.shows.push(show);
            new_count += 1;
        }
        Ok(new_count)
    }

    fn list_shows(&self, skip: u32, take: u32) -> Result<Vec<StoredShow>, StoreError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .shows
            .iter()
            .skip(skip as usize)
            .take(take as usize)
            .cloned()
            .collect())
    }
}

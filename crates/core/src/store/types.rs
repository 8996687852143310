//! Types for the local catalog store.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A movie row as persisted in the local store.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredMovie {
    /// Local surrogate id.
    pub id: i64,
    /// Provider-assigned id, unique across the store.
    pub tmdb_id: i64,
    pub title: String,
    pub overview: Option<String>,
    pub release_date: Option<NaiveDate>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    /// Runtime in minutes. Absent means the row has never been completed
    /// with a detail fetch.
    pub runtime: Option<u32>,
    pub vote_average: Option<f64>,
    pub original_title: Option<String>,
    /// When this row was last written from an upstream fetch.
    pub last_synced_at: DateTime<Utc>,
}

/// The field set written on every upstream-originated movie upsert.
///
/// Deliberately excludes genre links; those are maintained separately so an
/// upsert can never wipe existing associations.
#[derive(Debug, Clone)]
pub struct MovieUpsert {
    pub tmdb_id: i64,
    pub title: String,
    pub overview: Option<String>,
    pub release_date: Option<NaiveDate>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub runtime: Option<u32>,
    pub vote_average: Option<f64>,
    pub original_title: Option<String>,
}

/// A genre row. Names are unique and matched case-sensitively, exactly as
/// received from the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    pub id: i64,
    pub name: String,
}

/// Filter for movie listing queries.
#[derive(Debug, Clone, Default)]
pub struct MovieFilter {
    /// Case-insensitive substring match over title and original title.
    pub title: Option<String>,
}

/// Ordering for movie listing queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovieOrder {
    /// Highest rated first, unrated rows last.
    VoteAverageDesc,
    /// Insertion order.
    IdAsc,
}

/// A TV show row as persisted in the local store.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredShow {
    pub id: i64,
    pub tmdb_id: i64,
    pub name: String,
    pub overview: Option<String>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub first_air_date: Option<NaiveDate>,
    pub vote_average: Option<f64>,
    pub last_synced_at: DateTime<Utc>,
}

/// The field set written when caching a TV show from a listing page.
#[derive(Debug, Clone)]
pub struct ShowUpsert {
    pub tmdb_id: i64,
    pub name: String,
    pub overview: Option<String>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub first_air_date: Option<NaiveDate>,
    pub vote_average: Option<f64>,
}

/// Errors for store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

//! Response types returned by catalog queries.
//!
//! The same shapes are used whether a query was answered from the local
//! store or straight from the provider; optionality is encoded per field
//! instead of having a separate type per data source.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::provider::{
    GenreRecord, MovieDetailsRecord, MovieRecord, ShowDetailsRecord, ShowRecord,
};
use crate::store::{Genre, StoredMovie, StoredShow};

use super::normalize;

/// One page of a movie listing or search response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovieListPage {
    pub page: u32,
    pub results: Vec<MovieEntry>,
    pub total_pages: u32,
    pub total_results: u64,
}

/// A movie in a listing response.
///
/// `id` is always the provider-assigned id; genre ids are local surrogate
/// ids when the entry was shaped from the store, and the provider's own
/// ids when the entry passed straight through from upstream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovieEntry {
    pub id: i64,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overview: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backdrop_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runtime: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vote_average: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_title: Option<String>,
    #[serde(default)]
    pub genres: Vec<Genre>,
}

impl MovieEntry {
    /// Shape a provider list record into a response entry.
    pub fn from_wire(record: &MovieRecord) -> Self {
        Self {
            id: record.id,
            title: record.title.clone(),
            overview: record.overview.clone(),
            release_date: normalize::parse_date(record.release_date.as_deref()),
            poster_path: record.poster_path.clone(),
            backdrop_path: record.backdrop_path.clone(),
            runtime: record.runtime,
            vote_average: record.vote_average,
            original_title: record.original_title.clone(),
            genres: Vec::new(),
        }
    }

    /// Shape a stored row into a response entry with its genre links.
    pub fn from_stored(movie: StoredMovie, genres: Vec<Genre>) -> Self {
        Self {
            id: movie.tmdb_id,
            title: movie.title,
            overview: movie.overview,
            release_date: movie.release_date,
            poster_path: movie.poster_path,
            backdrop_path: movie.backdrop_path,
            runtime: movie.runtime,
            vote_average: movie.vote_average,
            original_title: movie.original_title,
            genres,
        }
    }
}

/// A movie detail response.
///
/// `tagline` is only ever populated from a fresh provider fetch; it is not
/// persisted, so store-shaped responses always carry `None` here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovieDetail {
    #[serde(flatten)]
    pub movie: MovieEntry,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tagline: Option<String>,
}

impl MovieDetail {
    /// Shape a provider detail record into a response.
    pub fn from_wire(record: &MovieDetailsRecord) -> Self {
        Self {
            movie: MovieEntry {
                id: record.id,
                title: record.title.clone(),
                overview: record.overview.clone(),
                release_date: normalize::parse_date(record.release_date.as_deref()),
                poster_path: record.poster_path.clone(),
                backdrop_path: record.backdrop_path.clone(),
                runtime: record.runtime,
                vote_average: record.vote_average,
                original_title: record.original_title.clone(),
                genres: record.genres.iter().map(Genre::from).collect(),
            },
            tagline: record.tagline.clone(),
        }
    }

    /// Shape a stored row into a detail response.
    pub fn from_stored(movie: StoredMovie, genres: Vec<Genre>) -> Self {
        Self {
            movie: MovieEntry::from_stored(movie, genres),
            tagline: None,
        }
    }
}

impl From<&GenreRecord> for Genre {
    fn from(record: &GenreRecord) -> Self {
        Self {
            id: record.id,
            name: record.name.clone(),
        }
    }
}

/// One page of a TV show listing or search response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShowListPage {
    pub page: u32,
    pub results: Vec<ShowEntry>,
    pub total_pages: u32,
    pub total_results: u64,
}

/// A TV show in a listing response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShowEntry {
    pub id: i64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overview: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backdrop_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_air_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vote_average: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_name: Option<String>,
}

impl ShowEntry {
    pub fn from_wire(record: &ShowRecord) -> Self {
        Self {
            id: record.id,
            name: record.name.clone(),
            overview: record.overview.clone(),
            poster_path: record.poster_path.clone(),
            backdrop_path: record.backdrop_path.clone(),
            first_air_date: normalize::parse_date(record.first_air_date.as_deref()),
            vote_average: record.vote_average,
            original_name: record.original_name.clone(),
        }
    }

    pub fn from_stored(show: StoredShow) -> Self {
        Self {
            id: show.tmdb_id,
            name: show.name,
            overview: show.overview,
            poster_path: show.poster_path,
            backdrop_path: show.backdrop_path,
            first_air_date: show.first_air_date,
            vote_average: show.vote_average,
            original_name: None,
        }
    }
}

/// A TV show detail response, always shaped from a fresh provider fetch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShowDetail {
    #[serde(flatten)]
    pub show: ShowEntry,
    #[serde(default)]
    pub number_of_seasons: u32,
    #[serde(default)]
    pub number_of_episodes: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tagline: Option<String>,
    #[serde(default)]
    pub genres: Vec<Genre>,
}

impl ShowDetail {
    pub fn from_wire(record: &ShowDetailsRecord) -> Self {
        Self {
            show: ShowEntry {
                id: record.id,
                name: record.name.clone(),
                overview: record.overview.clone(),
                poster_path: record.poster_path.clone(),
                backdrop_path: record.backdrop_path.clone(),
                first_air_date: normalize::parse_date(record.first_air_date.as_deref()),
                vote_average: record.vote_average,
                original_name: record.original_name.clone(),
            },
            number_of_seasons: record.number_of_seasons,
            number_of_episodes: record.number_of_episodes,
            tagline: record.tagline.clone(),
            genres: record.genres.iter().map(Genre::from).collect(),
        }
    }
}

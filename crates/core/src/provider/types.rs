//! Typed pages and records returned by the metadata provider.

use serde::{Deserialize, Serialize};

/// Listing categories exposed by the provider for movies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovieCategory {
    Popular,
    TopRated,
    Upcoming,
    NowPlaying,
}

impl MovieCategory {
    /// Path segment used by the provider API, also used as a metric label.
    pub fn as_str(&self) -> &'static str {
        match self {
            MovieCategory::Popular => "popular",
            MovieCategory::TopRated => "top_rated",
            MovieCategory::Upcoming => "upcoming",
            MovieCategory::NowPlaying => "now_playing",
        }
    }
}

/// Listing categories exposed by the provider for TV shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShowCategory {
    Popular,
    TopRated,
    OnTheAir,
    AiringToday,
}

impl ShowCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShowCategory::Popular => "popular",
            ShowCategory::TopRated => "top_rated",
            ShowCategory::OnTheAir => "on_the_air",
            ShowCategory::AiringToday => "airing_today",
        }
    }
}

/// One page of movie results as returned by the provider.
///
/// The provider chooses its own page size (typically 20); callers that want
/// fewer results truncate after the fact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoviePage {
    pub page: u32,
    #[serde(default)]
    pub results: Vec<MovieRecord>,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_results: u64,
}

/// A movie as it appears in provider list/search results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovieRecord {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub overview: Option<String>,
    /// Release date as `YYYY-MM-DD`, sometimes empty.
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    /// Not present in list results, only in detail records.
    #[serde(default)]
    pub runtime: Option<u32>,
    /// Average vote on a 0-10 scale; 0 means unrated.
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub original_title: Option<String>,
}

/// A full movie detail record from the provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovieDetailsRecord {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub runtime: Option<u32>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub original_title: Option<String>,
    #[serde(default)]
    pub tagline: Option<String>,
    #[serde(default)]
    pub genres: Vec<GenreRecord>,
}

/// A genre as the provider reports it. The numeric id is the provider's
/// own and is never used as a local key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenreRecord {
    pub id: i64,
    pub name: String,
}

/// One page of TV show results as returned by the provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShowPage {
    pub page: u32,
    #[serde(default)]
    pub results: Vec<ShowRecord>,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_results: u64,
}

/// A TV show as it appears in provider list/search results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShowRecord {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    /// First air date as `YYYY-MM-DD`, sometimes empty.
    #[serde(default)]
    pub first_air_date: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub original_name: Option<String>,
}

/// A full TV show detail record from the provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShowDetailsRecord {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub first_air_date: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub original_name: Option<String>,
    #[serde(default)]
    pub number_of_seasons: u32,
    #[serde(default)]
    pub number_of_episodes: u32,
    #[serde(default)]
    pub tagline: Option<String>,
    #[serde(default)]
    pub genres: Vec<GenreRecord>,
}

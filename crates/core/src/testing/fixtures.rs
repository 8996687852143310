//! Fixture builders for catalog tests.

use crate::provider::{
    GenreRecord, MovieDetailsRecord, MovieRecord, ShowDetailsRecord, ShowRecord,
};
use crate::store::{MovieUpsert, ShowUpsert};
use chrono::NaiveDate;

/// A provider movie list record with sensible defaults.
pub fn movie_record(id: i64, title: &str) -> MovieRecord {
    MovieRecord {
        id,
        title: title.to_string(),
        overview: Some(format!("Overview of {}", title)),
        release_date: Some("1999-03-30".to_string()),
        poster_path: Some("/poster.jpg".to_string()),
        backdrop_path: None,
        runtime: None,
        vote_average: Some(7.5),
        original_title: Some(title.to_string()),
    }
}

/// A provider movie detail record with a tagline and genres.
pub fn movie_details_record(
    id: i64,
    title: &str,
    runtime: u32,
    genres: &[&str],
) -> MovieDetailsRecord {
    MovieDetailsRecord {
        id,
        title: title.to_string(),
        overview: Some(format!("Overview of {}", title)),
        release_date: Some("1999-03-30".to_string()),
        poster_path: Some("/poster.jpg".to_string()),
        backdrop_path: Some("/backdrop.jpg".to_string()),
        runtime: Some(runtime),
        vote_average: Some(8.2),
        original_title: Some(title.to_string()),
        tagline: Some(format!("The tagline of {}", title)),
        genres: genres
            .iter()
            .enumerate()
            .map(|(i, name)| GenreRecord {
                id: (i + 1) as i64 * 100,
                name: name.to_string(),
            })
            .collect(),
    }
}

/// A persisted-shape movie record ready for upserting.
pub fn movie_upsert(tmdb_id: i64, title: &str) -> MovieUpsert {
    MovieUpsert {
        tmdb_id,
        title: title.to_string(),
        overview: Some(format!("Overview of {}", title)),
        release_date: NaiveDate::from_ymd_opt(1999, 3, 30),
        poster_path: Some("/poster.jpg".to_string()),
        backdrop_path: None,
        runtime: None,
        vote_average: Some(7.5),
        original_title: Some(title.to_string()),
    }
}

/// A provider show list record with sensible defaults.
pub fn show_record(id: i64, name: &str) -> ShowRecord {
    ShowRecord {
        id,
        name: name.to_string(),
        overview: Some(format!("Overview of {}", name)),
        poster_path: Some("/poster.jpg".to_string()),
        backdrop_path: None,
        first_air_date: Some("2008-01-20".to_string()),
        vote_average: Some(9.5),
        original_name: Some(name.to_string()),
    }
}

/// A provider show detail record.
pub fn show_details_record(id: i64, name: &str) -> ShowDetailsRecord {
    ShowDetailsRecord {
        id,
        name: name.to_string(),
        overview: Some(format!("Overview of {}", name)),
        poster_path: Some("/poster.jpg".to_string()),
        backdrop_path: None,
        first_air_date: Some("2008-01-20".to_string()),
        vote_average: Some(9.5),
        original_name: Some(name.to_string()),
        number_of_seasons: 5,
        number_of_episodes: 62,
        tagline: Some(format!("The tagline of {}", name)),
        genres: vec![GenreRecord {
            id: 18,
            name: "Drama".to_string(),
        }],
    }
}

/// A persisted-shape show record ready for caching.
pub fn show_upsert(tmdb_id: i64, name: &str) -> ShowUpsert {
    ShowUpsert {
        tmdb_id,
        name: name.to_string(),
        overview: None,
        poster_path: None,
        backdrop_path: None,
        first_air_date: NaiveDate::from_ymd_opt(2008, 1, 20),
        vote_average: Some(9.5),
    }
}

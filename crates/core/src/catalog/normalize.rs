//! Mapping between provider wire records and persisted rows.
//!
//! Persisted fields are always cleaned: empty text, unparsable dates and
//! sentinel numerics become absent rather than being stored verbatim.

use chrono::NaiveDate;

use crate::provider::{MovieDetailsRecord, MovieRecord, ShowRecord};
use crate::store::{MovieUpsert, ShowUpsert};

/// Empty text is stored as absent, never as "".
pub fn clean_text(value: Option<&str>) -> Option<String> {
    value.filter(|s| !s.is_empty()).map(str::to_owned)
}

/// Parse a provider `YYYY-MM-DD` date; empty or unparsable input becomes
/// absent.
pub fn parse_date(value: Option<&str>) -> Option<NaiveDate> {
    value
        .filter(|s| !s.is_empty())
        .and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok())
}

/// A rating is kept only when finite and non-zero; the provider reports 0
/// for unrated entries.
pub fn clean_rating(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v != 0.0)
}

/// A runtime is kept only when non-zero; the provider reports 0 when the
/// runtime is unknown.
pub fn clean_runtime(value: Option<u32>) -> Option<u32> {
    value.filter(|v| *v > 0)
}

/// Persisted shape of a movie list record.
pub fn movie_from_list(record: &MovieRecord) -> MovieUpsert {
    MovieUpsert {
        tmdb_id: record.id,
        title: record.title.clone(),
        overview: clean_text(record.overview.as_deref()),
        release_date: parse_date(record.release_date.as_deref()),
        poster_path: clean_text(record.poster_path.as_deref()),
        backdrop_path: clean_text(record.backdrop_path.as_deref()),
        runtime: clean_runtime(record.runtime),
        vote_average: clean_rating(record.vote_average),
        original_title: clean_text(record.original_title.as_deref()),
    }
}

/// Persisted shape of a movie detail record. Genre resolution happens
/// separately against the store.
pub fn movie_from_details(record: &MovieDetailsRecord) -> MovieUpsert {
    MovieUpsert {
        tmdb_id: record.id,
        title: record.title.clone(),
        overview: clean_text(record.overview.as_deref()),
        release_date: parse_date(record.release_date.as_deref()),
        poster_path: clean_text(record.poster_path.as_deref()),
        backdrop_path: clean_text(record.backdrop_path.as_deref()),
        runtime: clean_runtime(record.runtime),
        vote_average: clean_rating(record.vote_average),
        original_title: clean_text(record.original_title.as_deref()),
    }
}

/// Persisted shape of a TV show list record.
pub fn show_from_list(record: &ShowRecord) -> ShowUpsert {
    ShowUpsert {
        tmdb_id: record.id,
        name: record.name.clone(),
        overview: clean_text(record.overview.as_deref()),
        poster_path: clean_text(record.poster_path.as_deref()),
        backdrop_path: clean_text(record.backdrop_path.as_deref()),
        first_air_date: parse_date(record.first_air_date.as_deref()),
        vote_average: clean_rating(record.vote_average),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text_becomes_absent() {
        assert_eq!(clean_text(Some("")), None);
        assert_eq!(clean_text(None), None);
        assert_eq!(clean_text(Some("hello")), Some("hello".to_string()));
    }

    #[test]
    fn test_unparsable_date_becomes_absent() {
        assert_eq!(parse_date(Some("not-a-date")), None);
        assert_eq!(parse_date(Some("")), None);
        assert_eq!(parse_date(None), None);
        assert_eq!(
            parse_date(Some("1999-03-30")),
            NaiveDate::from_ymd_opt(1999, 3, 30)
        );
    }

    #[test]
    fn test_nan_rating_becomes_absent() {
        assert_eq!(clean_rating(Some(f64::NAN)), None);
        assert_eq!(clean_rating(Some(f64::INFINITY)), None);
    }

    #[test]
    fn test_zero_rating_is_the_unrated_sentinel() {
        assert_eq!(clean_rating(Some(0.0)), None);
        assert_eq!(clean_rating(Some(7.5)), Some(7.5));
    }

    #[test]
    fn test_zero_runtime_becomes_absent() {
        assert_eq!(clean_runtime(Some(0)), None);
        assert_eq!(clean_runtime(Some(136)), Some(136));
        assert_eq!(clean_runtime(None), None);
    }

    #[test]
    fn test_movie_from_list_cleans_all_fields() {
        let record = MovieRecord {
            id: 603,
            title: "The Matrix".to_string(),
            overview: Some(String::new()),
            release_date: Some("garbage".to_string()),
            poster_path: Some("/poster.jpg".to_string()),
            backdrop_path: Some(String::new()),
            runtime: Some(0),
            vote_average: Some(0.0),
            original_title: None,
        };

        let upsert = movie_from_list(&record);
        assert_eq!(upsert.tmdb_id, 603);
        assert!(upsert.overview.is_none());
        assert!(upsert.release_date.is_none());
        assert_eq!(upsert.poster_path.as_deref(), Some("/poster.jpg"));
        assert!(upsert.backdrop_path.is_none());
        assert!(upsert.runtime.is_none());
        assert!(upsert.vote_average.is_none());
        assert!(upsert.original_title.is_none());
    }

    #[test]
    fn test_show_from_list_parses_air_date() {
        let record = ShowRecord {
            id: 1396,
            name: "Breaking Bad".to_string(),
            overview: Some("A high school chemistry teacher...".to_string()),
            poster_path: None,
            backdrop_path: None,
            first_air_date: Some("2008-01-20".to_string()),
            vote_average: Some(9.5),
            original_name: None,
        };

        let upsert = show_from_list(&record);
        assert_eq!(
            upsert.first_air_date,
            NaiveDate::from_ymd_opt(2008, 1, 20)
        );
        assert_eq!(upsert.vote_average, Some(9.5));
    }
}

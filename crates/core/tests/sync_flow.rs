//! Integration tests exercising the full read-decide-fetch-merge flow
//! against the real SQLite store with a mock provider.

use std::sync::Arc;

use cineshelf_core::testing::{fixtures, MockProvider};
use cineshelf_core::{CatalogStore, MovieCatalog, MovieFilter, MovieOrder, SqliteStore};

fn setup() -> (Arc<SqliteStore>, Arc<MockProvider>, MovieCatalog) {
    let store = Arc::new(SqliteStore::in_memory().unwrap());
    let provider = Arc::new(MockProvider::new());
    let catalog = MovieCatalog::new(store.clone(), provider.clone());
    (store, provider, catalog)
}

#[tokio::test]
async fn cold_store_is_populated_by_first_popular_query() {
    let (store, provider, catalog) = setup();
    for i in 1..=6 {
        provider.add_movie(fixtures::movie_record(i, &format!("Movie {}", i)));
    }

    let page = catalog.popular(1, 4).await.unwrap();

    assert_eq!(page.results.len(), 4);
    let cached = store
        .list_movies(&MovieFilter::default(), MovieOrder::IdAsc, 0, 100)
        .unwrap();
    assert_eq!(cached.len(), 6);
    // List records never carry a runtime, so every row is detail-incomplete
    assert!(cached.iter().all(|m| m.runtime.is_none()));
}

#[tokio::test]
async fn warm_store_serves_popular_without_upstream() {
    let (_, provider, catalog) = setup();
    for i in 1..=3 {
        provider.add_movie(fixtures::movie_record(i, &format!("Movie {}", i)));
    }

    // First query populates, second is served locally
    catalog.popular(1, 3).await.unwrap();
    let page = catalog.popular(1, 3).await.unwrap();

    assert_eq!(provider.call_count(), 1);
    assert_eq!(page.total_results, 3);
    assert_eq!(page.total_pages, 1);
}

#[tokio::test]
async fn detail_fetch_completes_a_list_populated_row() {
    let (store, provider, catalog) = setup();
    provider.add_movie(fixtures::movie_record(603, "The Matrix"));
    provider.add_movie_details(fixtures::movie_details_record(
        603,
        "The Matrix",
        136,
        &["Action", "Science Fiction"],
    ));

    catalog.popular(1, 1).await.unwrap();

    // Row exists but has no runtime yet, so details go upstream
    let detail = catalog.details("603").await.unwrap();
    assert_eq!(detail.movie.runtime, Some(136));
    assert!(detail.tagline.is_some());

    let movie = store.find_movie(603).unwrap().unwrap();
    assert_eq!(movie.runtime, Some(136));

    // Genre links use local surrogate ids, not the provider's
    let genres = store.movie_genres(movie.id).unwrap();
    assert_eq!(genres.len(), 2);
    assert!(genres.iter().all(|g| g.id < 100));
}

#[tokio::test]
async fn completed_row_serves_details_locally_without_tagline() {
    let (_, provider, catalog) = setup();
    provider.add_movie_details(fixtures::movie_details_record(603, "The Matrix", 136, &[]));

    // First call fetches and completes the row
    let fresh = catalog.details("603").await.unwrap();
    assert!(fresh.tagline.is_some());

    // Second call is a cache hit and drops the tagline
    let cached = catalog.details("603").await.unwrap();
    assert!(cached.tagline.is_none());
    assert_eq!(cached.movie.runtime, Some(136));
    assert_eq!(provider.call_count(), 1);
}

#[tokio::test]
async fn repeated_detail_refreshes_do_not_duplicate_genres() {
    let (store, provider, catalog) = setup();
    provider.add_movie_details(fixtures::movie_details_record(603, "The Matrix", 136, &["Action"]));

    catalog.details("603").await.unwrap();

    // Force another refresh by clearing the runtime via a list-shaped upsert
    let mut record = fixtures::movie_upsert(603, "The Matrix");
    record.runtime = None;
    store.upsert_movie(&record).unwrap();

    catalog.details("603").await.unwrap();

    let movie = store.find_movie(603).unwrap().unwrap();
    assert_eq!(store.movie_genres(movie.id).unwrap().len(), 1);
}

#[tokio::test]
async fn search_merges_upstream_results_without_duplicates() {
    let (store, provider, catalog) = setup();
    provider.add_movie(fixtures::movie_record(268, "Batman"));
    provider.add_movie(fixtures::movie_record(272, "Batman Begins"));

    catalog.search("batman", 1, 5).await.unwrap();
    catalog.search("batman", 1, 5).await.unwrap();

    let filter = MovieFilter {
        title: Some("batman".to_string()),
    };
    assert_eq!(store.count_movies(&filter).unwrap(), 2);
}

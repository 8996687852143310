use axum::{middleware as axum_middleware, routing::get, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use super::{handlers, middleware, movies, shows};
use crate::state::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    let api_routes = Router::new()
        // Health, config and metrics
        .route("/health", get(handlers::health))
        .route("/config", get(handlers::get_config))
        .route("/metrics", get(handlers::metrics))
        // Movies
        .route("/movies", get(movies::list_local))
        .route("/movies/popular", get(movies::popular))
        .route("/movies/top-rated", get(movies::top_rated))
        .route("/movies/upcoming", get(movies::upcoming))
        .route("/movies/now-playing", get(movies::now_playing))
        .route("/movies/search", get(movies::search))
        .route("/movies/{id}", get(movies::details))
        // TV shows
        .route("/shows", get(shows::list_local))
        .route("/shows/popular", get(shows::popular))
        .route("/shows/top-rated", get(shows::top_rated))
        .route("/shows/on-the-air", get(shows::on_the_air))
        .route("/shows/airing-today", get(shows::airing_today))
        .route("/shows/search", get(shows::search))
        .route("/shows/{id}", get(shows::details))
        .with_state(state);

    Router::new()
        .nest("/api/v1", api_routes)
        .layer(axum_middleware::from_fn(middleware::metrics_middleware))
        .layer(TraceLayer::new_for_http())
}

//! Movie API handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use cineshelf_core::{MovieDetail, MovieEntry, MovieListPage};

use super::{error_response, validate_paging, ErrorResponse};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct PageParams {
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_limit")]
    pub limit: u32,
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub query: String,
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_limit")]
    pub limit: u32,
}

fn default_page() -> u32 {
    1
}

fn default_limit() -> u32 {
    20
}

type ApiError = (StatusCode, Json<ErrorResponse>);

/// GET /api/v1/movies
///
/// Paged listing of locally cached movies.
pub async fn list_local(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PageParams>,
) -> Result<Json<Vec<MovieEntry>>, ApiError> {
    validate_paging(params.page, params.limit)?;
    state
        .movies()
        .local(params.page, params.limit)
        .map(Json)
        .map_err(error_response)
}

/// GET /api/v1/movies/popular
pub async fn popular(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PageParams>,
) -> Result<Json<MovieListPage>, ApiError> {
    validate_paging(params.page, params.limit)?;
    state
        .movies()
        .popular(params.page, params.limit)
        .await
        .map(Json)
        .map_err(error_response)
}

/// GET /api/v1/movies/top-rated
pub async fn top_rated(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PageParams>,
) -> Result<Json<MovieListPage>, ApiError> {
    validate_paging(params.page, params.limit)?;
    state
        .movies()
        .top_rated(params.page, params.limit)
        .await
        .map(Json)
        .map_err(error_response)
}

/// GET /api/v1/movies/upcoming
pub async fn upcoming(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PageParams>,
) -> Result<Json<MovieListPage>, ApiError> {
    validate_paging(params.page, params.limit)?;
    state
        .movies()
        .upcoming(params.page, params.limit)
        .await
        .map(Json)
        .map_err(error_response)
}

/// GET /api/v1/movies/now-playing
pub async fn now_playing(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PageParams>,
) -> Result<Json<MovieListPage>, ApiError> {
    validate_paging(params.page, params.limit)?;
    state
        .movies()
        .now_playing(params.page, params.limit)
        .await
        .map(Json)
        .map_err(error_response)
}

/// GET /api/v1/movies/search
pub async fn search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<MovieListPage>, ApiError> {
    validate_paging(params.page, params.limit)?;
    state
        .movies()
        .search(&params.query, params.page, params.limit)
        .await
        .map(Json)
        .map_err(error_response)
}

/// GET /api/v1/movies/{id}
pub async fn details(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<MovieDetail>, ApiError> {
    state
        .movies()
        .details(&id)
        .await
        .map(Json)
        .map_err(error_response)
}

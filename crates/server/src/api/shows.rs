//! TV show API handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use cineshelf_core::{ShowDetail, ShowEntry, ShowListPage};

use super::movies::PageParams;
use super::{error_response, validate_paging, ErrorResponse};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ShowSearchParams {
    pub query: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

/// GET /api/v1/shows
///
/// Paged listing of locally cached shows.
pub async fn list_local(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PageParams>,
) -> Result<Json<Vec<ShowEntry>>, ApiError> {
    validate_paging(params.page, params.limit)?;
    state
        .shows()
        .local(params.page, params.limit)
        .map(Json)
        .map_err(error_response)
}

/// GET /api/v1/shows/popular
pub async fn popular(State(state): State<Arc<AppState>>) -> Result<Json<ShowListPage>, ApiError> {
    state.shows().popular().await.map(Json).map_err(error_response)
}

/// GET /api/v1/shows/top-rated
pub async fn top_rated(State(state): State<Arc<AppState>>) -> Result<Json<ShowListPage>, ApiError> {
    state
        .shows()
        .top_rated()
        .await
        .map(Json)
        .map_err(error_response)
}

/// GET /api/v1/shows/on-the-air
pub async fn on_the_air(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ShowListPage>, ApiError> {
    state
        .shows()
        .on_the_air()
        .await
        .map(Json)
        .map_err(error_response)
}

/// GET /api/v1/shows/airing-today
pub async fn airing_today(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ShowListPage>, ApiError> {
    state
        .shows()
        .airing_today()
        .await
        .map(Json)
        .map_err(error_response)
}

/// GET /api/v1/shows/search
pub async fn search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ShowSearchParams>,
) -> Result<Json<ShowListPage>, ApiError> {
    state
        .shows()
        .search(&params.query)
        .await
        .map(Json)
        .map_err(error_response)
}

/// GET /api/v1/shows/{id}
pub async fn details(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ShowDetail>, ApiError> {
    state
        .shows()
        .details(&id)
        .await
        .map(Json)
        .map_err(error_response)
}

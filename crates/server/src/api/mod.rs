pub mod handlers;
pub mod middleware;
pub mod movies;
pub mod routes;
pub mod shows;

pub use routes::create_router;

use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use cineshelf_core::CatalogError;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Map a catalog error to an HTTP response.
pub(crate) fn error_response(err: CatalogError) -> (StatusCode, Json<ErrorResponse>) {
    let status = match &err {
        CatalogError::InvalidIdentifier(_) => StatusCode::BAD_REQUEST,
        CatalogError::NotFound(_) => StatusCode::NOT_FOUND,
        CatalogError::UpstreamFetch(_) => StatusCode::BAD_GATEWAY,
        CatalogError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (
        status,
        Json(ErrorResponse {
            error: err.to_string(),
        }),
    )
}

/// Reject page/limit values the catalog contract does not allow.
pub(crate) fn validate_paging(
    page: u32,
    limit: u32,
) -> Result<(), (StatusCode, Json<ErrorResponse>)> {
    if page < 1 || limit < 1 {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "page and limit must be at least 1".to_string(),
            }),
        ));
    }
    Ok(())
}

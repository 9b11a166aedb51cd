//! Convenience redirects onto the API routes.

use axum::{
    extract::{Path, RawQuery},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use catalogo_core::QueryId;

use crate::error::AppError;
use crate::AppState;

/// Redirect routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(root))
        .route("/:query_id", get(query_page))
}

fn found(location: String) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location)]).into_response()
}

async fn root() -> Response {
    found(format!("/{}", QueryId::Q1))
}

/// `/qN` forwards to `/api/qN`, keeping the query string.
async fn query_page(
    Path(label): Path<String>,
    RawQuery(query): RawQuery,
) -> Result<Response, AppError> {
    let id: QueryId = label.parse()?;
    let location = match query.filter(|q| !q.is_empty()) {
        Some(query) => format!("/api/{id}?{query}"),
        None => format!("/api/{id}"),
    };
    Ok(found(location))
}

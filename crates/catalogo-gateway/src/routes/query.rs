//! Single query endpoints.

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use catalogo_core::{run_query, QueryId, RawParams};
use tracing::debug;

use crate::error::AppError;
use crate::json::QueryResponse;
use crate::pagination::{Page, PageParams};
use crate::AppState;

/// Query routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/api/:query_id", get(handle_query))
}

/// Run one query and return the requested page of rows.
async fn handle_query(
    State(state): State<AppState>,
    Path(label): Path<String>,
    Query(raw): Query<RawParams>,
    Query(page): Query<PageParams>,
) -> Result<Json<QueryResponse>, AppError> {
    let id: QueryId = label.parse()?;
    let params = raw.resolve(&state.config.defaults);
    let page = Page::resolve(&page, &state.config.pages);

    let store = state.store.clone();
    let query_params = params.clone();
    let rows = tokio::task::spawn_blocking(move || run_query(&*store, id, &query_params)).await??;

    debug!(query = %id, total = rows.len(), page = page.number, "query served");

    let data = rows.slice(page.offset(), page.size);
    Ok(Json(QueryResponse::new(id, &params, data)))
}

//! Snapshot endpoints.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use catalogo_core::RawParams;

use crate::error::AppError;
use crate::json::{SavedSnapshotResponse, SnapshotMissingResponse, SnapshotResponse};
use crate::AppState;

/// Snapshot routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/esiti", get(generate))
        .route("/api/esiti/saved", get(saved))
}

/// Run every query, persist the bundle and return it.
async fn generate(
    State(state): State<AppState>,
    Query(raw): Query<RawParams>,
) -> Result<Json<SnapshotResponse>, AppError> {
    let params = raw.resolve(&state.config.defaults);
    let snapshots = state.snapshots.clone();

    let (bundle, location) =
        tokio::task::spawn_blocking(move || snapshots.build_and_store(&params)).await??;

    Ok(Json(SnapshotResponse {
        message: "Esiti generati e salvati su file JSON".to_string(),
        saved_to: location.to_string(),
        data: bundle,
    }))
}

/// Return the last saved bundle, or 404 when none exists yet.
async fn saved(State(state): State<AppState>) -> Result<Response, AppError> {
    let snapshots = state.snapshots.clone();
    let loaded = tokio::task::spawn_blocking(move || snapshots.load_saved()).await??;
    let path = state.snapshots.location().to_string();

    let response = match loaded {
        Some(data) => Json(SavedSnapshotResponse { path, data }).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(SnapshotMissingResponse {
                message: "File JSON non ancora generato".to_string(),
                path,
            }),
        )
            .into_response(),
    };

    Ok(response)
}

//! Catalog HTTP/JSON Gateway.
//!
//! Exposes the ten catalog queries, paginated, plus snapshot generation and
//! reload over a small REST surface.

pub mod config;
pub mod error;
pub mod json;
pub mod pagination;
pub mod routes;

pub use config::{Args, GatewayConfig};
pub use error::AppError;

use std::sync::Arc;

use axum::Router;
use catalogo_core::demo::seed_sqlite;
use catalogo_core::{JsonFileSink, RelationStore, SnapshotBuilder, SnapshotSink, SqliteStore};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

/// Application state shared across all routes.
#[derive(Clone)]
pub struct AppState {
    /// Relation store the queries read from.
    pub store: Arc<dyn RelationStore>,
    /// Snapshot builder sharing the same store.
    pub snapshots: SnapshotBuilder,
    /// Gateway configuration.
    pub config: GatewayConfig,
}

impl AppState {
    /// Create new application state.
    pub fn new(
        store: Arc<dyn RelationStore>,
        sink: Arc<dyn SnapshotSink>,
        config: GatewayConfig,
    ) -> Self {
        Self {
            snapshots: SnapshotBuilder::new(store.clone(), sink),
            store,
            config,
        }
    }

    /// Open the configured store and snapshot file.
    pub fn open(config: GatewayConfig) -> catalogo_core::Result<Self> {
        let store = SqliteStore::open_location(&config.store)?;
        if config.demo {
            seed_sqlite(&store)?;
            info!("demo dataset loaded");
        } else {
            store.create_schema()?;
        }

        let sink = JsonFileSink::new(config.results_path.clone());
        Ok(Self::new(Arc::new(store), Arc::new(sink), config))
    }
}

/// Create the router with all routes.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(routes::health::routes())
        .merge(routes::snapshot::routes())
        .merge(routes::query::routes())
        .merge(routes::redirect::routes())
        .fallback(routes::not_found)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}

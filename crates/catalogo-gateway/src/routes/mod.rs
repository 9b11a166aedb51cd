//! HTTP route handlers.

pub mod health;
pub mod query;
pub mod redirect;
pub mod snapshot;

use crate::error::AppError;

/// Fallback for paths no route matches.
pub async fn not_found() -> AppError {
    AppError::NotFound("route not found".to_string())
}

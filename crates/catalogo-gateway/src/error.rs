//! Error handling for the gateway.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use catalogo_core::{Error, ResultBundle, SinkError, SnapshotError};
use serde::Serialize;
use tracing::error;

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    /// Internal server error.
    Internal(String),
    /// Not found.
    NotFound(String),
    /// Relation store failure.
    Store(String),
    /// Snapshot sink could not be read.
    Sink(String),
    /// Snapshot computed but not persisted.
    SnapshotNotSaved {
        message: String,
        bundle: Box<ResultBundle>,
    },
}

/// Error response body.
#[derive(Serialize)]
pub struct ErrorResponse {
    /// Error flag.
    pub error: bool,
    /// Error code.
    pub code: String,
    /// Error message.
    pub message: String,
    /// Partial result, when one was computed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Box<ResultBundle>>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, data) = match self {
            AppError::Internal(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", msg, None)
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg, None),
            AppError::Store(msg) => (StatusCode::INTERNAL_SERVER_ERROR, "STORE_ERROR", msg, None),
            AppError::Sink(msg) => (StatusCode::INTERNAL_SERVER_ERROR, "SINK_ERROR", msg, None),
            AppError::SnapshotNotSaved { message, bundle } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "SNAPSHOT_NOT_SAVED",
                message,
                Some(bundle),
            ),
        };

        if status.is_server_error() {
            error!(code, %message, "request failed");
        }

        let body = ErrorResponse {
            error: true,
            code: code.to_string(),
            message,
            data,
        };

        (status, Json(body)).into_response()
    }
}

impl From<Error> for AppError {
    fn from(err: Error) -> Self {
        match err {
            Error::UnknownQuery(label) => AppError::NotFound(format!("unknown query: {label}")),
            other => AppError::Store(other.to_string()),
        }
    }
}

impl From<SinkError> for AppError {
    fn from(err: SinkError) -> Self {
        AppError::Sink(err.to_string())
    }
}

impl From<SnapshotError> for AppError {
    fn from(err: SnapshotError) -> Self {
        match err {
            SnapshotError::NotGenerated(inner) => inner.into(),
            SnapshotError::NotSaved { bundle, source } => AppError::SnapshotNotSaved {
                message: format!("snapshot generated but not saved: {source}"),
                bundle,
            },
        }
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(err: tokio::task::JoinError) -> Self {
        AppError::Internal(format!("task failed: {err}"))
    }
}

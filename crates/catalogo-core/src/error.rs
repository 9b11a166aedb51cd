//! Core error types.

use thiserror::Error;

/// Errors raised while reading relations or dispatching queries.
#[derive(Debug, Error)]
pub enum Error {
    /// SQLite relation store error.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Generic relation store failure (connectivity, corruption).
    #[error("relation store error: {0}")]
    Store(String),

    /// Query label outside `q1`..`q10`.
    #[error("unknown query: {0}")]
    UnknownQuery(String),
}

/// Errors raised by a snapshot sink.
#[derive(Debug, Error)]
pub enum SinkError {
    /// Filesystem error while writing or reading the snapshot.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The bundle could not be encoded or the stored file could not be decoded.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result alias for core operations.
pub type Result<T> = std::result::Result<T, Error>;

//! JSON response types for the HTTP gateway.

use catalogo_core::{QueryId, QueryParams, QueryRows, ResultBundle};
use serde::Serialize;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Health status.
    pub status: String,
    /// Gateway version.
    pub version: String,
}

/// Single query response.
///
/// Only the parameters the query actually used are echoed back.
#[derive(Debug, Serialize)]
pub struct QueryResponse {
    /// Query number (1..=10).
    pub query: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colore: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fornitore: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colore1: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colore2: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_fornitori: Option<u32>,
    /// Result rows for the requested page.
    pub data: QueryRows,
}

impl QueryResponse {
    /// Build a response for `id`, echoing the parameters it depends on.
    pub fn new(id: QueryId, params: &QueryParams, data: QueryRows) -> Self {
        let mut response = Self {
            query: id.number(),
            colore: None,
            fornitore: None,
            colore1: None,
            colore2: None,
            min_fornitori: None,
            data,
        };

        match id {
            QueryId::Q3 | QueryId::Q7 => response.colore = Some(params.colore.clone()),
            QueryId::Q4 => response.fornitore = Some(params.fornitore.clone()),
            QueryId::Q8 | QueryId::Q9 => {
                response.colore1 = Some(params.colore1.clone());
                response.colore2 = Some(params.colore2.clone());
            }
            QueryId::Q10 => response.min_fornitori = Some(params.min_fornitori()),
            QueryId::Q1 | QueryId::Q2 | QueryId::Q5 | QueryId::Q6 => {}
        }

        response
    }
}

/// Snapshot generated and saved.
#[derive(Debug, Serialize)]
pub struct SnapshotResponse {
    pub message: String,
    pub saved_to: String,
    pub data: ResultBundle,
}

/// Previously saved snapshot.
#[derive(Debug, Serialize)]
pub struct SavedSnapshotResponse {
    pub path: String,
    pub data: ResultBundle,
}

/// No snapshot has been saved yet.
#[derive(Debug, Serialize)]
pub struct SnapshotMissingResponse {
    pub message: String,
    pub path: String,
}

//! Snapshot builder.

use std::sync::Arc;

use chrono::{SubsecRound, Utc};
use thiserror::Error;
use tracing::{info, warn};

use crate::error::{Error, SinkError};
use crate::params::QueryParams;
use crate::query::QueryEvaluator;
use crate::store::RelationStore;

use super::bundle::{QueryResults, ResultBundle};
use super::sink::{SnapshotLocation, SnapshotSink};

/// Why a snapshot request failed.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// The relations could not be read; nothing was computed.
    #[error("snapshot not generated: {0}")]
    NotGenerated(#[from] Error),

    /// The bundle was computed but the sink rejected it.
    #[error("snapshot generated but not saved: {source}")]
    NotSaved {
        bundle: Box<ResultBundle>,
        source: SinkError,
    },
}

/// Runs all ten queries over one relation read and persists the bundle.
#[derive(Clone)]
pub struct SnapshotBuilder {
    store: Arc<dyn RelationStore>,
    sink: Arc<dyn SnapshotSink>,
}

impl SnapshotBuilder {
    /// Create a builder reading from `store` and persisting to `sink`.
    pub fn new(store: Arc<dyn RelationStore>, sink: Arc<dyn SnapshotSink>) -> Self {
        Self { store, sink }
    }

    /// Build a bundle without persisting it.
    ///
    /// The relations are read exactly once, so every query observes the
    /// same data.
    pub fn build(&self, params: &QueryParams) -> Result<ResultBundle, Error> {
        let relations = self.store.read_relations()?;
        let evaluator = QueryEvaluator::new(&relations);

        Ok(ResultBundle {
            generated_at: Utc::now().trunc_subsecs(0),
            results: QueryResults::evaluate(&evaluator, params),
            parameters: params.clone(),
        })
    }

    /// Build a bundle and hand it to the sink.
    pub fn build_and_store(
        &self,
        params: &QueryParams,
    ) -> Result<(ResultBundle, SnapshotLocation), SnapshotError> {
        let bundle = self.build(params)?;

        match self.sink.store(&bundle) {
            Ok(location) => {
                info!(
                    location = %location,
                    generated_at = %bundle.generated_at,
                    "snapshot saved"
                );
                Ok((bundle, location))
            }
            Err(source) => {
                warn!(location = %self.sink.location(), error = %source, "snapshot not saved");
                Err(SnapshotError::NotSaved {
                    bundle: Box::new(bundle),
                    source,
                })
            }
        }
    }

    /// The most recently persisted bundle, if any.
    pub fn load_saved(&self) -> Result<Option<ResultBundle>, SinkError> {
        self.sink.load()
    }

    /// Where the sink stores bundles.
    pub fn location(&self) -> SnapshotLocation {
        self.sink.location()
    }
}

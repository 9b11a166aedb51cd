//! Catalogo Core - relation model, query evaluator and result snapshots.
//!
//! This crate answers a fixed set of ten analytical queries over three
//! relations: suppliers (`Fornitori`), parts (`Pezzi`) and the catalog of
//! offers linking them (`Catalogo`).

pub mod demo;
pub mod error;
pub mod params;
pub mod query;
pub mod relation;
pub mod snapshot;
pub mod store;

pub use error::{Error, Result, SinkError};
pub use params::{ParamDefaults, QueryParams, RawParams, MIN_SUPPLIERS_FLOOR};
pub use query::{run_query, QueryEvaluator, QueryId, QueryRows};
pub use relation::{CatalogEntry, Part, PartId, Relations, Supplier, SupplierId};
pub use snapshot::{
    JsonFileSink, MemorySink, ResultBundle, SnapshotBuilder, SnapshotError, SnapshotLocation,
    SnapshotSink,
};
pub use store::{MemoryStore, RelationStore, SqliteStore, StoreLocation};

//! Snapshot building and persistence.
//!
//! A snapshot runs all ten queries over one relation read and bundles the
//! results with the resolved parameters and a UTC timestamp. Persisting the
//! bundle is delegated to a [`SnapshotSink`].

mod builder;
mod bundle;
mod sink;

pub use builder::{SnapshotBuilder, SnapshotError};
pub use bundle::{QueryResults, ResultBundle};
pub use sink::{JsonFileSink, MemorySink, SnapshotLocation, SnapshotSink, DEFAULT_RESULTS_PATH};

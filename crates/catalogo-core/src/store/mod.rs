//! Relation store accessors.
//!
//! A [`RelationStore`] hands out one self-consistent read of `Fornitori`,
//! `Pezzi` and `Catalogo` per call. Filtering is never done here; the
//! evaluator owns all query logic.

mod memory;
mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::{SqliteStore, SCHEMA_SQL};

use std::path::PathBuf;
use std::sync::Arc;

use crate::error::Result;
use crate::relation::Relations;

/// Read-only access to the three catalog relations.
pub trait RelationStore: Send + Sync {
    /// Read all three relations as one consistent snapshot.
    fn read_relations(&self) -> Result<Relations>;
}

impl<S: RelationStore + ?Sized> RelationStore for Arc<S> {
    fn read_relations(&self) -> Result<Relations> {
        (**self).read_relations()
    }
}

/// Where a SQLite relation store lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreLocation {
    /// Private in-memory database.
    Memory,
    /// Database file on disk.
    File(PathBuf),
}

impl StoreLocation {
    /// Parse a DSN: `sqlite::memory:`, `sqlite:<path>` or a bare path.
    pub fn from_dsn(dsn: &str) -> Self {
        let target = dsn.strip_prefix("sqlite:").unwrap_or(dsn);
        match target {
            ":memory:" | "" => StoreLocation::Memory,
            path => StoreLocation::File(PathBuf::from(path)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dsn_parsing() {
        assert_eq!(StoreLocation::from_dsn("sqlite::memory:"), StoreLocation::Memory);
        assert_eq!(StoreLocation::from_dsn(":memory:"), StoreLocation::Memory);
        assert_eq!(
            StoreLocation::from_dsn("sqlite:data/database.sqlite"),
            StoreLocation::File(PathBuf::from("data/database.sqlite"))
        );
        assert_eq!(
            StoreLocation::from_dsn("/var/lib/catalogo.db"),
            StoreLocation::File(PathBuf::from("/var/lib/catalogo.db"))
        );
    }

    #[test]
    fn test_arc_store_delegates() {
        let store: Arc<dyn RelationStore> = Arc::new(MemoryStore::new(
            Relations::new().with_supplier(1, "Acme"),
        ));
        let relations = store.read_relations().unwrap();
        assert_eq!(relations.suppliers.len(), 1);
    }
}

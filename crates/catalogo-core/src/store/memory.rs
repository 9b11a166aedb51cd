//! In-memory relation store.

use parking_lot::RwLock;

use crate::error::Result;
use crate::relation::Relations;

use super::RelationStore;

/// Relations held in memory behind a read/write lock.
///
/// Readers clone the whole snapshot under the read lock, so a concurrent
/// [`replace`](MemoryStore::replace) is either fully visible or not at all.
#[derive(Debug, Default)]
pub struct MemoryStore {
    relations: RwLock<Relations>,
}

impl MemoryStore {
    /// Create a store holding `relations`.
    pub fn new(relations: Relations) -> Self {
        Self {
            relations: RwLock::new(relations),
        }
    }

    /// Swap in a new dataset, returning the previous one.
    pub fn replace(&self, relations: Relations) -> Relations {
        std::mem::replace(&mut *self.relations.write(), relations)
    }
}

impl RelationStore for MemoryStore {
    fn read_relations(&self) -> Result<Relations> {
        Ok(self.relations.read().clone())
    }
}

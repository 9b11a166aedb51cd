//! SQLite relation store.
//!
//! Tables: `Fornitori(fid, fnome)`, `Pezzi(pid, pnome, colore)` and
//! `Catalogo(fid, pid, costo)`.

use std::path::Path;

use parking_lot::Mutex;
use rusqlite::{params, Connection, TransactionBehavior};
use tracing::debug;

use crate::error::Result;
use crate::relation::{CatalogEntry, Part, PartId, Relations, Supplier, SupplierId};

use super::{RelationStore, StoreLocation};

/// Schema for the three catalog relations.
pub const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS Fornitori (
    fid INTEGER PRIMARY KEY,
    fnome TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS Pezzi (
    pid INTEGER PRIMARY KEY,
    pnome TEXT NOT NULL,
    colore TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS Catalogo (
    fid INTEGER NOT NULL,
    pid INTEGER NOT NULL,
    costo REAL NOT NULL,
    FOREIGN KEY (fid) REFERENCES Fornitori(fid),
    FOREIGN KEY (pid) REFERENCES Pezzi(pid)
);

CREATE INDEX IF NOT EXISTS idx_catalogo_fid ON Catalogo(fid);
CREATE INDEX IF NOT EXISTS idx_catalogo_pid ON Catalogo(pid);
"#;

/// Relation store backed by a single SQLite connection.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open (or create) a database file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_connection(Connection::open(path)?)
    }

    /// Open a private in-memory database.
    pub fn open_in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    /// Open the database a DSN points at.
    pub fn open_location(location: &StoreLocation) -> Result<Self> {
        match location {
            StoreLocation::Memory => Self::open_in_memory(),
            StoreLocation::File(path) => Self::open(path),
        }
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Create the catalog tables if they do not exist.
    pub fn create_schema(&self) -> Result<()> {
        self.execute_batch(SCHEMA_SQL)
    }

    /// Run a batch of SQL statements, e.g. a database dump.
    pub fn execute_batch(&self, sql: &str) -> Result<()> {
        self.conn.lock().execute_batch(sql)?;
        Ok(())
    }

    /// Insert a supplier.
    pub fn insert_supplier(&self, fid: SupplierId, fnome: &str) -> Result<()> {
        self.conn.lock().execute(
            "INSERT INTO Fornitori (fid, fnome) VALUES (?1, ?2)",
            params![fid, fnome],
        )?;
        Ok(())
    }

    /// Insert a part.
    pub fn insert_part(&self, pid: PartId, pnome: &str, colore: &str) -> Result<()> {
        self.conn.lock().execute(
            "INSERT INTO Pezzi (pid, pnome, colore) VALUES (?1, ?2, ?3)",
            params![pid, pnome, colore],
        )?;
        Ok(())
    }

    /// Insert a catalog entry.
    pub fn insert_entry(&self, fid: SupplierId, pid: PartId, costo: f64) -> Result<()> {
        self.conn.lock().execute(
            "INSERT INTO Catalogo (fid, pid, costo) VALUES (?1, ?2, ?3)",
            params![fid, pid, costo],
        )?;
        Ok(())
    }

    /// Insert every row of `relations` in one transaction.
    pub fn load(&self, relations: &Relations) -> Result<()> {
        let mut conn = self.conn.lock();
        let tx = conn.transaction()?;
        {
            let mut stmt = tx.prepare("INSERT INTO Fornitori (fid, fnome) VALUES (?1, ?2)")?;
            for supplier in &relations.suppliers {
                stmt.execute(params![supplier.fid, supplier.fnome])?;
            }

            let mut stmt =
                tx.prepare("INSERT INTO Pezzi (pid, pnome, colore) VALUES (?1, ?2, ?3)")?;
            for part in &relations.parts {
                stmt.execute(params![part.pid, part.pnome, part.colore])?;
            }

            let mut stmt =
                tx.prepare("INSERT INTO Catalogo (fid, pid, costo) VALUES (?1, ?2, ?3)")?;
            for entry in &relations.catalog {
                stmt.execute(params![entry.fid, entry.pid, entry.costo])?;
            }
        }
        tx.commit()?;

        debug!(rows = relations.row_count(), "relations loaded into sqlite");
        Ok(())
    }
}

impl RelationStore for SqliteStore {
    fn read_relations(&self) -> Result<Relations> {
        let mut conn = self.conn.lock();
        let tx = conn.transaction_with_behavior(TransactionBehavior::Deferred)?;

        let suppliers = {
            let mut stmt = tx.prepare("SELECT fid, fnome FROM Fornitori")?;
            let rows = stmt.query_map([], |row| {
                Ok(Supplier {
                    fid: row.get(0)?,
                    fnome: row.get(1)?,
                })
            })?;
            rows.collect::<rusqlite::Result<Vec<_>>>()?
        };

        let parts = {
            let mut stmt = tx.prepare("SELECT pid, pnome, colore FROM Pezzi")?;
            let rows = stmt.query_map([], |row| {
                Ok(Part {
                    pid: row.get(0)?,
                    pnome: row.get(1)?,
                    colore: row.get(2)?,
                })
            })?;
            rows.collect::<rusqlite::Result<Vec<_>>>()?
        };

        let catalog = {
            let mut stmt = tx.prepare("SELECT fid, pid, costo FROM Catalogo")?;
            let rows = stmt.query_map([], |row| {
                Ok(CatalogEntry {
                    fid: row.get(0)?,
                    pid: row.get(1)?,
                    costo: row.get(2)?,
                })
            })?;
            rows.collect::<rusqlite::Result<Vec<_>>>()?
        };

        tx.commit()?;

        debug!(
            suppliers = suppliers.len(),
            parts = parts.len(),
            catalog = catalog.len(),
            "relations read from sqlite"
        );

        Ok(Relations {
            suppliers,
            parts,
            catalog,
        })
    }
}

//! Relation model: suppliers, parts and the catalog linking them.
//!
//! Column names follow the persisted schema (`Fornitori`, `Pezzi`,
//! `Catalogo`) so rows serialize with the same keys the tables use.

use serde::{Deserialize, Serialize};

/// Supplier identifier (`Fornitori.fid`).
pub type SupplierId = i64;

/// Part identifier (`Pezzi.pid`).
pub type PartId = i64;

/// A row of `Fornitori`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Supplier {
    /// Supplier key.
    pub fid: SupplierId,
    /// Supplier name, not necessarily unique.
    pub fnome: String,
}

impl Supplier {
    /// Create a supplier row.
    pub fn new(fid: SupplierId, fnome: impl Into<String>) -> Self {
        Self {
            fid,
            fnome: fnome.into(),
        }
    }
}

/// A row of `Pezzi`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Part {
    /// Part key.
    pub pid: PartId,
    /// Part name.
    pub pnome: String,
    /// Free-text color, compared case-insensitively.
    pub colore: String,
}

impl Part {
    /// Create a part row.
    pub fn new(pid: PartId, pnome: impl Into<String>, colore: impl Into<String>) -> Self {
        Self {
            pid,
            pnome: pnome.into(),
            colore: colore.into(),
        }
    }

    /// Whether this part has the given color, ignoring case.
    pub fn has_color(&self, colore: &ColorKey) -> bool {
        ColorKey::new(&self.colore) == *colore
    }
}

/// A row of `Catalogo`: supplier `fid` offers part `pid` at `costo`.
///
/// The (fid, pid) pair is not required to be unique.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub fid: SupplierId,
    pub pid: PartId,
    pub costo: f64,
}

impl CatalogEntry {
    /// Create a catalog row.
    pub fn new(fid: SupplierId, pid: PartId, costo: f64) -> Self {
        Self { fid, pid, costo }
    }
}

/// Case-folded color used for every color comparison.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ColorKey(String);

impl ColorKey {
    /// Fold a color for comparison.
    pub fn new(colore: &str) -> Self {
        Self(colore.to_lowercase())
    }
}

/// A consistent read of all three relations.
///
/// Row order is storage order and carries no meaning; every query sorts
/// its own output.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Relations {
    pub suppliers: Vec<Supplier>,
    pub parts: Vec<Part>,
    pub catalog: Vec<CatalogEntry>,
}

impl Relations {
    /// Create an empty set of relations.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a supplier.
    pub fn with_supplier(mut self, fid: SupplierId, fnome: impl Into<String>) -> Self {
        self.suppliers.push(Supplier::new(fid, fnome));
        self
    }

    /// Add a part.
    pub fn with_part(
        mut self,
        pid: PartId,
        pnome: impl Into<String>,
        colore: impl Into<String>,
    ) -> Self {
        self.parts.push(Part::new(pid, pnome, colore));
        self
    }

    /// Add a catalog entry.
    pub fn with_entry(mut self, fid: SupplierId, pid: PartId, costo: f64) -> Self {
        self.catalog.push(CatalogEntry::new(fid, pid, costo));
        self
    }

    /// Total number of rows across the three relations.
    pub fn row_count(&self) -> usize {
        self.suppliers.len() + self.parts.len() + self.catalog.len()
    }
}

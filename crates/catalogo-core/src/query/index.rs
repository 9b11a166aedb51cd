//! Hash indexes over a relation snapshot.
//!
//! Built once per evaluation by scanning each relation a single time, then
//! probed by the queries in O(1).

use std::collections::{HashMap, HashSet};

use crate::relation::{CatalogEntry, Part, PartId, Relations, Supplier, SupplierId};

/// Lookup tables over borrowed relation rows.
#[derive(Debug)]
pub struct RelationIndex<'a> {
    suppliers: HashMap<SupplierId, &'a Supplier>,
    parts: HashMap<PartId, &'a Part>,
    by_supplier: HashMap<SupplierId, Vec<&'a CatalogEntry>>,
    by_part: HashMap<PartId, Vec<&'a CatalogEntry>>,
}

impl<'a> RelationIndex<'a> {
    /// Build the indexes. If a key repeats, the first row wins.
    pub fn build(relations: &'a Relations) -> Self {
        let mut suppliers = HashMap::with_capacity(relations.suppliers.len());
        for supplier in &relations.suppliers {
            suppliers.entry(supplier.fid).or_insert(supplier);
        }

        let mut parts = HashMap::with_capacity(relations.parts.len());
        for part in &relations.parts {
            parts.entry(part.pid).or_insert(part);
        }

        let mut by_supplier: HashMap<SupplierId, Vec<&'a CatalogEntry>> = HashMap::new();
        let mut by_part: HashMap<PartId, Vec<&'a CatalogEntry>> = HashMap::new();
        for entry in &relations.catalog {
            by_supplier.entry(entry.fid).or_default().push(entry);
            by_part.entry(entry.pid).or_default().push(entry);
        }

        Self {
            suppliers,
            parts,
            by_supplier,
            by_part,
        }
    }

    /// Supplier row by key.
    pub fn supplier(&self, fid: SupplierId) -> Option<&'a Supplier> {
        self.suppliers.get(&fid).copied()
    }

    /// Part row by key.
    pub fn part(&self, pid: PartId) -> Option<&'a Part> {
        self.parts.get(&pid).copied()
    }

    /// Catalog rows offered by a supplier, in storage order.
    pub fn entries_for_supplier(&self, fid: SupplierId) -> &[&'a CatalogEntry] {
        self.by_supplier.get(&fid).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Catalog rows for a part, in storage order.
    pub fn entries_for_part(&self, pid: PartId) -> &[&'a CatalogEntry] {
        self.by_part.get(&pid).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Catalog rows grouped by part id (the `GROUP BY pid` view).
    pub fn part_groups(&self) -> impl Iterator<Item = (PartId, &[&'a CatalogEntry])> + '_ {
        self.by_part
            .iter()
            .map(|(&pid, entries)| (pid, entries.as_slice()))
    }

    /// Existing parts a supplier offers at least once.
    pub fn parts_supplied_by(&self, fid: SupplierId) -> HashSet<PartId> {
        self.entries_for_supplier(fid)
            .iter()
            .filter(|entry| self.parts.contains_key(&entry.pid))
            .map(|entry| entry.pid)
            .collect()
    }

    /// Parts a supplier offers, joined to their `Pezzi` rows.
    pub fn supplied_parts(&self, fid: SupplierId) -> impl Iterator<Item = &'a Part> + '_ {
        self.entries_for_supplier(fid)
            .iter()
            .filter_map(move |entry| self.part(entry.pid))
    }
}

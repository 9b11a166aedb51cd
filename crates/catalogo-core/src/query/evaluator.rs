//! Query evaluator.
//!
//! Each of the ten catalog queries is evaluated against one borrowed
//! [`Relations`] snapshot. The double-negation queries (Q2, Q3, Q7) are
//! expressed as set differences: for each supplier, compute the parts it
//! fails to cover and test that set for emptiness.

use std::collections::{BTreeSet, HashSet};

use tracing::debug;

use crate::params::QueryParams;
use crate::relation::{ColorKey, PartId, Relations, SupplierId};

use super::index::RelationIndex;
use super::rows::{
    MaxCostRow, PartIdRow, PartNameRow, QueryRows, SupplierIdRow, SupplierNameRow,
};
use super::QueryId;

/// Evaluates the catalog queries over a relation snapshot.
pub struct QueryEvaluator<'a> {
    relations: &'a Relations,
    index: RelationIndex<'a>,
}

impl<'a> QueryEvaluator<'a> {
    /// Create an evaluator, indexing the relations once.
    pub fn new(relations: &'a Relations) -> Self {
        Self {
            relations,
            index: RelationIndex::build(relations),
        }
    }

    /// Run one query by label.
    pub fn run(&self, id: QueryId, params: &QueryParams) -> QueryRows {
        let rows = match id {
            QueryId::Q1 => QueryRows::PartNames(self.q1()),
            QueryId::Q2 => QueryRows::SupplierNames(self.q2()),
            QueryId::Q3 => QueryRows::SupplierNames(self.q3(&params.colore)),
            QueryId::Q4 => QueryRows::PartNames(self.q4(&params.fornitore)),
            QueryId::Q5 => QueryRows::SupplierIds(self.q5()),
            QueryId::Q6 => QueryRows::MaxCost(self.q6()),
            QueryId::Q7 => QueryRows::SupplierIds(self.q7(&params.colore)),
            QueryId::Q8 => QueryRows::SupplierIds(self.q8(&params.colore1, &params.colore2)),
            QueryId::Q9 => QueryRows::SupplierIds(self.q9(&params.colore1, &params.colore2)),
            QueryId::Q10 => QueryRows::PartIds(self.q10(params.min_fornitori())),
        };

        debug!(query = %id, rows = rows.len(), "query evaluated");
        rows
    }

    /// Q1: distinct names of parts with at least one catalog entry.
    pub fn q1(&self) -> Vec<PartNameRow> {
        let names: BTreeSet<&str> = self
            .relations
            .parts
            .iter()
            .filter(|part| !self.index.entries_for_part(part.pid).is_empty())
            .map(|part| part.pnome.as_str())
            .collect();

        names.into_iter().map(part_name_row).collect()
    }

    /// Q2: suppliers offering every part. Vacuously every supplier when
    /// there are no parts.
    pub fn q2(&self) -> Vec<SupplierNameRow> {
        let required: HashSet<PartId> = self.relations.parts.iter().map(|p| p.pid).collect();
        self.covering_suppliers(&required)
    }

    /// Q3: suppliers offering every part of `colore`. Vacuously every
    /// supplier when no part has that color.
    pub fn q3(&self, colore: &str) -> Vec<SupplierNameRow> {
        let color = ColorKey::new(colore);
        let required: HashSet<PartId> = self
            .relations
            .parts
            .iter()
            .filter(|part| part.has_color(&color))
            .map(|part| part.pid)
            .collect();

        self.covering_suppliers(&required)
    }

    /// Q4: distinct names of parts offered by a supplier named `fornitore`
    /// and by no differently named supplier.
    pub fn q4(&self, fornitore: &str) -> Vec<PartNameRow> {
        let names: BTreeSet<&str> = self
            .relations
            .parts
            .iter()
            .filter(|part| {
                let mut offered_by_named = false;
                for entry in self.index.entries_for_part(part.pid) {
                    match self.index.supplier(entry.fid) {
                        Some(supplier) if supplier.fnome == fornitore => offered_by_named = true,
                        Some(_) => return false,
                        None => {}
                    }
                }
                offered_by_named
            })
            .map(|part| part.pnome.as_str())
            .collect();

        names.into_iter().map(part_name_row).collect()
    }

    /// Q5: distinct suppliers with an offer strictly above the part's mean
    /// cost. A part with a single offer never contributes.
    pub fn q5(&self) -> Vec<SupplierIdRow> {
        let mut fids = BTreeSet::new();

        for (_, entries) in self.index.part_groups() {
            // Plain f64 sum over count, the same rounding as SQLite's AVG:
            // equal offers can land above their own mean.
            let total: f64 = entries.iter().map(|entry| entry.costo).sum();
            let mean = total / entries.len() as f64;

            fids.extend(
                entries
                    .iter()
                    .filter(|entry| entry.costo > mean)
                    .map(|entry| entry.fid),
            );
        }

        fids.into_iter().map(supplier_id_row).collect()
    }

    /// Q6: per part, every offer at the maximum cost (ties included),
    /// ordered by part id then supplier name.
    pub fn q6(&self) -> Vec<MaxCostRow> {
        let mut rows: Vec<(SupplierId, MaxCostRow)> = Vec::new();

        for (pid, entries) in self.index.part_groups() {
            let Some(part) = self.index.part(pid) else {
                continue;
            };
            let max = entries
                .iter()
                .map(|entry| entry.costo)
                .fold(f64::NEG_INFINITY, f64::max);

            for entry in entries.iter().filter(|entry| entry.costo == max) {
                let Some(supplier) = self.index.supplier(entry.fid) else {
                    continue;
                };
                rows.push((
                    entry.fid,
                    MaxCostRow {
                        pid,
                        pnome: part.pnome.clone(),
                        fnome: supplier.fnome.clone(),
                        costo: entry.costo,
                    },
                ));
            }
        }

        rows.sort_by(|(fid_a, a), (fid_b, b)| {
            a.pid
                .cmp(&b.pid)
                .then_with(|| a.fnome.cmp(&b.fnome))
                .then_with(|| fid_a.cmp(fid_b))
        });
        rows.into_iter().map(|(_, row)| row).collect()
    }

    /// Q7: suppliers with at least one catalog entry whose supplied parts
    /// all have `colore`.
    pub fn q7(&self, colore: &str) -> Vec<SupplierIdRow> {
        let color = ColorKey::new(colore);

        self.suppliers_where(|fid| {
            !self.index.entries_for_supplier(fid).is_empty()
                && self.index.supplied_parts(fid).all(|part| part.has_color(&color))
        })
    }

    /// Q8: suppliers offering a part of `colore1` and a part of `colore2`.
    pub fn q8(&self, colore1: &str, colore2: &str) -> Vec<SupplierIdRow> {
        let first = ColorKey::new(colore1);
        let second = ColorKey::new(colore2);

        self.suppliers_where(|fid| {
            self.index.supplied_parts(fid).any(|part| part.has_color(&first))
                && self.index.supplied_parts(fid).any(|part| part.has_color(&second))
        })
    }

    /// Q9: distinct suppliers offering a part of either color.
    pub fn q9(&self, colore1: &str, colore2: &str) -> Vec<SupplierIdRow> {
        let first = ColorKey::new(colore1);
        let second = ColorKey::new(colore2);

        let fids: BTreeSet<SupplierId> = self
            .relations
            .suppliers
            .iter()
            .filter(|supplier| {
                self.index
                    .supplied_parts(supplier.fid)
                    .any(|part| part.has_color(&first) || part.has_color(&second))
            })
            .map(|supplier| supplier.fid)
            .collect();

        fids.into_iter().map(supplier_id_row).collect()
    }

    /// Q10: parts with at least `min_fornitori` distinct suppliers.
    pub fn q10(&self, min_fornitori: u32) -> Vec<PartIdRow> {
        let threshold = min_fornitori as usize;

        let pids: BTreeSet<PartId> = self
            .index
            .part_groups()
            .filter(|(_, entries)| {
                let distinct: HashSet<SupplierId> = entries.iter().map(|e| e.fid).collect();
                distinct.len() >= threshold
            })
            .map(|(pid, _)| pid)
            .collect();

        pids.into_iter().map(|pid| PartIdRow { pid }).collect()
    }

    /// Names of suppliers whose supplied parts include every part in
    /// `required`, ordered by name.
    fn covering_suppliers(&self, required: &HashSet<PartId>) -> Vec<SupplierNameRow> {
        let mut names: Vec<&str> = self
            .relations
            .suppliers
            .iter()
            .filter(|supplier| {
                let supplied = self.index.parts_supplied_by(supplier.fid);
                required.difference(&supplied).next().is_none()
            })
            .map(|supplier| supplier.fnome.as_str())
            .collect();

        names.sort();
        names
            .into_iter()
            .map(|fnome| SupplierNameRow {
                fnome: fnome.to_string(),
            })
            .collect()
    }

    /// Ids of suppliers matching `predicate`, ordered by id.
    fn suppliers_where<F>(&self, predicate: F) -> Vec<SupplierIdRow>
    where
        F: Fn(SupplierId) -> bool,
    {
        let mut fids: Vec<SupplierId> = self
            .relations
            .suppliers
            .iter()
            .map(|supplier| supplier.fid)
            .filter(|&fid| predicate(fid))
            .collect();

        fids.sort();
        fids.into_iter().map(supplier_id_row).collect()
    }
}

fn part_name_row(pnome: &str) -> PartNameRow {
    PartNameRow {
        pnome: pnome.to_string(),
    }
}

fn supplier_id_row(fid: SupplierId) -> SupplierIdRow {
    SupplierIdRow { fid }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fids(rows: &[SupplierIdRow]) -> Vec<SupplierId> {
        rows.iter().map(|r| r.fid).collect()
    }

    fn fnames(rows: &[SupplierNameRow]) -> Vec<&str> {
        rows.iter().map(|r| r.fnome.as_str()).collect()
    }

    fn pnames(rows: &[PartNameRow]) -> Vec<&str> {
        rows.iter().map(|r| r.pnome.as_str()).collect()
    }

    fn sample() -> Relations {
        Relations::new()
            .with_supplier(1, "Acme")
            .with_supplier(2, "Bolt Co")
            .with_supplier(3, "Zeta")
            .with_supplier(4, "Idle")
            .with_part(10, "Bullone", "rosso")
            .with_part(11, "Dado", "Verde")
            .with_part(12, "Vite", "ROSSO")
            .with_part(13, "Rondella", "blu")
            .with_entry(1, 10, 10.0)
            .with_entry(1, 11, 4.0)
            .with_entry(1, 12, 7.0)
            .with_entry(1, 13, 3.0)
            .with_entry(2, 10, 12.0)
            .with_entry(2, 12, 7.0)
            .with_entry(3, 11, 6.0)
    }

    #[test]
    fn test_q1_distinct_supplied_part_names() {
        let relations = sample().with_part(14, "Orphan", "nero");
        let eval = QueryEvaluator::new(&relations);

        assert_eq!(pnames(&eval.q1()), vec!["Bullone", "Dado", "Rondella", "Vite"]);
    }

    #[test]
    fn test_q1_dedupes_names() {
        let relations = sample().with_part(15, "Dado", "giallo").with_entry(3, 15, 1.0);
        let eval = QueryEvaluator::new(&relations);

        assert_eq!(pnames(&eval.q1()), vec!["Bullone", "Dado", "Rondella", "Vite"]);
    }

    #[test]
    fn test_q2_division() {
        let relations = sample();
        let eval = QueryEvaluator::new(&relations);

        assert_eq!(fnames(&eval.q2()), vec!["Acme"]);
    }

    #[test]
    fn test_q2_empty_parts_is_vacuous() {
        let relations = Relations::new()
            .with_supplier(2, "Zeta")
            .with_supplier(1, "Acme");
        let eval = QueryEvaluator::new(&relations);

        assert_eq!(fnames(&eval.q2()), vec!["Acme", "Zeta"]);
    }

    #[test]
    fn test_q2_keeps_duplicate_names() {
        let relations = Relations::new()
            .with_supplier(1, "Acme")
            .with_supplier(2, "Acme")
            .with_part(10, "Bolt", "red")
            .with_entry(1, 10, 1.0)
            .with_entry(2, 10, 1.0);
        let eval = QueryEvaluator::new(&relations);

        assert_eq!(fnames(&eval.q2()), vec!["Acme", "Acme"]);
    }

    #[test]
    fn test_q3_color_division_case_insensitive() {
        let relations = sample();
        let eval = QueryEvaluator::new(&relations);

        assert_eq!(fnames(&eval.q3("rosso")), vec!["Acme", "Bolt Co"]);
        assert_eq!(fnames(&eval.q3("Rosso")), vec!["Acme", "Bolt Co"]);
        assert_eq!(fnames(&eval.q3("ROSSO")), vec!["Acme", "Bolt Co"]);
        assert_eq!(fnames(&eval.q3("verde")), vec!["Acme", "Zeta"]);
    }

    #[test]
    fn test_q3_unknown_color_selects_everyone() {
        let relations = sample();
        let eval = QueryEvaluator::new(&relations);

        assert_eq!(
            fnames(&eval.q3("viola")),
            vec!["Acme", "Bolt Co", "Idle", "Zeta"]
        );
    }

    #[test]
    fn test_q4_exclusive_parts() {
        let relations = sample();
        let eval = QueryEvaluator::new(&relations);

        assert_eq!(pnames(&eval.q4("Acme")), vec!["Rondella"]);
        assert_eq!(pnames(&eval.q4("Zeta")), Vec::<&str>::new());
        assert_eq!(pnames(&eval.q4("Nobody")), Vec::<&str>::new());
    }

    #[test]
    fn test_q4_same_name_different_ids_still_exclusive() {
        let relations = Relations::new()
            .with_supplier(1, "Acme")
            .with_supplier(2, "Acme")
            .with_part(10, "Bolt", "red")
            .with_entry(1, 10, 1.0)
            .with_entry(2, 10, 2.0);
        let eval = QueryEvaluator::new(&relations);

        assert_eq!(pnames(&eval.q4("Acme")), vec!["Bolt"]);
    }

    #[test]
    fn test_q4_name_match_is_case_sensitive() {
        let relations = sample();
        let eval = QueryEvaluator::new(&relations);

        assert!(eval.q4("acme").is_empty());
    }

    #[test]
    fn test_q5_above_average() {
        let relations = sample();
        let eval = QueryEvaluator::new(&relations);

        // Bullone: mean 11 -> Bolt Co (12). Dado: mean 5 -> Zeta (6).
        // Vite: both at 7, nobody strictly above.
        assert_eq!(fids(&eval.q5()), vec![2, 3]);
    }

    #[test]
    fn test_q5_single_offer_never_contributes() {
        let relations = Relations::new()
            .with_supplier(1, "Acme")
            .with_part(10, "Bolt", "red")
            .with_entry(1, 10, 99.0);
        let eval = QueryEvaluator::new(&relations);

        assert!(eval.q5().is_empty());
    }

    #[test]
    fn test_q5_equal_offers_follow_float_mean() {
        let relations = Relations::new()
            .with_supplier(1, "A")
            .with_supplier(2, "B")
            .with_supplier(3, "C")
            .with_part(10, "Bolt", "red")
            .with_entry(1, 10, 0.7)
            .with_entry(2, 10, 0.7)
            .with_entry(3, 10, 0.7);
        let eval = QueryEvaluator::new(&relations);

        assert!((0.7 + 0.7 + 0.7) / 3.0 < 0.7);
        assert_eq!(fids(&eval.q5()), vec![1, 2, 3]);
    }

    #[test]
    fn test_q6_ties_included() {
        let relations = sample();
        let eval = QueryEvaluator::new(&relations);
        let rows = eval.q6();

        let summary: Vec<(PartId, &str, f64)> = rows
            .iter()
            .map(|r| (r.pid, r.fnome.as_str(), r.costo))
            .collect();
        assert_eq!(
            summary,
            vec![
                (10, "Bolt Co", 12.0),
                (11, "Zeta", 6.0),
                (12, "Acme", 7.0),
                (12, "Bolt Co", 7.0),
                (13, "Acme", 3.0),
            ]
        );
        assert_eq!(rows[2].pnome, "Vite");
    }

    #[test]
    fn test_q7_all_parts_of_color() {
        let relations = sample().with_supplier(5, "Rossi").with_entry(5, 10, 1.0);
        let eval = QueryEvaluator::new(&relations);

        assert_eq!(fids(&eval.q7("rosso")), vec![2, 5]);
        assert_eq!(fids(&eval.q7("VERDE")), vec![3]);
    }

    #[test]
    fn test_q7_idle_supplier_excluded() {
        let relations = sample();
        let eval = QueryEvaluator::new(&relations);

        assert!(!fids(&eval.q7("viola")).contains(&4));
        assert!(eval.q7("viola").is_empty());
    }

    #[test]
    fn test_q8_both_colors() {
        let relations = sample();
        let eval = QueryEvaluator::new(&relations);

        assert_eq!(fids(&eval.q8("rosso", "verde")), vec![1]);
        assert_eq!(fids(&eval.q8("rosso", "rosso")), vec![1, 2]);
    }

    #[test]
    fn test_q9_either_color() {
        let relations = sample();
        let eval = QueryEvaluator::new(&relations);

        assert_eq!(fids(&eval.q9("rosso", "verde")), vec![1, 2, 3]);
        assert_eq!(fids(&eval.q9("blu", "nero")), vec![1]);
        assert!(eval.q9("nero", "viola").is_empty());
    }

    #[test]
    fn test_q10_threshold() {
        let relations = sample();
        let eval = QueryEvaluator::new(&relations);

        let pids: Vec<PartId> = eval.q10(2).iter().map(|r| r.pid).collect();
        assert_eq!(pids, vec![10, 11, 12]);

        let pids: Vec<PartId> = eval.q10(3).iter().map(|r| r.pid).collect();
        assert!(pids.is_empty());
    }

    #[test]
    fn test_q10_counts_distinct_suppliers() {
        let relations = Relations::new()
            .with_supplier(1, "Acme")
            .with_part(10, "Bolt", "red")
            .with_entry(1, 10, 1.0)
            .with_entry(1, 10, 2.0);
        let eval = QueryEvaluator::new(&relations);

        assert!(eval.q10(2).is_empty());
    }

    #[test]
    fn test_run_dispatches_with_params() {
        let relations = sample();
        let eval = QueryEvaluator::new(&relations);
        let params = QueryParams::default().with_min_fornitori(1);

        assert_eq!(
            eval.run(QueryId::Q10, &params),
            QueryRows::PartIds(eval.q10(2))
        );
        assert_eq!(
            eval.run(QueryId::Q3, &params),
            QueryRows::SupplierNames(eval.q3("rosso"))
        );
    }

    #[test]
    fn test_empty_relations_give_empty_results() {
        let relations = Relations::new();
        let eval = QueryEvaluator::new(&relations);
        let params = QueryParams::default();

        for id in QueryId::ALL {
            assert!(eval.run(id, &params).is_empty(), "{id} should be empty");
        }
    }
}

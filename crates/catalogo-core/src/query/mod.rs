//! Query engine for the catalog.
//!
//! This module implements the ten fixed queries over a [`Relations`]
//! snapshot. Every query is a pure function of the relations and the
//! resolved [`QueryParams`](crate::params::QueryParams).
//!
//! [`Relations`]: crate::relation::Relations

mod evaluator;
mod index;
mod rows;

pub use evaluator::QueryEvaluator;
pub use index::RelationIndex;
pub use rows::{
    MaxCostRow, PartIdRow, PartNameRow, QueryRows, SupplierIdRow, SupplierNameRow,
};

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::params::QueryParams;
use crate::store::RelationStore;

/// Label of one of the ten catalog queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum QueryId {
    /// Distinct names of parts that have at least one supplier.
    Q1,
    /// Suppliers covering every part.
    Q2,
    /// Suppliers covering every part of a color.
    Q3,
    /// Parts supplied only by the named supplier.
    Q4,
    /// Suppliers charging above a part's average cost.
    Q5,
    /// Most expensive offers per part, ties included.
    Q6,
    /// Suppliers whose parts all have a color.
    Q7,
    /// Suppliers with parts of both colors.
    Q8,
    /// Suppliers with parts of either color.
    Q9,
    /// Parts with at least `min_fornitori` distinct suppliers.
    Q10,
}

impl QueryId {
    /// All queries in bundle order.
    pub const ALL: [QueryId; 10] = [
        QueryId::Q1,
        QueryId::Q2,
        QueryId::Q3,
        QueryId::Q4,
        QueryId::Q5,
        QueryId::Q6,
        QueryId::Q7,
        QueryId::Q8,
        QueryId::Q9,
        QueryId::Q10,
    ];

    /// Lowercase label (`q1`..`q10`).
    pub fn label(self) -> &'static str {
        match self {
            QueryId::Q1 => "q1",
            QueryId::Q2 => "q2",
            QueryId::Q3 => "q3",
            QueryId::Q4 => "q4",
            QueryId::Q5 => "q5",
            QueryId::Q6 => "q6",
            QueryId::Q7 => "q7",
            QueryId::Q8 => "q8",
            QueryId::Q9 => "q9",
            QueryId::Q10 => "q10",
        }
    }

    /// Query number (1..=10).
    pub fn number(self) -> u8 {
        match self {
            QueryId::Q1 => 1,
            QueryId::Q2 => 2,
            QueryId::Q3 => 3,
            QueryId::Q4 => 4,
            QueryId::Q5 => 5,
            QueryId::Q6 => 6,
            QueryId::Q7 => 7,
            QueryId::Q8 => 8,
            QueryId::Q9 => 9,
            QueryId::Q10 => 10,
        }
    }
}

impl fmt::Display for QueryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for QueryId {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        QueryId::ALL
            .into_iter()
            .find(|id| id.label() == s)
            .ok_or_else(|| Error::UnknownQuery(s.to_string()))
    }
}

/// Read the relations once and evaluate a single query.
pub fn run_query(
    store: &dyn RelationStore,
    id: QueryId,
    params: &QueryParams,
) -> Result<QueryRows> {
    let relations = store.read_relations()?;
    Ok(QueryEvaluator::new(&relations).run(id, params))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::relation::Relations;
    use crate::store::MemoryStore;

    #[test]
    fn test_labels_round_trip() {
        for id in QueryId::ALL {
            assert_eq!(id.label().parse::<QueryId>().unwrap(), id);
            assert_eq!(id.label(), format!("q{}", id.number()));
        }
    }

    #[test]
    fn test_run_query_reads_store() {
        let store = MemoryStore::new(
            Relations::new()
                .with_supplier(1, "Acme")
                .with_part(10, "Bolt", "red")
                .with_entry(1, 10, 5.0),
        );

        let rows = run_query(&store, QueryId::Q1, &QueryParams::default()).unwrap();
        assert_eq!(
            rows,
            QueryRows::PartNames(vec![PartNameRow {
                pnome: "Bolt".to_string()
            }])
        );
    }

    #[test]
    fn test_unknown_label() {
        assert!(matches!("q11".parse::<QueryId>(), Err(Error::UnknownQuery(_))));
        assert!(matches!("Q1".parse::<QueryId>(), Err(Error::UnknownQuery(_))));
        assert!(matches!("".parse::<QueryId>(), Err(Error::UnknownQuery(_))));
    }
}

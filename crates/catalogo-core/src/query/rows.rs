//! Result row types.

use serde::{Deserialize, Serialize};

use crate::relation::{PartId, SupplierId};

/// `{pnome}` row (Q1, Q4).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartNameRow {
    pub pnome: String,
}

/// `{fnome}` row (Q2, Q3).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplierNameRow {
    pub fnome: String,
}

/// `{fid}` row (Q5, Q7, Q8, Q9).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplierIdRow {
    pub fid: SupplierId,
}

/// `{pid}` row (Q10).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartIdRow {
    pub pid: PartId,
}

/// `{pid, pnome, fnome, costo}` row (Q6).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaxCostRow {
    pub pid: PartId,
    pub pnome: String,
    pub fnome: String,
    pub costo: f64,
}

/// Ordered rows produced by a single query.
///
/// Serializes as a bare JSON array of row objects.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum QueryRows {
    PartNames(Vec<PartNameRow>),
    SupplierNames(Vec<SupplierNameRow>),
    SupplierIds(Vec<SupplierIdRow>),
    PartIds(Vec<PartIdRow>),
    MaxCost(Vec<MaxCostRow>),
}

impl QueryRows {
    /// Number of rows.
    pub fn len(&self) -> usize {
        match self {
            QueryRows::PartNames(rows) => rows.len(),
            QueryRows::SupplierNames(rows) => rows.len(),
            QueryRows::SupplierIds(rows) => rows.len(),
            QueryRows::PartIds(rows) => rows.len(),
            QueryRows::MaxCost(rows) => rows.len(),
        }
    }

    /// Whether the query matched nothing.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Keep at most `limit` rows starting at `offset`, preserving order.
    pub fn slice(self, offset: usize, limit: usize) -> QueryRows {
        fn take<T>(rows: Vec<T>, offset: usize, limit: usize) -> Vec<T> {
            rows.into_iter().skip(offset).take(limit).collect()
        }

        match self {
            QueryRows::PartNames(rows) => QueryRows::PartNames(take(rows, offset, limit)),
            QueryRows::SupplierNames(rows) => QueryRows::SupplierNames(take(rows, offset, limit)),
            QueryRows::SupplierIds(rows) => QueryRows::SupplierIds(take(rows, offset, limit)),
            QueryRows::PartIds(rows) => QueryRows::PartIds(take(rows, offset, limit)),
            QueryRows::MaxCost(rows) => QueryRows::MaxCost(take(rows, offset, limit)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(values: &[i64]) -> QueryRows {
        QueryRows::SupplierIds(values.iter().map(|&fid| SupplierIdRow { fid }).collect())
    }

    #[test]
    fn test_slice_windows() {
        let rows = ids(&[1, 2, 3, 4, 5]);

        assert_eq!(rows.clone().slice(0, 2), ids(&[1, 2]));
        assert_eq!(rows.clone().slice(4, 2), ids(&[5]));
        assert_eq!(rows.clone().slice(10, 2), ids(&[]));
        assert_eq!(rows.slice(1, 100), ids(&[2, 3, 4, 5]));
    }

    #[test]
    fn test_serializes_as_plain_array() {
        let json = serde_json::to_string(&ids(&[3, 7])).unwrap();
        assert_eq!(json, r#"[{"fid":3},{"fid":7}]"#);

        let rows = QueryRows::MaxCost(vec![MaxCostRow {
            pid: 10,
            pnome: "Bolt".to_string(),
            fnome: "Acme".to_string(),
            costo: 5.0,
        }]);
        let json = serde_json::to_string(&rows).unwrap();
        assert_eq!(json, r#"[{"pid":10,"pnome":"Bolt","fnome":"Acme","costo":5.0}]"#);
    }

    #[test]
    fn test_len_and_empty() {
        assert!(ids(&[]).is_empty());
        assert_eq!(ids(&[1, 2]).len(), 2);
    }
}

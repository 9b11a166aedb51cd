//! Result bundle: all ten query results plus generation metadata.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::params::QueryParams;
use crate::query::{
    MaxCostRow, PartIdRow, PartNameRow, QueryEvaluator, QueryId, QueryRows, SupplierIdRow,
    SupplierNameRow,
};

/// Results of every query, keyed `q1`..`q10` in that order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryResults {
    pub q1: Vec<PartNameRow>,
    pub q2: Vec<SupplierNameRow>,
    pub q3: Vec<SupplierNameRow>,
    pub q4: Vec<PartNameRow>,
    pub q5: Vec<SupplierIdRow>,
    pub q6: Vec<MaxCostRow>,
    pub q7: Vec<SupplierIdRow>,
    pub q8: Vec<SupplierIdRow>,
    pub q9: Vec<SupplierIdRow>,
    pub q10: Vec<PartIdRow>,
}

impl QueryResults {
    /// Evaluate all ten queries in order.
    pub fn evaluate(evaluator: &QueryEvaluator<'_>, params: &QueryParams) -> Self {
        Self {
            q1: evaluator.q1(),
            q2: evaluator.q2(),
            q3: evaluator.q3(&params.colore),
            q4: evaluator.q4(&params.fornitore),
            q5: evaluator.q5(),
            q6: evaluator.q6(),
            q7: evaluator.q7(&params.colore),
            q8: evaluator.q8(&params.colore1, &params.colore2),
            q9: evaluator.q9(&params.colore1, &params.colore2),
            q10: evaluator.q10(params.min_fornitori()),
        }
    }

    /// Rows of a single query.
    pub fn get(&self, id: QueryId) -> QueryRows {
        match id {
            QueryId::Q1 => QueryRows::PartNames(self.q1.clone()),
            QueryId::Q2 => QueryRows::SupplierNames(self.q2.clone()),
            QueryId::Q3 => QueryRows::SupplierNames(self.q3.clone()),
            QueryId::Q4 => QueryRows::PartNames(self.q4.clone()),
            QueryId::Q5 => QueryRows::SupplierIds(self.q5.clone()),
            QueryId::Q6 => QueryRows::MaxCost(self.q6.clone()),
            QueryId::Q7 => QueryRows::SupplierIds(self.q7.clone()),
            QueryId::Q8 => QueryRows::SupplierIds(self.q8.clone()),
            QueryId::Q9 => QueryRows::SupplierIds(self.q9.clone()),
            QueryId::Q10 => QueryRows::PartIds(self.q10.clone()),
        }
    }
}

/// Timestamped, parameterized results of one snapshot build.
///
/// Serializes as `{generated_at, results: {q1..q10}, parameters}`, the
/// persisted file layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultBundle {
    #[serde(with = "iso8601_seconds")]
    pub generated_at: DateTime<Utc>,
    pub results: QueryResults,
    pub parameters: QueryParams,
}

/// `2024-05-01T10:00:00+00:00`, whole seconds with a numeric offset.
mod iso8601_seconds {
    use super::*;

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Secs, false))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::relation::Relations;
    use chrono::TimeZone;

    fn bundle() -> ResultBundle {
        let relations = Relations::new()
            .with_supplier(1, "Acme")
            .with_part(10, "Bolt", "red")
            .with_entry(1, 10, 5.0);
        let evaluator = QueryEvaluator::new(&relations);
        let params = QueryParams::default();

        ResultBundle {
            generated_at: Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap(),
            results: QueryResults::evaluate(&evaluator, &params),
            parameters: params,
        }
    }

    #[test]
    fn test_bundle_key_order() {
        let json = serde_json::to_string(&bundle()).unwrap();

        assert!(json.starts_with(r#"{"generated_at":"2024-05-01T10:00:00+00:00","results":{"q1":"#));
        let positions: Vec<usize> = QueryId::ALL
            .iter()
            .map(|id| json.find(&format!("\"{}\":", id.label())).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert!(json.ends_with(
            r#""parameters":{"colore":"rosso","fornitore":"Acme","colore1":"rosso","colore2":"verde","min_fornitori":2}}"#
        ));
    }

    #[test]
    fn test_bundle_decodes_from_file_layout() {
        let original = bundle();
        let json = serde_json::to_string_pretty(&original).unwrap();
        let decoded: ResultBundle = serde_json::from_str(&json).unwrap();

        assert_eq!(decoded, original);
    }

    #[test]
    fn test_get_matches_fields() {
        let bundle = bundle();

        assert_eq!(
            bundle.results.get(QueryId::Q1),
            QueryRows::PartNames(vec![PartNameRow {
                pnome: "Bolt".to_string()
            }])
        );
        assert_eq!(bundle.results.get(QueryId::Q10), QueryRows::PartIds(vec![]));
    }

    #[test]
    fn test_generated_at_accepts_other_offsets() {
        let json = r#""2024-05-01T12:00:00+02:00""#;
        let mut de = serde_json::Deserializer::from_str(json);
        let parsed = iso8601_seconds::deserialize(&mut de).unwrap();

        assert_eq!(parsed, Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap());
    }
}

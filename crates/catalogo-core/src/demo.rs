//! Demo dataset with a small suppliers/parts catalog.
//!
//! Covers the interesting cases for every query: a supplier offering every
//! part, mixed-case colors, a tie on the maximum cost, parts offered by a
//! single supplier and a supplier with no catalog entries.

use crate::error::Result;
use crate::relation::Relations;
use crate::store::SqliteStore;

/// Build the demo relations.
pub fn demo_relations() -> Relations {
    Relations::new()
        // Fornitori
        .with_supplier(1, "Acme")
        .with_supplier(2, "Widget Corp")
        .with_supplier(3, "Bulloneria Rossi")
        .with_supplier(4, "Ferramenta Bianchi")
        .with_supplier(5, "Magazzino Nord")
        // Pezzi
        .with_part(1, "Bullone", "rosso")
        .with_part(2, "Dado", "Verde")
        .with_part(3, "Vite", "ROSSO")
        .with_part(4, "Rondella", "blu")
        .with_part(5, "Chiodo", "verde")
        .with_part(6, "Molla", "giallo")
        // Catalogo
        .with_entry(1, 1, 10.0)
        .with_entry(1, 2, 4.0)
        .with_entry(1, 3, 7.0)
        .with_entry(1, 4, 2.5)
        .with_entry(1, 5, 1.0)
        .with_entry(1, 6, 3.0)
        .with_entry(2, 1, 12.0)
        .with_entry(2, 3, 7.0)
        .with_entry(3, 1, 9.0)
        .with_entry(3, 3, 6.5)
        .with_entry(4, 2, 5.0)
        .with_entry(4, 5, 1.5)
}

/// Create the schema in `store` and load the demo relations into it.
pub fn seed_sqlite(store: &SqliteStore) -> Result<()> {
    store.create_schema()?;
    store.load(&demo_relations())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::QueryParams;
    use crate::query::QueryEvaluator;
    use crate::store::RelationStore;

    #[test]
    fn test_demo_answers() {
        let relations = demo_relations();
        let eval = QueryEvaluator::new(&relations);

        let q2: Vec<String> = eval.q2().into_iter().map(|r| r.fnome).collect();
        assert_eq!(q2, vec!["Acme"]);

        let q4: Vec<String> = eval.q4("Acme").into_iter().map(|r| r.pnome).collect();
        assert_eq!(q4, vec!["Molla", "Rondella"]);

        let q7: Vec<i64> = eval.q7("rosso").into_iter().map(|r| r.fid).collect();
        assert_eq!(q7, vec![2, 3]);

        let q10: Vec<i64> = eval
            .q10(QueryParams::default().min_fornitori())
            .into_iter()
            .map(|r| r.pid)
            .collect();
        assert_eq!(q10, vec![1, 2, 3, 5]);

        let tie: Vec<String> = eval
            .q6()
            .into_iter()
            .filter(|r| r.pid == 3)
            .map(|r| r.fnome)
            .collect();
        assert_eq!(tie, vec!["Acme", "Widget Corp"]);
    }

    #[test]
    fn test_seed_sqlite() {
        let store = SqliteStore::open_in_memory().unwrap();
        seed_sqlite(&store).unwrap();

        let relations = store.read_relations().unwrap();
        assert_eq!(relations.row_count(), demo_relations().row_count());
    }
}

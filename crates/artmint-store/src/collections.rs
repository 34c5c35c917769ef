//! Curated collections and the featured-set transaction
//!
//! The carousel holds at most four ranked slots. Every curation call
//! replaces the whole set: clear every flag, then rewrite flags and
//! ranks from the (truncated) input inside one transaction. No
//! incremental diffing; the set is tiny and always fully supplied.

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::params;
use tracing::info;

use crate::db::MarketDb;
use crate::error::StoreError;

/// Maximum number of featured slots. The clear-then-rewrite strategy is
/// only correct while this stays small and the set is fully supplied on
/// every call.
pub const FEATURED_CAPACITY: usize = 4;

/// A persisted collection row
#[derive(Debug, Clone)]
pub struct CollectionRecord {
    pub collection_id: String,
    pub name: String,
    pub description: Option<String>,
    pub is_featured: bool,
    pub featured_order: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn to_storage(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn parse_timestamp(idx: usize, raw: String) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(&raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(
                idx,
                rusqlite::types::Type::Text,
                Box::new(e),
            )
        })
}

fn row_to_collection(row: &rusqlite::Row<'_>) -> rusqlite::Result<CollectionRecord> {
    Ok(CollectionRecord {
        collection_id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        is_featured: row.get::<_, i64>(3)? != 0,
        featured_order: row.get(4)?,
        created_at: parse_timestamp(5, row.get(5)?)?,
        updated_at: parse_timestamp(6, row.get(6)?)?,
    })
}

const COLLECTION_COLUMNS: &str =
    "collection_id, name, description, is_featured, featured_order, created_at, updated_at";

impl MarketDb {
    /// Create a collection (curation surface; not part of the mint path)
    pub fn insert_collection(
        &self,
        collection_id: &str,
        name: &str,
        description: Option<&str>,
    ) -> Result<(), StoreError> {
        let stamp = to_storage(Utc::now());
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO collections (collection_id, name, description, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?4)",
                params![collection_id, name, description, stamp],
            )?;
            Ok(())
        })
    }

    /// Replace the featured set wholesale.
    ///
    /// Input is truncated to `FEATURED_CAPACITY` before processing; the
    /// survivors get ranks 1..=n in input order. Runs in one
    /// transaction: an unknown collection id rolls the whole call back,
    /// so partial re-ranking is never observable. Returns the ids that
    /// were actually applied.
    ///
    /// Authorization is the caller's concern; this method assumes an
    /// already-trusted curator.
    pub fn set_featured(&self, ids: &[String]) -> Result<Vec<String>, StoreError> {
        let ids = &ids[..ids.len().min(FEATURED_CAPACITY)];
        let stamp = to_storage(Utc::now());

        self.with_conn_mut(|conn| {
            let tx = conn.transaction()?;

            tx.execute(
                "UPDATE collections SET is_featured = 0, featured_order = NULL
                 WHERE is_featured = 1",
                [],
            )?;

            for (position, id) in ids.iter().enumerate() {
                let changed = tx.execute(
                    "UPDATE collections SET is_featured = 1, featured_order = ?1, updated_at = ?2
                     WHERE collection_id = ?3",
                    params![position as i64 + 1, stamp, id],
                )?;
                if changed == 0 {
                    // Dropping the uncommitted transaction rolls back
                    return Err(StoreError::NotFound(format!("collection {}", id)));
                }
            }

            tx.commit()?;
            info!(count = ids.len(), "featured collections replaced");
            Ok(ids.to_vec())
        })
    }

    /// The currently featured collections, rank order
    pub fn featured(&self) -> Result<Vec<CollectionRecord>, StoreError> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {} FROM collections WHERE is_featured = 1 ORDER BY featured_order",
                COLLECTION_COLUMNS
            ))?;
            let rows = stmt.query_map([], row_to_collection)?;
            rows.collect::<rusqlite::Result<Vec<_>>>().map_err(Into::into)
        })
    }

    /// Look up one collection by id
    pub fn get_collection(&self, collection_id: &str) -> Result<Option<CollectionRecord>, StoreError> {
        self.with_conn(|conn| {
            conn.query_row(
                &format!(
                    "SELECT {} FROM collections WHERE collection_id = ?1",
                    COLLECTION_COLUMNS
                ),
                [collection_id],
                row_to_collection,
            )
            .map(Some)
            .or_else(|e| match e {
                rusqlite::Error::QueryReturnedNoRows => Ok(None),
                other => Err(other.into()),
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn db_with_collections(ids: &[&str]) -> MarketDb {
        let db = MarketDb::open_in_memory().unwrap();
        for id in ids {
            db.insert_collection(id, &format!("Collection {}", id), None)
                .unwrap();
        }
        db
    }

    fn featured_ids(db: &MarketDb) -> Vec<(String, i64)> {
        db.featured()
            .unwrap()
            .into_iter()
            .map(|c| (c.collection_id, c.featured_order.unwrap()))
            .collect()
    }

    #[test]
    fn test_set_featured_assigns_ranks_in_order() {
        let db = db_with_collections(&["A", "B", "C"]);
        db.set_featured(&["C".to_string(), "A".to_string()]).unwrap();

        assert_eq!(
            featured_ids(&db),
            vec![("C".to_string(), 1), ("A".to_string(), 2)]
        );
    }

    #[test]
    fn test_set_featured_truncates_to_capacity() {
        let db = db_with_collections(&["A", "B", "C", "D", "E"]);
        let applied = db
            .set_featured(&["A", "B", "C", "D", "E"].map(String::from))
            .unwrap();

        assert_eq!(applied, vec!["A", "B", "C", "D"]);
        assert_eq!(
            featured_ids(&db),
            vec![
                ("A".to_string(), 1),
                ("B".to_string(), 2),
                ("C".to_string(), 3),
                ("D".to_string(), 4)
            ]
        );
    }

    #[test]
    fn test_set_featured_empty_clears_all() {
        let db = db_with_collections(&["A", "B"]);
        db.set_featured(&["A".to_string(), "B".to_string()]).unwrap();
        db.set_featured(&[]).unwrap();

        assert!(db.featured().unwrap().is_empty());
        let a = db.get_collection("A").unwrap().unwrap();
        assert!(!a.is_featured);
        assert!(a.featured_order.is_none());
    }

    #[test]
    fn test_set_featured_replaces_previous_set() {
        let db = db_with_collections(&["A", "B", "C"]);
        db.set_featured(&["A".to_string(), "B".to_string()]).unwrap();
        db.set_featured(&["C".to_string()]).unwrap();

        assert_eq!(featured_ids(&db), vec![("C".to_string(), 1)]);
    }

    #[test]
    fn test_unknown_id_rolls_back_entirely() {
        let db = db_with_collections(&["A", "B"]);
        db.set_featured(&["A".to_string()]).unwrap();

        let err = db
            .set_featured(&["B".to_string(), "nope".to_string()])
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));

        // Previous state must be intact: no partial re-ranking
        assert_eq!(featured_ids(&db), vec![("A".to_string(), 1)]);
    }
}

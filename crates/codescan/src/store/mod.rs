//! The record store seam.
//!
//! Scan confirmation, import and history only talk to a [`RecordStore`],
//! so the SQLite backend can be swapped out in tests.

use crate::db::{record_repo, Database, DatabaseError};
use crate::record::{NewScanResult, RecordId, RecordUpdate, ScanResult};

/// Persistence operations over scan records.
///
/// Writes are whole-record: a failed call leaves no partial row behind.
pub trait RecordStore: Send + Sync {
    fn insert(&self, record: &NewScanResult) -> Result<ScanResult, DatabaseError>;

    /// Inserts a batch and returns how many records were written.
    ///
    /// The default inserts one record at a time, so a failure part way
    /// leaves the earlier records stored. The SQLite store overrides this
    /// with a single transaction.
    fn insert_many(&self, records: &[NewScanResult]) -> Result<usize, DatabaseError> {
        for record in records {
            self.insert(record)?;
        }
        Ok(records.len())
    }

    fn update(&self, id: RecordId, change: &RecordUpdate) -> Result<ScanResult, DatabaseError>;

    fn delete(&self, id: RecordId) -> Result<bool, DatabaseError>;

    fn delete_all(&self) -> Result<usize, DatabaseError>;

    /// All records ordered by timestamp, most recent first.
    fn list_recent(&self) -> Result<Vec<ScanResult>, DatabaseError>;

    fn find_by_id(&self, id: RecordId) -> Result<Option<ScanResult>, DatabaseError>;

    fn count(&self) -> Result<usize, DatabaseError> {
        Ok(self.list_recent()?.len())
    }
}

impl RecordStore for Database {
    fn insert(&self, record: &NewScanResult) -> Result<ScanResult, DatabaseError> {
        let saved = record_repo::insert(self, record)?;
        log::debug!("Inserted record {} ({})", saved.id, saved.code_type);
        Ok(saved)
    }

    fn insert_many(&self, records: &[NewScanResult]) -> Result<usize, DatabaseError> {
        record_repo::insert_many(self, records)
    }

    fn update(&self, id: RecordId, change: &RecordUpdate) -> Result<ScanResult, DatabaseError> {
        record_repo::update(self, id, change)
    }

    fn delete(&self, id: RecordId) -> Result<bool, DatabaseError> {
        record_repo::delete(self, id)
    }

    fn delete_all(&self) -> Result<usize, DatabaseError> {
        let removed = record_repo::delete_all(self)?;
        log::info!("Cleared {} records", removed);
        Ok(removed)
    }

    fn list_recent(&self) -> Result<Vec<ScanResult>, DatabaseError> {
        record_repo::list_recent(self)
    }

    fn find_by_id(&self, id: RecordId) -> Result<Option<ScanResult>, DatabaseError> {
        record_repo::find_by_id(self, id)
    }

    fn count(&self) -> Result<usize, DatabaseError> {
        record_repo::count(self)
    }
}

impl<S: RecordStore + ?Sized> RecordStore for std::sync::Arc<S> {
    fn insert(&self, record: &NewScanResult) -> Result<ScanResult, DatabaseError> {
        (**self).insert(record)
    }

    fn insert_many(&self, records: &[NewScanResult]) -> Result<usize, DatabaseError> {
        (**self).insert_many(records)
    }

    fn update(&self, id: RecordId, change: &RecordUpdate) -> Result<ScanResult, DatabaseError> {
        (**self).update(id, change)
    }

    fn delete(&self, id: RecordId) -> Result<bool, DatabaseError> {
        (**self).delete(id)
    }

    fn delete_all(&self) -> Result<usize, DatabaseError> {
        (**self).delete_all()
    }

    fn list_recent(&self) -> Result<Vec<ScanResult>, DatabaseError> {
        (**self).list_recent()
    }

    fn find_by_id(&self, id: RecordId) -> Result<Option<ScanResult>, DatabaseError> {
        (**self).find_by_id(id)
    }

    fn count(&self) -> Result<usize, DatabaseError> {
        (**self).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_database_store_round_trip() {
        let store = Database::open_in_memory().unwrap();
        let saved = store
            .insert(&NewScanResult::new("hello", None, "QR_CODE", 5))
            .unwrap();
        assert_eq!(store.list_recent().unwrap(), vec![saved.clone()]);
        assert!(store.delete(saved.id).unwrap());
        assert!(store.list_recent().unwrap().is_empty());
    }

    #[test]
    fn test_arc_store_delegates() {
        let store: Arc<dyn RecordStore> = Arc::new(Database::open_in_memory().unwrap());
        store
            .insert_many(&[
                NewScanResult::new("a", None, "EAN_13", 1),
                NewScanResult::new("b", None, "EAN_13", 2),
            ])
            .unwrap();
        assert_eq!(store.list_recent().unwrap().len(), 2);
        assert_eq!(store.count().unwrap(), 2);
        assert_eq!(store.delete_all().unwrap(), 2);
        assert_eq!(store.count().unwrap(), 0);
    }

    /// In-memory store relying on the trait's default batch insert and count.
    #[derive(Default)]
    struct VecStore {
        rows: std::sync::Mutex<Vec<ScanResult>>,
    }

    impl RecordStore for VecStore {
        fn insert(&self, record: &NewScanResult) -> Result<ScanResult, DatabaseError> {
            if record.content == "boom" {
                return Err(DatabaseError::EmptyContent);
            }
            let mut rows = self.rows.lock().unwrap();
            let saved = record.clone().with_id(rows.len() as RecordId + 1);
            rows.push(saved.clone());
            Ok(saved)
        }
        fn update(&self, id: RecordId, _: &RecordUpdate) -> Result<ScanResult, DatabaseError> {
            Err(DatabaseError::NotFound { id })
        }
        fn delete(&self, _: RecordId) -> Result<bool, DatabaseError> {
            Ok(false)
        }
        fn delete_all(&self) -> Result<usize, DatabaseError> {
            Ok(std::mem::take(&mut *self.rows.lock().unwrap()).len())
        }
        fn list_recent(&self) -> Result<Vec<ScanResult>, DatabaseError> {
            Ok(self.rows.lock().unwrap().clone())
        }
        fn find_by_id(&self, id: RecordId) -> Result<Option<ScanResult>, DatabaseError> {
            Ok(self.rows.lock().unwrap().iter().find(|r| r.id == id).cloned())
        }
    }

    #[test]
    fn test_default_insert_many_keeps_rows_before_failure() {
        let store = VecStore::default();
        let result = store.insert_many(&[
            NewScanResult::new("a", None, "QR_CODE", 1),
            NewScanResult::new("boom", None, "QR_CODE", 2),
            NewScanResult::new("c", None, "QR_CODE", 3),
        ]);
        assert!(result.is_err());
        assert_eq!(store.count().unwrap(), 1);
    }

    #[test]
    fn test_database_insert_many_is_all_or_nothing() {
        let store = Database::open_in_memory().unwrap();
        let result = store.insert_many(&[
            NewScanResult::new("a", None, "QR_CODE", 1),
            NewScanResult::new("", None, "QR_CODE", 2),
        ]);
        assert!(result.is_err());
        assert_eq!(store.count().unwrap(), 0);
    }
}

//! Record repository: CRUD operations for the `scan_results` table.

use rusqlite::{params, Connection, Row};

use super::{Database, DatabaseError};
use crate::record::{NewScanResult, RecordId, RecordUpdate, ScanResult};

fn from_row(row: &Row<'_>) -> Result<ScanResult, rusqlite::Error> {
    Ok(ScanResult {
        id: row.get("id")?,
        content: row.get("content")?,
        remark: row.get("remark")?,
        code_type: row.get("code_type")?,
        timestamp: row.get("timestamp")?,
    })
}

fn insert_on(conn: &Connection, record: &NewScanResult) -> Result<RecordId, DatabaseError> {
    if record.content.is_empty() {
        return Err(DatabaseError::EmptyContent);
    }
    conn.execute(
        "INSERT INTO scan_results (content, remark, code_type, timestamp)
         VALUES (?1, ?2, ?3, ?4)",
        params![
            record.content,
            record.remark,
            record.code_type,
            record.timestamp
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Inserts a new record and returns it with its assigned id.
pub fn insert(db: &Database, record: &NewScanResult) -> Result<ScanResult, DatabaseError> {
    db.with_conn(|conn| {
        let id = insert_on(conn, record)?;
        Ok(record.clone().with_id(id))
    })
}

/// Inserts all records in a single transaction. Either every record is
/// written or none is.
pub fn insert_many(db: &Database, records: &[NewScanResult]) -> Result<usize, DatabaseError> {
    db.with_conn_mut(|conn| {
        let tx = conn.transaction()?;
        for record in records {
            insert_on(&tx, record)?;
        }
        tx.commit()?;
        Ok(records.len())
    })
}

/// Overwrites content and remark of an existing record.
pub fn update(
    db: &Database,
    id: RecordId,
    change: &RecordUpdate,
) -> Result<ScanResult, DatabaseError> {
    if change.content.is_empty() {
        return Err(DatabaseError::EmptyContent);
    }
    db.with_conn(|conn| {
        let changed = conn.execute(
            "UPDATE scan_results SET content = ?2, remark = ?3 WHERE id = ?1",
            params![id, change.content, change.remark],
        )?;
        if changed == 0 {
            return Err(DatabaseError::NotFound { id });
        }
        find_on(conn, id)?.ok_or(DatabaseError::NotFound { id })
    })
}

fn find_on(conn: &Connection, id: RecordId) -> Result<Option<ScanResult>, DatabaseError> {
    let mut stmt = conn.prepare("SELECT * FROM scan_results WHERE id = ?1")?;
    let mut rows = stmt.query_map(params![id], from_row)?;
    let first = rows.next();
    match first {
        Some(Ok(row)) => Ok(Some(row)),
        Some(Err(e)) => Err(DatabaseError::Sqlite(e)),
        None => Ok(None),
    }
}

/// Finds a record by its id.
pub fn find_by_id(db: &Database, id: RecordId) -> Result<Option<ScanResult>, DatabaseError> {
    db.with_conn(|conn| find_on(conn, id))
}

/// Deletes one record. Returns whether a row was removed.
pub fn delete(db: &Database, id: RecordId) -> Result<bool, DatabaseError> {
    db.with_conn(|conn| {
        let removed = conn.execute("DELETE FROM scan_results WHERE id = ?1", params![id])?;
        Ok(removed > 0)
    })
}

/// Deletes every record. Returns the number of rows removed.
pub fn delete_all(db: &Database) -> Result<usize, DatabaseError> {
    db.with_conn(|conn| Ok(conn.execute("DELETE FROM scan_results", [])?))
}

/// Lists all records, most recent first. Ties on timestamp are broken by
/// insertion order, newest first.
pub fn list_recent(db: &Database) -> Result<Vec<ScanResult>, DatabaseError> {
    db.with_conn(|conn| {
        let mut stmt =
            conn.prepare("SELECT * FROM scan_results ORDER BY timestamp DESC, id DESC")?;
        let rows = stmt
            .query_map([], from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    })
}

/// Counts all records.
pub fn count(db: &Database) -> Result<usize, DatabaseError> {
    db.with_conn(|conn| {
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM scan_results", [], |r| r.get(0))?;
        Ok(count as usize)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_db() -> Database {
        Database::open_in_memory().expect("Failed to create test database")
    }

    fn sample(content: &str, timestamp: i64) -> NewScanResult {
        NewScanResult::new(content, Some("note".to_string()), "QR_CODE", timestamp)
    }

    #[test]
    fn test_insert_and_find() {
        let db = test_db();
        let saved = insert(&db, &sample("https://example.com", 1_700_000_000_000)).unwrap();
        assert!(saved.id > 0);

        let found = find_by_id(&db, saved.id).unwrap().unwrap();
        assert_eq!(found, saved);
        assert_eq!(found.remark.as_deref(), Some("note"));
        assert_eq!(found.code_type, "QR_CODE");
    }

    #[test]
    fn test_insert_assigns_distinct_ids() {
        let db = test_db();
        let a = insert(&db, &sample("same", 1)).unwrap();
        let b = insert(&db, &sample("same", 1)).unwrap();
        assert_ne!(a.id, b.id);
        assert_eq!(count(&db).unwrap(), 2);
    }

    #[test]
    fn test_insert_rejects_empty_content() {
        let db = test_db();
        let err = insert(&db, &sample("", 1)).unwrap_err();
        assert!(matches!(err, DatabaseError::EmptyContent));
        assert_eq!(count(&db).unwrap(), 0);
    }

    #[test]
    fn test_find_nonexistent() {
        let db = test_db();
        assert!(find_by_id(&db, 999).unwrap().is_none());
    }

    #[test]
    fn test_update_changes_only_content_and_remark() {
        let db = test_db();
        let saved = insert(&db, &sample("old", 10)).unwrap();

        let updated = update(&db, saved.id, &RecordUpdate::new("new", None)).unwrap();
        assert_eq!(updated.id, saved.id);
        assert_eq!(updated.content, "new");
        assert!(updated.remark.is_none());
        assert_eq!(updated.code_type, saved.code_type);
        assert_eq!(updated.timestamp, saved.timestamp);
    }

    #[test]
    fn test_update_missing_record() {
        let db = test_db();
        let err = update(&db, 42, &RecordUpdate::new("x", None)).unwrap_err();
        assert!(matches!(err, DatabaseError::NotFound { id: 42 }));
    }

    #[test]
    fn test_update_rejects_empty_content() {
        let db = test_db();
        let saved = insert(&db, &sample("keep", 10)).unwrap();
        let err = update(&db, saved.id, &RecordUpdate::new("", None)).unwrap_err();
        assert!(matches!(err, DatabaseError::EmptyContent));
        assert_eq!(find_by_id(&db, saved.id).unwrap().unwrap().content, "keep");
    }

    #[test]
    fn test_delete() {
        let db = test_db();
        let saved = insert(&db, &sample("gone", 1)).unwrap();
        assert!(delete(&db, saved.id).unwrap());
        assert!(!delete(&db, saved.id).unwrap());
        assert!(find_by_id(&db, saved.id).unwrap().is_none());
    }

    #[test]
    fn test_delete_all() {
        let db = test_db();
        insert(&db, &sample("a", 1)).unwrap();
        insert(&db, &sample("b", 2)).unwrap();
        assert_eq!(delete_all(&db).unwrap(), 2);
        assert!(list_recent(&db).unwrap().is_empty());
    }

    #[test]
    fn test_list_recent_orders_by_timestamp_desc() {
        let db = test_db();
        insert(&db, &sample("middle", 200)).unwrap();
        insert(&db, &sample("oldest", 100)).unwrap();
        insert(&db, &sample("newest", 300)).unwrap();

        let contents: Vec<String> = list_recent(&db)
            .unwrap()
            .into_iter()
            .map(|r| r.content)
            .collect();
        assert_eq!(contents, vec!["newest", "middle", "oldest"]);
    }

    #[test]
    fn test_list_recent_ties_newest_insert_first() {
        let db = test_db();
        insert(&db, &sample("first", 100)).unwrap();
        insert(&db, &sample("second", 100)).unwrap();
        let list = list_recent(&db).unwrap();
        assert_eq!(list[0].content, "second");
        assert_eq!(list[1].content, "first");
    }

    #[test]
    fn test_insert_many_is_all_or_nothing() {
        let db = test_db();
        let batch = vec![sample("ok", 1), sample("", 2), sample("also ok", 3)];
        assert!(insert_many(&db, &batch).is_err());
        assert_eq!(count(&db).unwrap(), 0);

        let batch = vec![sample("ok", 1), sample("also ok", 3)];
        assert_eq!(insert_many(&db, &batch).unwrap(), 2);
        assert_eq!(count(&db).unwrap(), 2);
    }
}

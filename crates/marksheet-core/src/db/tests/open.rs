use crate::db::*;
use crate::error::MarksheetError;
use tempfile::tempdir;

#[test]
fn test_database_open_creates_tables() {
    let dir = tempdir().unwrap();
    let db = Database::open(dir.path()).unwrap();

    let count: i64 = db
        .conn
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name IN ('students', 'evaluations', 'meta')",
            [],
            |row: &rusqlite::Row| row.get(0),
        )
        .unwrap();

    assert_eq!(count, 3);
    assert_eq!(db.get_schema_version().unwrap(), CURRENT_SCHEMA_VERSION);
    assert!(dir.path().join(DB_FILE).exists());
}

#[test]
fn test_database_reopen_keeps_data() {
    let dir = tempdir().unwrap();
    {
        let db = Database::open(dir.path()).unwrap();
        db.upsert_student(&crate::model::StudentRecord::new("S1", "Asha"))
            .unwrap();
    }
    let db = Database::open(dir.path()).unwrap();
    assert_eq!(db.get_student_count().unwrap(), 1);
}

#[test]
fn test_database_rejects_foreign_schema_version() {
    let dir = tempdir().unwrap();
    {
        let db = Database::open(dir.path()).unwrap();
        db.conn
            .execute(
                "UPDATE meta SET value = '42' WHERE key = 'schema_version'",
                [],
            )
            .unwrap();
    }

    let err = Database::open(dir.path()).unwrap_err();
    assert!(matches!(err, MarksheetError::InvalidStore { .. }));
}

#[test]
fn test_foreign_keys_enforced() {
    let db = Database::open_in_memory().unwrap();
    let enabled: i64 = db
        .conn
        .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
        .unwrap();
    assert_eq!(enabled, 1);
}

//! SQLite database module for marksheet

mod evaluations;
mod schema;
mod students;

use std::path::Path;

use rusqlite::{Connection, Transaction};

use crate::error::{MarksheetError, Result};

pub(crate) use evaluations::{delete_slice, upsert_evaluation};
pub use schema::{create_schema, SchemaCreateResult, CURRENT_SCHEMA_VERSION};
pub(crate) use students::upsert_student;

/// Database file name inside the store directory
pub const DB_FILE: &str = "marksheet.db";

/// SQLite database for marksheet
#[derive(Debug)]
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open or create the database inside the given store root
    pub fn open(store_root: &Path) -> Result<Self> {
        let db_path = store_root.join(DB_FILE);
        let conn = Connection::open(&db_path).map_err(|e| {
            MarksheetError::Other(format!(
                "failed to open database at {}: {}",
                db_path.display(),
                e
            ))
        })?;

        conn.pragma_update(None, "journal_mode", "WAL")
            .map_err(|e| MarksheetError::Other(format!("failed to enable WAL mode: {}", e)))?;

        Self::from_connection(conn)
    }

    /// Throwaway database, used by tests and dry runs
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| MarksheetError::Other(format!("failed to open in-memory database: {}", e)))?;
        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        conn.pragma_update(None, "foreign_keys", "ON")
            .map_err(|e| MarksheetError::Other(format!("failed to enable foreign keys: {}", e)))?;

        let created = create_schema(&conn)
            .map_err(|e| MarksheetError::Other(format!("failed to create database schema: {}", e)))?;

        if let SchemaCreateResult::Incompatible(version) = created {
            return Err(MarksheetError::InvalidStore {
                reason: format!(
                    "database schema version {} is not supported (expected {})",
                    version, CURRENT_SCHEMA_VERSION
                ),
            });
        }

        Ok(Database { conn })
    }

    /// Begin a transaction; dropping it without commit rolls back
    pub fn transaction(&mut self) -> Result<Transaction<'_>> {
        self.conn
            .transaction()
            .map_err(|e| MarksheetError::transaction("begin", e))
    }

    pub fn get_student_count(&self) -> Result<i64> {
        self.conn
            .query_row("SELECT COUNT(*) FROM students", [], |r| r.get(0))
            .map_err(|e| MarksheetError::Other(format!("failed to get student count: {}", e)))
    }

    pub fn get_evaluation_count(&self) -> Result<i64> {
        self.conn
            .query_row("SELECT COUNT(*) FROM evaluations", [], |r| r.get(0))
            .map_err(|e| MarksheetError::Other(format!("failed to get evaluation count: {}", e)))
    }

    pub fn get_schema_version(&self) -> Result<i32> {
        self.conn
            .query_row(
                "SELECT value FROM meta WHERE key = 'schema_version'",
                [],
                |r| {
                    let s: String = r.get(0)?;
                    Ok(s.parse().unwrap_or(0))
                },
            )
            .map_err(|e| MarksheetError::Other(format!("failed to get schema version: {}", e)))
    }
}

impl Drop for Database {
    fn drop(&mut self) {
        // Fold the WAL back into the main file so the next process sees everything
        let _ = self.conn.pragma_update(None, "wal_checkpoint", "TRUNCATE");
    }
}

#[cfg(test)]
mod tests;

//! SQLite database schema for marksheet

use rusqlite::{Connection, Result};

pub const CURRENT_SCHEMA_VERSION: i32 = 1;

/// Result of schema creation
#[derive(Debug, PartialEq, Eq)]
pub enum SchemaCreateResult {
    /// Fresh database, tables created
    Created,
    /// Existing database at the current version
    Current,
    /// Existing database written by a different schema version
    Incompatible(i32),
}

const SCHEMA_SQL: &str = r#"
-- Students, keyed by seat/enrollment number
CREATE TABLE IF NOT EXISTS students (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    seat_no TEXT NOT NULL UNIQUE,
    name TEXT NOT NULL,
    group_no TEXT,
    project_title TEXT,
    project_guide TEXT
);
CREATE INDEX IF NOT EXISTS idx_students_group ON students(group_no);
CREATE INDEX IF NOT EXISTS idx_students_guide ON students(project_guide);

-- One canonical evaluation per (student, phase, review)
CREATE TABLE IF NOT EXISTS evaluations (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    student_id INTEGER NOT NULL REFERENCES students(id) ON DELETE CASCADE,
    phase INTEGER NOT NULL,
    review INTEGER NOT NULL,
    criteria1 INTEGER NOT NULL,
    criteria2 INTEGER NOT NULL,
    criteria3 INTEGER NOT NULL,
    criteria4 INTEGER NOT NULL,
    total_marks INTEGER NOT NULL,
    member1_c1 INTEGER, member1_c2 INTEGER, member1_c3 INTEGER, member1_c4 INTEGER,
    member2_c1 INTEGER, member2_c2 INTEGER, member2_c3 INTEGER, member2_c4 INTEGER,
    guide_c1 INTEGER, guide_c2 INTEGER, guide_c3 INTEGER, guide_c4 INTEGER,
    imported_at TEXT,
    UNIQUE (student_id, phase, review)
);
CREATE INDEX IF NOT EXISTS idx_evaluations_slice ON evaluations(phase, review);

-- Database metadata
CREATE TABLE IF NOT EXISTS meta (
    key TEXT PRIMARY KEY,
    value TEXT
);
"#;

pub fn create_schema(conn: &Connection) -> Result<SchemaCreateResult> {
    let has_meta: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'meta')",
        [],
        |r| r.get(0),
    )?;

    let current_version: Option<i32> = if has_meta {
        conn.query_row(
            "SELECT value FROM meta WHERE key = 'schema_version'",
            [],
            |r| r.get::<_, String>(0).map(|s| s.parse().unwrap_or(0)),
        )
        .ok()
    } else {
        None
    };

    let result = match current_version {
        None => {
            conn.execute_batch(SCHEMA_SQL)?;
            conn.execute(
                "INSERT OR REPLACE INTO meta (key, value) VALUES ('schema_version', ?1)",
                [&CURRENT_SCHEMA_VERSION.to_string()],
            )?;
            tracing::info!(version = CURRENT_SCHEMA_VERSION, "database schema created");
            SchemaCreateResult::Created
        }
        Some(v) if v == CURRENT_SCHEMA_VERSION => SchemaCreateResult::Current,
        Some(v) => SchemaCreateResult::Incompatible(v),
    };

    Ok(result)
}

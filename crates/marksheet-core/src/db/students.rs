use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::error::{MarksheetError, Result};
use crate::model::{Student, StudentRecord, UpsertOutcome};

const STUDENT_COLUMNS: &str = "id, seat_no, name, group_no, project_title, project_guide";

fn student_from_row(row: &Row) -> rusqlite::Result<Student> {
    Ok(Student {
        id: row.get(0)?,
        seat_no: row.get(1)?,
        name: row.get(2)?,
        group_no: row.get(3)?,
        project_title: row.get(4)?,
        project_guide: row.get(5)?,
    })
}

/// Insert or merge a student keyed by seat number.
///
/// The name is always refreshed. Optional metadata only overwrites when the
/// incoming value is present; blanks leave the stored value untouched.
pub(crate) fn upsert_student(
    conn: &Connection,
    record: &StudentRecord,
) -> Result<(i64, UpsertOutcome)> {
    let existing: Option<i64> = conn
        .query_row(
            "SELECT id FROM students WHERE seat_no = ?1",
            params![record.seat_no],
            |row| row.get(0),
        )
        .optional()
        .map_err(|e| MarksheetError::db_operation("look up student", e))?;

    match existing {
        Some(id) => {
            conn.execute(
                "UPDATE students SET
                    name = ?2,
                    group_no = COALESCE(?3, group_no),
                    project_title = COALESCE(?4, project_title),
                    project_guide = COALESCE(?5, project_guide)
                 WHERE id = ?1",
                params![
                    id,
                    record.name,
                    record.group_no,
                    record.project_title,
                    record.project_guide,
                ],
            )
            .map_err(|e| {
                MarksheetError::Other(format!(
                    "failed to update student {}: {}",
                    record.seat_no, e
                ))
            })?;
            Ok((id, UpsertOutcome::Updated))
        }
        None => {
            conn.execute(
                "INSERT INTO students (seat_no, name, group_no, project_title, project_guide)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    record.seat_no,
                    record.name,
                    record.group_no,
                    record.project_title,
                    record.project_guide,
                ],
            )
            .map_err(|e| {
                MarksheetError::Other(format!(
                    "failed to insert student {}: {}",
                    record.seat_no, e
                ))
            })?;
            Ok((conn.last_insert_rowid(), UpsertOutcome::Created))
        }
    }
}

impl super::Database {
    pub fn upsert_student(&self, record: &StudentRecord) -> Result<(i64, UpsertOutcome)> {
        upsert_student(&self.conn, record)
    }

    pub fn get_student(&self, seat_no: &str) -> Result<Option<Student>> {
        self.conn
            .query_row(
                &format!("SELECT {} FROM students WHERE seat_no = ?1", STUDENT_COLUMNS),
                params![seat_no],
                student_from_row,
            )
            .optional()
            .map_err(|e| MarksheetError::db_operation("get student", e))
    }
}

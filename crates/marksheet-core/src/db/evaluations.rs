use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::error::{MarksheetError, Result};
use crate::model::{CanonicalEvaluation, Student, UpsertOutcome};
use crate::reconcile::EvaluatorMarks;

const EVALUATION_COLUMNS: &str = "e.student_id, e.phase, e.review, \
    e.criteria1, e.criteria2, e.criteria3, e.criteria4, e.total_marks, \
    e.member1_c1, e.member1_c2, e.member1_c3, e.member1_c4, \
    e.member2_c1, e.member2_c2, e.member2_c3, e.member2_c4, \
    e.guide_c1, e.guide_c2, e.guide_c3, e.guide_c4, \
    e.imported_at";

/// Student columns appended after the evaluation columns in joined queries
const JOINED_STUDENT_COLUMNS: &str =
    "s.id, s.seat_no, s.name, s.group_no, s.project_title, s.project_guide";

const STUDENT_OFFSET: usize = 21;

fn marks_at(row: &Row, start: usize) -> rusqlite::Result<EvaluatorMarks> {
    Ok(EvaluatorMarks([
        row.get(start)?,
        row.get(start + 1)?,
        row.get(start + 2)?,
        row.get(start + 3)?,
    ]))
}

/// A breakdown is only meaningful when all four cells are present
fn optional_marks_at(row: &Row, start: usize) -> rusqlite::Result<Option<EvaluatorMarks>> {
    let cells: [Option<u32>; 4] = [
        row.get(start)?,
        row.get(start + 1)?,
        row.get(start + 2)?,
        row.get(start + 3)?,
    ];
    match cells {
        [Some(a), Some(b), Some(c), Some(d)] => Ok(Some(EvaluatorMarks([a, b, c, d]))),
        _ => Ok(None),
    }
}

fn evaluation_from_row(row: &Row) -> rusqlite::Result<CanonicalEvaluation> {
    Ok(CanonicalEvaluation {
        student_id: row.get(0)?,
        phase: row.get(1)?,
        review: row.get(2)?,
        criteria: marks_at(row, 3)?,
        total_marks: row.get(7)?,
        member1: optional_marks_at(row, 8)?,
        member2: optional_marks_at(row, 12)?,
        guide: optional_marks_at(row, 16)?,
        imported_at: row.get(20)?,
    })
}

fn joined_from_row(row: &Row) -> rusqlite::Result<(Student, CanonicalEvaluation)> {
    let evaluation = evaluation_from_row(row)?;
    let student = Student {
        id: row.get(STUDENT_OFFSET)?,
        seat_no: row.get(STUDENT_OFFSET + 1)?,
        name: row.get(STUDENT_OFFSET + 2)?,
        group_no: row.get(STUDENT_OFFSET + 3)?,
        project_title: row.get(STUDENT_OFFSET + 4)?,
        project_guide: row.get(STUDENT_OFFSET + 5)?,
    };
    Ok((student, evaluation))
}

fn split(marks: Option<EvaluatorMarks>) -> [Option<u32>; 4] {
    match marks {
        Some(m) => m.as_array().map(Some),
        None => [None; 4],
    }
}

/// Write the evaluation for (student, phase, review), replacing every field
/// of an existing row.
pub(crate) fn upsert_evaluation(
    conn: &Connection,
    evaluation: &CanonicalEvaluation,
) -> Result<UpsertOutcome> {
    let existing: Option<i64> = conn
        .query_row(
            "SELECT id FROM evaluations WHERE student_id = ?1 AND phase = ?2 AND review = ?3",
            params![evaluation.student_id, evaluation.phase, evaluation.review],
            |row| row.get(0),
        )
        .optional()
        .map_err(|e| MarksheetError::db_operation("look up evaluation", e))?;

    let c = evaluation.criteria.as_array();
    let m1 = split(evaluation.member1);
    let m2 = split(evaluation.member2);
    let g = split(evaluation.guide);
    let imported_at = evaluation
        .imported_at
        .clone()
        .unwrap_or_else(|| Utc::now().to_rfc3339());

    conn.execute(
        "INSERT INTO evaluations (
            student_id, phase, review,
            criteria1, criteria2, criteria3, criteria4, total_marks,
            member1_c1, member1_c2, member1_c3, member1_c4,
            member2_c1, member2_c2, member2_c3, member2_c4,
            guide_c1, guide_c2, guide_c3, guide_c4,
            imported_at
         ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18, ?19, ?20, ?21)
         ON CONFLICT (student_id, phase, review) DO UPDATE SET
            criteria1 = excluded.criteria1,
            criteria2 = excluded.criteria2,
            criteria3 = excluded.criteria3,
            criteria4 = excluded.criteria4,
            total_marks = excluded.total_marks,
            member1_c1 = excluded.member1_c1,
            member1_c2 = excluded.member1_c2,
            member1_c3 = excluded.member1_c3,
            member1_c4 = excluded.member1_c4,
            member2_c1 = excluded.member2_c1,
            member2_c2 = excluded.member2_c2,
            member2_c3 = excluded.member2_c3,
            member2_c4 = excluded.member2_c4,
            guide_c1 = excluded.guide_c1,
            guide_c2 = excluded.guide_c2,
            guide_c3 = excluded.guide_c3,
            guide_c4 = excluded.guide_c4,
            imported_at = excluded.imported_at",
        params![
            evaluation.student_id,
            evaluation.phase,
            evaluation.review,
            c[0],
            c[1],
            c[2],
            c[3],
            evaluation.total_marks,
            m1[0],
            m1[1],
            m1[2],
            m1[3],
            m2[0],
            m2[1],
            m2[2],
            m2[3],
            g[0],
            g[1],
            g[2],
            g[3],
            imported_at,
        ],
    )
    .map_err(|e| {
        MarksheetError::Other(format!(
            "failed to write evaluation for student {} (phase {} review {}): {}",
            evaluation.student_id, evaluation.phase, evaluation.review, e
        ))
    })?;

    Ok(if existing.is_some() {
        UpsertOutcome::Updated
    } else {
        UpsertOutcome::Created
    })
}

/// Remove every evaluation of one (phase, review) slice; other slices and
/// the students themselves are untouched.
pub(crate) fn delete_slice(conn: &Connection, phase: u32, review: u32) -> Result<usize> {
    conn.execute(
        "DELETE FROM evaluations WHERE phase = ?1 AND review = ?2",
        params![phase, review],
    )
    .map_err(|e| MarksheetError::db_operation("delete evaluation slice", e))
}

impl super::Database {
    pub fn upsert_evaluation(&self, evaluation: &CanonicalEvaluation) -> Result<UpsertOutcome> {
        upsert_evaluation(&self.conn, evaluation)
    }

    pub fn delete_slice(&self, phase: u32, review: u32) -> Result<usize> {
        delete_slice(&self.conn, phase, review)
    }

    pub fn get_evaluation(
        &self,
        student_id: i64,
        phase: u32,
        review: u32,
    ) -> Result<Option<CanonicalEvaluation>> {
        self.conn
            .query_row(
                &format!(
                    "SELECT {} FROM evaluations e
                     WHERE e.student_id = ?1 AND e.phase = ?2 AND e.review = ?3",
                    EVALUATION_COLUMNS
                ),
                params![student_id, phase, review],
                evaluation_from_row,
            )
            .optional()
            .map_err(|e| MarksheetError::db_operation("get evaluation", e))
    }

    /// Every evaluation of one student, ordered by phase then review
    pub fn evaluations_for_student(&self, student_id: i64) -> Result<Vec<CanonicalEvaluation>> {
        let mut stmt = self
            .conn
            .prepare(&format!(
                "SELECT {} FROM evaluations e
                 WHERE e.student_id = ?1
                 ORDER BY e.phase, e.review",
                EVALUATION_COLUMNS
            ))
            .map_err(|e| MarksheetError::db_operation("prepare evaluation query", e))?;

        let rows = stmt
            .query_map(params![student_id], evaluation_from_row)
            .map_err(|e| MarksheetError::db_operation("query evaluations", e))?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(|e| MarksheetError::db_operation("read evaluation row", e))?;

        Ok(rows)
    }

    /// The (phase, review) slice joined with its students, ordered by group
    /// number then student name. Students without a group sort last.
    pub fn evaluations_for_slice(
        &self,
        phase: u32,
        review: u32,
    ) -> Result<Vec<(Student, CanonicalEvaluation)>> {
        let mut stmt = self
            .conn
            .prepare(&format!(
                "SELECT {}, {} FROM evaluations e
                 JOIN students s ON s.id = e.student_id
                 WHERE e.phase = ?1 AND e.review = ?2
                 ORDER BY s.group_no IS NULL, s.group_no, s.name, s.seat_no",
                EVALUATION_COLUMNS, JOINED_STUDENT_COLUMNS
            ))
            .map_err(|e| MarksheetError::db_operation("prepare slice query", e))?;

        let rows = stmt
            .query_map(params![phase, review], joined_from_row)
            .map_err(|e| MarksheetError::db_operation("query slice", e))?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(|e| MarksheetError::db_operation("read slice row", e))?;

        Ok(rows)
    }
}

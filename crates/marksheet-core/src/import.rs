//! Batch import of one spreadsheet into a (phase, review) slice
//!
//! An import is a full replace of its slice: existing evaluations for the
//! slice are deleted and every usable row is written back, all inside one
//! transaction. Rows with malformed marks are skipped and reported; anything
//! else that goes wrong aborts the import and leaves the database untouched.

use chrono::Utc;
use serde::Serialize;

use crate::columns::{map_headers, select_input_shape, HeaderMap, SemanticField};
use crate::db::{self, Database};
use crate::error::{MarksheetError, Result};
use crate::model::{non_blank, CanonicalEvaluation, StudentRecord, UpsertOutcome};
use crate::reconcile::{reconcile, InputShape, RawInput};
use crate::sheet::Sheet;
use crate::weights::{WeightRegistry, CRITERIA_COUNT};

/// A row that was skipped because its marks could not be read
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowFailure {
    /// 1-based spreadsheet row; the header is row 1
    pub row_number: usize,
    pub seat_no: String,
    pub reason: String,
}

/// Outcome of one import
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportReport {
    pub phase: u32,
    pub review: u32,
    pub shape: InputShape,
    /// Evaluations of the slice removed before writing
    pub deleted: usize,
    pub created: usize,
    pub updated: usize,
    pub new_students: usize,
    pub skipped_blank: usize,
    pub failures: Vec<RowFailure>,
}

impl ImportReport {
    fn new(phase: u32, review: u32, shape: InputShape) -> Self {
        Self {
            phase,
            review,
            shape,
            deleted: 0,
            created: 0,
            updated: 0,
            new_students: 0,
            skipped_blank: 0,
            failures: Vec::new(),
        }
    }

    /// Evaluations written by this import
    pub fn imported(&self) -> usize {
        self.created + self.updated
    }

    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }
}

/// Import `sheet` into the (phase, review) slice of `db`
#[tracing::instrument(skip(db, registry, sheet), fields(rows = sheet.rows.len()))]
pub fn import_sheet(
    db: &mut Database,
    registry: &WeightRegistry,
    sheet: &Sheet,
    phase: u32,
    review: u32,
) -> Result<ImportReport> {
    // Criterion synonyms depend on the configuration, so it is resolved first
    let config = registry.require(phase, review)?;

    let map = map_headers(&sheet.headers, config);
    tracing::debug!(columns = ?map.to_pairs(), "header mapping");

    let shape = select_input_shape(&map)?;
    tracing::debug!(%shape, "input shape selected");

    let mut report = ImportReport::new(phase, review, shape);
    let imported_at = Utc::now().to_rfc3339();

    let tx = db.transaction()?;

    report.deleted = db::delete_slice(&tx, phase, review)?;
    tracing::debug!(deleted = report.deleted, "slice cleared");

    for (index, row) in sheet.rows.iter().enumerate() {
        let row_number = index + 2;

        let seat_no = map.cell(row, SemanticField::SeatNo).unwrap_or("");
        let name = map.cell(row, SemanticField::Name).unwrap_or("");
        if seat_no.is_empty() || name.is_empty() {
            report.skipped_blank += 1;
            continue;
        }

        let raw = match extract_raw_input(&map, row, shape) {
            Ok(raw) => raw,
            Err(e) if e.is_row_level() => {
                tracing::warn!(row = row_number, seat_no, error = %e, "skipping row");
                report.failures.push(RowFailure {
                    row_number,
                    seat_no: seat_no.to_string(),
                    reason: e.to_string(),
                });
                continue;
            }
            Err(e) => return Err(e),
        };

        let result = reconcile(&raw, config)?;

        let record = student_record(&map, row, seat_no, name);
        let (student_id, student_outcome) = db::upsert_student(&tx, &record)?;
        if student_outcome == UpsertOutcome::Created {
            report.new_students += 1;
        }

        let mut evaluation =
            CanonicalEvaluation::from_reconciliation(student_id, phase, review, &result);
        evaluation.imported_at = Some(imported_at.clone());
        match db::upsert_evaluation(&tx, &evaluation)? {
            UpsertOutcome::Created => report.created += 1,
            UpsertOutcome::Updated => report.updated += 1,
        }
    }

    tx.commit()
        .map_err(|e| MarksheetError::transaction("commit", e))?;

    tracing::debug!(
        created = report.created,
        updated = report.updated,
        skipped_blank = report.skipped_blank,
        failed = report.failures.len(),
        "import committed"
    );

    Ok(report)
}

fn student_record(map: &HeaderMap, row: &[String], seat_no: &str, name: &str) -> StudentRecord {
    let optional = |field| map.cell(row, field).and_then(non_blank);
    StudentRecord {
        seat_no: seat_no.to_string(),
        name: name.to_string(),
        group_no: optional(SemanticField::GroupNo),
        project_title: optional(SemanticField::ProjectTitle),
        project_guide: optional(SemanticField::ProjectGuide),
    }
}

/// Pull the marks a shape needs out of one row
pub fn extract_raw_input(map: &HeaderMap, row: &[String], shape: InputShape) -> Result<RawInput> {
    let mark = |field: SemanticField| -> Result<f64> {
        let cell = map.cell(row, field).unwrap_or("");
        parse_mark(&field.to_string(), cell)
    };

    match shape {
        InputShape::ThreeEvaluatorTotals => Ok(RawInput::ThreeEvaluatorTotals {
            member1: mark(SemanticField::Member1)?,
            member2: mark(SemanticField::Member2)?,
            guide: mark(SemanticField::InternalGuide)?,
        }),
        InputShape::PerCriterionMarks => {
            let mut marks = [0.0; CRITERIA_COUNT];
            for (i, slot) in marks.iter_mut().enumerate() {
                *slot = mark(SemanticField::Criterion(i))?;
            }
            Ok(RawInput::PerCriterionMarks(marks))
        }
        InputShape::AggregateTotal => Ok(RawInput::AggregateTotal(mark(SemanticField::Total)?)),
    }
}

/// Read a mark cell. Blank counts as zero; anything else must be a finite,
/// non-negative number.
pub fn parse_mark(field: &str, cell: &str) -> Result<f64> {
    let trimmed = cell.trim();
    if trimmed.is_empty() {
        return Ok(0.0);
    }
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => Ok(value),
        _ => Err(MarksheetError::malformed_mark(field, trimmed)),
    }
}

//! Persisted records: students and their canonical evaluations

use serde::{Deserialize, Serialize};

use crate::reconcile::{EvaluatorMarks, Reconciliation};

/// Student metadata as read from one spreadsheet row.
///
/// Optional fields are `None` when the cell was blank; blanks never overwrite
/// stored values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentRecord {
    pub seat_no: String,
    pub name: String,
    pub group_no: Option<String>,
    pub project_title: Option<String>,
    pub project_guide: Option<String>,
}

impl StudentRecord {
    pub fn new(seat_no: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            seat_no: seat_no.into(),
            name: name.into(),
            group_no: None,
            project_title: None,
            project_guide: None,
        }
    }

    pub fn with_group(mut self, group_no: impl Into<String>) -> Self {
        self.group_no = non_blank(group_no.into());
        self
    }

    pub fn with_project_title(mut self, title: impl Into<String>) -> Self {
        self.project_title = non_blank(title.into());
        self
    }

    pub fn with_project_guide(mut self, guide: impl Into<String>) -> Self {
        self.project_guide = non_blank(guide.into());
        self
    }
}

/// Trimmed value, or `None` for an empty/blank cell
pub fn non_blank(value: impl AsRef<str>) -> Option<String> {
    let trimmed = value.as_ref().trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// A stored student
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub id: i64,
    pub seat_no: String,
    pub name: String,
    pub group_no: Option<String>,
    pub project_title: Option<String>,
    pub project_guide: Option<String>,
}

/// The stored result for one (student, phase, review)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalEvaluation {
    pub student_id: i64,
    pub phase: u32,
    pub review: u32,
    pub criteria: EvaluatorMarks,
    /// Always `criteria.total()`
    pub total_marks: u32,
    pub member1: Option<EvaluatorMarks>,
    pub member2: Option<EvaluatorMarks>,
    pub guide: Option<EvaluatorMarks>,
    /// RFC 3339 timestamp of the import that last wrote this row
    pub imported_at: Option<String>,
}

impl CanonicalEvaluation {
    pub fn from_reconciliation(
        student_id: i64,
        phase: u32,
        review: u32,
        result: &Reconciliation,
    ) -> Self {
        Self {
            student_id,
            phase,
            review,
            criteria: result.canonical,
            total_marks: result.total_marks,
            member1: Some(result.member1),
            member2: Some(result.member2),
            guide: Some(result.guide),
            imported_at: None,
        }
    }
}

/// Whether an upsert inserted a new row or overwrote an existing one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpsertOutcome {
    Created,
    Updated,
}

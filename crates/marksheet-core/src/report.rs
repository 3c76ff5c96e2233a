//! Read-only projections of stored evaluations
//!
//! Nothing here re-apportions: every number comes straight from the stored
//! canonical and per-evaluator fields.

use std::collections::BTreeMap;
use std::io::Write;

use serde::Serialize;

use crate::columns::normalize_header;
use crate::db::Database;
use crate::error::Result;
use crate::model::{CanonicalEvaluation, Student};
use crate::reconcile::EvaluatorMarks;
use crate::weights::{WeightConfig, CRITERIA_COUNT};

/// Bucket for students with no group number
pub const NO_GROUP: &str = "No Group";

/// One student's evaluation within a slice
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EvaluationRow {
    pub student: Student,
    pub evaluation: CanonicalEvaluation,
}

impl EvaluationRow {
    pub fn member1_total(&self) -> Option<u32> {
        self.evaluation.member1.map(|m| m.total())
    }

    pub fn member2_total(&self) -> Option<u32> {
        self.evaluation.member2.map(|m| m.total())
    }

    pub fn guide_total(&self) -> Option<u32> {
        self.evaluation.guide.map(|m| m.total())
    }
}

/// Evaluations of one slice, ordered by group number then name
pub fn evaluation_rows(db: &Database, phase: u32, review: u32) -> Result<Vec<EvaluationRow>> {
    Ok(db
        .evaluations_for_slice(phase, review)?
        .into_iter()
        .map(|(student, evaluation)| EvaluationRow {
            student,
            evaluation,
        })
        .collect())
}

/// Rows keyed by group number; blank groups collect under [`NO_GROUP`]
pub fn group_by_group(rows: &[EvaluationRow]) -> BTreeMap<String, Vec<&EvaluationRow>> {
    let mut groups: BTreeMap<String, Vec<&EvaluationRow>> = BTreeMap::new();
    for row in rows {
        let key = row
            .student
            .group_no
            .clone()
            .unwrap_or_else(|| NO_GROUP.to_string());
        groups.entry(key).or_default().push(row);
    }
    groups
}

/// Rows keyed by project guide. Students without a guide are left out.
pub fn group_by_guide(rows: &[EvaluationRow]) -> BTreeMap<String, Vec<&EvaluationRow>> {
    let mut guides: BTreeMap<String, Vec<&EvaluationRow>> = BTreeMap::new();
    for row in rows {
        if let Some(guide) = &row.student.project_guide {
            guides.entry(guide.clone()).or_default().push(row);
        }
    }
    guides
}

/// Display labels for the four criteria, e.g. `Literature Survey (20) [guide]`
pub fn criteria_header(config: &WeightConfig) -> Vec<String> {
    config
        .criteria
        .iter()
        .map(|c| {
            if c.guide_only {
                format!("{} ({}) [guide]", c.name, c.max_marks)
            } else {
                format!("{} ({})", c.name, c.max_marks)
            }
        })
        .collect()
}

fn csv_header(config: &WeightConfig) -> Vec<String> {
    let mut header: Vec<String> = ["group_no", "project_title", "seat_no", "name", "phase", "review"]
        .iter()
        .map(|s| s.to_string())
        .collect();

    for evaluator in ["member1", "member2", "guide"] {
        for i in 1..=config.criteria.len() {
            header.push(format!("{}_c{}", evaluator, i));
        }
        header.push(format!("{}_total", evaluator));
    }

    header.extend(config.criteria.iter().map(|c| normalize_header(&c.name)));
    header.push("total_marks".to_string());
    header
}

fn push_breakdown(record: &mut Vec<String>, marks: Option<EvaluatorMarks>, total: Option<u32>) {
    match marks {
        Some(marks) => record.extend(marks.as_array().iter().map(u32::to_string)),
        None => record.extend((0..CRITERIA_COUNT).map(|_| String::new())),
    }
    record.push(total.map(|t| t.to_string()).unwrap_or_default());
}

/// Write the slice as CSV, one line per student
pub fn write_csv<W: Write>(rows: &[EvaluationRow], config: &WeightConfig, writer: W) -> Result<()> {
    let mut out = csv::Writer::from_writer(writer);
    out.write_record(csv_header(config))?;

    for row in rows {
        let student = &row.student;
        let evaluation = &row.evaluation;
        let mut record = vec![
            student.group_no.clone().unwrap_or_default(),
            student.project_title.clone().unwrap_or_default(),
            student.seat_no.clone(),
            student.name.clone(),
            evaluation.phase.to_string(),
            evaluation.review.to_string(),
        ];
        push_breakdown(&mut record, evaluation.member1, row.member1_total());
        push_breakdown(&mut record, evaluation.member2, row.member2_total());
        push_breakdown(&mut record, evaluation.guide, row.guide_total());
        record.extend(evaluation.criteria.as_array().iter().map(u32::to_string));
        record.push(evaluation.total_marks.to_string());
        out.write_record(&record)?;
    }

    out.flush()?;
    Ok(())
}
